//! Star Raid Simulation Core
//!
//! A seeded, tick-driven space-combat simulation: a 16x16 sector galaxy of
//! hostile squadrons and friendly starbases, a starfighter with six
//! damageable subsystems and a finite energy reserve, torpedo combat, and
//! hostile AI.
//!
//! # Overview
//!
//! The host (renderer, input layer, test harness) owns one [`GameEngine`],
//! calls [`GameEngine::tick`] once per frame and drains the events it raised.
//! The player wins by destroying every hostile unit and loses when the ship
//! runs out of energy or the last starbase falls.
//!
//! # Modules
//!
//! - [`game_engine`] - Mission lifecycle and tick ordering
//! - [`models`] - Domain models (Galaxy, PlayerShip, HostileUnit, etc.)
//! - [`services`] - Rules (damage, energy, combat, starbases, AI)
//! - [`cli`] - Argument parsing for the headless driver
//!
//! # Example
//!
//! ```rust,no_run
//! use starraid::{Difficulty, GameEngine};
//!
//! let mut engine = GameEngine::new(Difficulty::Pilot, 42);
//! engine.tick(0.1);
//! for event in engine.drain_events() {
//!     println!("{:?}", event);
//! }
//! ```

pub mod cli;
pub mod game_engine;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use game_engine::GameEngine;
pub use models::difficulty::Difficulty;
pub use models::errors::{GameError, GameResult};
pub use models::events::GameEvent;
pub use models::game_state::{DefeatReason, GameState, MissionOutcome};
pub use services::combat::Direction;
