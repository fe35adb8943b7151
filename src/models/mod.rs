//! Domain models
//!
//! This module contains all domain models representing game entities
//! and concepts. Models are pure data structures with minimal logic.

pub mod constants;
pub mod difficulty;
pub mod position;
pub mod rng;
pub mod enemy;
pub mod stronghold;
pub mod sector;
pub mod subsystems;
pub mod ship;
pub mod game_state;
pub mod galaxy;
pub mod events;
pub mod errors;
