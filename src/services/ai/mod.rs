//! Hostile AI
//!
//! Per-unit behavior controllers and the squadron coordinator that steers
//! groups of them. Both refer to units by id only; the galaxy owns the units.

mod controller;
mod formation;
mod squadron;

pub use controller::{patrol_loop, AiAction, AiController, AiDirector, AiState};
pub use formation::Formation;
pub use squadron::{Squadron, SquadronCoordinator, SquadronObjective};
