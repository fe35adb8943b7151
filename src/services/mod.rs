//! Game services
//!
//! Rules that act on the models: subsystem damage, the energy economy,
//! torpedo combat, starbase sieges and docking, and hostile AI.

pub mod ai;
pub mod combat;
pub mod damage;
pub mod energy;
pub mod starbase;
