use thiserror::Error;

use super::enemy::UnitId;

/// Host-side contract breaches and persistence failures.
///
/// Ordinary gameplay refusals (not enough energy, weapons offline, too fast
/// to dock) are never errors; those operations return `bool`, `Option` or a
/// result struct instead.
#[derive(Debug, Error)]
pub enum GameError {
    /// A coordinate outside the 16x16 grid was passed to a mutating operation
    #[error("sector ({x}, {y}) is outside the galaxy")]
    InvalidCoordinate { x: i32, y: i32 },
    /// The named unit does not exist in the galaxy
    #[error("unknown hostile unit {0}")]
    UnknownUnit(UnitId),
    /// A command arrived after the mission ended
    #[error("mission is no longer active")]
    MissionInactive,
    /// Snapshot encoding or decoding failed
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;
