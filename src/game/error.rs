use thiserror::Error;

use crate::game::types::PlayerId;

/// Errors raised while building an arena or seating a player.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena size must be positive, got {0}")]
    InvalidAreaSize(i32),

    #[error("no initial state for join index {index} ({available} configured)")]
    NoInitialState { index: usize, available: usize },

    #[error("initial state {0} cannot be resolved on this arena")]
    UnresolvableStart(usize),

    #[error("player {0} already joined this arena")]
    DuplicatePlayer(PlayerId),
}
