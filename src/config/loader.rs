//! JSON game configuration.
//!
//! Read once at startup and shared by every room. The file mirrors the
//! client-facing format: camelCase keys, start positions that may be negative
//! (measured from the far edge, resolved by the arena).

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::types::PlayerInitialState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Players needed to start a room; also the room capacity.
    pub clients_to_play: usize,
    /// Side of the square arena, in cells.
    pub area_virtual_size: i32,
    /// One slot per join position, in join order.
    pub initial_states: Vec<PlayerInitialState>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid game configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("clientsToPlay must be at least 1")]
    NoClients,

    #[error("areaVirtualSize must be positive, got {0}")]
    InvalidAreaSize(i32),

    #[error("{clients} clients to play but only {states} initial states")]
    NotEnoughInitialStates { clients: usize, states: usize },

    #[error("initial state {slot} cannot be placed on a {size}x{size} arena")]
    UnresolvableStart { slot: usize, size: i32 },
}

impl GameConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the preconditions the arena relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clients_to_play == 0 {
            return Err(ConfigError::NoClients);
        }
        if self.area_virtual_size <= 0 {
            return Err(ConfigError::InvalidAreaSize(self.area_virtual_size));
        }
        if self.initial_states.len() < self.clients_to_play {
            return Err(ConfigError::NotEnoughInitialStates {
                clients: self.clients_to_play,
                states: self.initial_states.len(),
            });
        }
        let limit = self.area_virtual_size;
        for (slot, state) in self.initial_states.iter().enumerate() {
            let pos = state
                .normalized(limit)
                .ok_or(ConfigError::UnresolvableStart { slot: slot + 1, size: limit })?
                .start_position;
            if !(0..limit).contains(&pos.x) || !(0..limit).contains(&pos.y) {
                warn!(
                    "[Config] Initial state {} starts outside the {}x{} arena at {}",
                    slot + 1,
                    limit,
                    limit,
                    pos
                );
            }
        }
        Ok(())
    }
}

/// Load and validate the game configuration at `path`.
pub fn load_game_config(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = GameConfig::from_json(&raw)?;
    info!(
        "[Config] Loaded {}: {} clients, {}x{} arena",
        path.display(),
        config.clients_to_play,
        config.area_virtual_size,
        config.area_virtual_size
    );
    Ok(config)
}
