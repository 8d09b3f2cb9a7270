//! Game configuration constants.
//! 
//! This module defines the main gameplay parameters that are not part of the
//! JSON game configuration.

use std::time::Duration;

/// Interval between two simulation ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Game configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "gameconfig.json";

/// Environment variable overriding [`DEFAULT_CONFIG_FILE`].
pub const CONFIG_FILE_ENV: &str = "GAME_CONFIG";
