/// Main configuration module.
/// 
/// Re-exports submodules for game tuning, server bootstrap and the JSON game configuration.
pub mod game;
pub mod server;
pub mod loader;
