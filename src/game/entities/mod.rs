//! Game entities module.
//!
//! Players are the only entities in the arena; trails live in the grid.

pub mod player;

pub use player::*;
