//! Light-trail simulation engine.
//!
//! Pure and synchronous: no I/O, no timers. The room actor drives it one
//! tick at a time.

pub mod types;
pub mod error;
pub mod state;

pub mod entities;
pub mod grid;
pub mod systems;

#[cfg(test)]
mod tests;
