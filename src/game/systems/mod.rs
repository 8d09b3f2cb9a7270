//! Per-tick systems run by [`Arena::step`](crate::game::state::Arena::step).
//!
//! Each phase runs over every player before the next one starts.

pub mod movement;
pub mod collision;
pub mod rules;

pub use movement::*;
pub use collision::*;
pub use rules::*;
