//! Game rooms: one actor per running arena, plus the manager that fills them.

pub mod server;
pub mod session;
pub mod messages;
pub mod tick;
