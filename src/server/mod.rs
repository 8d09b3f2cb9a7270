// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the backend server components around the engine:
//! - Application state management
//! - HTTP/WebSocket routing
//! - Game rooms (join-or-create, tick loop, outcome notifications)

pub mod state;
pub mod router;
pub mod game_room;
pub mod ws_error;
