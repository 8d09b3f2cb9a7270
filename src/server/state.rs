// src/server/state.rs

//! Application state for the backend server.
//!
//! Holds the address of the room manager actor, shared between HTTP/WebSocket
//! handlers and the actor system.

use actix::Addr;
use crate::server::game_room::server::RoomManager;

/// Shared application state, injected into HTTP/WebSocket handlers.
pub struct AppState {
    /// Address of the room manager actor (hands out rooms in join-or-create order).
    pub room_manager: Addr<RoomManager>,
}

impl AppState {
    /// Create a new AppState with the given actor address.
    pub fn new(room_manager: Addr<RoomManager>) -> Self {
        AppState { room_manager }
    }
}
