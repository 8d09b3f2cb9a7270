//! HTTP and WebSocket routing configuration.
//!
//! Clients connect to a single endpoint and are seated in the next open room.

use actix_web::web;
use crate::server::game_room::session::ws_game;

/// Configure the application's HTTP/WebSocket routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/ws/game")
            .to(ws_game)
    );
}
