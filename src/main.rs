//! Main entry point for the backend server.
//!
//! Loads the game configuration, starts the room manager actor, and launches
//! the HTTP server with the WebSocket endpoint clients play through.

use std::env;
use std::sync::Arc;

use actix::Actor;
use actix_web::{web, App, HttpServer};
use log::{error, info};
use config::game::{CONFIG_FILE_ENV, DEFAULT_CONFIG_FILE};
use config::server::{BIND_ADDRESS, port_from_env};
use server::game_room::server::RoomManager;

pub mod config;
mod server;
mod game;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from the RUST_LOG environment variable.
    env_logger::init();

    let config_path = env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let game_config = match config::loader::load_game_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("[Config] {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
        }
    };

    // Start the RoomManager actor (hands out rooms, one arena each).
    let room_manager = RoomManager::new(Arc::new(game_config)).start();

    // Shared application state for HTTP/WebSocket handlers.
    let state = web::Data::new(server::state::AppState::new(room_manager));

    let port = port_from_env();
    info!("Listening on ws://{}:{}", BIND_ADDRESS, port);

    // Start the HTTP server with the WebSocket endpoint.
    HttpServer::new(move || {
        App::new()
            .wrap(
                actix_web::middleware::DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", "*"))
                    .add(("Access-Control-Allow-Headers", "*"))
            )
            .app_data(state.clone())
            .configure(crate::server::router::config)
    })
    .bind((BIND_ADDRESS, port))?
    .run()
    .await
}
