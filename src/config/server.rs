//! Server bootstrap constants.

/// Address the HTTP/WebSocket server binds to.
pub const BIND_ADDRESS: &str = "0.0.0.0";

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 2567;

/// Environment variable overriding [`DEFAULT_PORT`].
pub const PORT_ENV: &str = "PORT";

/// Port from the environment, falling back to [`DEFAULT_PORT`] when unset or invalid.
pub fn port_from_env() -> u16 {
    match std::env::var(PORT_ENV) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("[Config] Ignoring invalid {}={:?}, using {}", PORT_ENV, raw, DEFAULT_PORT);
            DEFAULT_PORT
        }),
        Err(_) => DEFAULT_PORT,
    }
}
