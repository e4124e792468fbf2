pub mod catalog;
pub mod geometry;
pub mod macros;
pub mod prefs;
pub mod session;
pub mod wheel;

/// Unix socket the overlay listens on for `show`/`hide` and host state updates.
pub const SOCKET_PATH: &str = "/tmp/gpwheel.sock";
