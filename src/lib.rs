//! reps - A terminal client for fitness tracking
//!
//! Workout browsing, guided recording sessions with rest/exercise timers,
//! and an AI coach, all backed by a remote fitness API.

pub mod api;
pub mod chat;
pub mod cli;
pub mod config;
pub mod session;
pub mod storage;
pub mod tui;

use thiserror::Error;

/// Main error type for reps
#[derive(Error, Debug)]
pub enum RepsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Not logged in. Run `reps login` first.")]
    Unauthenticated,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RepsError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "reps";
