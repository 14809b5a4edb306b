//! Local storage module for reps
//!
//! Keeps a small SQLite cache of completed sessions so history and the
//! dashboard work offline. The backend remains the source of truth.

mod database;
mod models;

pub use database::Database;
pub use models::{SessionSummary, StoredSet};
