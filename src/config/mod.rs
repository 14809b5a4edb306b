//! Configuration module for reps
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::Settings;
