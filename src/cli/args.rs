//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// reps - Terminal fitness tracking: workouts, guided sessions, AI coach
#[derive(Parser, Debug)]
#[command(name = "reps")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to the fitness backend and cache the auth token
    Login {
        /// Username (prompted for if omitted)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Create a new account on the fitness backend
    Register {
        /// Username (prompted for if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Email address (prompted for if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Log out and discard the cached token
    Logout,

    /// Show the logged-in user's profile
    Whoami,

    /// Show or edit the fitness profile
    Profile {
        /// Update the profile bio
        #[arg(long)]
        bio: Option<String>,

        /// Update age in years
        #[arg(long)]
        age: Option<u32>,

        /// Update height in centimeters
        #[arg(long)]
        height: Option<f64>,

        /// Update weight in kilograms
        #[arg(long)]
        weight: Option<f64>,

        /// Update fitness goal
        #[arg(long)]
        goal: Option<String>,
    },

    /// List the exercise catalog
    Exercises {
        /// Search term to filter exercises by name or muscle group
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List available workouts
    Workouts {
        /// Search term to filter workouts by name
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a workout's exercises
    Workout {
        /// Workout ID or unique ID prefix
        id: String,
    },

    /// Record a workout in the interactive recorder
    Record {
        /// Workout ID or unique ID prefix
        id: String,
    },

    /// List locally cached session history
    History {
        /// Maximum number of sessions to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Search term to filter by workout name
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List training plans
    Plans,

    /// Show a plan's workout schedule
    Plan {
        /// Plan ID or unique ID prefix
        id: String,
    },

    /// Chat with the AI coach
    Chat {
        /// Resume an existing chat session by ID
        #[arg(short, long)]
        session: Option<String>,

        /// List saved chat sessions instead of chatting
        #[arg(short, long, conflicts_with = "session")]
        list: bool,
    },

    /// Launch the interactive TUI
    Tui,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,

        /// Value to set
        value: String,
    },
}
