//! reps - Terminal fitness tracking: workouts, guided sessions, AI coach
//!
//! Entry point for the reps CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reps::cli::{Cli, Commands};
use reps::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Completions { shell } => {
            reps::cli::completions::print(shell);
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load()?;

            // Execute command
            match command {
                Commands::Login { username } => {
                    reps::cli::commands::login(&settings, username).await?;
                }
                Commands::Register { username, email } => {
                    reps::cli::commands::register(&settings, username, email).await?;
                }
                Commands::Logout => {
                    reps::cli::commands::logout(&settings).await?;
                }
                Commands::Whoami => {
                    reps::cli::commands::whoami(&settings).await?;
                }
                Commands::Profile {
                    bio,
                    age,
                    height,
                    weight,
                    goal,
                } => {
                    let patch = reps::cli::commands::ProfilePatch {
                        bio,
                        age,
                        height,
                        weight,
                        goal,
                    };
                    reps::cli::commands::profile(&settings, patch).await?;
                }
                Commands::Exercises { search } => {
                    reps::cli::commands::list_exercises(&settings, search).await?;
                }
                Commands::Workouts { search } => {
                    reps::cli::commands::list_workouts(&settings, search).await?;
                }
                Commands::Workout { id } => {
                    reps::cli::commands::show_workout(&settings, &id).await?;
                }
                Commands::Record { id } => {
                    reps::cli::commands::record_workout(&settings, &id).await?;
                }
                Commands::History { limit, search } => {
                    reps::cli::commands::show_history(&settings, limit, search).await?;
                }
                Commands::Plans => {
                    reps::cli::commands::list_plans(&settings).await?;
                }
                Commands::Plan { id } => {
                    reps::cli::commands::show_plan(&settings, &id).await?;
                }
                Commands::Chat { session, list } => {
                    if list {
                        reps::cli::commands::list_chat_sessions(&settings).await?;
                    } else {
                        reps::cli::commands::chat(&settings, session).await?;
                    }
                }
                Commands::Tui => {
                    reps::tui::run(&settings).await?;
                }
                Commands::Config(config_cmd) => {
                    reps::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
