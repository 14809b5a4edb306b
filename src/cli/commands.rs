//! CLI command implementations

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::api::{ApiClient, Plan, Workout};
use crate::chat::ChatSocket;
use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::storage::Database;

/// Log in and cache the auth token
pub async fn login(settings: &Settings, username: Option<String>) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt("Username: ")?,
    };
    let password = prompt_password("Password: ")?;

    let client = ApiClient::from_settings(settings)?;
    let auth = client.login(username.trim(), &password).await?;

    settings.store_token(&auth.auth_token)?;
    println!("Logged in as {}", username.trim());

    Ok(())
}

/// Create a new account, then hint at the next step
pub async fn register(
    settings: &Settings,
    username: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt("Username: ")?,
    };
    let email = match email {
        Some(e) => e,
        None => prompt("Email: ")?,
    };
    let password = prompt_password("Password: ")?;
    let confirm = prompt_password("Confirm password: ")?;
    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }

    let client = ApiClient::from_settings(settings)?;
    let user = client
        .register(username.trim(), email.trim(), &password)
        .await?;

    println!("Account created for {}", user.username);
    println!("Run `reps login` to sign in");

    Ok(())
}

/// Log out and discard the cached token
pub async fn logout(settings: &Settings) -> Result<()> {
    let client = ApiClient::from_settings(settings)?;

    if client.is_authenticated() {
        // Best effort: revoke server-side, but always clear the local token.
        if let Err(e) = client.logout().await {
            tracing::warn!("Server-side logout failed: {:#}", e);
        }
    }

    settings.clear_token()?;
    println!("Logged out");

    Ok(())
}

/// Show the logged-in user's profile
pub async fn whoami(settings: &Settings) -> Result<()> {
    let client = require_auth(settings)?;
    let profile = client.get_profile().await?;

    println!("Username: {}", profile.username);
    println!("Email: {}", profile.email);
    if let Some(level) = &profile.fitness_level {
        println!("Level: {}", level);
    }
    if let Some(goal) = &profile.fitness_goal {
        println!("Goal: {}", goal);
    }
    if let Some(bmi) = profile.bmi {
        println!("BMI: {:.1}", bmi);
    }

    Ok(())
}

/// Fields accepted by `reps profile` edit flags
pub struct ProfilePatch {
    pub bio: Option<String>,
    pub age: Option<u32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: Option<String>,
}

impl ProfilePatch {
    fn is_empty(&self) -> bool {
        self.bio.is_none()
            && self.age.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.goal.is_none()
    }

    fn to_json(&self) -> serde_json::Value {
        let mut patch = serde_json::Map::new();
        if let Some(bio) = &self.bio {
            patch.insert("bio".to_string(), bio.as_str().into());
        }
        if let Some(age) = self.age {
            patch.insert("age".to_string(), age.into());
        }
        if let Some(height) = self.height {
            patch.insert("height".to_string(), height.into());
        }
        if let Some(weight) = self.weight {
            patch.insert("weight".to_string(), weight.into());
        }
        if let Some(goal) = &self.goal {
            patch.insert("fitness_goal".to_string(), goal.as_str().into());
        }
        serde_json::Value::Object(patch)
    }
}

/// Show the fitness profile, or update it when edit flags are given
pub async fn profile(settings: &Settings, patch: ProfilePatch) -> Result<()> {
    let client = require_auth(settings)?;

    let profile = if patch.is_empty() {
        client.get_profile().await?
    } else {
        let updated = client.update_profile(&patch.to_json()).await?;
        println!("Profile updated");
        updated
    };

    println!("Username: {}", profile.username);
    println!("Email: {}", profile.email);
    if let Some(bio) = profile.bio.as_deref().filter(|b| !b.is_empty()) {
        println!("Bio: {}", bio);
    }
    if let Some(age) = profile.age {
        println!("Age: {}", age);
    }
    if let Some(height) = profile.height {
        println!("Height: {} cm", height);
    }
    if let Some(weight) = profile.weight {
        println!("Weight: {} kg", weight);
    }
    if let Some(bmi) = profile.bmi {
        println!("BMI: {:.1}", bmi);
    }
    if let Some(level) = &profile.fitness_level {
        println!("Level: {}", level);
    }
    if let Some(goal) = &profile.fitness_goal {
        println!("Goal: {}", goal);
    }

    Ok(())
}

/// List the exercise catalog
pub async fn list_exercises(settings: &Settings, search: Option<String>) -> Result<()> {
    let client = require_auth(settings)?;
    let exercises = client.list_exercises().await?;

    let query = search.map(|s| s.to_lowercase());
    let exercises: Vec<_> = exercises
        .iter()
        .filter(|ex| match &query {
            Some(q) => {
                ex.name.to_lowercase().contains(q)
                    || ex.muscles.iter().any(|m| m.to_lowercase().contains(q))
            }
            None => true,
        })
        .collect();

    if exercises.is_empty() {
        println!("No exercises found");
        return Ok(());
    }

    println!("{:<26} {:<30}", "Exercise", "Muscles");
    println!("{}", "-".repeat(56));

    for exercise in exercises {
        println!(
            "{:<26} {:<30}",
            truncate(&exercise.name, 24),
            truncate(&exercise.muscles.join(", "), 28),
        );
    }

    Ok(())
}

/// List available workouts
pub async fn list_workouts(settings: &Settings, search: Option<String>) -> Result<()> {
    let client = require_auth(settings)?;
    let list = client.list_workouts().await?;

    let query = search.map(|s| s.to_lowercase());
    let workouts: Vec<_> = list
        .results
        .iter()
        .filter(|w| match &query {
            Some(q) => w.name.to_lowercase().contains(q),
            None => true,
        })
        .collect();

    if workouts.is_empty() {
        println!("No workouts found");
        return Ok(());
    }

    println!(
        "{:<10} {:<30} {:<10} {:<10}",
        "ID", "Name", "Exercises", "Est. time"
    );
    println!("{}", "-".repeat(62));

    for workout in workouts {
        println!(
            "{:<10} {:<30} {:<10} {:<10}",
            id_prefix(&workout.uuid),
            truncate(&workout.name, 28),
            workout.exercises.len(),
            format_duration(workout.estimated_seconds()),
        );
    }

    Ok(())
}

/// Show a workout's exercises
pub async fn show_workout(settings: &Settings, id: &str) -> Result<()> {
    let client = require_auth(settings)?;
    let workout = resolve_workout(&client, id).await?;

    println!("Workout: {}", workout.name);
    if let Some(description) = workout.description.as_deref() {
        println!("{}", description);
    }
    println!(
        "Estimated time: {}",
        format_duration(workout.estimated_seconds())
    );
    println!();

    println!(
        "{:<4} {:<24} {:<6} {:<12} {:<10} {:<6}",
        "#", "Exercise", "Sets", "Reps / Time", "Weight", "Rest"
    );
    println!("{}", "-".repeat(64));

    for (i, ex) in workout.exercises.iter().enumerate() {
        let reps_or_time = match (ex.reps, ex.duration) {
            (Some(reps), _) => format!("{} reps", reps),
            (None, Some(duration)) => format!("{} sec", duration),
            (None, None) => "-".to_string(),
        };
        let weight = ex
            .weight
            .map(|w| format!("{} kg", w))
            .unwrap_or_else(|| "-".to_string());
        let rest = ex
            .rest
            .map(|r| format!("{}s", r))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<4} {:<24} {:<6} {:<12} {:<10} {:<6}",
            i + 1,
            truncate(&ex.exercise, 22),
            format!("{}x", ex.sets),
            reps_or_time,
            weight,
            rest,
        );
    }

    Ok(())
}

/// Record a workout in the interactive recorder
pub async fn record_workout(settings: &Settings, id: &str) -> Result<()> {
    let client = require_auth(settings)?;
    let workout = resolve_workout(&client, id).await?;

    let outcome = crate::tui::run_recorder(settings, &workout.uuid).await?;

    match outcome {
        Some(summary) => {
            let db = Database::open(settings)?;
            db.insert_session(&summary.session)?;
            db.insert_sets(&summary.sets)?;

            println!(
                "Workout completed: {} ({}, {} sets)",
                summary.session.workout_name,
                format_duration(summary.session.duration_secs),
                summary.session.total_sets,
            );
        }
        None => {
            println!("Session abandoned");
        }
    }

    Ok(())
}

/// List locally cached session history
pub async fn show_history(settings: &Settings, limit: usize, search: Option<String>) -> Result<()> {
    let db = Database::open(settings)?;

    let sessions = if let Some(query) = search {
        db.search_sessions(&query, limit)?
    } else {
        db.list_sessions(limit)?
    };

    if sessions.is_empty() {
        println!("No recorded sessions yet");
        return Ok(());
    }

    println!(
        "{:<10} {:<30} {:<12} {:<10} {:<6}",
        "ID", "Workout", "Date", "Duration", "Sets"
    );
    println!("{}", "-".repeat(70));

    for session in sessions {
        println!(
            "{:<10} {:<30} {:<12} {:<10} {:<6}",
            id_prefix(&session.id),
            truncate(&session.workout_name, 28),
            session.recorded_at.format("%Y-%m-%d"),
            format_duration(session.duration_secs),
            session.total_sets,
        );
    }

    Ok(())
}

/// List training plans
pub async fn list_plans(settings: &Settings) -> Result<()> {
    let client = require_auth(settings)?;
    let plans = client.list_plans().await?;

    if plans.is_empty() {
        println!("No plans available");
        return Ok(());
    }

    println!("{:<10} {:<30} {:<10}", "ID", "Name", "Workouts");
    println!("{}", "-".repeat(52));

    for plan in plans {
        println!(
            "{:<10} {:<30} {:<10}",
            id_prefix(&plan.uuid),
            truncate(&plan.name, 28),
            plan.workouts.len(),
        );
    }

    Ok(())
}

/// Show a plan's workout schedule
pub async fn show_plan(settings: &Settings, id: &str) -> Result<()> {
    let client = require_auth(settings)?;
    let plan = resolve_plan(&client, id).await?;

    println!("Plan: {}", plan.name);
    if !plan.creator.is_empty() {
        println!("By: {}", plan.creator);
    }
    if let Some(description) = plan.description.as_deref() {
        println!("{}", description);
    }
    println!();

    if plan.workouts.is_empty() {
        println!("No workouts scheduled");
        return Ok(());
    }

    println!("{:<6} {:<30} {:<24}", "Day", "Workout", "Notes");
    println!("{}", "-".repeat(62));

    let mut workouts: Vec<_> = plan.workouts.iter().collect();
    workouts.sort_by_key(|w| w.day);

    for entry in workouts {
        println!(
            "{:<6} {:<30} {:<24}",
            entry.day,
            truncate(&entry.workout, 28),
            truncate(entry.notes.as_deref().unwrap_or("-"), 22),
        );
    }

    Ok(())
}

/// List saved chat sessions
pub async fn list_chat_sessions(settings: &Settings) -> Result<()> {
    let client = require_auth(settings)?;
    let sessions = client.list_chat_sessions().await?;

    if sessions.is_empty() {
        println!("No chat sessions yet");
        return Ok(());
    }

    println!("{:<10} {:<30} {:<12}", "ID", "Title", "Started");
    println!("{}", "-".repeat(54));

    for session in sessions {
        println!(
            "{:<10} {:<30} {:<12}",
            id_prefix(&session.uuid),
            truncate(&session.title, 28),
            session.created_at.format("%Y-%m-%d"),
        );
    }

    Ok(())
}

/// Chat with the AI coach in a line-oriented REPL
pub async fn chat(settings: &Settings, session: Option<String>) -> Result<()> {
    let client = require_auth(settings)?;

    let session_id = match session {
        Some(id) => {
            // Replay the transcript so a resumed conversation has context.
            let history = client.get_chat_messages(&id).await?;
            for message in &history {
                let speaker = if message.role == "user" { ">" } else { "coach:" };
                println!("{} {}", speaker, message.content);
            }
            id
        }
        None => {
            let title = format!("Chat {}", chrono::Local::now().format("%Y-%m-%d %H:%M"));
            let session = client.create_chat_session(&title).await?;
            println!("Started chat session {}", id_prefix(&session.uuid));
            session.uuid
        }
    };

    let mut socket = ChatSocket::connect(settings, &session_id).await?;
    println!("Connected. Type a message, or 'exit' to quit.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "exit" || message == "quit" {
            break;
        }

        socket.send(message).await?;
        let reply = socket.receive_reply().await?;
        println!("{}", reply);
    }

    socket.close().await?;
    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
        ConfigCommand::Set { key, value } => {
            // Edit the on-disk view so env overrides are not written back.
            let mut file_settings = Settings::load_file()?;
            file_settings.set_value(&key, &value)?;
            file_settings.save()?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}

// Helper functions

fn require_auth(settings: &Settings) -> Result<ApiClient> {
    let client = ApiClient::from_settings(settings)?;
    if !client.is_authenticated() {
        anyhow::bail!("Not logged in. Run `reps login` first.");
    }
    Ok(client)
}

/// Resolve a workout by uuid or unique uuid/name prefix.
async fn resolve_workout(client: &ApiClient, id: &str) -> Result<Workout> {
    if let Ok(workout) = client.get_workout(id).await {
        return Ok(workout);
    }

    let list = client.list_workouts().await?;
    let id_lower = id.to_lowercase();

    let matches: Vec<_> = list
        .results
        .iter()
        .filter(|w| w.uuid.starts_with(id) || w.name.to_lowercase().starts_with(&id_lower))
        .collect();

    match matches.len() {
        0 => anyhow::bail!("Workout not found: {}", id),
        1 => client.get_workout(&matches[0].uuid).await,
        _ => anyhow::bail!(
            "Ambiguous workout '{}' ({} matches). Use a longer prefix.",
            id,
            matches.len()
        ),
    }
}

/// Resolve a plan by uuid or unique uuid/name prefix.
async fn resolve_plan(client: &ApiClient, id: &str) -> Result<Plan> {
    if let Ok(plan) = client.get_plan(id).await {
        return Ok(plan);
    }

    let plans = client.list_plans().await?;
    let id_lower = id.to_lowercase();

    let matches: Vec<_> = plans
        .iter()
        .filter(|p| p.uuid.starts_with(id) || p.name.to_lowercase().starts_with(&id_lower))
        .collect();

    match matches.len() {
        0 => anyhow::bail!("Plan not found: {}", id),
        1 => client.get_plan(&matches[0].uuid).await,
        n => anyhow::bail!("Ambiguous plan '{}' ({} matches). Use a longer prefix.", id, n),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Read a line without echoing, using raw mode key events.
fn prompt_password(label: &str) -> Result<String> {
    use crossterm::event::{read, Event, KeyCode, KeyEventKind};
    use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

    print!("{}", label);
    std::io::stdout().flush()?;

    enable_raw_mode()?;
    let mut password = String::new();
    let result = loop {
        match read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Enter => break Ok(password.clone()),
                KeyCode::Backspace => {
                    password.pop();
                }
                KeyCode::Char(c) => password.push(c),
                KeyCode::Esc => break Ok(String::new()),
                _ => {}
            },
            Ok(_) => {}
            Err(e) => break Err(e.into()),
        }
    };
    disable_raw_mode()?;
    println!();

    result
}

fn id_prefix(id: &str) -> &str {
    &id[..id.len().min(8)]
}

fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_duration_handles_hours() {
        assert_eq!(format_duration(45), "0:45");
        assert_eq!(format_duration(90), "1:30");
        assert_eq!(format_duration(3700), "1:01:40");
    }

    #[test]
    fn id_prefix_handles_short_ids() {
        assert_eq!(id_prefix("abcdefghij"), "abcdefgh");
        assert_eq!(id_prefix("abc"), "abc");
    }
}
