//! Data models for the fitness backend API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Extended profile returned by `/user/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub fitness_level: Option<String>,
    #[serde(default)]
    pub fitness_goal: Option<String>,
}

/// Token response from the login endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub auth_token: String,
}

/// An exercise from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub muscles: Vec<String>,
}

/// One prescribed exercise inside a workout template.
///
/// `sets` is the target set count; `reps`, `weight`, `duration` and `rest`
/// are per-set defaults the recorder seeds its draft rows from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
    #[serde(default)]
    pub uuid: String,
    pub exercise: String,
    #[serde(default)]
    pub order: u32,
    pub sets: u32,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub rest: Option<u64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A workout template. Fetched once per session and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
    #[serde(default)]
    pub total_duration: u64,
}

/// Paginated workout listing
#[derive(Debug, Clone, Deserialize)]
pub struct WorkoutList {
    #[serde(default)]
    pub results: Vec<Workout>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// Payload for logging one executed set. Copied from a draft row, never a
/// reference into it.
#[derive(Debug, Clone, Serialize)]
pub struct NewSet {
    pub exercise: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<u64>,
    /// Perceived effort, 1-10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<u8>,
}

/// A persisted set record, acknowledged by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedSet {
    pub uuid: String,
    pub exercise: String,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub rest: Option<u64>,
    #[serde(default)]
    pub pre: Option<u8>,
    pub datetime: DateTime<Utc>,
}

/// A server-side workout recording session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub uuid: String,
    pub workout: String,
    #[serde(default)]
    pub exercises: Vec<CompletedSet>,
}

/// A workout inside a training plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanWorkout {
    pub uuid: String,
    pub workout: String,
    pub day: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A training plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub uuid: String,
    #[serde(default)]
    pub creator: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub workouts: Vec<PlanWorkout>,
    #[serde(default)]
    pub public: bool,
}

/// A chat session with the AI coach
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub uuid: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// One chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: i64,
    pub content: String,
    pub role: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Workout {
    /// Estimated total seconds: per-set duration plus rest between sets.
    pub fn estimated_seconds(&self) -> u64 {
        self.exercises
            .iter()
            .map(|ex| {
                let work = ex.duration.unwrap_or(0) * u64::from(ex.sets);
                let rest = ex.rest.unwrap_or(0) * u64::from(ex.sets.saturating_sub(1));
                work + rest
            })
            .sum()
    }

    /// Sum of target sets across all prescriptions.
    pub fn total_target_sets(&self) -> u32 {
        self.exercises.iter().map(|ex| ex.sets).sum()
    }
}
