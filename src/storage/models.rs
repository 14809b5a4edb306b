//! Data models for the local history cache

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed recording session, as cached locally after the backend
/// acknowledged completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Server-assigned workout record uuid
    pub id: String,

    /// Workout name at the time of recording
    pub workout_name: String,

    /// When the session was recorded
    pub recorded_at: DateTime<Utc>,

    /// Final elapsed duration in seconds
    pub duration_secs: u64,

    /// Number of sets logged during the session
    pub total_sets: u32,
}

impl SessionSummary {
    pub fn new(id: String, workout_name: String, duration_secs: u64, total_sets: u32) -> Self {
        Self {
            id,
            workout_name,
            recorded_at: Utc::now(),
            duration_secs,
            total_sets,
        }
    }
}

/// One logged set inside a cached session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSet {
    pub id: i64,
    pub session_id: String,
    pub exercise: String,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub duration_secs: Option<u64>,
    pub logged_at: DateTime<Utc>,
}

impl StoredSet {
    pub fn new(
        session_id: String,
        exercise: String,
        reps: Option<u32>,
        weight: Option<f64>,
        duration_secs: Option<u64>,
        logged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0, // assigned by the database
            session_id,
            exercise,
            reps,
            weight,
            duration_secs,
            logged_at,
        }
    }
}
