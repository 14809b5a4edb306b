//! Backend trait the recording session depends on.
//!
//! Keeps the session controller decoupled from the concrete HTTP client so
//! tests can drive it against an in-memory fake.

use anyhow::Result;
use async_trait::async_trait;

use crate::api::models::{CompletedSet, NewSet, Workout, WorkoutRecord};

#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Fetch the workout template for a session.
    async fn fetch_workout(&self, workout_id: &str) -> Result<Workout>;

    /// Open a server-side workout record; the session uses its uuid for all
    /// subsequent scoped calls.
    async fn open_record(&self, workout_id: &str) -> Result<WorkoutRecord>;

    /// Log one executed set under an open workout record.
    async fn log_set(&self, record_id: &str, set: NewSet) -> Result<CompletedSet>;

    /// Persist the final elapsed duration for a workout record.
    async fn complete_record(&self, record_id: &str, duration_secs: u64) -> Result<()>;
}
