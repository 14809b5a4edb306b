//! Backend API module for reps
//!
//! REST client and data models for the fitness backend, plus the
//! `SessionBackend` trait the recording session depends on.

mod backend;
mod client;
mod models;

pub use backend::SessionBackend;
pub use client::ApiClient;
pub use models::{
    AuthResponse, ChatMessage, ChatSession, CompletedSet, Exercise, NewSet, Plan, PlanWorkout,
    User, UserProfile, Workout, WorkoutExercise, WorkoutList, WorkoutRecord,
};
