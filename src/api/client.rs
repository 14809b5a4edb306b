//! HTTP client for the fitness backend

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::api::backend::SessionBackend;
use crate::api::models::{
    AuthResponse, ChatMessage, ChatSession, CompletedSet, Exercise, NewSet, Plan, User,
    UserProfile, Workout, WorkoutList, WorkoutRecord,
};
use crate::config::Settings;

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client from settings. The token is resolved from config, the
    /// environment, or the cached token file; endpoints that require auth
    /// fail with a clear message if none is present.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(settings.api.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: settings.api.base_url.trim_end_matches('/').to_string(),
            token: settings.resolve_token(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(endpoint));
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Token {}", token));
        }
        builder
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.context("Request failed")?;
        let status = response.status();

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            anyhow::bail!("{}", flatten_error(status, &body));
        }

        if status == StatusCode::NO_CONTENT {
            return serde_json::from_value(json!({}))
                .context("Endpoint returned no content but caller expected a body");
        }

        response.json().await.context("Failed to parse response")
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        let response = builder.send().await.context("Request failed")?;
        let status = response.status();

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            anyhow::bail!("{}", flatten_error(status, &body));
        }

        Ok(())
    }

    // Auth endpoints

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        self.send(
            self.request(Method::POST, "/auth/token/login/")
                .json(&json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn logout(&self) -> Result<()> {
        self.send_empty(self.request(Method::POST, "/auth/token/logout/"))
            .await
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        self.send(self.request(Method::POST, "/auth/users/").json(&json!({
            "username": username,
            "email": email,
            "password": password,
        })))
        .await
    }

    pub async fn get_profile(&self) -> Result<UserProfile> {
        self.send(self.request(Method::GET, "/user/")).await
    }

    pub async fn update_profile(&self, patch: &Value) -> Result<UserProfile> {
        self.send(self.request(Method::PATCH, "/user/").json(patch))
            .await
    }

    // Exercise catalog

    pub async fn list_exercises(&self) -> Result<Vec<Exercise>> {
        self.send(self.request(Method::GET, "/exercises/")).await
    }

    // Workout endpoints

    pub async fn list_workouts(&self) -> Result<WorkoutList> {
        self.send(self.request(Method::GET, "/workouts/")).await
    }

    pub async fn get_workout(&self, uuid: &str) -> Result<Workout> {
        self.send(self.request(Method::GET, &format!("/workouts/{}/", uuid)))
            .await
    }

    // Record endpoints

    pub async fn create_workout_record(&self, workout_uuid: &str) -> Result<WorkoutRecord> {
        self.send(
            self.request(Method::POST, "/user/workouts/")
                .json(&json!({ "workout": workout_uuid })),
        )
        .await
    }

    pub async fn create_exercise_record(
        &self,
        record_uuid: &str,
        set: &NewSet,
    ) -> Result<CompletedSet> {
        self.send(
            self.request(
                Method::POST,
                &format!("/user/workouts/{}/exercises/", record_uuid),
            )
            .json(set),
        )
        .await
    }

    pub async fn complete_workout_record(
        &self,
        record_uuid: &str,
        duration_secs: u64,
    ) -> Result<()> {
        self.send_empty(
            self.request(Method::PATCH, &format!("/user/workouts/{}/", record_uuid))
                .json(&json!({ "duration": duration_secs })),
        )
        .await
    }

    // Plan endpoints

    pub async fn list_plans(&self) -> Result<Vec<Plan>> {
        self.send(self.request(Method::GET, "/plans/")).await
    }

    pub async fn get_plan(&self, uuid: &str) -> Result<Plan> {
        self.send(self.request(Method::GET, &format!("/plans/{}/", uuid)))
            .await
    }

    // Chat endpoints

    pub async fn list_chat_sessions(&self) -> Result<Vec<ChatSession>> {
        self.send(self.request(Method::GET, "/chat/sessions/")).await
    }

    pub async fn create_chat_session(&self, title: &str) -> Result<ChatSession> {
        self.send(
            self.request(Method::POST, "/chat/sessions/")
                .json(&json!({ "title": title })),
        )
        .await
    }

    pub async fn get_chat_messages(&self, session_uuid: &str) -> Result<Vec<ChatMessage>> {
        self.send(self.request(
            Method::GET,
            &format!("/chat/sessions/{}/messages/", session_uuid),
        ))
        .await
    }
}

#[async_trait]
impl SessionBackend for ApiClient {
    async fn fetch_workout(&self, workout_id: &str) -> Result<Workout> {
        self.get_workout(workout_id).await
    }

    async fn open_record(&self, workout_id: &str) -> Result<WorkoutRecord> {
        self.create_workout_record(workout_id).await
    }

    async fn log_set(&self, record_id: &str, set: NewSet) -> Result<CompletedSet> {
        self.create_exercise_record(record_id, &set).await
    }

    async fn complete_record(&self, record_id: &str, duration_secs: u64) -> Result<()> {
        self.complete_workout_record(record_id, duration_secs).await
    }
}

/// Flatten a DRF-style error body into one readable line. Bodies carry either
/// a `detail` string, a `non_field_errors` list, or a field -> errors map.
fn flatten_error(status: StatusCode, body: &Value) -> String {
    if let Some(detail) = body.get("detail").and_then(Value::as_str) {
        return detail.to_string();
    }

    if let Some(errors) = body.get("non_field_errors").and_then(Value::as_array) {
        if let Some(first) = errors.first().and_then(Value::as_str) {
            return first.to_string();
        }
    }

    if let Some(map) = body.as_object() {
        if let Some((field, errors)) = map.iter().next() {
            let message = match errors {
                Value::Array(list) => list
                    .first()
                    .and_then(Value::as_str)
                    .unwrap_or("invalid value")
                    .to_string(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            return format!("{}: {}", field, message);
        }
    }

    format!("Backend returned {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_error_prefers_detail() {
        let body = json!({ "detail": "Invalid token." });
        assert_eq!(
            flatten_error(StatusCode::UNAUTHORIZED, &body),
            "Invalid token."
        );
    }

    #[test]
    fn flatten_error_reads_non_field_errors() {
        let body = json!({ "non_field_errors": ["Unable to log in."] });
        assert_eq!(
            flatten_error(StatusCode::BAD_REQUEST, &body),
            "Unable to log in."
        );
    }

    #[test]
    fn flatten_error_reads_field_map() {
        let body = json!({ "reps": ["Ensure this value is greater than or equal to 0."] });
        assert_eq!(
            flatten_error(StatusCode::BAD_REQUEST, &body),
            "reps: Ensure this value is greater than or equal to 0."
        );
    }

    #[test]
    fn flatten_error_falls_back_to_status() {
        assert_eq!(
            flatten_error(StatusCode::BAD_GATEWAY, &Value::Null),
            "Backend returned 502 Bad Gateway"
        );
    }
}
