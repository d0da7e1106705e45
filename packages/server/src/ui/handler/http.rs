//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use chime_shared::time::timestamp_to_rfc3339;

use crate::{infrastructure::dto::http::SessionSummaryDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the list of active sessions.
///
/// A point-in-time registry read; secrets are never exposed here.
pub async fn get_sessions(State(state): State<Arc<AppState>>) -> Json<Vec<SessionSummaryDto>> {
    let sessions = state.repository.get_sessions().await;

    let mut summaries: Vec<SessionSummaryDto> = sessions
        .iter()
        .map(|s| SessionSummaryDto {
            uid: s.uid.as_str().to_string(),
            connected_at: timestamp_to_rfc3339(s.connected_at.value()),
            secret_confirmed: s.secret_confirmed,
        })
        .collect();

    // Sort by uid for consistent ordering
    summaries.sort_by(|a, b| a.uid.cmp(&b.uid));

    Json(summaries)
}
