//! HTTP API response DTOs for the time broadcast server.

use serde::{Deserialize, Serialize};

/// Session summary for the sessions list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub uid: String,
    pub connected_at: String, // ISO 8601
    pub secret_confirmed: bool,
}
