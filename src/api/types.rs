//! API request and response types.

use serde::{Deserialize, Serialize};

/// Query parameters for `GET /plan`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanQuery {
    /// Free-text project idea, forwarded verbatim
    pub idea: String,
}

/// Liveness response for `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `"online"` while the process serves requests
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn online() -> Self {
        Self {
            status: "online".to_string(),
            message: Some("Architect AI Backend is Running".to_string()),
        }
    }
}
