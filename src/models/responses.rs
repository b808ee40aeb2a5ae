use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::domain::{MatchResult, ScoreBreakdown};

/// Response for both scoring endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub request_id: Uuid,
    pub score: f64,
    pub details: String,
    /// Absent when scoring failed
    pub breakdown: Option<ScoreBreakdown>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl MatchResponse {
    pub fn from_result(request_id: Uuid, result: MatchResult) -> Self {
        Self {
            request_id,
            score: result.score,
            details: result.details,
            breakdown: Some(result.breakdown),
            timestamp: chrono::Utc::now(),
        }
    }

    /// A zero score carrying the failure in `details`
    pub fn from_error(request_id: Uuid, error: impl std::fmt::Display) -> Self {
        Self {
            request_id,
            score: 0.0,
            details: format!("Error processing match request: {}", error),
            breakdown: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
    pub endpoints: Vec<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
