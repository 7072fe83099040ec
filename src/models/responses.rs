use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::engagement::EngagementState;
use crate::core::recency;
use crate::models::domain::{CompatibilityTier, GeneratedMatch, MatchCandidate};

/// A ranked candidate decorated for display
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatch {
    #[serde(flatten)]
    pub candidate: MatchCandidate,
    pub tier: CompatibilityTier,
    pub tier_label: String,
    pub last_active_label: String,
    pub is_saved: bool,
    pub is_interested: bool,
}

impl RankedMatch {
    pub fn new(candidate: &MatchCandidate, engagement: &EngagementState, now: DateTime<Utc>) -> Self {
        let tier = candidate.compatibility_score.tier();

        Self {
            tier,
            tier_label: tier.label().to_string(),
            last_active_label: recency::describe(candidate.last_active, now),
            is_saved: engagement.is_saved(candidate.id),
            is_interested: engagement.is_interested(candidate.id),
            candidate: candidate.clone(),
        }
    }
}

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankMatchesResponse {
    pub request_id: Uuid,
    pub matches: Vec<RankedMatch>,
    /// Candidates that passed filtering, before the limit
    pub total_results: usize,
    pub total_candidates: usize,
}

/// Response for both generate endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMatchesResponse {
    pub request_id: Uuid,
    pub matches: Vec<GeneratedMatch>,
    pub total_evaluated: usize,
}

/// Response for the engagement endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementResponse {
    pub state: EngagementState,
    pub match_id: u32,
    pub is_saved: bool,
    pub is_interested: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST.as_u16(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}
