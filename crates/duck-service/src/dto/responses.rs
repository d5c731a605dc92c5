//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use duck_core::{DuckAppearance, DuckId, ReactionKind, UserId};
use serde::Serialize;

// ============================================================================
// User and Duck Responses
// ============================================================================

/// Public summary of a duck's owner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerResponse {
    pub id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A user's own profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Duck as returned by listings, creation and live events
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuckResponse {
    pub id: DuckId,
    pub owner_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerResponse>,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub appearance: DuckAppearance,
    pub image: String,
    pub likes_count: u64,
    pub dislikes_count: u64,
    pub rank: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stored reaction together with the duck's counters after the toggle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReactionResponse {
    pub duck_id: DuckId,
    pub user_id: UserId,
    pub reaction: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub duck: DuckResponse,
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
