//! Duck database models

use chrono::{DateTime, Utc};
use duck_core::DuckAppearance;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for ducks table
#[derive(Debug, Clone, FromRow)]
pub struct DuckModel {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub appearance: Json<DuckAppearance>,
    pub image: String,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub rank: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Duck row joined with its owner (from query)
#[derive(Debug, Clone, FromRow)]
pub struct DuckWithOwnerModel {
    #[sqlx(flatten)]
    pub duck: DuckModel,
    pub owner_email: Option<String>,
    pub owner_display_name: Option<String>,
    pub owner_created_at: DateTime<Utc>,
    pub owner_updated_at: DateTime<Utc>,
}

/// Counters and rank used by the reconciler (from query)
#[derive(Debug, Clone, FromRow)]
pub struct DuckStandingModel {
    pub id: i64,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub rank: i32,
}
