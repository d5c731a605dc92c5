//! Reaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for duck_reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub duck_id: i64,
    pub user_id: i64,
    pub reaction: String,
    pub created_at: DateTime<Utc>,
}
