//! User entity - the owner of ducks and author of reactions

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::UserId;

/// Longest display name a user can pick
pub const MAX_DISPLAY_NAME_LEN: usize = 64;

/// User entity. Accounts are provisioned elsewhere; this crate only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with only an id
    pub fn new(id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: None,
            display_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown next to a duck: display name, then email, then the id
    pub fn label(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("user-{}", self.id))
    }

    /// Trim a requested display name and check its length
    pub fn normalize_display_name(name: &str) -> Result<String, DomainError> {
        let name = name.trim();
        let len = name.chars().count();
        if len == 0 || len > MAX_DISPLAY_NAME_LEN {
            return Err(DomainError::ValidationError(format!(
                "display name must be between 1 and {MAX_DISPLAY_NAME_LEN} characters"
            )));
        }
        Ok(name.to_string())
    }
}
