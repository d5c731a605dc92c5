//! Request DTOs for API endpoints
//!
//! Request DTOs implement `Deserialize` and `Validate` for input validation.
//! Unknown skins and accessories already fail deserialization.

use duck_core::DuckAppearance;
use serde::Deserialize;
use validator::Validate;

/// Create duck request. The image is a URL of an already uploaded picture.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDuckRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[serde(default)]
    pub x: f64,

    #[serde(default)]
    pub y: f64,

    pub appearance: DuckAppearance,

    #[serde(alias = "image_url")]
    #[validate(url(message = "Image must be a valid URL"))]
    pub image: String,
}

/// Rename request for the caller's own profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateNameRequest {
    #[serde(alias = "display_name")]
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,
}
