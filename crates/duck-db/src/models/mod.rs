//! Database models - SQLx-compatible structs for PostgreSQL tables

mod duck;
mod reaction;
mod user;

pub use duck::{DuckModel, DuckStandingModel, DuckWithOwnerModel};
pub use reaction::ReactionModel;
pub use user::UserModel;
