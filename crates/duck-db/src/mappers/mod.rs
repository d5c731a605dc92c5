//! Entity to model mappers
//!
//! This module provides conversions between domain entities (duck-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations
//!
//! Counter columns are `BIGINT` with `CHECK (>= 0)`; negative values are
//! clamped to zero on the way out.

mod duck;
mod reaction;
mod user;

pub use duck::{count_from_db, count_to_db, rank_from_db, DuckInsert};
