//! Integration test utilities for Duck Party
//!
//! Tests in `tests/` spin up the full HTTP application against a real
//! PostgreSQL database and are skipped when `DATABASE_URL` is not set.

pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
