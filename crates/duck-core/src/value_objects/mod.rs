//! Value objects - immutable types defined by their value

mod ids;

pub use ids::{DuckId, IdParseError, UserId};
