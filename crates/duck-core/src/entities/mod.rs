//! Domain entities - core business objects

mod duck;
mod reaction;
mod user;

pub use duck::{Accessory, Duck, DuckAppearance, DuckWithOwner, NewDuck, Skin};
pub use reaction::{Reaction, ReactionKind, ReactionOutcome, ReactionTransition};
pub use user::{User, MAX_DISPLAY_NAME_LEN};
