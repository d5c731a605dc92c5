//! Duck entity <-> model mapper

use duck_core::entities::{Duck, DuckAppearance, DuckWithOwner, NewDuck, User};
use duck_core::leaderboard::DuckStanding;
use duck_core::value_objects::{DuckId, UserId};
use sqlx::types::Json;

use crate::models::{DuckModel, DuckStandingModel, DuckWithOwnerModel};

/// Read a counter column
#[inline]
pub fn count_from_db(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Write a counter column, saturating at `i64::MAX`
#[inline]
pub fn count_to_db(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Read the rank column
#[inline]
pub fn rank_from_db(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

/// Convert DuckModel to Duck entity
impl From<DuckModel> for Duck {
    fn from(model: DuckModel) -> Self {
        Duck {
            id: DuckId::new(model.id),
            owner_id: UserId::new(model.owner_id),
            name: model.name,
            x: model.x,
            y: model.y,
            appearance: model.appearance.0,
            image: model.image,
            likes_count: count_from_db(model.likes_count),
            dislikes_count: count_from_db(model.dislikes_count),
            rank: rank_from_db(model.rank),
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}

/// Convert the joined row to a duck and its owner
impl From<DuckWithOwnerModel> for DuckWithOwner {
    fn from(model: DuckWithOwnerModel) -> Self {
        let owner = User {
            id: UserId::new(model.duck.owner_id),
            email: model.owner_email,
            display_name: model.owner_display_name,
            created_at: model.owner_created_at,
            updated_at: model.owner_updated_at,
        };
        DuckWithOwner {
            duck: Duck::from(model.duck),
            owner,
        }
    }
}

impl From<DuckStandingModel> for DuckStanding {
    fn from(model: DuckStandingModel) -> Self {
        DuckStanding {
            id: DuckId::new(model.id),
            likes_count: count_from_db(model.likes_count),
            dislikes_count: count_from_db(model.dislikes_count),
            rank: rank_from_db(model.rank),
        }
    }
}

/// Values for inserting a new duck
pub struct DuckInsert<'a> {
    pub owner_id: i64,
    pub name: &'a str,
    pub x: f64,
    pub y: f64,
    pub appearance: Json<DuckAppearance>,
    pub image: &'a str,
}

impl<'a> DuckInsert<'a> {
    pub fn new(duck: &'a NewDuck) -> Self {
        Self {
            owner_id: duck.owner_id.into_inner(),
            name: &duck.name,
            x: duck.x,
            y: duck.y,
            appearance: Json(duck.appearance.clone()),
            image: &duck.image,
        }
    }
}
