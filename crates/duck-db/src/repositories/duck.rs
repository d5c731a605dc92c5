//! PostgreSQL implementation of DuckRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use duck_core::entities::{Duck, DuckWithOwner, NewDuck};
use duck_core::traits::{DuckRepository, RepoResult};
use duck_core::value_objects::{DuckId, UserId};

use crate::mappers::DuckInsert;
use crate::models::{DuckModel, DuckWithOwnerModel};

use super::error::{duck_not_found, map_db_error, map_missing_user};

/// Live ducks joined with their owner. Callers append filters and ordering.
const SELECT_WITH_OWNER: &str = r#"
    SELECT d.id, d.owner_id, d.name, d.x, d.y, d.appearance, d.image,
           d.likes_count, d.dislikes_count, d.rank,
           d.created_at, d.updated_at, d.deleted_at,
           u.email AS owner_email, u.display_name AS owner_display_name,
           u.created_at AS owner_created_at, u.updated_at AS owner_updated_at
    FROM ducks d
    JOIN users u ON u.id = d.owner_id
    WHERE d.deleted_at IS NULL
"#;

/// PostgreSQL implementation of DuckRepository
#[derive(Clone)]
pub struct PgDuckRepository {
    pool: PgPool,
}

impl PgDuckRepository {
    /// Create a new PgDuckRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_with_owner(&self, filter: &str, bind: Option<i64>) -> RepoResult<Vec<DuckWithOwner>> {
        let sql = format!("{SELECT_WITH_OWNER} {filter}");
        let mut query = sqlx::query_as::<_, DuckWithOwnerModel>(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(map_db_error)?;
        Ok(rows.into_iter().map(DuckWithOwner::from).collect())
    }
}

#[async_trait]
impl DuckRepository for PgDuckRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: DuckId) -> RepoResult<Option<Duck>> {
        let result = sqlx::query_as::<_, DuckModel>(
            r#"
            SELECT id, owner_id, name, x, y, appearance, image,
                   likes_count, dislikes_count, rank,
                   created_at, updated_at, deleted_at
            FROM ducks
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Duck::from))
    }

    #[instrument(skip(self))]
    async fn find_with_owner(&self, id: DuckId) -> RepoResult<Option<DuckWithOwner>> {
        let mut rows = self
            .fetch_with_owner("AND d.id = $1", Some(id.into_inner()))
            .await?;
        Ok(rows.pop())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<DuckWithOwner>> {
        self.fetch_with_owner("ORDER BY d.created_at DESC, d.id DESC", None)
            .await
    }

    #[instrument(skip(self))]
    async fn list_by_owner(&self, owner_id: UserId) -> RepoResult<Vec<DuckWithOwner>> {
        self.fetch_with_owner(
            "AND d.owner_id = $1 ORDER BY d.created_at DESC, d.id DESC",
            Some(owner_id.into_inner()),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn leaderboard(&self, limit: i64) -> RepoResult<Vec<DuckWithOwner>> {
        let limit = limit.clamp(1, 100);
        self.fetch_with_owner("AND d.rank > 0 ORDER BY d.rank ASC LIMIT $1", Some(limit))
            .await
    }

    #[instrument(skip(self, duck), fields(owner_id = %duck.owner_id))]
    async fn create(&self, duck: &NewDuck) -> RepoResult<Duck> {
        let insert = DuckInsert::new(duck);

        let model = sqlx::query_as::<_, DuckModel>(
            r#"
            INSERT INTO ducks (owner_id, name, x, y, appearance, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, name, x, y, appearance, image,
                      likes_count, dislikes_count, rank,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(insert.owner_id)
        .bind(insert.name)
        .bind(insert.x)
        .bind(insert.y)
        .bind(insert.appearance)
        .bind(insert.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_missing_user(e, duck.owner_id))?;

        Ok(Duck::from(model))
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: DuckId, owner_id: UserId) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE ducks
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id.into_inner())
        .bind(owner_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(duck_not_found(id));
        }

        Ok(())
    }
}
