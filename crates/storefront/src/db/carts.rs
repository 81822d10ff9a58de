//! Cart document repository.
//!
//! Each successful submission creates exactly one new row; there is no
//! dedup key, so repeated submissions of the same cart produce duplicate
//! documents. Items are stored verbatim as a `JSONB` array with
//! no per-item schema validation (item shape is owned by the client).

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::RepositoryError;

/// A persisted cart document.
#[derive(Debug, Clone)]
pub struct CartDocument {
    pub id: Uuid,
    pub items: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository for cart document operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new cart document wrapping `items` verbatim.
    ///
    /// `items` must already be validated as a JSON array by the caller;
    /// the repository does not re-check it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, items: &serde_json::Value) -> Result<CartDocument, RepositoryError> {
        let row = sqlx::query(
            r"
            INSERT INTO carts (id, items)
            VALUES ($1, $2)
            RETURNING id, items, created_at, updated_at
            ",
        )
        .bind(Uuid::new_v4())
        .bind(items)
        .fetch_one(self.pool)
        .await?;

        Ok(CartDocument {
            id: row.try_get("id")?,
            items: row.try_get("items")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    /// Fetch a cart document by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: Uuid) -> Result<Option<CartDocument>, RepositoryError> {
        let row = sqlx::query(
            r"
            SELECT id, items, created_at, updated_at
            FROM carts
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| {
            Ok(CartDocument {
                id: r.try_get("id")?,
                items: r.try_get("items")?,
                created_at: r.try_get("created_at")?,
                updated_at: r.try_get("updated_at")?,
            })
        })
        .transpose()
    }

    /// Count stored cart documents.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let row = sqlx::query(r"SELECT COUNT(*) AS n FROM carts")
            .fetch_one(self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}
