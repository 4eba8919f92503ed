//! # SQLite Backend
//!
//! `inventory_items` in a local SQLite file. Useful without network access
//! and as the reference backend for tests.
//!
//! Row ids are UUID v4 strings and `created_at` / `updated_at` are set here,
//! standing in for the defaults the hosted table applies.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use stockscan_core::InventoryItem;
use tracing::debug;
use uuid::Uuid;

use crate::backend::{InventoryBackend, InventoryInsert};
use crate::error::StoreResult;

const SELECT_ALL: &str = r#"
    SELECT
        id,
        barcode,
        quantity,
        scanned_at,
        product_name,
        is_ai_generated,
        created_at,
        updated_at
    FROM inventory_items
    ORDER BY created_at DESC, rowid DESC
"#;

/// SQLite implementation of [`InventoryBackend`].
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Creates a backend over an existing (migrated) pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteBackend { pool }
    }

    /// Counts rows (for diagnostics).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl InventoryBackend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn select_all(&self) -> StoreResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = items.len(), "Selected inventory rows");
        Ok(items)
    }

    /// All rows go in one transaction.
    async fn insert_rows(&self, rows: &[InventoryInsert]) -> StoreResult<()> {
        debug!(count = rows.len(), "Inserting inventory rows");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        for row in rows {
            sqlx::query(
                r#"
                INSERT INTO inventory_items (
                    id, barcode, quantity, scanned_at,
                    product_name, is_ai_generated, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&row.barcode)
            .bind(row.quantity)
            .bind(row.scanned_at)
            .bind(&row.product_name)
            .bind(row.is_ai_generated)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn update_quantity(
        &self,
        id: &str,
        quantity: i64,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        debug!(id = %id, quantity, "Updating quantity");

        let result = sqlx::query(
            r#"
            UPDATE inventory_items
            SET quantity = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(id = %id, "Update matched no row");
        }

        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting inventory row");

        sqlx::query("DELETE FROM inventory_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_all_except(&self, sentinel_id: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id <> ?1")
            .bind(sentinel_id)
            .execute(&self.pool)
            .await?;

        debug!(deleted = result.rows_affected(), "Cleared inventory");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
