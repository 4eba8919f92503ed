//! # REST Backend
//!
//! The hosted `inventory_items` table behind a Supabase / PostgREST API.
//!
//! ## Request Mapping
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────────┐
//! │ Operation            │ Request                                          │
//! ├──────────────────────┼──────────────────────────────────────────────────┤
//! │ select_all           │ GET    /rest/v1/inventory_items                  │
//! │                      │        ?select=*&order=created_at.desc           │
//! │ insert_rows          │ POST   /rest/v1/inventory_items   [row, row, …]  │
//! │ update_quantity      │ PATCH  /rest/v1/inventory_items?id=eq.{id}       │
//! │ delete_by_id         │ DELETE /rest/v1/inventory_items?id=eq.{id}       │
//! │ delete_all_except    │ DELETE /rest/v1/inventory_items?id=neq.{id}      │
//! └──────────────────────┴──────────────────────────────────────────────────┘
//!  Every request: apikey: {key}, Authorization: Bearer {key}
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use stockscan_core::{InventoryItem, INVENTORY_TABLE};
use tracing::debug;

use crate::backend::{InventoryBackend, InventoryInsert};
use crate::error::{StoreError, StoreResult};

/// PostgREST path prefix used by Supabase.
const REST_PREFIX: &str = "rest/v1";

#[derive(Debug, Serialize)]
struct QuantityPatch {
    quantity: i64,
    updated_at: DateTime<Utc>,
}

/// Supabase / PostgREST implementation of [`InventoryBackend`].
#[derive(Clone)]
pub struct RestBackend {
    client: Client,
    table_url: String,
    api_key: String,
}

impl std::fmt::Debug for RestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestBackend")
            .field("table_url", &self.table_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl RestBackend {
    /// Creates a backend for the project at `base_url` (e.g.
    /// `https://xyz.supabase.co`) using the anon/service `api_key`.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    /// Creates a backend reusing an existing [`reqwest::Client`].
    pub fn with_client(client: Client, base_url: &str, api_key: impl Into<String>) -> Self {
        RestBackend {
            client,
            table_url: table_url(base_url),
            api_key: api_key.into(),
        }
    }

    /// Full URL of the table endpoint.
    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Passes 2xx responses through, turns anything else into a StoreError.
    async fn ensure_success(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::from_status(status.as_u16(), body))
    }
}

/// Joins the project base URL with the PostgREST table path.
fn table_url(base_url: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        REST_PREFIX,
        INVENTORY_TABLE
    )
}

#[async_trait]
impl InventoryBackend for RestBackend {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn select_all(&self) -> StoreResult<Vec<InventoryItem>> {
        let response = self
            .authorized(self.client.get(&self.table_url))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;

        let items: Vec<InventoryItem> = Self::ensure_success(response).await?.json().await?;

        debug!(count = items.len(), "Fetched inventory rows");
        Ok(items)
    }

    async fn insert_rows(&self, rows: &[InventoryInsert]) -> StoreResult<()> {
        debug!(count = rows.len(), "Posting inventory rows");

        let response = self
            .authorized(self.client.post(&self.table_url))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn update_quantity(
        &self,
        id: &str,
        quantity: i64,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<()> {
        debug!(id = %id, quantity, "Patching quantity");

        let response = self
            .authorized(self.client.patch(&self.table_url))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&QuantityPatch {
                quantity,
                updated_at,
            })
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting inventory row");

        let response = self
            .authorized(self.client.delete(&self.table_url))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn delete_all_except(&self, sentinel_id: &str) -> StoreResult<()> {
        let response = self
            .authorized(self.client.delete(&self.table_url))
            .query(&[("id", format!("neq.{sentinel_id}"))])
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url() {
        assert_eq!(
            table_url("https://abc.supabase.co"),
            "https://abc.supabase.co/rest/v1/inventory_items"
        );
        assert_eq!(
            table_url("https://abc.supabase.co/"),
            "https://abc.supabase.co/rest/v1/inventory_items"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let backend = RestBackend::new("http://localhost:54321", "secret-anon-key");
        let printed = format!("{backend:?}");

        assert!(printed.contains("localhost:54321"));
        assert!(!printed.contains("secret-anon-key"));
    }
}
