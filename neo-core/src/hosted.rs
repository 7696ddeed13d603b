//! Tracked items kept in a hosted table behind a PostgREST-style HTTP API.
//!
//! Rows are filtered with `column=eq.value` query parameters and every request
//! carries the project key both as `apikey` and as a bearer token.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, warn};
use url::Url;

use crate::error::StoreError;
use crate::models::TrackedItem;
use crate::storage::TrackedStore;

pub const DEFAULT_TABLE: &str = "tracked_items";

#[derive(Debug, Clone)]
pub struct RestTrackedStore {
    client: Client,
    table_url: Url,
    api_key: String,
}

impl RestTrackedStore {
    /// `base_url` is the REST root (for example `https://x.example.co/rest/v1`).
    pub fn new(
        client: Client,
        base_url: &str,
        table: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, url::ParseError> {
        let base = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        Ok(Self {
            client,
            table_url: base.join(table)?,
            api_key: api_key.into(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn filtered_url(&self, user: &str, id: Option<&str>) -> Url {
        let mut url = self.table_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("user", &format!("eq.{user}"));
            if let Some(id) = id {
                query.append_pair("id", &format!("eq.{id}"));
            }
        }
        url
    }

    async fn fetch_rows(&self, user: &str, id: Option<&str>) -> Result<Vec<TrackedItem>, StoreError> {
        let mut url = self.filtered_url(user, id);
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "savedAt.asc");
        let response = self.authorized(self.client.get(url)).send().await?;
        let response = ensure_success(response)?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TrackedStore for RestTrackedStore {
    async fn insert(&self, item: TrackedItem) -> Result<Vec<TrackedItem>, StoreError> {
        let existing = self.fetch_rows(&item.user, Some(&item.id)).await?;
        if existing.is_empty() {
            let response = self
                .authorized(self.client.post(self.table_url.clone()))
                .header("Prefer", "return=minimal")
                .json(&item)
                .send()
                .await?;
            ensure_success(response)?;
        } else {
            debug!(user = %item.user, id = %item.id, "item already tracked in hosted table");
        }
        self.fetch_rows(&item.user, None).await
    }

    async fn remove(&self, user: &str, id: &str) -> Result<Vec<TrackedItem>, StoreError> {
        let response = self
            .authorized(self.client.delete(self.filtered_url(user, Some(id))))
            .send()
            .await?;
        ensure_success(response)?;
        self.fetch_rows(user, None).await
    }

    async fn list(&self, user: &str) -> Result<Vec<TrackedItem>, StoreError> {
        self.fetch_rows(user, None).await
    }
}

fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(status = status.as_u16(), url = %response.url(), "hosted store request failed");
        Err(StoreError::from_status(status))
    }
}
