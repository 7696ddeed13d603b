use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use reqwest::Client;
use tracing::{info, warn};

use crate::aggregator::aggregate;
use crate::config::{AppConfig, FeedConfig, StoreKind};
use crate::error::{StoreError, UpstreamError};
use crate::hosted::{RestTrackedStore, DEFAULT_TABLE};
use crate::models::{NearEarthObject, RiskAssessment, TrackedItem};
use crate::normalize::normalize;
use crate::risk::score;
use crate::storage::{JsonTrackedStore, TrackedStore};

/// Entry point for front ends: the feed pipeline plus the tracked-item store,
/// with all state held here instead of in globals.
#[derive(Clone)]
pub struct DashboardApi {
    client: Client,
    feed: FeedConfig,
    store: Arc<dyn TrackedStore>,
}

impl DashboardApi {
    pub fn new(client: Client, feed: FeedConfig, store: Arc<dyn TrackedStore>) -> Self {
        Self { client, feed, store }
    }

    /// Builds the store selected by `config.storage`. A hosted store without
    /// a URL falls back to the local file.
    pub async fn from_config(client: Client, config: &AppConfig) -> Self {
        let store = open_store(&client, config).await;
        Self::new(client, config.feed.clone(), store)
    }

    /// Aggregated and normalized window, closest approach first. An empty
    /// vector means the window had no objects; failures are errors.
    pub async fn load_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NearEarthObject>, UpstreamError> {
        let page = aggregate(&self.client, &self.feed, start, end).await?;
        let objects = normalize(&page);
        info!(count = objects.len(), "normalized feed window");
        Ok(objects)
    }

    pub fn assess(neo: &NearEarthObject) -> RiskAssessment {
        score(neo)
    }

    pub async fn track(
        &self,
        user: &str,
        neo: &NearEarthObject,
    ) -> Result<Vec<TrackedItem>, StoreError> {
        let risk = score(neo);
        let item = TrackedItem::from_assessment(neo, &risk, user, Utc::now());
        self.store.insert(item).await
    }

    pub async fn untrack(&self, user: &str, id: &str) -> Result<Vec<TrackedItem>, StoreError> {
        self.store.remove(user, id).await
    }

    pub async fn tracked(&self, user: &str) -> Result<Vec<TrackedItem>, StoreError> {
        self.store.list(user).await
    }
}

async fn open_store(client: &Client, config: &AppConfig) -> Arc<dyn TrackedStore> {
    let storage = &config.storage;
    match storage.kind {
        StoreKind::Memory => Arc::new(JsonTrackedStore::in_memory()),
        StoreKind::File => Arc::new(JsonTrackedStore::load_from(config.tracked_file()).await),
        StoreKind::Rest => {
            let table = storage.rest_table.as_deref().unwrap_or(DEFAULT_TABLE);
            let key = storage.rest_key.clone().unwrap_or_default();
            match storage.rest_url.as_deref() {
                Some(url) => match RestTrackedStore::new(client.clone(), url, table, key) {
                    Ok(store) => return Arc::new(store),
                    Err(e) => warn!(error = %e, url, "invalid hosted store url, using local file"),
                },
                None => warn!("hosted store selected without rest_url, using local file"),
            }
            Arc::new(JsonTrackedStore::load_from(config.tracked_file()).await)
        }
    }
}
