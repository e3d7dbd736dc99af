use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use stockscan_core::{InventoryStore, StoreError};
use stockscan_shared::{ProductRecord, RecordUpdate};
use tracing::{debug, instrument};

use crate::app_config::StoreConfig;
use crate::wire::{QueryRequest, QueryResponse, UpdateRequest};

pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
    #[error("http client setup failed: {0}")]
    Build(#[from] reqwest::Error),
}

/// Inventory store backed by a Notion database.
///
/// Every request carries the bearer token, the pinned API version and a JSON
/// content type. No request timeout is set.
#[derive(Clone)]
pub struct NotionStore {
    client: reqwest::Client,
    base_url: String,
    database_id: String,
}

impl NotionStore {
    pub fn new(config: &StoreConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| ClientError::InvalidHeader("Authorization"))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(
            "notion-version",
            HeaderValue::from_str(&config.notion_version)
                .map_err(|_| ClientError::InvalidHeader("Notion-Version"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            database_id: config.database_id.clone(),
        })
    }

    fn query_url(&self) -> String {
        format!("{}/databases/{}/query", self.base_url, self.database_id)
    }

    fn page_url(&self, page_id: &str) -> String {
        format!("{}/pages/{}", self.base_url, page_id)
    }
}

async fn error_text(resp: reqwest::Response) -> String {
    let status = resp.status();
    match resp.text().await {
        Ok(text) if !text.is_empty() => text,
        _ => status.to_string(),
    }
}

#[async_trait]
impl InventoryStore for NotionStore {
    #[instrument(name = "notion_query", skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<ProductRecord>, StoreError> {
        let resp = self
            .client
            .post(self.query_url())
            .json(&QueryRequest::title_equals(name))
            .send()
            .await
            .map_err(|e| StoreError::Lookup(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(StoreError::Lookup(error_text(resp).await));
        }

        let data: QueryResponse = resp
            .json()
            .await
            .map_err(|e| StoreError::Lookup(e.to_string()))?;

        debug!("Query for '{}' matched {} page(s)", name, data.results.len());

        Ok(data.results.into_iter().next().map(|page| page.into_record(name)))
    }

    #[instrument(name = "notion_update", skip(self, update))]
    async fn apply_update(&self, id: &str, update: &RecordUpdate) -> Result<(), StoreError> {
        let resp = self
            .client
            .patch(self.page_url(id))
            .json(&UpdateRequest::from(update))
            .send()
            .await
            .map_err(|e| StoreError::Update(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(StoreError::Update(error_text(resp).await));
        }

        Ok(())
    }
}
