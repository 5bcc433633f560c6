//! Data API client for dataset reads and output writes.
//!
//! ## Endpoints
//!
//! - GET `api/v1/data/{provider}/{dataset}/` - filtered, sorted, limited
//!   dataset read; `query` and `sort` travel as JSON documents in the
//!   query string.
//! - POST `api/v1/data/{provider}/{collection}/` - body is a JSON list of
//!   output records.
//!
//! Transport and auth errors pass through unmodified; only a non-2xx on
//! the output write is mapped to a typed `Write` error so the caller can
//! distinguish a rejected record from a failed connection.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use super::error::{ForwarderError, Result};
use super::types::{OutputRecord, WitsRecord};
use crate::config::Settings;

/// Filter handed to a dataset read: equality on asset and log, inclusive
/// depth range, ascending sort, capped result count.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetQuery {
    pub asset_id: i64,
    pub log_identifier: String,
    pub top_depth: f64,
    pub bottom_depth: f64,
    pub limit: usize,
}

impl DatasetQuery {
    /// Mongo-style filter document sent as the `query` parameter.
    ///
    /// Both depth bounds are inclusive so adjacent windows partition the
    /// log without dropping boundary records.
    pub fn filter_document(&self) -> serde_json::Value {
        json!({
            "asset_id": self.asset_id,
            "log_identifier": self.log_identifier,
            "measured_depth": {
                "$gte": self.top_depth,
                "$lte": self.bottom_depth,
            },
        })
    }

    /// Ascending sort on measured_depth.
    pub fn sort_document() -> serde_json::Value {
        json!({ "measured_depth": 1 })
    }
}

/// Read/write seam to the data API.
///
/// The HTTP implementation is `CorvaDataApi`; tests substitute a
/// recording mock.
#[async_trait]
pub trait DatasetApi: Send + Sync {
    /// Fetch records matching the query, ordered ascending by
    /// measured_depth, at most `query.limit` of them.
    async fn get_dataset(
        &self,
        provider: &str,
        dataset: &str,
        query: &DatasetQuery,
    ) -> Result<Vec<WitsRecord>>;

    /// Write records to the output collection in a single call.
    async fn post_records(
        &self,
        provider: &str,
        collection: &str,
        records: &[OutputRecord],
    ) -> Result<()>;
}

/// HTTP client for the Corva data API.
pub struct CorvaDataApi {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CorvaDataApi {
    /// Build a client from settings. The request timeout applies to every
    /// call; there is no retry layer here.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    fn data_url(&self, provider: &str, collection: &str) -> String {
        format!("{}/api/v1/data/{}/{}/", self.base_url, provider, collection)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("API {}", key)),
            None => request,
        }
    }
}

#[async_trait]
impl DatasetApi for CorvaDataApi {
    async fn get_dataset(
        &self,
        provider: &str,
        dataset: &str,
        query: &DatasetQuery,
    ) -> Result<Vec<WitsRecord>> {
        let url = self.data_url(provider, dataset);

        let response = self
            .authorize(self.client.get(&url))
            .query(&[
                ("query", query.filter_document().to_string()),
                ("sort", DatasetQuery::sort_document().to_string()),
                ("limit", query.limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let records: Vec<WitsRecord> = response.json().await?;
        Ok(records)
    }

    async fn post_records(
        &self,
        provider: &str,
        collection: &str,
        records: &[OutputRecord],
    ) -> Result<()> {
        let url = self.data_url(provider, collection);

        let response = self
            .authorize(self.client.post(&url))
            .json(records)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ForwarderError::Write {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
