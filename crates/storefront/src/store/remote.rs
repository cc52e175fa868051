//! Remote record service backend.
//!
//! Thin client for a CRUD record service keyed by collection name. Bulk
//! fetch passes a field projection and an ordering parameter; writes replace
//! the whole collection; identity allocation is a service-side counter. The
//! protocol is opaque to the engines - they only ever see the
//! [`RecordStore`] contract.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::config::RemoteApiConfig;

use super::{RecordStore, StoreError, collections};

/// Client for the remote record service.
#[derive(Clone)]
pub struct RemoteRecordStore {
    inner: Arc<RemoteRecordStoreInner>,
}

struct RemoteRecordStoreInner {
    client: reqwest::Client,
    base_url: Url,
    api_token: String,
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    records: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct ReplaceRecordsRequest<'a> {
    records: &'a [Value],
}

#[derive(Debug, Deserialize)]
struct NextIdResponse {
    next_id: i64,
}

impl RemoteRecordStore {
    /// Create a new record service client.
    #[must_use]
    pub fn new(config: &RemoteApiConfig) -> Self {
        Self {
            inner: Arc::new(RemoteRecordStoreInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                api_token: config.api_token.expose_secret().to_string(),
            }),
        }
    }

    fn endpoint(&self, collection: &str, suffix: &str) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        format!("{base}/api/collections/{collection}/{suffix}")
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(200)
            .collect::<String>();
        Err(StoreError::RemoteApi {
            status: status.as_u16(),
            message,
        })
    }
}

/// Field projection requested for each collection's bulk fetch.
fn projection(collection: &str) -> Option<&'static str> {
    match collection {
        collections::PRODUCTS => {
            Some("Id,name,brand,category,price,discountedPrice,sizes,images,rating,reviewCount")
        }
        collections::CATEGORIES => Some("Id,name,image,productCount"),
        collections::CART => Some("Id,productId,size,quantity,price"),
        collections::WISHLIST => Some("Id,productId,addedAt"),
        _ => None,
    }
}

#[async_trait::async_trait]
impl RecordStore for RemoteRecordStore {
    #[instrument(skip(self))]
    async fn load(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let mut request = self
            .inner
            .client
            .get(self.endpoint(collection, "records"))
            .bearer_auth(&self.inner.api_token)
            .query(&[("order_by", "Id.asc")]);
        if let Some(fields) = projection(collection) {
            request = request.query(&[("fields", fields)]);
        }

        let response = Self::check(request.send().await?).await?;
        let body: RecordsResponse = response.json().await?;
        Ok(body.records)
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn save(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
        let response = self
            .inner
            .client
            .put(self.endpoint(collection, "records"))
            .bearer_auth(&self.inner.api_token)
            .json(&ReplaceRecordsRequest { records: &records })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn next_id(&self, collection: &str) -> Result<i64, StoreError> {
        let response = self
            .inner
            .client
            .post(self.endpoint(collection, "next-id"))
            .bearer_auth(&self.inner.api_token)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body: NextIdResponse = response.json().await?;
        Ok(body.next_id)
    }
}
