//! Ozon Seller API client
//!
//! Implements [`MarketplaceApi`] over the three catalog endpoints:
//! `/v3/product/list` (listing), `/v5/product/info/prices` (batched price
//! lookup) and `/v1/product/info/description` (per-item lookup, fanned out
//! with a bounded number of in-flight requests).
//!
//! Failure policy follows the reconciliation contract: only a total listing
//! failure is surfaced as an error; failed price batches and description
//! lookups degrade to missing records with a logged warning.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::error::{ClientError, ClientResult};
use crate::domain::product::{DescriptionRecord, ListingItem, PriceRecord};
use crate::domain::services::MarketplaceApi;
use crate::infrastructure::http_client::HttpClient;

/// The price endpoint rejects oversized id filters; ids are chunked into
/// groups of this size.
pub const PRICE_BATCH_SIZE: usize = 50;

const LISTING_PATH: &str = "/v3/product/list";
const PRICES_PATH: &str = "/v5/product/info/prices";
const DESCRIPTION_PATH: &str = "/v1/product/info/description";

/// Client for the seller-side catalog endpoints
pub struct OzonSellerClient {
    http: Arc<HttpClient>,
    listing_url: String,
    prices_url: String,
    description_url: String,
    description_max_concurrent: usize,
}

impl OzonSellerClient {
    pub fn new(
        http: Arc<HttpClient>,
        base_url: &str,
        description_max_concurrent: usize,
    ) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid marketplace base URL: {base_url}"))?;
        let endpoint = |path: &str| -> Result<String> {
            Ok(base
                .join(path)
                .with_context(|| format!("Invalid endpoint path: {path}"))?
                .to_string())
        };

        Ok(Self {
            http,
            listing_url: endpoint(LISTING_PATH)?,
            prices_url: endpoint(PRICES_PATH)?,
            description_url: endpoint(DESCRIPTION_PATH)?,
            description_max_concurrent: description_max_concurrent.max(1),
        })
    }

    fn ensure_credentials(&self) -> ClientResult<()> {
        if self.http.has_credentials() {
            Ok(())
        } else {
            Err(ClientError::MissingCredentials)
        }
    }

    /// Fetch one batch of price records, keyed by product id.
    async fn fetch_price_batch(&self, batch: Vec<i64>) -> ClientResult<HashMap<i64, PriceRecord>> {
        let body = json!({
            "filter": {
                "product_id": batch,
                "visibility": "ALL"
            },
            "last_id": "",
            "limit": 1000
        });

        let response = self.http.post_json(&self.prices_url, &body).await?;
        let parsed: PricesResponse = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(e.to_string()))?;

        let mut records = HashMap::new();
        for item in parsed.items {
            let Some(product_id) = item.product_id else {
                continue;
            };
            let price_info = item.price.unwrap_or_default();
            records.insert(
                product_id,
                PriceRecord {
                    product_id,
                    price: parse_decimal(price_info.price.as_ref()),
                    old_price: parse_decimal(price_info.old_price.as_ref()),
                },
            );
        }
        Ok(records)
    }

    /// Fetch the description record for a single product id.
    async fn fetch_description(&self, product_id: i64) -> ClientResult<DescriptionRecord> {
        let body = json!({ "product_id": product_id });
        let response = self.http.post_json(&self.description_url, &body).await?;
        let parsed: DescriptionResponse = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(e.to_string()))?;

        let result = parsed.result.unwrap_or_default();
        Ok(DescriptionRecord {
            product_id,
            name: result.name.unwrap_or_default(),
            description: result.description.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl MarketplaceApi for OzonSellerClient {
    async fn fetch_listing(&self, limit: u32) -> ClientResult<Vec<ListingItem>> {
        self.ensure_credentials()?;

        info!("🔍 Fetching product listing (limit: {})", limit);
        let body = json!({
            "filter": { "visibility": "ALL" },
            "limit": limit
        });

        let response = self.http.post_json(&self.listing_url, &body).await?;
        let parsed: ProductListResponse = response
            .json()
            .await
            .map_err(|e| ClientError::invalid_response(e.to_string()))?;

        let items = parsed.result.map(|r| r.items).unwrap_or_default();
        let listing: Vec<ListingItem> = items
            .into_iter()
            .filter_map(|item| {
                item.product_id.map(|product_id| ListingItem {
                    product_id,
                    offer_id: item.offer_id,
                })
            })
            .collect();

        info!("✅ Listing returned {} items", listing.len());
        Ok(listing)
    }

    async fn fetch_prices(&self, product_ids: &[i64]) -> HashMap<i64, PriceRecord> {
        if product_ids.is_empty() || self.ensure_credentials().is_err() {
            return HashMap::new();
        }

        let records =
            merge_price_batches(product_ids, |batch| self.fetch_price_batch(batch)).await;

        info!(
            "💰 Fetched prices for {}/{} products",
            records.len(),
            product_ids.len()
        );
        records
    }

    async fn fetch_descriptions(&self, product_ids: &[i64]) -> HashMap<i64, DescriptionRecord> {
        if product_ids.is_empty() || self.ensure_credentials().is_err() {
            return HashMap::new();
        }

        // No batch endpoint exists; fan out one request per id with a
        // bounded number in flight.
        let semaphore = Arc::new(Semaphore::new(self.description_max_concurrent));
        let mut tasks = Vec::with_capacity(product_ids.len());

        for &product_id in product_ids {
            let semaphore = Arc::clone(&semaphore);
            let client = self.clone_for_task();
            tasks.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await.ok()?;
                match client.fetch_description(product_id).await {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!("⚠️ Description lookup failed for {}: {}", product_id, e);
                        None
                    }
                }
            }));
        }

        let mut records = HashMap::new();
        for task in join_all(tasks).await {
            if let Ok(Some(record)) = task {
                records.insert(record.product_id, record);
            }
        }

        info!(
            "📝 Fetched descriptions for {}/{} products",
            records.len(),
            product_ids.len()
        );
        records
    }
}

impl OzonSellerClient {
    /// Cheap clone for moving into a spawned lookup task.
    fn clone_for_task(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            listing_url: self.listing_url.clone(),
            prices_url: self.prices_url.clone(),
            description_url: self.description_url.clone(),
            description_max_concurrent: self.description_max_concurrent,
        }
    }
}

/// Chunk ids into groups of [`PRICE_BATCH_SIZE`] and merge the per-batch
/// results.
///
/// A failed batch logs a warning and contributes no records; results from
/// the other batches are preserved. The merged map therefore carries an
/// entry for every id that any successful batch returned.
async fn merge_price_batches<F, Fut>(product_ids: &[i64], fetch_batch: F) -> HashMap<i64, PriceRecord>
where
    F: Fn(Vec<i64>) -> Fut,
    Fut: Future<Output = ClientResult<HashMap<i64, PriceRecord>>>,
{
    let mut records = HashMap::new();
    for batch in product_ids.chunks(PRICE_BATCH_SIZE) {
        match fetch_batch(batch.to_vec()).await {
            Ok(batch_records) => {
                debug!("💰 Price batch returned {} records", batch_records.len());
                records.extend(batch_records);
            }
            Err(e) => {
                // One failed batch loses only its own records.
                warn!("⚠️ Price batch of {} ids failed: {}", batch.len(), e);
            }
        }
    }
    records
}

/// Parse a decimal that the API may report as a string ("1590.0000"),
/// a bare number, or not at all.
fn parse_decimal(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Number(n) => n.as_f64()?,
        _ => return None,
    };
    parsed.is_finite().then_some(parsed)
}

// Wire formats. Every field is optional so a partially filled response
// still yields whatever records it carries.

#[derive(Debug, Deserialize)]
struct ProductListResponse {
    result: Option<ProductListResult>,
}

#[derive(Debug, Default, Deserialize)]
struct ProductListResult {
    #[serde(default)]
    items: Vec<ProductListItem>,
}

#[derive(Debug, Deserialize)]
struct ProductListItem {
    product_id: Option<i64>,
    offer_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PricesResponse {
    #[serde(default)]
    items: Vec<PriceItem>,
}

#[derive(Debug, Deserialize)]
struct PriceItem {
    product_id: Option<i64>,
    price: Option<PriceInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct PriceInfo {
    price: Option<Value>,
    old_price: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct DescriptionResponse {
    result: Option<DescriptionResult>,
}

#[derive(Debug, Default, Deserialize)]
struct DescriptionResult {
    name: Option<String>,
    description: Option<String>,
}
