//! Service layer trait definitions
//!
//! Defines the interface between the sync orchestration layer and the
//! marketplace API implementation, so refresh semantics can be exercised
//! against an in-memory fake.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::error::ClientResult;
use crate::domain::product::{DescriptionRecord, ListingItem, PriceRecord};

/// Read access to the three marketplace catalog endpoints
///
/// Implementations absorb partial failures: only a total failure of the
/// listing call surfaces as an error, and the two lookup calls always
/// return whatever subset of records could be fetched.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Fetch up to `limit` items from the seller's product listing.
    async fn fetch_listing(&self, limit: u32) -> ClientResult<Vec<ListingItem>>;

    /// Fetch price records for the given product ids.
    ///
    /// Requests are batched internally; a failed batch contributes no
    /// records but does not discard results from other batches.
    async fn fetch_prices(&self, product_ids: &[i64]) -> HashMap<i64, PriceRecord>;

    /// Fetch name/description records for the given product ids.
    ///
    /// Looked up one id at a time; a failed lookup is skipped with a
    /// warning and does not affect the others.
    async fn fetch_descriptions(&self, product_ids: &[i64]) -> HashMap<i64, DescriptionRecord>;
}
