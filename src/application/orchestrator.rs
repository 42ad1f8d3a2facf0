//! Sync orchestration
//!
//! Coordinates one full refresh cycle: listing → prices → descriptions →
//! reconcile → snapshot swap. The orchestrator is the only writer of the
//! catalog store, and refresh cycles are serialized so two refreshes never
//! overlap against the same store.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::application::reconciler::reconcile;
use crate::domain::catalog::CatalogStore;
use crate::domain::services::MarketplaceApi;

/// Before/after catalog sizes of one refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub count_before: usize,
    pub count_after: usize,
}

/// Coordinates refresh cycles against a [`CatalogStore`]
pub struct SyncOrchestrator {
    api: Arc<dyn MarketplaceApi>,
    store: CatalogStore,
    listing_limit: u32,
    refresh_lock: Mutex<()>,
}

impl SyncOrchestrator {
    pub fn new(api: Arc<dyn MarketplaceApi>, store: CatalogStore, listing_limit: u32) -> Self {
        Self {
            api,
            store,
            listing_limit,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Run one full refresh cycle.
    ///
    /// A failed or empty listing clears the catalog rather than preserving
    /// possibly-wrong cached data. Upstream failures never escape this
    /// method; it is always safe to call again later.
    pub async fn refresh(&self) -> RefreshOutcome {
        let _guard = self.refresh_lock.lock().await;

        info!("🔄 Starting catalog refresh");
        let count_before = self.store.len().await;

        let listing = match self.api.fetch_listing(self.listing_limit).await {
            Ok(listing) if !listing.is_empty() => listing,
            Ok(_) => {
                warn!("⚠️ Listing returned no items, clearing catalog");
                self.store.replace(Vec::new()).await;
                return RefreshOutcome {
                    count_before,
                    count_after: 0,
                };
            }
            Err(e) => {
                warn!("❌ Listing call failed ({}), clearing catalog", e);
                self.store.replace(Vec::new()).await;
                return RefreshOutcome {
                    count_before,
                    count_after: 0,
                };
            }
        };

        let product_ids: Vec<i64> = listing.iter().map(|item| item.product_id).collect();
        let prices = self.api.fetch_prices(&product_ids).await;
        let descriptions = self.api.fetch_descriptions(&product_ids).await;

        let products = reconcile(&listing, &prices, &descriptions);
        let count_after = self.store.replace(products).await;

        info!(
            "✅ Catalog refreshed: {} → {} products",
            count_before, count_after
        );
        RefreshOutcome {
            count_before,
            count_after,
        }
    }
}
