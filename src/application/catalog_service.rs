//! Catalog service facade
//!
//! The surface exposed to the chat-transport layer (or any other
//! collaborator): trigger a refresh, read products by position, navigate
//! cyclically, and build storefront links.

use std::sync::Arc;

use url::Url;

use crate::application::orchestrator::{RefreshOutcome, SyncOrchestrator};
use crate::domain::catalog::{CatalogSnapshot, CatalogStore};
use crate::domain::error::CatalogError;
use crate::domain::product::Product;
use crate::domain::services::MarketplaceApi;

/// Stateless-per-request catalog access for transport layers
pub struct CatalogService {
    orchestrator: SyncOrchestrator,
    store: CatalogStore,
    storefront_url: String,
}

impl CatalogService {
    pub fn new(
        api: Arc<dyn MarketplaceApi>,
        store: CatalogStore,
        listing_limit: u32,
        storefront_url: impl Into<String>,
    ) -> Self {
        let orchestrator = SyncOrchestrator::new(api, store.clone(), listing_limit);
        Self {
            orchestrator,
            store,
            storefront_url: storefront_url.into(),
        }
    }

    /// Trigger a full resynchronization.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.orchestrator.refresh().await
    }

    /// Number of products in the current snapshot.
    pub async fn len(&self) -> usize {
        self.store.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.store.is_empty().await
    }

    /// Product at a 1-based position in the current snapshot.
    pub async fn product_at(&self, position: usize) -> Result<Product, CatalogError> {
        self.store
            .get(position)
            .await
            .ok_or(CatalogError::PositionNotFound { position })
    }

    /// Entry point for browsing: the product at position 1.
    ///
    /// Distinguishes "nothing to browse" from a bad position so callers
    /// can prompt for a resynchronization instead.
    pub async fn first_product(&self) -> Result<Product, CatalogError> {
        if self.store.is_empty().await {
            return Err(CatalogError::EmptyCatalog);
        }
        self.product_at(1).await
    }

    /// Cyclic successor of `position`.
    pub async fn next_position(&self, position: usize) -> usize {
        self.store.next_position(position).await
    }

    /// Cyclic predecessor of `position`.
    pub async fn prev_position(&self, position: usize) -> usize {
        self.store.prev_position(position).await
    }

    /// Current snapshot for bulk readers.
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.store.snapshot().await
    }

    /// Storefront link for a product.
    ///
    /// Points at a storefront search for the offer code; falls back to the
    /// storefront landing page when the product has no offer code.
    pub fn product_link(&self, product: &Product) -> String {
        let offer_id = match &product.offer_id {
            Some(offer_id) if !offer_id.is_empty() => offer_id,
            _ => return self.storefront_url.clone(),
        };

        match Url::parse(&self.storefront_url).and_then(|base| base.join("/search/")) {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair("text", offer_id);
                url.to_string()
            }
            Err(_) => self.storefront_url.clone(),
        }
    }
}
