//! Catalog sync operator entry point
//!
//! Loads configuration, runs one full refresh against the Ozon Seller API,
//! and walks the resulting snapshot once so an operator can verify what a
//! browsing frontend would serve.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use ozon_catalog_sync::domain::catalog::CatalogStore;
use ozon_catalog_sync::infrastructure::{
    init_logging, ConfigManager, HttpClient, HttpClientConfig, OzonSellerClient,
};
use ozon_catalog_sync::CatalogService;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigManager::new()?.initialize().await?;
    let _log_guard = init_logging(&config.logging)?;

    info!("🛍️ Ozon catalog sync starting");
    if !config.has_credentials() {
        error!(
            "❌ Ozon API credentials are not configured (set OZON_CLIENT_ID and OZON_API_KEY)"
        );
    }

    let http = Arc::new(HttpClient::new(HttpClientConfig {
        client_id: config.api.client_id.clone(),
        api_key: config.api.api_key.clone(),
        timeout_seconds: config.api.request_timeout_seconds,
        max_requests_per_second: config.api.max_requests_per_second,
    })?);
    let client = Arc::new(OzonSellerClient::new(
        http,
        &config.api.base_url,
        config.sync.description_max_concurrent,
    )?);

    let service = CatalogService::new(
        client,
        CatalogStore::new(),
        config.sync.listing_limit,
        config.api.storefront_url.clone(),
    );

    let outcome = service.refresh().await;
    info!(
        "📦 Catalog: {} products before, {} after",
        outcome.count_before, outcome.count_after
    );

    if outcome.count_after == 0 {
        error!("❌ No products loaded; check credentials and connectivity");
        return Ok(());
    }

    let snapshot = service.snapshot().await;
    for (index, product) in snapshot.products().iter().enumerate() {
        info!(
            "{}. {} — {} ({} in stock) {}",
            index + 1,
            product.name,
            product.price_display(),
            product.stock_quantity,
            service.product_link(product)
        );
    }

    Ok(())
}
