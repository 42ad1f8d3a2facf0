//! Ozon Seller catalog synchronization engine
//!
//! Reconciles the three catalog endpoints of the Ozon Seller API (listing,
//! batched prices, per-item descriptions) into an in-memory snapshot with
//! stable 1-based positions and cyclic navigation, suitable for a paginated
//! browsing frontend.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the facade for easier access
pub use application::{CatalogService, RefreshOutcome};
pub use domain::{CatalogError, CatalogStore, MarketplaceApi, Product};
