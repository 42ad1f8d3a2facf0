//! Domain module - core catalog entities and contracts
//!
//! Contains the product data model, the snapshot store, the marketplace
//! API contract, and the typed errors shared across layers.

pub mod catalog;
pub mod error;
pub mod product;
pub mod services;

// Re-export commonly used items
pub use catalog::{CatalogSnapshot, CatalogStore};
pub use error::{CatalogError, ClientError, ClientResult};
pub use product::{DescriptionRecord, ListingItem, PriceRecord, Product};
pub use services::MarketplaceApi;
