//! Infrastructure layer for marketplace API access and runtime plumbing
//!
//! Provides the HTTP client, the Ozon Seller API implementation of the
//! marketplace contract, configuration loading, logging setup, and the
//! description sanitizer.

pub mod config;
pub mod http_client;
pub mod logging;
pub mod ozon_client;
pub mod sanitizer;

// Re-export commonly used items
pub use config::{AppConfig, ConfigManager};
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::init_logging;
pub use ozon_client::{OzonSellerClient, PRICE_BATCH_SIZE};
