//! Application layer - refresh orchestration and the catalog facade

pub mod catalog_service;
pub mod orchestrator;
pub mod reconciler;

// Re-export commonly used items
pub use catalog_service::CatalogService;
pub use orchestrator::{RefreshOutcome, SyncOrchestrator};
pub use reconciler::reconcile;
