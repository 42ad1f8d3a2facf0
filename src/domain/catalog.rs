//! In-memory catalog snapshot store
//!
//! Implements the exclusive-write / shared-read snapshot model: each refresh
//! builds a complete [`CatalogSnapshot`] and swaps it in atomically, so
//! readers always observe either the fully-old or the fully-new catalog,
//! never a mix. Positions are 1-based, dense, and cyclic under
//! [`CatalogStore::next_position`] / [`CatalogStore::prev_position`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::domain::product::Product;

/// An immutable, fully-formed catalog state at one point in time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
    refreshed_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            refreshed_at: Utc::now(),
        }
    }

    /// Empty snapshot, used when a refresh yields no usable items.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Product at the given 1-based position.
    pub fn get(&self, position: usize) -> Option<&Product> {
        if position == 0 {
            return None;
        }
        self.products.get(position - 1)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in display order (position 1 first).
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }
}

/// Thread-safe holder of the live catalog snapshot
///
/// The sync orchestrator is the only writer; any number of readers may hold
/// cheap `Arc` clones of the current snapshot concurrently.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    current: Arc<RwLock<Arc<CatalogSnapshot>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(CatalogSnapshot::empty()))),
        }
    }

    /// Replace the live snapshot with a new one built from `products`.
    ///
    /// Positions are assigned densely in input order. Returns the size of
    /// the new snapshot. The old snapshot stays valid for readers that
    /// already hold it but is no longer served.
    pub async fn replace(&self, products: Vec<Product>) -> usize {
        let snapshot = Arc::new(CatalogSnapshot::new(products));
        let count = snapshot.len();
        let mut current = self.current.write().await;
        *current = snapshot;
        count
    }

    /// Current snapshot (instant, internally consistent).
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        let current = self.current.read().await;
        Arc::clone(&current)
    }

    /// Product at the given 1-based position, if any.
    pub async fn get(&self, position: usize) -> Option<Product> {
        let snapshot = self.snapshot().await;
        snapshot.get(position).cloned()
    }

    pub async fn len(&self) -> usize {
        self.snapshot().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshot().await.is_empty()
    }

    /// Position after `position`, wrapping from the last entry back to 1.
    ///
    /// On an empty catalog the input position is returned unchanged; callers
    /// should check `len()` before navigating.
    pub async fn next_position(&self, position: usize) -> usize {
        let size = self.len().await;
        if size == 0 {
            return position;
        }
        if position >= size { 1 } else { position + 1 }
    }

    /// Position before `position`, wrapping from 1 to the last entry.
    ///
    /// On an empty catalog the input position is returned unchanged; callers
    /// should check `len()` before navigating.
    pub async fn prev_position(&self, position: usize) -> usize {
        let size = self.len().await;
        if size == 0 {
            return position;
        }
        if position <= 1 { size } else { position - 1 }
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_products(count: usize) -> Vec<Product> {
        (1..=count as i64)
            .map(|id| Product {
                product_id: id,
                offer_id: Some(format!("SKU-{id}")),
                name: format!("Product {id}"),
                price_minor: (id as u64) * 10_000,
                description: format!("Description {id}"),
                stock_quantity: 10,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_replace_assigns_dense_positions() {
        let store = CatalogStore::new();
        let count = store.replace(sample_products(3)).await;
        assert_eq!(count, 3);

        for position in 1..=3 {
            let product = store.get(position).await.unwrap();
            assert_eq!(product.product_id, position as i64);
        }
        assert!(store.get(0).await.is_none());
        assert!(store.get(4).await.is_none());
    }

    #[tokio::test]
    async fn test_replace_discards_old_snapshot() {
        let store = CatalogStore::new();
        store.replace(sample_products(5)).await;

        let old = store.snapshot().await;
        store.replace(sample_products(2)).await;

        // A reader holding the old snapshot still sees a consistent view.
        assert_eq!(old.len(), 5);
        assert_eq!(store.len().await, 2);
    }

    #[rstest]
    #[case(1, 2)]
    #[case(2, 3)]
    #[case(3, 1)]
    #[tokio::test]
    async fn test_next_position_wraps(#[case] from: usize, #[case] expected: usize) {
        let store = CatalogStore::new();
        store.replace(sample_products(3)).await;
        assert_eq!(store.next_position(from).await, expected);
    }

    #[rstest]
    #[case(1, 3)]
    #[case(2, 1)]
    #[case(3, 2)]
    #[tokio::test]
    async fn test_prev_position_wraps(#[case] from: usize, #[case] expected: usize) {
        let store = CatalogStore::new();
        store.replace(sample_products(3)).await;
        assert_eq!(store.prev_position(from).await, expected);
    }

    #[tokio::test]
    async fn test_navigation_cycles_back_to_start() {
        let store = CatalogStore::new();
        let size = 4;
        store.replace(sample_products(size)).await;

        for start in 1..=size {
            let mut position = start;
            for _ in 0..size {
                position = store.next_position(position).await;
            }
            assert_eq!(position, start);

            let mut position = start;
            for _ in 0..size {
                position = store.prev_position(position).await;
            }
            assert_eq!(position, start);
        }
    }

    #[tokio::test]
    async fn test_empty_store_navigation_is_total() {
        let store = CatalogStore::new();
        assert_eq!(store.len().await, 0);
        assert_eq!(store.next_position(1).await, 1);
        assert_eq!(store.prev_position(7).await, 7);
        assert!(store.get(1).await.is_none());
    }
}
