use serde::{Deserialize, Serialize};

/// Basic listing entry from the product list endpoint
///
/// Only carries the identifiers needed to drive the price and description
/// lookups; everything else about the product comes from those calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingItem {
    pub product_id: i64,
    pub offer_id: Option<String>,
}

/// Price information for one product from the batched price endpoint
///
/// Values are in major currency units as reported by the API. `None` means
/// the API returned no usable number for that slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceRecord {
    pub product_id: i64,
    /// Current selling price.
    pub price: Option<f64>,
    /// Pre-discount price, used as a fallback when `price` is absent or zero.
    pub old_price: Option<f64>,
}

/// Name and raw description for one product from the description endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionRecord {
    pub product_id: i64,
    pub name: String,
    /// Unsanitized description text, may contain HTML markup.
    pub description: String,
}

/// Fully reconciled catalog entry
///
/// Built by merging a [`ListingItem`] with its price and description
/// records. Invariant: `price_minor > 0` — items without a known positive
/// price never become a `Product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub offer_id: Option<String>,
    pub name: String,
    /// Price in minor currency units (kopecks).
    pub price_minor: u64,
    /// Sanitized description, at most 200 characters.
    pub description: String,
    /// Placeholder value — no live inventory signal is available from the
    /// endpoints this engine uses. Callers must not treat it as authoritative.
    pub stock_quantity: u32,
}

impl Product {
    /// Price formatted in major units, e.g. `1500.00`.
    pub fn price_display(&self) -> String {
        format!("{}.{:02}", self.price_minor / 100, self.price_minor % 100)
    }
}
