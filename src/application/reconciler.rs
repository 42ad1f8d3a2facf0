//! Catalog reconciliation
//!
//! Merges the three inconsistent source record sets (listing, prices,
//! descriptions) keyed by product id into one coherent product sequence.
//! Listing order defines display order. Items that resolve to no positive
//! price are dropped: a catalog entry with an unknown price is unusable,
//! not zero-cost.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::product::{DescriptionRecord, ListingItem, PriceRecord, Product};
use crate::infrastructure::sanitizer::{clean_description, truncate_description};

/// No live inventory signal is available from the endpoints used here.
const PLACEHOLDER_STOCK: u32 = 10;

/// Merge listing, price, and description records into an ordered product set.
pub fn reconcile(
    listing: &[ListingItem],
    prices: &HashMap<i64, PriceRecord>,
    descriptions: &HashMap<i64, DescriptionRecord>,
) -> Vec<Product> {
    let mut products = Vec::with_capacity(listing.len());

    for item in listing {
        let name = resolve_name(item, descriptions.get(&item.product_id));
        let description = resolve_description(&name, descriptions.get(&item.product_id));

        let price_minor = resolve_price_minor(prices.get(&item.product_id));
        if price_minor == 0 {
            warn!("⚠️ Skipping product without a usable price: {}", name);
            continue;
        }

        debug!("📦 {} - {} minor units", name, price_minor);
        products.push(Product {
            product_id: item.product_id,
            offer_id: item.offer_id.clone(),
            name,
            price_minor,
            description,
            stock_quantity: PLACEHOLDER_STOCK,
        });
    }

    products
}

/// Display name: description record name, else offer code, else a
/// synthesized placeholder.
fn resolve_name(item: &ListingItem, description: Option<&DescriptionRecord>) -> String {
    if let Some(record) = description {
        if !record.name.is_empty() {
            return record.name.clone();
        }
    }
    match &item.offer_id {
        Some(offer_id) if !offer_id.is_empty() => offer_id.clone(),
        _ => format!("Item {}", item.product_id),
    }
}

/// Sanitized and truncated description, with the display name as the
/// textual fallback when no real description exists.
fn resolve_description(name: &str, description: Option<&DescriptionRecord>) -> String {
    let raw = description.map(|r| r.description.as_str()).unwrap_or("");
    if raw.is_empty() {
        return name.to_string();
    }
    let cleaned = clean_description(raw);
    if cleaned.is_empty() {
        return name.to_string();
    }
    truncate_description(&cleaned)
}

/// Resolve the price in minor currency units.
///
/// The current price wins when positive; otherwise the pre-discount price
/// is used. Zero means no usable price was found.
fn resolve_price_minor(record: Option<&PriceRecord>) -> u64 {
    let Some(record) = record else {
        return 0;
    };
    for candidate in [record.price, record.old_price] {
        if let Some(value) = candidate {
            if value > 0.0 {
                return (value * 100.0).round() as u64;
            }
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_item(product_id: i64, offer_id: Option<&str>) -> ListingItem {
        ListingItem {
            product_id,
            offer_id: offer_id.map(str::to_string),
        }
    }

    fn price_record(product_id: i64, price: Option<f64>, old_price: Option<f64>) -> PriceRecord {
        PriceRecord {
            product_id,
            price,
            old_price,
        }
    }

    fn description_record(product_id: i64, name: &str, description: &str) -> DescriptionRecord {
        DescriptionRecord {
            product_id,
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_listing_order_defines_display_order() {
        let listing = vec![
            listing_item(3, Some("C")),
            listing_item(1, Some("A")),
            listing_item(2, Some("B")),
        ];
        let prices: HashMap<_, _> = [1, 2, 3]
            .into_iter()
            .map(|id| (id, price_record(id, Some(100.0), None)))
            .collect();

        let products = reconcile(&listing, &prices, &HashMap::new());
        let ids: Vec<i64> = products.iter().map(|p| p.product_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_zero_and_missing_prices_are_excluded() {
        let listing = vec![
            listing_item(1, Some("A")),
            listing_item(2, Some("B")),
            listing_item(3, Some("C")),
        ];
        let mut prices = HashMap::new();
        prices.insert(1, price_record(1, Some(1500.0), None));
        prices.insert(2, price_record(2, Some(0.0), None));
        // 3 has no price record at all.

        let products = reconcile(&listing, &prices, &HashMap::new());
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_id, 1);
        assert!(products.iter().all(|p| p.price_minor > 0));
    }

    #[test]
    fn test_old_price_fallback() {
        let listing = vec![listing_item(1, Some("A"))];
        let mut prices = HashMap::new();
        prices.insert(1, price_record(1, Some(0.0), Some(899.5)));

        let products = reconcile(&listing, &prices, &HashMap::new());
        assert_eq!(products[0].price_minor, 89_950);
    }

    #[test]
    fn test_name_fallback_chain() {
        let listing = vec![
            listing_item(1, Some("SKU-1")),
            listing_item(2, Some("SKU-2")),
            listing_item(3, None),
        ];
        let prices: HashMap<_, _> = [1, 2, 3]
            .into_iter()
            .map(|id| (id, price_record(id, Some(10.0), None)))
            .collect();
        let mut descriptions = HashMap::new();
        descriptions.insert(1, description_record(1, "Steel Kettle", ""));

        let products = reconcile(&listing, &prices, &descriptions);
        assert_eq!(products[0].name, "Steel Kettle");
        assert_eq!(products[1].name, "SKU-2");
        assert_eq!(products[2].name, "Item 3");
    }

    #[test]
    fn test_description_fallback_is_the_name() {
        let listing = vec![listing_item(1, Some("SKU-1"))];
        let prices: HashMap<_, _> =
            [(1, price_record(1, Some(10.0), None))].into_iter().collect();

        let products = reconcile(&listing, &prices, &HashMap::new());
        assert_eq!(products[0].description, "SKU-1");
    }

    #[test]
    fn test_description_is_sanitized_and_truncated() {
        let listing = vec![listing_item(1, Some("SKU-1"))];
        let prices: HashMap<_, _> =
            [(1, price_record(1, Some(10.0), None))].into_iter().collect();
        let long_html = format!("<p>{}</p>", "word ".repeat(100));
        let mut descriptions = HashMap::new();
        descriptions.insert(1, description_record(1, "Kettle", &long_html));

        let products = reconcile(&listing, &prices, &descriptions);
        let description = &products[0].description;
        assert!(!description.contains('<'));
        assert_eq!(description.chars().count(), 200);
        assert!(description.ends_with("..."));
    }

    #[test]
    fn test_mixed_sources_scenario() {
        // Listing [A, B, C]; price for A, zero for B, C only has old_price;
        // description only for A.
        let listing = vec![
            listing_item(1, Some("A")),
            listing_item(2, Some("B")),
            listing_item(3, Some("C")),
        ];
        let mut prices = HashMap::new();
        prices.insert(1, price_record(1, Some(1500.0), None));
        prices.insert(2, price_record(2, Some(0.0), None));
        prices.insert(3, price_record(3, None, Some(300.0)));
        let mut descriptions = HashMap::new();
        descriptions.insert(1, description_record(1, "Alpha", "The alpha product"));

        let products = reconcile(&listing, &prices, &descriptions);
        assert_eq!(products.len(), 2);

        assert_eq!(products[0].product_id, 1);
        assert_eq!(products[0].name, "Alpha");
        assert_eq!(products[0].description, "The alpha product");
        assert_eq!(products[0].price_minor, 150_000);

        assert_eq!(products[1].product_id, 3);
        assert_eq!(products[1].name, "C");
        assert_eq!(products[1].price_minor, 30_000);
    }

    #[test]
    fn test_stock_quantity_is_placeholder() {
        let listing = vec![listing_item(1, Some("A"))];
        let prices: HashMap<_, _> =
            [(1, price_record(1, Some(10.0), None))].into_iter().collect();

        let products = reconcile(&listing, &prices, &HashMap::new());
        assert_eq!(products[0].stock_quantity, PLACEHOLDER_STOCK);
    }

    #[test]
    fn test_empty_listing_yields_empty_output() {
        assert!(reconcile(&[], &HashMap::new(), &HashMap::new()).is_empty());
    }
}
