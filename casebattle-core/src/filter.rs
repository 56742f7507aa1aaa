//! Price-range filter: narrows the catalog to one price band.

use tracing::debug;

use crate::domain::{Catalog, CatalogItem, PriceBand};
use crate::error::SelectionError;

/// Cases whose price falls inside `band`, in catalog order.
///
/// An empty result aborts the battle with `EmptyFilterResult`; there is no
/// fallback to a wider band.
pub fn filter_by_price_range(
    catalog: &Catalog,
    band: PriceBand,
) -> Result<Vec<CatalogItem>, SelectionError> {
    let (min, max) = band.bounds();
    let filtered: Vec<CatalogItem> = catalog
        .iter()
        .filter(|item| item.priced_within(min, max))
        .cloned()
        .collect();

    debug!(
        band = %band,
        kept = filtered.len(),
        total = catalog.len(),
        "price-range filter applied"
    );

    if filtered.is_empty() {
        return Err(SelectionError::EmptyFilterResult { band });
    }
    Ok(filtered)
}
