//! CatalogItem: a priced case, and the catalog that holds them.

use serde::{Deserialize, Serialize};

/// A single case offered in the catalog.
///
/// Items are immutable once loaded. The selector hands out value copies, so a
/// selection never aliases the catalog it was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub price: f64,
    #[serde(rename = "imageUrl", alias = "image_url", default)]
    pub image_url: String,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>, price: f64, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            image_url: image_url.into(),
        }
    }

    /// Absolute distance between this item's price and an anchor price.
    pub fn distance_to(&self, anchor: f64) -> f64 {
        (self.price - anchor).abs()
    }

    /// True when the price lies in `[min, max]`, inclusive on both ends.
    pub fn priced_within(&self, min: f64, max: f64) -> bool {
        self.price >= min && self.price <= max
    }
}

/// The full set of cases available for a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogItem> {
        self.items.iter()
    }

    /// Cheapest and most expensive price in the catalog, if any.
    pub fn price_span(&self) -> Option<(f64, f64)> {
        let mut iter = self.items.iter().map(|item| item.price);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

impl From<Vec<CatalogItem>> for Catalog {
    fn from(items: Vec<CatalogItem>) -> Self {
        Self::new(items)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogItem;
    type IntoIter = std::slice::Iter<'a, CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
