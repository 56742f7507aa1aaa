//! Catalog loading from JSON or CSV files.
//!
//! Case lists are commonly scraped from a storefront, so prices arrive as
//! display strings (`"1,234.56"`, sometimes with a leading `$`). Raw rows are
//! parsed into `CatalogItem`s here; the core never sees textual prices.

use casebattle_core::{Catalog, CatalogItem};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parse catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("case '{name}' has an invalid price: {raw:?}")]
    BadPrice { name: String, raw: String },

    #[error("unsupported catalog format '{0}' (expected .json or .csv)")]
    UnsupportedFormat(String),
}

/// On-disk catalog encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Csv,
}

impl CatalogFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(CatalogFormat::Json),
            "csv" => Ok(CatalogFormat::Csv),
            _ => Err(CatalogError::UnsupportedFormat(ext)),
        }
    }
}

/// A price as it appears in a source file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

/// One catalog row before price parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCase {
    pub name: String,
    pub price: RawPrice,
    #[serde(rename = "imageUrl", alias = "image_url", default)]
    pub image_url: String,
}

impl RawCase {
    pub fn into_item(self) -> Result<CatalogItem, CatalogError> {
        let price = match &self.price {
            RawPrice::Number(n) if n.is_finite() && *n >= 0.0 => Some(*n),
            RawPrice::Number(_) => None,
            RawPrice::Text(text) => parse_price(text),
        };
        match price {
            Some(price) => Ok(CatalogItem::new(self.name, price, self.image_url)),
            None => Err(CatalogError::BadPrice {
                raw: match self.price {
                    RawPrice::Number(n) => n.to_string(),
                    RawPrice::Text(t) => t,
                },
                name: self.name,
            }),
        }
    }
}

/// CSV rows always carry the price as text.
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    price: String,
    #[serde(alias = "imageUrl", default)]
    image_url: String,
}

/// Parse a display price such as `"1,234.56"` or `"$12"`.
///
/// Returns `None` for anything that is not a finite, non-negative amount.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let price: f64 = cleaned.trim().parse().ok()?;
    (price.is_finite() && price >= 0.0).then_some(price)
}

/// Load a catalog file, choosing the parser from its extension.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let format = CatalogFormat::from_path(path)?;
    let io_err = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    let catalog = match format {
        CatalogFormat::Json => {
            let text = std::fs::read_to_string(path).map_err(io_err)?;
            parse_catalog_json(&text)?
        }
        CatalogFormat::Csv => {
            let file = std::fs::File::open(path).map_err(io_err)?;
            parse_catalog_csv(file)?
        }
    };

    match catalog.price_span() {
        Some((cheapest, dearest)) => info!(
            path = %path.display(),
            cases = catalog.len(),
            cheapest,
            dearest,
            "loaded catalog"
        ),
        None => warn!(path = %path.display(), "catalog file contains no cases"),
    }
    Ok(catalog)
}

/// Parse a JSON array of `{name, price, imageUrl}` objects.
pub fn parse_catalog_json(text: &str) -> Result<Catalog, CatalogError> {
    let raw: Vec<RawCase> = serde_json::from_str(text)?;
    let items = raw
        .into_iter()
        .map(RawCase::into_item)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Catalog::new(items))
}

/// Parse CSV with a `name,price,image_url` header row.
pub fn parse_catalog_csv<R: Read>(reader: R) -> Result<Catalog, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut items = Vec::new();
    for row in csv_reader.deserialize::<CsvRow>() {
        let row = row?;
        let raw = RawCase {
            name: row.name,
            price: RawPrice::Text(row.price),
            image_url: row.image_url,
        };
        items.push(raw.into_item()?);
    }
    Ok(Catalog::new(items))
}
