//! Fixed price bands offered by the price-range filter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four price bands a battle can be restricted to.
///
/// Bands serialize as their display label (`"$1,000 - $5,000"`). Parsing an
/// unknown label falls back to the widest band rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PriceBand {
    #[default]
    All,
    UpTo1k,
    From1kTo5k,
    From5kTo20k,
}

impl PriceBand {
    pub const ALL: [PriceBand; 4] = [
        PriceBand::All,
        PriceBand::UpTo1k,
        PriceBand::From1kTo5k,
        PriceBand::From5kTo20k,
    ];

    /// Inclusive `(min, max)` price bounds.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            PriceBand::All => (0.0, 100_000.0),
            PriceBand::UpTo1k => (0.0, 1_000.0),
            PriceBand::From1kTo5k => (1_000.0, 5_000.0),
            PriceBand::From5kTo20k => (5_000.0, 20_000.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceBand::All => "$0 - $100,000",
            PriceBand::UpTo1k => "$0 - $1,000",
            PriceBand::From1kTo5k => "$1,000 - $5,000",
            PriceBand::From5kTo20k => "$5,000 - $20,000",
        }
    }

    /// Look up a band by label. Unknown labels resolve to [`PriceBand::All`].
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|band| band.label() == label)
            .unwrap_or_default()
    }

    pub fn contains(self, price: f64) -> bool {
        let (min, max) = self.bounds();
        price >= min && price <= max
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for PriceBand {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<PriceBand> for String {
    fn from(band: PriceBand) -> Self {
        band.label().to_string()
    }
}
