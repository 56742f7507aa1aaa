//! SelectionRequest: what the caller asks the selector for.

use serde::{Deserialize, Serialize};

use super::band::PriceBand;
use crate::error::SelectionError;

/// Largest number of cases a single battle may hold.
pub const MAX_CASES: usize = 20;

/// Parameters of one selection.
///
/// `validate()` must pass before the request reaches the selector; the
/// selector itself divides by `target_count` without re-checking it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub target_value: f64,
    pub target_count: usize,
    #[serde(default, rename = "price_range")]
    pub price_band: PriceBand,
    #[serde(default)]
    pub allow_duplicates: bool,
    #[serde(default = "default_duplicate_count")]
    pub duplicate_count: usize,
}

fn default_duplicate_count() -> usize {
    2
}

impl SelectionRequest {
    pub fn new(target_value: f64, target_count: usize) -> Self {
        Self {
            target_value,
            target_count,
            price_band: PriceBand::All,
            allow_duplicates: false,
            duplicate_count: default_duplicate_count(),
        }
    }

    pub fn with_band(mut self, band: PriceBand) -> Self {
        self.price_band = band;
        self
    }

    /// Enable duplicate seeding with `count` copies of one case.
    pub fn with_duplicates(mut self, count: usize) -> Self {
        self.allow_duplicates = true;
        self.duplicate_count = count;
        self
    }

    /// Per-slot anchor price. Only meaningful on a validated request.
    pub fn anchor_price(&self) -> f64 {
        self.target_value / self.target_count as f64
    }

    pub fn validate(&self) -> Result<(), SelectionError> {
        if !self.target_value.is_finite() || self.target_value <= 0.0 {
            return Err(SelectionError::InvalidRequest(format!(
                "total value must be a positive amount, got {}",
                self.target_value
            )));
        }
        if self.target_count == 0 || self.target_count > MAX_CASES {
            return Err(SelectionError::InvalidRequest(format!(
                "number of cases must be between 1 and {MAX_CASES}, got {}",
                self.target_count
            )));
        }
        if self.duplicate_count == 0 {
            return Err(SelectionError::InvalidRequest(
                "duplicate count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
