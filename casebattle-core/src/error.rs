//! Structured errors surfaced by the selector.

use thiserror::Error;

use crate::domain::PriceBand;

/// Reasons a battle cannot be generated.
///
/// A catalog that runs dry before every slot is filled is not an error: the
/// selection simply comes back shorter (see `BattleResult::is_exhausted`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("no cases found in the selected price range ({band})")]
    EmptyFilterResult { band: PriceBand },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
