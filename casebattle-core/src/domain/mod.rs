//! Domain types for case battles

pub mod band;
pub mod battle;
pub mod item;
pub mod request;

pub use band::PriceBand;
pub use battle::{BattleMode, BattleResult, GameMode, PlayerConfig};
pub use item::{Catalog, CatalogItem};
pub use request::{SelectionRequest, MAX_CASES};

/// Ordered cases chosen for one battle, repeats allowed.
pub type Selection = Vec<CatalogItem>;
