//! Case Battle Core: catalog types and the case selection engine.
//!
//! This crate is pure: no I/O, no global state. It contains:
//! - Domain types (catalog items, price bands, requests, battle results)
//! - Price-range filter over the fixed band table
//! - Duplicate seeding and the tolerance-ladder variety picker
//! - Grouping of a selection into per-case counts
//! - Injectable randomness with a BLAKE3 seed hierarchy

pub mod domain;
pub mod error;
pub mod filter;
pub mod generator;
pub mod grouping;
pub mod rng;
pub mod selector;

pub use domain::{
    BattleMode, BattleResult, Catalog, CatalogItem, GameMode, PlayerConfig, PriceBand,
    Selection, SelectionRequest, MAX_CASES,
};
pub use error::SelectionError;
pub use filter::filter_by_price_range;
pub use generator::generate_battle;
pub use grouping::{group_by_name, grouped_total, CaseGroup};
pub use rng::{RandomSource, ScriptedRandom, SeedHierarchy};
pub use selector::{select_cases_for_battle, select_varied_cases};
