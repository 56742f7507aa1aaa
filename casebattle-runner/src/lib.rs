//! Case Battle Runner: everything around the selection engine.
//!
//! This crate builds on `casebattle-core` to provide:
//! - Catalog loading from JSON or CSV, with display-price parsing
//! - TOML battle configuration
//! - Text and JSON battle reports
//! - Parallel, reproducible batch simulation

pub mod catalog;
pub mod config;
pub mod report;
pub mod simulate;

pub use catalog::{load_catalog, parse_price, CatalogError, CatalogFormat};
pub use config::{BattleConfig, ConfigError, ModeConfig};
pub use report::{format_currency, BattleReport, ReportLine};
pub use simulate::{simulate, simulate_battles, SimulationConfig, SimulationSummary};
