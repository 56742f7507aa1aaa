//! Batch simulation: many battles from one request, for tuning catalogs.
//!
//! Battle `i` draws its randomness from `SeedHierarchy::rng_for("battle", i)`,
//! so a batch is reproducible regardless of how rayon schedules the work.

use casebattle_core::{
    generate_battle, BattleMode, BattleResult, Catalog, SeedHierarchy, SelectionError,
    SelectionRequest,
};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

const BATTLE_SEED_LABEL: &str = "battle";

/// Batch parameters.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub runs: usize,
    pub master_seed: u64,
    pub parallel: bool,
}

impl SimulationConfig {
    pub fn new(runs: usize, master_seed: u64) -> Self {
        Self {
            runs,
            master_seed,
            parallel: true,
        }
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Aggregate quality of a batch of battles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub runs: usize,
    pub target_value: f64,
    pub mean_total: f64,
    pub mean_abs_deviation: f64,
    pub max_abs_deviation: f64,
    /// Mean of `total_cases / requested_cases`.
    pub mean_fill_ratio: f64,
    pub exhausted_runs: usize,
    /// Distinct case names seen across the whole batch.
    pub distinct_cases: usize,
}

impl SimulationSummary {
    fn from_battles(battles: &[BattleResult], target_value: f64) -> Self {
        let runs = battles.len();
        let n = runs.max(1) as f64;
        let deviations: Vec<f64> = battles
            .iter()
            .map(|b| (b.total_value - target_value).abs())
            .collect();

        let mut names: Vec<&str> = battles
            .iter()
            .flat_map(|b| b.cases.iter().map(|c| c.name.as_str()))
            .collect();
        names.sort_unstable();
        names.dedup();

        Self {
            runs,
            target_value,
            mean_total: battles.iter().map(|b| b.total_value).sum::<f64>() / n,
            mean_abs_deviation: deviations.iter().sum::<f64>() / n,
            max_abs_deviation: deviations.iter().copied().fold(0.0, f64::max),
            mean_fill_ratio: battles
                .iter()
                .map(|b| b.total_cases as f64 / b.requested_cases as f64)
                .sum::<f64>()
                / n,
            exhausted_runs: battles.iter().filter(|b| b.is_exhausted()).count(),
            distinct_cases: names.len(),
        }
    }
}

/// Generate `config.runs` battles and return them in run order.
pub fn simulate_battles(
    catalog: &Catalog,
    request: &SelectionRequest,
    mode: BattleMode,
    config: &SimulationConfig,
) -> Result<Vec<BattleResult>, SelectionError> {
    let seeds = SeedHierarchy::new(config.master_seed);
    let run_one = |i: usize| {
        let mut rng = seeds.rng_for(BATTLE_SEED_LABEL, i as u64);
        generate_battle(catalog, request, mode, &mut rng)
    };

    if config.parallel {
        (0..config.runs).into_par_iter().map(run_one).collect()
    } else {
        (0..config.runs).map(run_one).collect()
    }
}

/// Generate a batch and summarize it.
pub fn simulate(
    catalog: &Catalog,
    request: &SelectionRequest,
    mode: BattleMode,
    config: &SimulationConfig,
) -> Result<SimulationSummary, SelectionError> {
    let battles = simulate_battles(catalog, request, mode, config)?;
    let summary = SimulationSummary::from_battles(&battles, request.target_value);
    info!(
        runs = summary.runs,
        mean_abs_deviation = summary.mean_abs_deviation,
        exhausted = summary.exhausted_runs,
        "simulation complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebattle_core::CatalogItem;

    fn catalog() -> Catalog {
        Catalog::new(
            (1..=50)
                .map(|i| CatalogItem::new(format!("Case {i}"), i as f64 * 10.0, ""))
                .collect(),
        )
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let request = SelectionRequest::new(1_000.0, 6).with_duplicates(2);
        let config = SimulationConfig::new(64, 9);
        let parallel = simulate_battles(&catalog(), &request, BattleMode::Random, &config).unwrap();
        let sequential = simulate_battles(
            &catalog(),
            &request,
            BattleMode::Random,
            &config.clone().with_parallelism(false),
        )
        .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn summary_counts_runs() {
        let request = SelectionRequest::new(300.0, 3);
        let summary = simulate(
            &catalog(),
            &request,
            BattleMode::default(),
            &SimulationConfig::new(20, 1),
        )
        .unwrap();
        assert_eq!(summary.runs, 20);
        assert_eq!(summary.exhausted_runs, 0);
        assert_eq!(summary.mean_fill_ratio, 1.0);
        assert!(summary.distinct_cases >= 3);
        assert!(summary.max_abs_deviation >= summary.mean_abs_deviation);
    }

    #[test]
    fn errors_propagate() {
        let request = SelectionRequest::new(300.0, 0);
        let result = simulate(
            &catalog(),
            &request,
            BattleMode::default(),
            &SimulationConfig::new(4, 1),
        );
        assert!(matches!(result, Err(SelectionError::InvalidRequest(_))));
    }

    #[test]
    fn empty_batch_summary_is_zeroed() {
        let summary = SimulationSummary::from_battles(&[], 100.0);
        assert_eq!(summary.runs, 0);
        assert_eq!(summary.mean_total, 0.0);
        assert_eq!(summary.distinct_cases, 0);
    }
}
