//! Case Battle CLI: build battles from a case catalog.
//!
//! Commands:
//! - `spin`: select cases for one battle and print the report
//! - `simulate`: run a seeded batch and summarize how close battles land
//! - `bands`: list the selectable price ranges
//! - `init-config`: write a starter TOML config

use anyhow::{bail, Context, Result};
use casebattle_core::{generate_battle, PlayerConfig, PriceBand, MAX_CASES};
use casebattle_runner::{
    format_currency, load_catalog, simulate, BattleConfig, BattleReport, SimulationConfig,
    SimulationSummary,
};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "casebattle_core=info,casebattle_runner=info,casebattle_cli=info";

#[derive(Parser)]
#[command(
    name = "casebattle",
    about = "Case battle builder: pick cases that add up to a target value"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Select cases for a single battle.
    Spin {
        #[command(flatten)]
        battle: BattleArgs,

        /// Print the report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Generate many battles from one request and summarize them.
    Simulate {
        #[command(flatten)]
        battle: BattleArgs,

        /// Number of battles to generate.
        #[arg(long, default_value_t = 1000)]
        runs: usize,

        /// Run battles one after another instead of in parallel.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Print the summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the selectable price ranges.
    Bands,
    /// Write a starter TOML config.
    InitConfig {
        /// Where to write the config.
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

/// Battle request options shared by `spin` and `simulate`.
///
/// Flags override values from `--config`.
#[derive(Args, Debug, Default)]
struct BattleArgs {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog file (.json or .csv).
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Target total value in dollars.
    #[arg(long)]
    value: Option<f64>,

    /// Number of cases (1-20).
    #[arg(long)]
    count: Option<usize>,

    /// Price range: a label such as "$0 - $1,000", or all, 1k, 1k-5k, 5k-20k.
    #[arg(long, value_parser = parse_band)]
    range: Option<PriceBand>,

    /// Seed the battle with this many copies of one case.
    #[arg(long)]
    duplicates: Option<usize>,

    /// Draw the player configuration at random.
    #[arg(long, default_value_t = false)]
    random_mode: bool,

    /// Player configuration, e.g. 1v1, 1v1v1, 2v2, 3v3.
    #[arg(long)]
    players: Option<PlayerConfig>,

    /// Seed for reproducible battles.
    #[arg(long)]
    seed: Option<u64>,
}

impl BattleArgs {
    /// Load the base config (file or defaults) and apply flag overrides.
    fn resolve(&self) -> Result<BattleConfig> {
        let mut config = match &self.config {
            Some(path) => BattleConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => BattleConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut BattleConfig) {
        if let Some(catalog) = &self.catalog {
            config.catalog = catalog.clone();
        }
        if let Some(value) = self.value {
            config.request.target_value = value;
        }
        if let Some(count) = self.count {
            config.request.target_count = count;
        }
        if let Some(band) = self.range {
            config.request.price_band = band;
        }
        if let Some(copies) = self.duplicates {
            config.request.allow_duplicates = true;
            config.request.duplicate_count = copies;
        }
        if self.random_mode {
            config.mode.randomize = true;
        }
        if let Some(players) = self.players {
            config.mode.player_config = players;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn parse_band(text: &str) -> Result<PriceBand, String> {
    let text = text.trim();
    let band = match text.to_ascii_lowercase().as_str() {
        "all" => Some(PriceBand::All),
        "1k" => Some(PriceBand::UpTo1k),
        "1k-5k" => Some(PriceBand::From1kTo5k),
        "5k-20k" => Some(PriceBand::From5kTo20k),
        _ => PriceBand::ALL.into_iter().find(|b| b.label() == text),
    };
    band.ok_or_else(|| format!("unknown price range '{text}' (see `casebattle bands`)"))
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Spin { battle, json } => run_spin(&battle, json),
        Commands::Simulate {
            battle,
            runs,
            sequential,
            json,
        } => run_simulate(&battle, runs, sequential, json),
        Commands::Bands => {
            print_bands();
            Ok(())
        }
        Commands::InitConfig { path, force } => run_init_config(&path, force),
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_spin(args: &BattleArgs, json: bool) -> Result<()> {
    let config = args.resolve()?;
    let catalog = load_catalog(&config.catalog)
        .with_context(|| format!("loading catalog {}", config.catalog.display()))?;

    let mode = config.mode.battle_mode();
    let battle = match config.seed {
        Some(seed) => generate_battle(
            &catalog,
            &config.request,
            mode,
            &mut StdRng::seed_from_u64(seed),
        ),
        None => generate_battle(&catalog, &config.request, mode, &mut rand::thread_rng()),
    }?;

    let report = BattleReport::new(&battle, &config.request);
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

fn run_simulate(args: &BattleArgs, runs: usize, sequential: bool, json: bool) -> Result<()> {
    if runs == 0 {
        bail!("--runs must be at least 1");
    }
    let config = args.resolve()?;
    let catalog = load_catalog(&config.catalog)
        .with_context(|| format!("loading catalog {}", config.catalog.display()))?;

    let master_seed = config.seed.unwrap_or_else(rand::random);
    let sim = SimulationConfig::new(runs, master_seed).with_parallelism(!sequential);
    let summary = simulate(&catalog, &config.request, config.mode.battle_mode(), &sim)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary, master_seed);
    }
    Ok(())
}

fn print_summary(summary: &SimulationSummary, master_seed: u64) {
    println!("Runs:               {}", summary.runs);
    println!("Master seed:        {master_seed}");
    println!("Target value:       {}", format_currency(summary.target_value));
    println!("Mean total:         {}", format_currency(summary.mean_total));
    println!(
        "Mean |deviation|:   {}",
        format_currency(summary.mean_abs_deviation)
    );
    println!(
        "Max |deviation|:    {}",
        format_currency(summary.max_abs_deviation)
    );
    println!(
        "Mean fill:          {:.1}%",
        summary.mean_fill_ratio * 100.0
    );
    println!("Short battles:      {}", summary.exhausted_runs);
    println!("Distinct cases:     {}", summary.distinct_cases);
}

fn print_bands() {
    println!("{:<8} {:<20} {:>12} {:>12}", "Key", "Label", "Min", "Max");
    println!("{}", "-".repeat(55));
    let keys = ["all", "1k", "1k-5k", "5k-20k"];
    for (key, band) in keys.iter().zip(PriceBand::ALL) {
        let (min, max) = band.bounds();
        println!(
            "{:<8} {:<20} {:>12} {:>12}",
            key,
            band.label(),
            format_currency(min),
            format_currency(max)
        );
    }
    println!();
    println!("Battles hold 1 to {MAX_CASES} cases.");
}

fn run_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let text = BattleConfig::default().to_toml()?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    println!("Config written to: {}", path.display());
    Ok(())
}
