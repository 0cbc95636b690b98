//! Command-line front end for the forecasting engine
//!
//! Run with: cargo run --release -- simulate --prices closes.csv --horizon 50

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use price_forecast::{
    config::HORIZON_PRESETS, BoxMuller, DailyGbm, MonteCarloEngine, SimulationConfig,
    SimulationResult,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "price-forecast")]
#[command(about = "Monte Carlo price forecasting with Geometric Brownian Motion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast a price series read from a file
    Simulate {
        /// JSON array or CSV/text file of daily closes, oldest first
        #[arg(short, long)]
        prices: PathBuf,

        #[command(flatten)]
        sim: SimulationArgs,
    },

    /// Forecast a synthetic GBM history
    Demo {
        /// First price of the synthetic history
        #[arg(long, default_value = "100.0")]
        start: f64,

        /// Length of the synthetic history in days
        #[arg(long, default_value = "250")]
        days: usize,

        /// Daily log drift of the synthetic history
        #[arg(long, default_value = "0.0003", allow_hyphen_values = true)]
        drift: f64,

        /// Daily volatility of the synthetic history
        #[arg(long, default_value = "0.02")]
        volatility: f64,

        /// Seed of the synthetic history
        #[arg(long, default_value = "7")]
        history_seed: u64,

        #[command(flatten)]
        sim: SimulationArgs,
    },
}

#[derive(Args)]
struct SimulationArgs {
    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Days to simulate forward
    #[arg(long)]
    horizon: Option<usize>,

    /// Number of simulated paths
    #[arg(long)]
    paths: Option<usize>,

    /// Number of individually reported paths
    #[arg(long)]
    samples: Option<usize>,

    /// Seed for a reproducible forecast
    #[arg(long)]
    seed: Option<u64>,

    /// Disable parallel path generation
    #[arg(long)]
    sequential: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Print every n-th day in table output
    #[arg(long, default_value = "5")]
    every: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

impl SimulationArgs {
    fn to_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(horizon) = self.horizon {
            config.horizon_days = horizon;
        }
        if let Some(paths) = self.paths {
            config.path_count = paths;
        }
        if let Some(samples) = self.samples {
            config.sample_paths = samples;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.sequential {
            config.parallel = false;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_level(s: &str) -> Level {
    match s {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn synthetic_history(
    start: f64,
    days: usize,
    drift: f64,
    volatility: f64,
    seed: u64,
) -> Result<Vec<f64>> {
    let gbm = DailyGbm::new(start, drift, volatility)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(gbm.generate_path(&mut rng, &BoxMuller, days.saturating_sub(1)))
}

fn run(prices: &[f64], sim: &SimulationArgs) -> Result<()> {
    let config = sim.to_config()?;
    if !HORIZON_PRESETS.contains(&config.horizon_days) {
        warn!(
            "Horizon of {} days is not one of the presets {:?}",
            config.horizon_days, HORIZON_PRESETS
        );
    }
    info!(
        "Simulating {} paths over {} days from {} prices",
        config.path_count,
        config.horizon_days,
        prices.len()
    );
    debug!("Configuration: {:?}", config);

    let engine = MonteCarloEngine::new(config)?;
    let started = Instant::now();
    let Some(result) = engine.simulate(prices)? else {
        warn!("Price series is empty, nothing to simulate");
        return Ok(());
    };
    info!("Simulation finished in {:.1?}", started.elapsed());
    debug!(
        "Log returns: mean {:.6}, variance {:.8}, drift {:.6}",
        result.statistics.mean, result.statistics.variance, result.statistics.drift
    );

    match sim.format {
        OutputFormat::Json => println!("{}", result.to_json()?),
        OutputFormat::Table => print_table(&result, sim.every.max(1)),
    }
    Ok(())
}

fn print_table(result: &SimulationResult, every: usize) {
    let summary = &result.summary;

    println!("\nForecast: {} paths, {} days", result.path_count, result.horizon_days);
    println!("{:-<72}", "");
    println!("  Current price:     {:>12.2}", summary.current);
    println!(
        "  Projected median:  {:>12.2} ({:+.2}%)",
        summary.projected_median,
        summary.median_change_pct()
    );
    println!("  Projected low:     {:>12.2}", summary.projected_low);
    println!("  Projected high:    {:>12.2}", summary.projected_high);
    println!("  Daily volatility:  {:>11}%", summary.volatility);

    println!(
        "\n{:>5} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Day", "Worst", "P5", "P25", "Median", "P75", "P95", "Best"
    );
    println!("{:-<82}", "");
    for day in result
        .days
        .iter()
        .filter(|d| d.day % every == 0 || d.day == result.horizon_days)
    {
        println!(
            "{:>5} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            day.day,
            day.outlier_min,
            day.p5,
            day.p25,
            day.median,
            day.p75,
            day.p95,
            day.outlier_max
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&cli.log_level))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Simulate { prices, sim } => {
            let series = price_forecast::series::load_prices(&prices)
                .with_context(|| format!("loading prices from {}", prices.display()))?;
            info!("Loaded {} prices from {}", series.len(), prices.display());
            run(&series, &sim)?;
        }

        Commands::Demo {
            start,
            days,
            drift,
            volatility,
            history_seed,
            sim,
        } => {
            info!(
                "Generating {} days of synthetic history (drift {}, volatility {})",
                days, drift, volatility
            );
            let series = synthetic_history(start, days, drift, volatility, history_seed)?;
            run(&series, &sim)?;
        }
    }

    Ok(())
}
