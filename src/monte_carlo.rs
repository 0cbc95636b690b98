//! Monte Carlo price forecasting engine
//!
//! Estimates daily GBM parameters from a historical price series, simulates
//! an ensemble of future paths and reduces it to per-day percentile bands:
//!
//! 1. log returns → mean, unbiased variance, volatility, Itô-corrected drift
//! 2. `path_count` independent paths from the last historical price
//! 3. outlier paths (lowest and highest terminal price) and sampled paths
//! 4. nearest-rank percentiles of every day's cross-section

use crate::aggregate::{aggregate, DayAggregate, OutlierPaths};
use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::gaussian::BoxMuller;
use crate::gbm::DailyGbm;
use crate::returns::ReturnStatistics;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Distribution;
use serde::{Deserialize, Serialize};

/// Headline numbers of a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Last historical price
    pub current: f64,
    /// Median price on the final day
    pub projected_median: f64,
    /// 5th percentile on the final day
    pub projected_low: f64,
    /// 95th percentile on the final day
    pub projected_high: f64,
    /// Daily volatility in percent, two decimals
    pub volatility: String,
}

impl Summary {
    fn new(current: f64, final_day: &DayAggregate, statistics: &ReturnStatistics) -> Self {
        Self {
            current,
            projected_median: final_day.median,
            projected_low: final_day.p5,
            projected_high: final_day.p95,
            volatility: format!("{:.2}", statistics.volatility_pct()),
        }
    }

    /// Relative change from the current price to the projected median, in percent
    pub fn median_change_pct(&self) -> f64 {
        (self.projected_median / self.current - 1.0) * 100.0
    }
}

/// Result of one forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Day aggregates for days `0..=horizon_days`
    pub days: Vec<DayAggregate>,
    pub summary: Summary,
    /// Return statistics the paths were generated from
    pub statistics: ReturnStatistics,
    pub horizon_days: usize,
    pub path_count: usize,
}

impl SimulationResult {
    /// Aggregate of the last simulated day
    ///
    /// Reads the last entry of `days` rather than indexing by `horizon_days`,
    /// so a deserialized result with a truncated `days` list cannot panic.
    /// Returns `None` only when `days` is empty.
    pub fn final_day(&self) -> Option<&DayAggregate> {
        self.days.last()
    }

    /// Serializes the result as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Monte Carlo engine
///
/// Generic over the shock distribution so tests can inject a deterministic
/// one; the default is the Box–Muller standard normal.
///
/// # Example
/// ```
/// use price_forecast::{MonteCarloEngine, SimulationConfig};
///
/// let config = SimulationConfig::new(2, 200).with_seed(42);
/// let engine = MonteCarloEngine::new(config).unwrap();
///
/// let result = engine
///     .simulate(&[100.0, 102.0, 101.0, 105.0, 104.0])
///     .unwrap()
///     .unwrap();
/// assert_eq!(result.days.len(), 3);
/// assert_eq!(result.summary.current, 104.0);
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarloEngine<D = BoxMuller> {
    config: SimulationConfig,
    sampler: D,
}

impl MonteCarloEngine<BoxMuller> {
    /// Creates an engine with the Box–Muller sampler
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] for a zero horizon or path count
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_sampler(config, BoxMuller)
    }
}

impl<D> MonteCarloEngine<D>
where
    D: Distribution<f64> + Sync,
{
    /// Creates an engine drawing shocks from `sampler`
    pub fn with_sampler(config: SimulationConfig, sampler: D) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, sampler })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs a forecast on a historical price series
    ///
    /// Seeds the master random stream from `config.seed`, or from entropy
    /// when no seed is configured.
    ///
    /// # Returns
    /// `Ok(None)` for an empty price series
    ///
    /// # Errors
    /// - [`Error::InsufficientData`] for fewer than three prices
    /// - [`Error::InvalidPrice`] for a non-finite or non-positive price
    pub fn simulate(&self, prices: &[f64]) -> Result<Option<SimulationResult>> {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.simulate_with_rng(prices, &mut rng)
    }

    /// Runs a forecast with a caller-supplied master random stream
    ///
    /// The master stream seeds one private stream per path and picks the
    /// sampled paths, so results are reproducible for a seeded `rng` whether
    /// or not the work runs in parallel.
    pub fn simulate_with_rng<R>(
        &self,
        prices: &[f64],
        rng: &mut R,
    ) -> Result<Option<SimulationResult>>
    where
        R: Rng + ?Sized,
    {
        let Some(&current) = prices.last() else {
            return Ok(None);
        };
        let config = &self.config;

        let statistics = ReturnStatistics::from_prices(prices)?;
        let model = DailyGbm::from_statistics(current, &statistics)?;

        let seeds: Vec<u64> = (0..config.path_count).map(|_| rng.gen()).collect();
        let paths = model.generate_paths(
            &seeds,
            &self.sampler,
            config.horizon_days,
            config.parallel,
        );

        let outliers = OutlierPaths::from_paths(&paths)
            .ok_or_else(|| Error::config("path count must be at least one"))?;
        let sample_indices: Vec<usize> = (0..config.sample_paths)
            .map(|_| rng.gen_range(0..config.path_count))
            .collect();

        let days = aggregate(&paths, outliers, &sample_indices, config.parallel);
        let summary = Summary::new(current, &days[config.horizon_days], &statistics);

        Ok(Some(SimulationResult {
            days,
            summary,
            statistics,
            horizon_days: config.horizon_days,
            path_count: config.path_count,
        }))
    }
}

/// Runs a forecast with default settings for everything but the horizon
/// and ensemble size
///
/// # Returns
/// `Ok(None)` for an empty price series
pub fn simulate(
    prices: &[f64],
    horizon_days: usize,
    path_count: usize,
) -> Result<Option<SimulationResult>> {
    MonteCarloEngine::new(SimulationConfig::new(horizon_days, path_count))?.simulate(prices)
}
