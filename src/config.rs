//! Simulation configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Forecast horizons offered to users, in days
pub const HORIZON_PRESETS: [usize; 3] = [20, 50, 100];

/// Default forecast horizon in days
pub const DEFAULT_HORIZON_DAYS: usize = 20;

/// Default ensemble size
pub const DEFAULT_PATH_COUNT: usize = 500;

/// Default number of individually reported paths
pub const DEFAULT_SAMPLE_PATHS: usize = 30;

/// Configuration of one simulation run
///
/// Deserializes from camelCase JSON; missing keys take their defaults.
///
/// # Example
/// ```
/// use price_forecast::SimulationConfig;
///
/// let config: SimulationConfig = serde_json::from_str(r#"{"horizonDays": 50}"#).unwrap();
/// assert_eq!(config.horizon_days, 50);
/// assert_eq!(config.path_count, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of days to simulate forward
    pub horizon_days: usize,
    /// Number of simulated paths
    pub path_count: usize,
    /// Number of paths reported individually per day
    pub sample_paths: usize,
    /// Seed of the master random stream; entropy when unset
    pub seed: Option<u64>,
    /// Generate paths and aggregate days on the rayon thread pool
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            path_count: DEFAULT_PATH_COUNT,
            sample_paths: DEFAULT_SAMPLE_PATHS,
            seed: None,
            parallel: true,
        }
    }
}

impl SimulationConfig {
    /// Default configuration with the given horizon and path count
    pub fn new(horizon_days: usize, path_count: usize) -> Self {
        Self {
            horizon_days,
            path_count,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sample_paths(mut self, sample_paths: usize) -> Self {
        self.sample_paths = sample_paths;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Loads a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects a zero horizon or an empty ensemble
    pub fn validate(&self) -> Result<()> {
        if self.horizon_days == 0 {
            return Err(Error::config("horizon must be at least one day"));
        }
        if self.path_count == 0 {
            return Err(Error::config("path count must be at least one"));
        }
        Ok(())
    }

    /// Whether the horizon is one of [`HORIZON_PRESETS`]
    pub fn is_preset_horizon(&self) -> bool {
        HORIZON_PRESETS.contains(&self.horizon_days)
    }
}
