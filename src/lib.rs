//! # Monte Carlo Price Forecasting
//!
//! Forecasts a price series by simulating many future paths under a
//! Geometric Brownian Motion fitted to its historical log returns, then
//! summarizing the ensemble as per-day percentile bands.
//!
//! ## Modules
//!
//! - [`gaussian`] - Box–Muller standard normal sampler
//! - [`returns`] - Log-return statistics, volatility and drift
//! - [`gbm`] - Daily Geometric Brownian Motion path generation
//! - [`aggregate`] - Per-day percentiles, outlier and sampled paths
//! - [`monte_carlo`] - The forecasting engine
//! - [`config`] - Simulation configuration
//! - [`series`] - Loading price series from files
//!
//! ## Example
//!
//! ```rust
//! use price_forecast::simulate;
//!
//! let prices = [100.0, 102.0, 101.0, 105.0, 104.0];
//! let result = simulate(&prices, 20, 500).unwrap().expect("non-empty history");
//!
//! println!(
//!     "Median in 20 days: {:.2} (90% band {:.2}..{:.2})",
//!     result.summary.projected_median,
//!     result.summary.projected_low,
//!     result.summary.projected_high,
//! );
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod gaussian;
pub mod gbm;
pub mod monte_carlo;
pub mod returns;
pub mod series;

pub use aggregate::DayAggregate;
pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use gaussian::BoxMuller;
pub use gbm::DailyGbm;
pub use monte_carlo::{simulate, MonteCarloEngine, SimulationResult, Summary};
pub use returns::ReturnStatistics;
