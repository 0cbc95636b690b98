//! Log-return estimation from a historical price series
//!
//! For a daily price series P_0..P_n the log returns are r_i = ln(P_{i+1} / P_i).
//! The GBM parameters used for forecasting are the sample statistics of r:
//!
//! - volatility σ = √s², with s² the unbiased sample variance
//! - drift μ = r̄ - s²/2 (Itô correction)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Minimum number of prices needed to estimate a sample variance
pub const MIN_PRICES: usize = 3;

/// Computes the log-return series of a price series
///
/// Returns an empty vector for fewer than two prices.
pub fn log_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// Checks that every price is finite and strictly positive
pub fn validate_prices(prices: &[f64]) -> Result<()> {
    match prices
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p <= 0.0)
    {
        Some((index, &value)) => Err(Error::InvalidPrice { index, value }),
        None => Ok(()),
    }
}

/// Per-day statistics of historical log returns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnStatistics {
    /// Arithmetic mean of log returns
    pub mean: f64,
    /// Unbiased sample variance of log returns
    pub variance: f64,
    /// Standard deviation of log returns
    pub volatility: f64,
    /// Itô-corrected drift: mean - variance / 2
    pub drift: f64,
    /// Number of log returns used
    pub observations: usize,
}

impl ReturnStatistics {
    /// Estimates statistics from a price series
    ///
    /// # Errors
    /// - [`Error::InvalidPrice`] if any price is non-finite or not positive
    /// - [`Error::InsufficientData`] if fewer than [`MIN_PRICES`] prices are given
    ///
    /// # Example
    /// ```
    /// use price_forecast::returns::ReturnStatistics;
    ///
    /// let stats = ReturnStatistics::from_prices(&[100.0, 102.0, 101.0, 105.0]).unwrap();
    /// assert_eq!(stats.observations, 3);
    /// assert!(stats.volatility > 0.0);
    /// ```
    pub fn from_prices(prices: &[f64]) -> Result<Self> {
        validate_prices(prices)?;
        Self::from_log_returns(&log_returns(prices))
    }

    /// Estimates statistics from an already computed log-return series
    pub fn from_log_returns(returns: &[f64]) -> Result<Self> {
        let n = returns.len();
        if n < MIN_PRICES - 1 {
            return Err(Error::InsufficientData {
                required: MIN_PRICES,
                actual: n + 1,
            });
        }

        let mean = returns.iter().sum::<f64>() / n as f64;
        let variance = returns
            .iter()
            .map(|r| (r - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;

        Ok(Self {
            mean,
            variance,
            volatility: variance.sqrt(),
            drift: mean - 0.5 * variance,
            observations: n,
        })
    }

    /// Volatility expressed in percent
    pub fn volatility_pct(&self) -> f64 {
        self.volatility * 100.0
    }
}
