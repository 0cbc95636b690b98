//! Daily Geometric Brownian Motion
//!
//! Discretized GBM with a unit (one day) time step:
//!
//! S_{t+1} = S_t · exp(μ + σ Z_t),  Z_t ~ N(0, 1)
//!
//! where μ is the Itô-corrected daily drift and σ the daily volatility,
//! both estimated from historical log returns.

use crate::error::{Error, Result};
use crate::returns::ReturnStatistics;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Distribution;
use rayon::prelude::*;

/// Daily GBM model
///
/// Prices stay positive because every step is a multiplicative shock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyGbm {
    /// Starting price S_0
    pub s0: f64,
    /// Per-step log drift μ (already Itô-corrected)
    pub drift: f64,
    /// Per-step volatility σ
    pub volatility: f64,
}

impl DailyGbm {
    /// Creates a new daily GBM model
    ///
    /// # Arguments
    /// * `s0` - Starting price (must be finite and positive)
    /// * `drift` - Per-step log drift
    /// * `volatility` - Per-step volatility (must be non-negative)
    ///
    /// # Example
    /// ```
    /// use price_forecast::gbm::DailyGbm;
    ///
    /// let gbm = DailyGbm::new(100.0, 0.0005, 0.02).unwrap();
    /// assert_eq!(gbm.s0, 100.0);
    /// ```
    pub fn new(s0: f64, drift: f64, volatility: f64) -> Result<Self> {
        if !(s0.is_finite() && s0 > 0.0) {
            return Err(Error::config(format!(
                "start price must be positive, got {}",
                s0
            )));
        }
        if !(volatility.is_finite() && volatility >= 0.0) {
            return Err(Error::config(format!(
                "volatility must be non-negative, got {}",
                volatility
            )));
        }
        if !drift.is_finite() {
            return Err(Error::config(format!("drift must be finite, got {}", drift)));
        }
        Ok(Self { s0, drift, volatility })
    }

    /// Builds the model from estimated return statistics
    pub fn from_statistics(s0: f64, stats: &ReturnStatistics) -> Result<Self> {
        Self::new(s0, stats.drift, stats.volatility)
    }

    /// Multiplicative shock for one step given a standard normal draw
    #[inline]
    pub fn shock(&self, z: f64) -> f64 {
        (self.drift + self.volatility * z).exp()
    }

    /// Generates one price path
    ///
    /// Draws one sample per step from `sampler`.
    ///
    /// # Returns
    /// Vector of `horizon + 1` prices; index 0 is `s0`
    pub fn generate_path<R, D>(&self, rng: &mut R, sampler: &D, horizon: usize) -> Vec<f64>
    where
        R: Rng + ?Sized,
        D: Distribution<f64>,
    {
        let mut path = Vec::with_capacity(horizon + 1);
        path.push(self.s0);

        let mut price = self.s0;
        for _ in 0..horizon {
            price *= self.shock(sampler.sample(rng));
            path.push(price);
        }

        path
    }

    /// Generates one path per seed
    ///
    /// Each path has a private `ChaCha8Rng` stream seeded from its entry in
    /// `seeds`, so the output depends only on the seeds and never on how the
    /// work is scheduled. With `parallel` set, paths are generated on the
    /// rayon thread pool.
    pub fn generate_paths<D>(
        &self,
        seeds: &[u64],
        sampler: &D,
        horizon: usize,
        parallel: bool,
    ) -> Vec<Vec<f64>>
    where
        D: Distribution<f64> + Sync,
    {
        let path_for = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            self.generate_path(&mut rng, sampler, horizon)
        };

        if parallel {
            seeds.par_iter().map(|&seed| path_for(seed)).collect()
        } else {
            seeds.iter().map(|&seed| path_for(seed)).collect()
        }
    }

    /// Expected value E[S_t] = S_0 · exp((μ + σ²/2) t)
    pub fn expected_value(&self, t: f64) -> f64 {
        self.s0 * ((self.drift + 0.5 * self.volatility * self.volatility) * t).exp()
    }

    /// Median of S_t: S_0 · exp(μ t)
    pub fn median(&self, t: f64) -> f64 {
        self.s0 * (self.drift * t).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaussian::BoxMuller;
    use crate::returns::log_returns;

    #[test]
    fn test_gbm_positive_prices() {
        let gbm = DailyGbm::new(100.0, -0.05, 0.5).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let path = gbm.generate_path(&mut rng, &BoxMuller, 1000);

        assert!(path.iter().all(|&p| p > 0.0), "All prices should be positive");
    }

    #[test]
    fn test_path_length_and_start() {
        let gbm = DailyGbm::new(100.0, 0.001, 0.02).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);

        let path = gbm.generate_path(&mut rng, &BoxMuller, 100);
        assert_eq!(path.len(), 101);
        assert_eq!(path[0], 100.0);
    }

    #[test]
    fn test_zero_horizon_is_start_only() {
        let gbm = DailyGbm::new(42.0, 0.0, 0.1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(gbm.generate_path(&mut rng, &BoxMuller, 0), vec![42.0]);
    }

    #[test]
    fn test_zero_parameters_give_flat_path() {
        let gbm = DailyGbm::new(75.5, 0.0, 0.0).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let path = gbm.generate_path(&mut rng, &BoxMuller, 50);
        assert!(path.iter().all(|&p| p == 75.5));
    }

    #[test]
    fn test_log_returns_recover_parameters() {
        let gbm = DailyGbm::new(100.0, 0.001, 0.02).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let path = gbm.generate_path(&mut rng, &BoxMuller, 20_000);
        let stats = ReturnStatistics::from_log_returns(&log_returns(&path)).unwrap();

        assert!((stats.mean - gbm.drift).abs() < 0.0005, "Mean: {}", stats.mean);
        assert!(
            (stats.volatility - gbm.volatility).abs() < 0.001,
            "Volatility: {}",
            stats.volatility
        );
    }

    #[test]
    fn test_expected_value() {
        let gbm = DailyGbm::new(100.0, 0.0005, 0.02).unwrap();
        let seeds: Vec<u64> = (0..20_000).collect();
        let horizon = 20;

        let paths = gbm.generate_paths(&seeds, &BoxMuller, horizon, true);
        let mean = paths.iter().map(|p| p[horizon]).sum::<f64>() / paths.len() as f64;
        let expected = gbm.expected_value(horizon as f64);

        let relative_error = (mean - expected).abs() / expected;
        assert!(
            relative_error < 0.01,
            "Mean: {:.2}, Expected: {:.2}, Error: {:.2}%",
            mean,
            expected,
            relative_error * 100.0
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let gbm = DailyGbm::new(100.0, 0.001, 0.03).unwrap();
        let seeds: Vec<u64> = (100..400).collect();

        let parallel = gbm.generate_paths(&seeds, &BoxMuller, 30, true);
        let sequential = gbm.generate_paths(&seeds, &BoxMuller, 30, false);

        assert_eq!(parallel.len(), 300);
        assert!(parallel.iter().all(|p| p.len() == 31));
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_from_statistics() {
        let stats = ReturnStatistics::from_prices(&[100.0, 102.0, 101.0, 105.0, 104.0]).unwrap();
        let gbm = DailyGbm::from_statistics(104.0, &stats).unwrap();
        assert_eq!(gbm.drift, stats.drift);
        assert_eq!(gbm.volatility, stats.volatility);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            DailyGbm::new(-100.0, 0.0, 0.2),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            DailyGbm::new(100.0, 0.0, -0.2),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            DailyGbm::new(100.0, f64::NAN, 0.2),
            Err(Error::InvalidConfig(_))
        ));
    }
}
