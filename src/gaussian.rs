//! Standard normal sampling via the Box–Muller transform
//!
//! The shock source for every simulated step. Two uniforms drawn from the
//! open interval (0, 1) are mapped to one standard normal draw:
//!
//! z = √(-2 ln u) · cos(2πv)
//!
//! The sine component is discarded, so no state is carried between draws.

use rand::Rng;
use rand_distr::{Distribution, Open01};
use std::f64::consts::TAU;

/// Box–Muller standard normal distribution
///
/// Stateless; any `Rng` can drive it, which lets callers seed the random
/// stream for reproducible simulations.
///
/// # Example
/// ```
/// use price_forecast::gaussian::BoxMuller;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use rand_distr::Distribution;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let z: f64 = BoxMuller.sample(&mut rng);
/// assert!(z.is_finite());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxMuller;

impl BoxMuller {
    /// Maps two uniforms in (0, 1) to a standard normal value
    #[inline]
    pub fn transform(u: f64, v: f64) -> f64 {
        (-2.0 * u.ln()).sqrt() * (TAU * v).cos()
    }
}

impl Distribution<f64> for BoxMuller {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        // Open01 never yields 0, so ln(u) stays finite
        let u: f64 = rng.sample(Open01);
        let v: f64 = rng.sample(Open01);
        Self::transform(u, v)
    }
}
