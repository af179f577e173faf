use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Where a workload draws its pseudo-random streams from.
///
/// Workloads whose output must be a pure function of their inputs (fraud
/// anomaly/ML scores, portfolio runs) always seed from request data and do not
/// consult this. The Monte-Carlo risk simulation uses it: `Entropy` in
/// production, `Seeded` when a reproducible ensemble is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RngSource {
    #[default]
    Entropy,
    Seeded(u64),
}

impl RngSource {
    /// Returns an independent stream for sub-task `index` of the request keyed by `key`.
    pub fn stream(&self, key: u64, index: u64) -> StdRng {
        match self {
            RngSource::Entropy => StdRng::from_entropy(),
            RngSource::Seeded(seed) => {
                StdRng::seed_from_u64((seed ^ key.rotate_left(32)).wrapping_add(index))
            }
        }
    }
}

/// Draws a standard normal sample using the Marsaglia polar method.
pub fn next_gaussian<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    loop {
        let v1 = 2.0 * rng.r#gen::<f64>() - 1.0;
        let v2 = 2.0 * rng.r#gen::<f64>() - 1.0;
        let s = v1 * v1 + v2 * v2;
        if s < 1.0 && s != 0.0 {
            return v1 * (-2.0 * s.ln() / s).sqrt();
        }
    }
}
