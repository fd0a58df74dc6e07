//! Coherent noise sampled by the flow field

use noise::{NoiseFn, OpenSimplex};

/// A deterministic 2D noise function.
///
/// Output lies in `[-1, 1]`; the same `(u, v)` always yields the same value,
/// and nearby inputs yield nearby outputs.
pub trait NoiseSource: Send + Sync {
    fn sample(&self, u: f64, v: f64) -> f64;
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn sample(&self, u: f64, v: f64) -> f64 {
        self(u, v)
    }
}

/// OpenSimplex noise, seeded once at construction
#[derive(Clone, Debug)]
pub struct SimplexNoise {
    noise: OpenSimplex,
    seed: u32,
}

impl SimplexNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for SimplexNoise {
    fn sample(&self, u: f64, v: f64) -> f64 {
        self.noise.get([u, v]).clamp(-1.0, 1.0)
    }
}
