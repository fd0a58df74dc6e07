//! Seeded random draws for spawning and orientation

use glam::{DQuat, DVec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

pub struct ParticleRng {
    rng: StdRng,
}

impl ParticleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a float in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns a float in [min, max), or `min` when the range is empty
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// Offset with uniformly random direction and length in [0, max_radius)
    pub fn disc_offset(&mut self, max_radius: f64) -> DVec2 {
        let angle = self.range(0.0, TAU);
        let length = self.range(0.0, max_radius);
        DVec2::new(angle.cos(), angle.sin()) * length
    }

    /// Uniformly distributed unit quaternion (Shoemake's subgroup algorithm)
    pub fn unit_quaternion(&mut self) -> DQuat {
        let u1 = self.next_f64();
        let u2 = self.next_f64();
        let u3 = self.next_f64();

        let a = (1.0 - u1).sqrt();
        let b = u1.sqrt();
        let (s2, c2) = (TAU * u2).sin_cos();
        let (s3, c3) = (TAU * u3).sin_cos();

        DQuat::from_xyzw(a * s2, a * c2, b * s3, b * c3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 1.4);
            assert!((0.0..1.4).contains(&v));
        }
    }

    #[test]
    fn empty_range_returns_min() {
        let mut rng = ParticleRng::new(1);
        assert_eq!(rng.range(0.5, 0.5), 0.5);
        assert_eq!(rng.range(2.0, 1.0), 2.0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ParticleRng::new(7);
        let mut b = ParticleRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn disc_offset_stays_inside_radius() {
        let mut rng = ParticleRng::new(3);
        for _ in 0..1000 {
            let d = rng.disc_offset(0.5);
            assert!(d.length() < 0.5);
        }
        assert_eq!(rng.disc_offset(0.0), DVec2::ZERO);
    }

    #[test]
    fn quaternion_unit_length() {
        let mut rng = ParticleRng::new(123);
        for _ in 0..1000 {
            let q = rng.unit_quaternion();
            assert!((q.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn quaternion_components_unbiased() {
        // Uniform over SO(3): every component has zero mean and E[c^2] = 1/4
        let mut rng = ParticleRng::new(99);
        let n = 20_000;
        let mut sum = [0.0f64; 4];
        let mut sum_sq = [0.0f64; 4];
        for _ in 0..n {
            let c = rng.unit_quaternion().to_array();
            for k in 0..4 {
                sum[k] += c[k];
                sum_sq[k] += c[k] * c[k];
            }
        }
        for k in 0..4 {
            assert!((sum[k] / n as f64).abs() < 0.02);
            assert!((sum_sq[k] / n as f64 - 0.25).abs() < 0.02);
        }
    }
}
