//! Particle state and the fixed-size store that owns it

use crate::config::SimConfig;
use crate::rng::ParticleRng;
use eddy_core::InstanceTransform;
use glam::{DQuat, DVec2};

/// CPU-side particle state.
///
/// A particle is never removed: once `lifespan` drops below zero it is
/// expired and waits in place to be respawned.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// World-space position
    pub position: DVec2,
    /// World units per frame
    pub velocity: DVec2,
    /// Accumulated within one frame, cleared by integration
    pub acceleration: DVec2,
    pub max_speed: f64,
    pub max_force: f64,
    /// Fixed for the particle's whole existence
    pub orientation: DQuat,
    /// Seconds remaining; negative means expired
    pub lifespan: f64,
    /// Visual size in [0, 1]
    pub scale: f64,
}

impl Particle {
    pub fn new(orientation: DQuat, lifespan: f64, max_speed: f64, max_force: f64) -> Self {
        Self {
            position: DVec2::ZERO,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
            max_speed,
            max_force,
            orientation,
            lifespan,
            scale: 0.0,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.lifespan < 0.0
    }

    /// The renderer's view of this particle
    pub fn instance(&self) -> InstanceTransform {
        let [qx, qy, qz, qw] = self.orientation.to_array();
        InstanceTransform {
            position: [self.position.x as f32, self.position.y as f32, 0.0],
            scale: self.scale as f32,
            rotation: [qx as f32, qy as f32, qz as f32, qw as f32],
        }
    }
}

/// Fixed-size particle collection. Indices are stable for the store's lifetime.
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Allocate `config.count` particles at the origin with random
    /// orientations and staggered initial lifespans.
    pub fn new(config: &SimConfig, rng: &mut ParticleRng) -> Self {
        let particles = (0..config.count)
            .map(|_| {
                let orientation = rng.unit_quaternion();
                let lifespan = rng.range(0.0, config.initial_lifespan_max);
                Particle::new(orientation, lifespan, config.max_speed, config.max_force)
            })
            .collect();
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to every particle. The slice length cannot change.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn expired_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_expired()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_allocates_count_particles() {
        let config = SimConfig {
            count: 64,
            ..Default::default()
        };
        let mut rng = ParticleRng::new(42);
        let store = ParticleStore::new(&config, &mut rng);
        assert_eq!(store.len(), 64);
        assert!(store.get(63).is_some());
        assert!(store.get(64).is_none());

        for p in store.particles() {
            assert_eq!(p.position, DVec2::ZERO);
            assert_eq!(p.velocity, DVec2::ZERO);
            assert_eq!(p.scale, 0.0);
            assert_eq!(p.max_speed, 0.1);
            assert_eq!(p.max_force, 0.1);
            assert!((0.0..2.0).contains(&p.lifespan));
            assert!((p.orientation.length() - 1.0).abs() < 1e-9);
        }
        assert_eq!(store.expired_count(), 0);
    }

    #[test]
    fn expired_below_zero_only() {
        let mut p = Particle::new(DQuat::IDENTITY, 0.0, 0.1, 0.1);
        assert!(!p.is_expired());
        p.lifespan = -0.001;
        assert!(p.is_expired());
    }

    #[test]
    fn instance_carries_position_scale_rotation() {
        let mut p = Particle::new(DQuat::from_rotation_z(1.0), 1.0, 0.1, 0.1);
        p.position = DVec2::new(3.0, -2.0);
        p.scale = 0.5;
        let inst = p.instance();
        assert_eq!(inst.position, [3.0, -2.0, 0.0]);
        assert_eq!(inst.scale, 0.5);
        let q = p.orientation.to_array();
        for k in 0..4 {
            assert!((inst.rotation[k] as f64 - q[k]).abs() < 1e-6);
        }
    }
}
