//! Lifespan countdown and pointer-driven respawn

use crate::config::SimConfig;
use crate::particle::Particle;
use crate::rng::ParticleRng;
use eddy_core::Viewport;
use eddy_runtime::PointerState;
use glam::DVec2;

/// Linear interpolation between two floats
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Decides when an expired particle is reborn and what it is reborn as.
///
/// Lifecycle: alive while `lifespan >= 0`, expired once it goes negative,
/// and alive again only when the pointer moves while it is expired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPolicy {
    pub lifespan_max: f64,
    pub jitter_max: f64,
    pub scale_decay: f64,
}

impl SpawnPolicy {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            lifespan_max: config.lifespan_max,
            jitter_max: config.jitter_max,
            scale_decay: config.scale_decay,
        }
    }

    /// Respawn an expired particle near the pointer if the pointer moved
    /// this frame. Returns whether the particle was respawned.
    ///
    /// The pointer's frame displacement becomes the particle's initial
    /// acceleration, so a fast flick launches particles faster. Orientation
    /// is left alone.
    pub fn respawn(
        &self,
        particle: &mut Particle,
        pointer: &PointerState,
        viewport: &Viewport,
        rng: &mut ParticleRng,
    ) -> bool {
        if !particle.is_expired() || !pointer.moved() {
            return false;
        }

        let anchor = DVec2::from(viewport.pointer_to_world(pointer.current.to_array()));
        particle.position = anchor + rng.disc_offset(self.jitter_max);

        particle.lifespan = rng.range(0.0, self.lifespan_max);
        particle.scale = particle.lifespan;

        particle.velocity = DVec2::ZERO;
        particle.acceleration = pointer.displacement();
        true
    }

    /// Shrink scale toward zero and count lifespan down. Runs every frame
    /// for every particle, expired or not.
    pub fn age(&self, particle: &mut Particle, dt: f64) {
        particle.scale = lerp(particle.scale, 0.0, self.scale_decay);
        particle.lifespan -= dt;
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}
