//! Eddy Particles - Flow-field particle simulation
//!
//! Provides a fixed pool of particles steered by a noise-built flow field:
//! - Coherent-noise flow field, rebuilt whole on viewport resize
//! - Steering toward the local field vector with capped force and speed
//! - Lifespan countdown with respawn at the pointer when it moves
//! - Per-frame instance transforms for an instanced draw call

pub mod bridge;
pub mod config;
pub mod field;
pub mod noise_source;
pub mod particle;
pub mod rng;
pub mod spawn;
pub mod steering;

use eddy_core::{Result, Viewport};
use eddy_runtime::{FrameInput, PointerState, RuntimeSystem};
use glam::DVec2;
use serde::Serialize;

pub use bridge::{InstanceBuffer, InstanceRaw};
pub use config::SimConfig;
pub use field::FlowField;
pub use noise_source::{NoiseSource, SimplexNoise};
pub use particle::{Particle, ParticleStore};
pub use rng::ParticleRng;
pub use spawn::SpawnPolicy;

/// Snapshot of the simulation after the latest frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimStats {
    pub frame: u64,
    pub alive: usize,
    pub expired: usize,
    pub respawned_last_frame: usize,
    pub mean_speed: f64,
    pub max_speed_observed: f64,
}

/// The flow-field particle system — implements RuntimeSystem for the frame loop.
pub struct FlowParticleSystem {
    config: SimConfig,
    noise: Box<dyn NoiseSource>,
    field: FlowField,
    store: ParticleStore,
    spawn: SpawnPolicy,
    pointer: PointerState,
    instances: InstanceBuffer,
    rng: ParticleRng,
    frame: u64,
    respawned_last_frame: usize,
}

impl FlowParticleSystem {
    /// Build with OpenSimplex noise seeded from `config.seed`
    pub fn new(config: SimConfig, viewport: Viewport) -> Result<Self> {
        let noise = SimplexNoise::new(config.seed);
        Self::with_noise(config, viewport, noise)
    }

    /// Build with a caller-supplied noise function.
    ///
    /// Fails if the config is invalid; nothing in the per-frame path can fail.
    pub fn with_noise(
        config: SimConfig,
        viewport: Viewport,
        noise: impl NoiseSource + 'static,
    ) -> Result<Self> {
        config.validate()?;

        let field = FlowField::build(&noise, viewport, config.rows, config.cols, config.strength)?;
        let mut rng = ParticleRng::new(u64::from(config.seed));
        let store = ParticleStore::new(&config, &mut rng);

        log::info!(
            "flow field {}x{} over {}x{} viewport, {} particles",
            config.cols,
            config.rows,
            viewport.width(),
            viewport.height(),
            store.len()
        );

        Ok(Self {
            spawn: SpawnPolicy::from_config(&config),
            instances: InstanceBuffer::new(config.count),
            noise: Box::new(noise),
            config,
            field,
            store,
            pointer: PointerState::new(),
            rng,
            frame: 0,
            respawned_last_frame: 0,
        })
    }

    /// Rebuild the flow field if the viewport size changed.
    /// Returns whether a rebuild happened.
    pub fn resize(&mut self, viewport: Viewport) -> Result<bool> {
        if viewport == self.field.viewport() {
            return Ok(false);
        }

        let field = FlowField::build(
            self.noise.as_ref(),
            viewport,
            self.config.rows,
            self.config.cols,
            self.config.strength,
        )?;
        self.field = field;

        log::info!(
            "rebuilt flow field for {}x{} viewport",
            viewport.width(),
            viewport.height()
        );
        Ok(true)
    }

    /// Advance every particle by one frame. Returns how many were respawned.
    pub fn step(&mut self, dt: f64, pointer_ndc: DVec2) -> usize {
        self.pointer.sample(pointer_ndc);

        let viewport = self.field.viewport();
        let (cell_width, cell_height) = self.field.cell_size();
        let mut respawned = 0;

        for p in self.store.particles_mut() {
            if self.spawn.respawn(p, &self.pointer, &viewport, &mut self.rng) {
                respawned += 1;
            }
            steering::follow(p, &self.field, cell_width, cell_height);
            steering::integrate(p);
            self.spawn.age(p, dt);
        }

        self.pointer.end_frame();
        self.frame += 1;
        self.respawned_last_frame = respawned;

        if respawned > 0 {
            log::debug!("frame {}: respawned {respawned} particles", self.frame);
        }
        respawned
    }

    /// Write the current particle state into the instance buffer
    pub fn pack_instances(&mut self) {
        self.instances.pack(&self.store);
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn field(&self) -> &FlowField {
        &self.field
    }

    pub fn viewport(&self) -> Viewport {
        self.field.viewport()
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    pub fn instances_mut(&mut self) -> &mut InstanceBuffer {
        &mut self.instances
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> SimStats {
        let particles = self.store.particles();
        let expired = self.store.expired_count();
        let (speed_sum, speed_max) = particles.iter().fold((0.0, 0.0f64), |(sum, max), p| {
            let speed = p.velocity.length();
            (sum + speed, max.max(speed))
        });

        SimStats {
            frame: self.frame,
            alive: particles.len() - expired,
            expired,
            respawned_last_frame: self.respawned_last_frame,
            mean_speed: speed_sum / particles.len() as f64,
            max_speed_observed: speed_max,
        }
    }
}

impl RuntimeSystem for FlowParticleSystem {
    fn initialize(&mut self, input: &FrameInput) -> Result<()> {
        self.resize(input.viewport)?;
        self.pointer.sample(input.pointer);
        self.pointer.end_frame();
        self.pack_instances();
        Ok(())
    }

    fn update(&mut self, input: &FrameInput) -> Result<()> {
        self.resize(input.viewport)?;
        self.step(input.dt, input.pointer);
        self.pack_instances();
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        log::info!("shutting down after {} frames", self.frame);
        Ok(())
    }

    fn name(&self) -> &str {
        "flow_particles"
    }
}
