//! Run command — drives the simulation headless for a number of frames

use anyhow::{Context, Result};
use eddy_core::Viewport;
use eddy_particles::{FlowParticleSystem, SimConfig};
use eddy_runtime::{FrameClock, FrameInput, RuntimeSystem};
use glam::DVec2;
use serde::Serialize;

/// Radius of the scripted pointer circle, in NDC
const POINTER_RADIUS: f64 = 0.5;
/// Angular speed of the scripted pointer, radians per second
const POINTER_SPEED: f64 = 1.5;

pub struct RunArgs {
    pub frames: u64,
    pub width: f64,
    pub height: f64,
    pub dt: f64,
    pub seed: Option<u32>,
    pub config: Option<String>,
    pub format: String,
}

#[derive(Serialize)]
struct RunReport<'a> {
    config: &'a SimConfig,
    viewport: Viewport,
    stats: eddy_particles::SimStats,
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config '{}'", path))?;
            SimConfig::from_toml_str(&source).context("Failed to parse config")?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let viewport = Viewport::new(args.width, args.height).context("Invalid viewport")?;
    let mut system =
        FlowParticleSystem::new(config, viewport).context("Failed to create simulation")?;

    log::info!("simulating {} frames at dt {}", args.frames, args.dt);

    let mut clock = FrameClock::new();
    system.initialize(&FrameInput {
        dt: 0.0,
        pointer: pointer_path(0.0),
        viewport,
    })?;

    for _ in 0..args.frames {
        clock.advance(args.dt);
        system.update(&FrameInput {
            dt: clock.delta_time,
            pointer: pointer_path(clock.total_time),
            viewport,
        })?;
    }
    system.shutdown()?;

    let stats = system.stats();
    match args.format.as_str() {
        "json" => {
            let report = RunReport {
                config: system.config(),
                viewport,
                stats,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            println!("Frames:    {}", stats.frame);
            println!("Viewport:  {} x {}", viewport.width(), viewport.height());
            println!("Particles: {}", system.particles().len());
            println!("  alive:   {}", stats.alive);
            println!("  expired: {}", stats.expired);
            println!("Respawned last frame: {}", stats.respawned_last_frame);
            println!("Mean speed: {:.5}", stats.mean_speed);
            println!("Max speed:  {:.5}", stats.max_speed_observed);
        }
    }

    Ok(())
}

/// Pointer position at time `t`: a circle around the screen center
fn pointer_path(t: f64) -> DVec2 {
    let angle = t * POINTER_SPEED;
    DVec2::new(angle.cos(), angle.sin()) * POINTER_RADIUS
}
