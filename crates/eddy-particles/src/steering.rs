//! Per-particle steering and integration

use crate::field::FlowField;
use crate::particle::Particle;
use glam::DVec2;

/// Add a force to this frame's accumulated acceleration
pub fn apply_force(particle: &mut Particle, force: DVec2) {
    particle.acceleration += force;
}

/// Steer along the flow-field cell under the particle.
///
/// Positions off the grid contribute no force.
pub fn follow(particle: &mut Particle, field: &FlowField, cell_width: f64, cell_height: f64) {
    let force = field
        .force_at(particle.position, cell_width, cell_height)
        .clamp_length_max(particle.max_force);
    apply_force(particle, force);
}

/// Semi-implicit Euler step: velocity first (capped at `max_speed`, direction
/// kept), then position with the new velocity. Acceleration is cleared.
pub fn integrate(particle: &mut Particle) {
    particle.velocity += particle.acceleration;
    particle.velocity = particle.velocity.clamp_length_max(particle.max_speed);
    particle.acceleration = DVec2::ZERO;

    particle.position += particle.velocity;
}
