//! Runtime system trait

use eddy_core::{Result, Viewport};
use glam::DVec2;

/// Host-supplied input for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame
    pub dt: f64,
    /// Pointer position in normalized device coordinates
    pub pointer: DVec2,
    /// Current viewport extent in world units
    pub viewport: Viewport,
}

/// A system that can be ticked by the frame loop
///
/// The host calls `update` exactly once per rendered frame; calls never
/// overlap, and a frame's update completes before the next one starts.
pub trait RuntimeSystem {
    /// Called once before the first frame
    fn initialize(&mut self, input: &FrameInput) -> Result<()>;

    /// Called once per frame
    fn update(&mut self, input: &FrameInput) -> Result<()>;

    /// Called when the host is shutting down
    fn shutdown(&mut self) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
