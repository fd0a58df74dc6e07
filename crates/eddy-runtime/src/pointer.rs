//! Pointer state carried across frames

use glam::DVec2;

/// Pointer position in normalized device coordinates, current and previous.
///
/// Update order within one frame: [`sample`](Self::sample) the new position,
/// read [`displacement`](Self::displacement) while simulating, then
/// [`end_frame`](Self::end_frame) copies current into previous.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub current: DVec2,
    pub previous: DVec2,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this frame's pointer position
    pub fn sample(&mut self, ndc: DVec2) {
        self.current = ndc;
    }

    /// Pointer movement since the previous frame, in NDC units
    pub fn displacement(&self) -> DVec2 {
        self.current - self.previous
    }

    /// Did the pointer move at all this frame?
    pub fn moved(&self) -> bool {
        self.displacement().length() > 0.0
    }

    /// Call once all particles have been updated for the frame
    pub fn end_frame(&mut self) {
        self.previous = self.current;
    }
}
