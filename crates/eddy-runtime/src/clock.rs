//! Frame clock

use std::time::Instant;

/// Longest frame delta the clock will report, in seconds
pub const MAX_DELTA: f64 = 0.25;

/// Tracks elapsed time between rendered frames.
///
/// Interactive hosts call [`FrameClock::tick`] once per frame; headless
/// drivers call [`FrameClock::advance`] with a fixed step instead.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Frames counted so far
    pub frame: u64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from the wall clock. Call once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            self.frame += 1;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed);
    }

    /// Advance by an explicit delta (clamped to [0, 0.25] seconds)
    pub fn advance(&mut self, dt: f64) {
        self.delta_time = dt.clamp(0.0, MAX_DELTA);
        self.total_time += self.delta_time;
        self.frame += 1;
    }
}
