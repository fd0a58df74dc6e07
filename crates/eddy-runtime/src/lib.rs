//! Eddy Runtime - Frame loop infrastructure
//!
//! Provides the per-frame building blocks a host drives the simulation with:
//! - `FrameClock` — frame delta tracking, wall-clock or fixed-step
//! - `PointerState` — current/previous pointer sample and per-frame displacement
//! - `FrameInput` — everything a system receives for one frame
//! - `RuntimeSystem` — trait for systems ticked once per rendered frame

mod clock;
mod pointer;
mod system;

pub use clock::{FrameClock, MAX_DELTA};
pub use pointer::PointerState;
pub use system::{FrameInput, RuntimeSystem};
