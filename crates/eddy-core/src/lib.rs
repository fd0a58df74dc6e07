//! Eddy Core - Foundational types for the Eddy simulation
//!
//! This crate provides the types every other Eddy crate depends on:
//! - `Viewport` - Validated world-space extent of the simulation
//! - `InstanceTransform` - Per-particle position/scale/orientation for the renderer
//! - Error types and Result alias

mod error;
mod types;

pub use error::{EddyError, Result};
pub use types::{InstanceTransform, Viewport};
