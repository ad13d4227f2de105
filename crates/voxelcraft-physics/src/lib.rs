//! Axis-separated box collision against the block field, shared by every mover.
#![forbid(unsafe_code)]

mod collide;
mod mover;

pub use collide::{Capsule, intersects_solid, overlaps_cell};
pub use mover::{AxisMove, Body, CapsuleMover, ClampedAxes, MoverParams, StepReport, VerticalContact};

/// Downward acceleration, blocks per second squared.
pub const GRAVITY: f32 = 30.0;
/// Gap left between a snapped mover and the surface it rests on.
pub const CONTACT_EPSILON: f32 = 0.001;
/// Extra inset from the world edge when clamping.
pub const EDGE_MARGIN: f32 = 0.1;
