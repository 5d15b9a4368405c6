//! Math utilities module
//!
//! Provides double-precision re-exports from glam, planar helpers for
//! chains rotating about the Z axis, the two angle conventions used by the
//! pendulum models, and a small dense linear solver.

mod angle;
mod planar;
pub mod solve;

pub use angle::{absolute_to_hanging, hanging_to_absolute, AngleConvention};
pub use planar::{hanging_offset, link_direction, rot_z, Z_AXIS};
pub use solve::solve_linear;

// Re-export commonly used glam types
pub use glam::{DMat3, DVec3};
