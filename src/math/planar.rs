use glam::{DMat3, DVec3};

/// Rotation axis shared by every joint of a planar chain.
pub const Z_AXIS: DVec3 = DVec3::Z;

/// Rotation about the Z axis by `theta` radians.
pub fn rot_z(theta: f64) -> DMat3 {
    DMat3::from_rotation_z(theta)
}

/// Unit vector along a link whose absolute angle is `phi`, measured
/// counter-clockwise from +X.
pub fn link_direction(phi: f64) -> DVec3 {
    rot_z(phi) * DVec3::X
}

/// Offset of a link's distal end from its pivot when the link hangs at
/// `theta`, measured counter-clockwise from straight down.
pub fn hanging_offset(theta: f64, length: f64) -> DVec3 {
    DVec3::new(length * theta.sin(), -length * theta.cos(), 0.0)
}
