use std::f64::consts::FRAC_PI_2;

/// How a joint angle is measured in the plane.
///
/// The two-link Hamiltonian model and the N-link chain use different
/// conventions. Angles must be converted explicitly when passed between
/// them; both are counter-clockwise positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleConvention {
    /// 0 = hanging straight down. Used by the two-link model.
    Hanging,
    /// 0 = along +X. Used by the N-link chain, one absolute angle per link.
    Absolute,
}

impl AngleConvention {
    /// Re-expresses `angle` (given in `self`) in the `to` convention.
    pub fn convert(self, angle: f64, to: AngleConvention) -> f64 {
        match (self, to) {
            (AngleConvention::Hanging, AngleConvention::Absolute) => hanging_to_absolute(angle),
            (AngleConvention::Absolute, AngleConvention::Hanging) => absolute_to_hanging(angle),
            _ => angle,
        }
    }
}

pub fn hanging_to_absolute(theta: f64) -> f64 {
    theta - FRAC_PI_2
}

pub fn absolute_to_hanging(phi: f64) -> f64 {
    phi + FRAC_PI_2
}
