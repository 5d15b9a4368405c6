/// A rigid link of a planar chain: a uniform rod with an optional point mass
/// (bob) at its distal end.
///
/// Mass properties are derived once at construction and never change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Length from the proximal joint to the distal end.
    pub length: f64,
    pub rod_mass: f64,
    pub bob_mass: f64,
    /// Total mass, `rod_mass + bob_mass`.
    pub mass: f64,
    /// Distance from the proximal joint to the centre of mass.
    pub com_offset: f64,
    /// Moment of inertia about the centre of mass (scalar, about Z).
    pub inertia: f64,
}

impl Link {
    /// Derives mass, centre of mass and inertia for a rod of `length` and
    /// `rod_mass` with `bob_mass` concentrated at its tip.
    ///
    /// A massless link gets `com_offset = inertia = 0` so it contributes
    /// nothing to the dynamics.
    pub fn new(length: f64, rod_mass: f64, bob_mass: f64) -> Self {
        let mass = rod_mass + bob_mass;
        let (com_offset, inertia) = if mass > 0.0 {
            let a = (rod_mass * (length * 0.5) + bob_mass * length) / mass;
            let rod_about_centre = rod_mass * length * length / 12.0;
            let d_rod = length * 0.5 - a;
            let d_bob = length - a;
            (a, rod_about_centre + rod_mass * d_rod * d_rod + bob_mass * d_bob * d_bob)
        } else {
            (0.0, 0.0)
        };

        Self {
            length,
            rod_mass,
            bob_mass,
            mass,
            com_offset,
            inertia,
        }
    }

    /// Moment of inertia about the proximal joint.
    pub fn inertia_about_joint(&self) -> f64 {
        self.inertia + self.mass * self.com_offset * self.com_offset
    }
}
