//! Compound double pendulum in Hamiltonian form.
//!
//! Two uniform rods hang from a fixed pivot. The state holds each rod's angle
//! and canonical conjugate momentum; angles use the hanging convention
//! (0 = straight down, counter-clockwise positive).

use super::integrator::Integrable;
use crate::config::{resolve_gravity, DEFAULT_GRAVITY};
use crate::math::hanging_offset;

/// Physical constants of a two-rod compound pendulum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoLinkParams {
    /// Rod lengths `[L1, L2]`.
    pub lengths: [f64; 2],
    /// Rod masses `[m1, m2]`, uniformly distributed along each rod.
    pub masses: [f64; 2],
    /// Gravitational acceleration; zero means [`DEFAULT_GRAVITY`].
    pub gravity: f64,
    /// Linear joint damping applied as `-damping * theta_dot`.
    pub damping: f64,
}

/// `[theta1, p1, theta2, p2]`: hanging angles and conjugate momenta.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HamiltonianState(pub [f64; 4]);

/// Cartesian positions of both rod ends, pivot at the origin, +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipPositions {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl TipPositions {
    pub fn to_array(self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

impl HamiltonianState {
    pub fn new(theta1: f64, p1: f64, theta2: f64, p2: f64) -> Self {
        Self([theta1, p1, theta2, p2])
    }

    pub fn theta1(&self) -> f64 {
        self.0[0]
    }

    pub fn p1(&self) -> f64 {
        self.0[1]
    }

    pub fn theta2(&self) -> f64 {
        self.0[2]
    }

    pub fn p2(&self) -> f64 {
        self.0[3]
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Integrable for HamiltonianState {
    fn add(self, other: Self) -> Self {
        Self(self.0.add(other.0))
    }

    fn scale(self, factor: f64) -> Self {
        Self(self.0.scale(factor))
    }
}

impl TwoLinkParams {
    pub fn new(lengths: [f64; 2], masses: [f64; 2]) -> Self {
        Self {
            lengths,
            masses,
            gravity: DEFAULT_GRAVITY,
            damping: 0.0,
        }
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Gravity actually used by the equations of motion.
    pub fn effective_gravity(&self) -> f64 {
        resolve_gravity(self.gravity)
    }

    /// Inverts the momentum map: angular velocities `(theta1_dot, theta2_dot)`
    /// for the given state.
    ///
    /// The shared denominator `4(m1 + 3m2) - 9 m2 cos^2(theta1 - theta2)` is
    /// not guarded; when it vanishes (or `m2 = 0`) the result is non-finite.
    pub fn velocities(&self, state: &HamiltonianState) -> (f64, f64) {
        let [l1, l2] = self.lengths;
        let [m1, m2] = self.masses;
        let (p1, p2) = (state.p1(), state.p2());

        let m_tot = m1 + 3.0 * m2;
        let c = (state.theta1() - state.theta2()).cos();
        let lr = l1 / l2;
        let den = 4.0 * m_tot - 9.0 * m2 * c * c;

        let theta1_dot = 6.0 / (l1 * l1) * (2.0 * p1 - 3.0 * lr * c * p2) / den;
        let theta2_dot = 6.0 / (m2 * l2 * l2) * (2.0 * p2 * m_tot - 3.0 * m2 / lr * c * p1) / den;
        (theta1_dot, theta2_dot)
    }

    /// Hamilton's equations with linear damping:
    /// `[theta1_dot, p1_dot, theta2_dot, p2_dot]`.
    pub fn derivative(&self, state: &HamiltonianState) -> HamiltonianState {
        let [l1, l2] = self.lengths;
        let [m1, m2] = self.masses;
        let g = self.effective_gravity();
        let (theta1, theta2) = (state.theta1(), state.theta2());

        let (theta1_dot, theta2_dot) = self.velocities(state);

        let term = 0.5 * m2 * l1 * l2 * theta1_dot * theta2_dot * (theta1 - theta2).sin();
        let p1_dot = -term - (0.5 * m1 + m2) * g * l1 * theta1.sin() - self.damping * theta1_dot;
        let p2_dot = term - 0.5 * m2 * g * l2 * theta2.sin() - self.damping * theta2_dot;

        HamiltonianState::new(theta1_dot, p1_dot, theta2_dot, p2_dot)
    }

    /// Conjugate momenta `(p1, p2)` for the given angles and angular velocities.
    pub fn initial_momenta(&self, theta1: f64, theta2: f64, omega1: f64, omega2: f64) -> (f64, f64) {
        let [l1, l2] = self.lengths;
        let [m1, m2] = self.masses;
        let c = (theta1 - theta2).cos();

        let p1 = (m1 * l1 * l1 / 3.0 + m2 * l1 * l1) * omega1 + 0.5 * m2 * l1 * l2 * omega2 * c;
        let p2 = (m2 * l2 * l2 / 3.0) * omega2 + 0.5 * m2 * l1 * l2 * omega1 * c;
        (p1, p2)
    }

    /// State at rest or in motion, built from angles and angular velocities.
    pub fn initial_state(&self, theta: [f64; 2], omega: [f64; 2]) -> HamiltonianState {
        let (p1, p2) = self.initial_momenta(theta[0], theta[1], omega[0], omega[1]);
        HamiltonianState::new(theta[0], p1, theta[1], p2)
    }

    pub fn tip_positions(&self, theta1: f64, theta2: f64) -> TipPositions {
        let first = hanging_offset(theta1, self.lengths[0]);
        let second = first + hanging_offset(theta2, self.lengths[1]);
        TipPositions {
            x1: first.x,
            y1: first.y,
            x2: second.x,
            y2: second.y,
        }
    }

    /// Total mechanical energy, zero potential at the pivot height.
    pub fn energy(&self, state: &HamiltonianState) -> f64 {
        let [l1, l2] = self.lengths;
        let [m1, m2] = self.masses;
        let g = self.effective_gravity();

        let (theta1_dot, theta2_dot) = self.velocities(state);
        let kinetic = 0.5 * (state.p1() * theta1_dot + state.p2() * theta2_dot);
        let potential = -(0.5 * m1 + m2) * g * l1 * state.theta1().cos()
            - 0.5 * m2 * g * l2 * state.theta2().cos();
        kinetic + potential
    }
}
