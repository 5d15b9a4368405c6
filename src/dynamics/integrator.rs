//! Fixed-step time integrators.
//!
//! - [`rk4_step`]: classical 4-stage Runge-Kutta over any [`Integrable`] state,
//!   used by the two-link Hamiltonian model.
//! - [`semi_implicit_euler_step`]: velocity-first Euler for the N-link chain.
//!
//! Neither adapts its step size. Repeated stepping is done with
//! [`repeat_steps`], which runs whole steps of `dt` back to back rather than
//! splitting `dt`.

use super::chain::MultiPendulum;

pub trait Integrable: Clone + Copy {
    fn add(self, other: Self) -> Self;
    fn scale(self, factor: f64) -> Self;
}

impl Integrable for f64 {
    fn add(self, other: Self) -> Self { self + other }
    fn scale(self, factor: f64) -> Self { self * factor }
}

impl<const N: usize> Integrable for [f64; N] {
    fn add(mut self, other: Self) -> Self {
        for (a, b) in self.iter_mut().zip(other) {
            *a += b;
        }
        self
    }

    fn scale(mut self, factor: f64) -> Self {
        for a in self.iter_mut() {
            *a *= factor;
        }
        self
    }
}

/// Advances `y` by one RK4 step of size `dt`, where `f` evaluates `dy/dt`.
pub fn rk4_step<T, F>(y: &mut T, dt: f64, f: F)
where
    T: Integrable,
    F: Fn(&T) -> T,
{
    let y0 = *y;

    let k1 = f(&y0);
    let k2 = f(&y0.add(k1.scale(0.5 * dt)));
    let k3 = f(&y0.add(k2.scale(0.5 * dt)));
    let k4 = f(&y0.add(k3.scale(dt)));

    let slope = k1.add(k2.scale(2.0)).add(k3.scale(2.0)).add(k4);
    *y = y0.add(slope.scale(dt / 6.0));
}

/// One semi-implicit Euler step of the chain: velocities first, then angles
/// from the updated velocities.
pub fn semi_implicit_euler_step(chain: &MultiPendulum, q: &mut [f64], qd: &mut [f64], dt: f64) {
    let qdd = chain.forward_dynamics(q, qd);
    for (v, a) in qd.iter_mut().zip(&qdd) {
        *v += a * dt;
    }
    for (p, v) in q.iter_mut().zip(qd.iter()) {
        *p += v * dt;
    }
}

/// Runs `step` `substeps` times (at least once) and returns the simulated
/// time covered, `substeps * dt`.
pub fn repeat_steps(dt: f64, substeps: usize, mut step: impl FnMut(f64)) -> f64 {
    let count = substeps.max(1);
    for _ in 0..count {
        step(dt);
    }
    dt * count as f64
}
