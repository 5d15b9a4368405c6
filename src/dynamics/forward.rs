//! Forward dynamics of the chain by probing inverse dynamics.
//!
//! `h` is inverse dynamics at zero acceleration, column `k` of `M` is
//! inverse dynamics at unit acceleration `e_k` minus `h`, and the free motion
//! (zero applied torque) solves `M * qdd = -h`. That is `n + 1` linear-time
//! passes plus one dense solve.

use super::chain::MultiPendulum;
use crate::math::solve_linear;

impl MultiPendulum {
    /// Coriolis, centrifugal and gravity torques at zero acceleration.
    pub fn bias(&self, q: &[f64], qd: &[f64]) -> Vec<f64> {
        let zero = vec![0.0; q.len()];
        self.inverse_dynamics(q, qd, &zero)
    }

    /// Row-major generalized mass matrix at configuration `q`.
    ///
    /// Entry `(i, k)` is the torque at joint `i` per unit absolute
    /// acceleration of link `k`, under the sign of
    /// [`MultiPendulum::inverse_dynamics`]. Joint `i` carries every distal
    /// link, so the matrix is generally not symmetric.
    pub fn mass_matrix(&self, q: &[f64]) -> Vec<Vec<f64>> {
        let zero = vec![0.0; q.len()];
        let h = self.inverse_dynamics(q, &zero, &zero);
        self.mass_matrix_with_bias(q, &zero, &h)
    }

    /// Accelerations of the unactuated chain at `(q, qd)`.
    pub fn forward_dynamics(&self, q: &[f64], qd: &[f64]) -> Vec<f64> {
        let h = self.bias(q, qd);
        let m = self.mass_matrix_with_bias(q, qd, &h);
        let rhs: Vec<f64> = h.iter().map(|v| -v).collect();
        solve_linear(&m, &rhs)
    }

    fn mass_matrix_with_bias(&self, q: &[f64], qd: &[f64], h: &[f64]) -> Vec<Vec<f64>> {
        let n = q.len();
        let mut m = vec![vec![0.0; n]; n];
        let mut basis = vec![0.0; n];

        for k in 0..n {
            basis.fill(0.0);
            basis[k] = 1.0;
            let tau_k = self.inverse_dynamics(q, qd, &basis);
            for (row, (t, b)) in m.iter_mut().zip(tau_k.iter().zip(h)) {
                row[k] = t - b;
            }
        }

        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::Link;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    fn sample_chain(n: usize) -> MultiPendulum {
        let links = (0..n)
            .map(|i| Link::new(0.6 + 0.2 * i as f64, 1.0 + 0.3 * i as f64, 0.5))
            .collect();
        MultiPendulum::new(links, 9.81)
    }

    fn sample_state(n: usize) -> (Vec<f64>, Vec<f64>) {
        let q = (0..n).map(|i| -1.2 + 0.45 * i as f64).collect();
        let qd = (0..n).map(|i| 0.7 - 0.35 * i as f64).collect();
        (q, qd)
    }

    #[test]
    fn test_forward_inverse_consistency() {
        for n in 1..=5 {
            let chain = sample_chain(n);
            let (q, qd) = sample_state(n);

            let qdd = chain.forward_dynamics(&q, &qd);
            let tau = chain.inverse_dynamics(&q, &qd, &qdd);
            let h = chain.bias(&q, &qd);
            let m = chain.mass_matrix(&q);

            for i in 0..n {
                let m_qdd: f64 = m[i].iter().zip(&qdd).map(|(a, b)| a * b).sum();
                assert_abs_diff_eq!(m_qdd + h[i] - tau[i], 0.0, epsilon = 1e-9);
                // free chain: no joint torque needed
                assert_abs_diff_eq!(tau[i], 0.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_mass_matrix_two_point_masses() {
        // Bobs only: rows are moments about each joint of everything distal.
        let (m1, m2) = (1.5, 0.8);
        let chain = MultiPendulum::new(vec![Link::new(1.0, 0.0, m1), Link::new(1.0, 0.0, m2)], 9.81);
        let q: [f64; 2] = [-0.9, 0.3];
        let c = (q[0] - q[1]).cos();
        let m = chain.mass_matrix(&q);
        assert_relative_eq!(m[0][0], -(m1 + m2 + m2 * c), epsilon = 1e-12);
        assert_relative_eq!(m[0][1], -m2 * (1.0 + c), epsilon = 1e-12);
        assert_relative_eq!(m[1][0], -m2 * c, epsilon = 1e-12);
        assert_relative_eq!(m[1][1], -m2, epsilon = 1e-12);
    }

    #[test]
    fn test_mass_matrix_independent_of_velocity() {
        let chain = sample_chain(3);
        let (q, qd) = sample_state(3);
        let h = chain.bias(&q, &qd);
        let probed = chain.mass_matrix_with_bias(&q, &qd, &h);
        let at_rest = chain.mass_matrix(&q);
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(probed[i][j], at_rest[i][j], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_hanging_chain_is_at_rest() {
        let chain = sample_chain(3);
        let q = vec![-FRAC_PI_2; 3];
        let qd = vec![0.0; 3];
        for a in chain.forward_dynamics(&q, &qd) {
            assert_abs_diff_eq!(a, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_rod_matches_compound_pendulum() {
        // I_pivot * qdd = -m g a cos(phi)
        let link = Link::new(1.5, 2.0, 0.0);
        let chain = MultiPendulum::new(vec![link], 9.81);
        let phi = -0.4;
        let qdd = chain.forward_dynamics(&[phi], &[1.3]);
        let expected = -link.mass * 9.81 * link.com_offset * phi.cos() / link.inertia_about_joint();
        assert_relative_eq!(qdd[0], expected, epsilon = 1e-12);
    }
}
