//! N-link planar chain and its recursive Newton-Euler inverse dynamics.
//!
//! Every joint is revolute about [`Z_AXIS`] and every angle is absolute:
//! `q[i]` is the direction of link `i` measured counter-clockwise from +X,
//! not relative to its parent. Gravity acts along -Y.

use super::link::Link;
use crate::math::{link_direction, DVec3, Z_AXIS};

/// An open chain of rigid links hanging from a fixed pivot at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPendulum {
    links: Vec<Link>,
    gravity: f64,
}

impl MultiPendulum {
    pub fn new(links: Vec<Link>, gravity: f64) -> Self {
        Self { links, gravity }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn total_length(&self) -> f64 {
        self.links.iter().map(|l| l.length).sum()
    }

    /// Joint torques required to realise `qdd` at `(q, qd)`.
    ///
    /// Two passes over the chain. Base to tip: centre-of-mass and joint
    /// accelerations from `alpha x r + omega x (omega x r)`. Tip to base:
    /// inertial force plus gravity and inertial torque per link, accumulated
    /// with the distal link's force and torque and their moment arms.
    ///
    /// The sign is chosen so that `tau = M(q) * qdd + h(q, qd)`, with `M`
    /// and `h` probed from this function by [`MultiPendulum::mass_matrix`]
    /// and [`MultiPendulum::bias`].
    pub fn inverse_dynamics(&self, q: &[f64], qd: &[f64], qdd: &[f64]) -> Vec<f64> {
        let n = self.links.len();
        debug_assert!(q.len() == n && qd.len() == n && qdd.len() == n);

        // joint -> centre of mass, joint -> next joint (zero past the tip)
        let arms: Vec<(DVec3, DVec3)> = self
            .links
            .iter()
            .zip(q)
            .enumerate()
            .map(|(i, (link, &phi))| {
                let e = link_direction(phi);
                let r_next = if i + 1 < n { e * link.length } else { DVec3::ZERO };
                (e * link.com_offset, r_next)
            })
            .collect();

        // forward pass
        let mut a_joint = DVec3::ZERO;
        let mut a_com = Vec::with_capacity(n);
        for (i, (rc, r_next)) in arms.iter().enumerate() {
            let w = Z_AXIS * qd[i];
            let alpha = Z_AXIS * qdd[i];

            a_com.push(a_joint + alpha.cross(*rc) + w.cross(w.cross(*rc)));
            a_joint += alpha.cross(*r_next) + w.cross(w.cross(*r_next));
        }

        // backward pass
        let mut tau = vec![0.0; n];
        let mut f_next = DVec3::ZERO;
        let mut n_next = DVec3::ZERO;
        for i in (0..n).rev() {
            let link = &self.links[i];
            let (rc, r_next) = arms[i];

            let mut f = a_com[i] * link.mass;
            f.y += link.mass * self.gravity;
            let torque = Z_AXIS * (link.inertia * qdd[i]);

            let f_total = f + f_next;
            let n_total = torque + n_next + rc.cross(f) + r_next.cross(f_next);

            tau[i] = -n_total.z;

            f_next = f_total;
            n_next = n_total;
        }

        tau
    }

    /// Cartesian positions of each link's distal end, pivot at the origin.
    pub fn joint_positions(&self, q: &[f64]) -> Vec<DVec3> {
        let mut p = DVec3::ZERO;
        self.links
            .iter()
            .zip(q)
            .map(|(link, &phi)| {
                p += link_direction(phi) * link.length;
                p
            })
            .collect()
    }

    /// Kinetic plus gravitational potential energy, zero potential at the
    /// pivot height.
    pub fn energy(&self, q: &[f64], qd: &[f64]) -> f64 {
        let mut joint = DVec3::ZERO;
        let mut v_joint = DVec3::ZERO;
        let mut total = 0.0;

        for ((link, &phi), &omega) in self.links.iter().zip(q).zip(qd) {
            let e = link_direction(phi);
            let w = Z_AXIS * omega;
            let rc = e * link.com_offset;
            let r_next = e * link.length;

            let v_com = v_joint + w.cross(rc);
            let y_com = (joint + rc).y;
            total += 0.5 * link.mass * v_com.length_squared()
                + 0.5 * link.inertia * omega * omega
                + link.mass * self.gravity * y_com;

            joint += r_next;
            v_joint += w.cross(r_next);
        }

        total
    }
}
