//! Simulation instances and the host-facing control surface.
//!
//! [`TwoLinkSimulation`] and [`ChainSimulation`] each own their model and
//! mutable state. [`Simulator`] holds at most one of them, selected by the
//! last successful initialization, and turns every call on a missing or
//! mismatched simulation into a no-op.

use crate::config::{ChainConfig, TwoLinkConfig};
use crate::dynamics::{
    integrator::repeat_steps, rk4_step, semi_implicit_euler_step, HamiltonianState, MultiPendulum,
    TipPositions, TwoLinkParams,
};
use crate::error::{SimError, SimResult};
use crate::math::DVec3;

/// Angles (hanging convention) and angular velocities of the two-link model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoLinkReadout {
    pub theta1: f64,
    pub theta2: f64,
    pub omega1: f64,
    pub omega2: f64,
}

impl TwoLinkReadout {
    /// `[theta1, theta2, omega1, omega2]`
    pub fn to_array(self) -> [f64; 4] {
        [self.theta1, self.theta2, self.omega1, self.omega2]
    }
}

/// Absolute angles and angular velocities of every chain link.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainReadout {
    pub theta: Vec<f64>,
    pub omega: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct TwoLinkSimulation {
    params: TwoLinkParams,
    state: HamiltonianState,
    elapsed: f64,
}

impl TwoLinkSimulation {
    pub fn new(params: TwoLinkParams, theta: [f64; 2], omega: [f64; 2]) -> Self {
        Self {
            state: params.initial_state(theta, omega),
            params,
            elapsed: 0.0,
        }
    }

    pub fn from_config(config: &TwoLinkConfig) -> SimResult<Self> {
        let params = config.params()?;
        Ok(Self::new(params, config.initial_angles(), config.initial_velocities()))
    }

    pub fn params(&self) -> &TwoLinkParams {
        &self.params
    }

    pub fn state(&self) -> &HamiltonianState {
        &self.state
    }

    /// Simulated seconds since initialization.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Runs `substeps` full RK4 steps of `dt` each (at least one).
    pub fn step(&mut self, dt: f64, substeps: usize) {
        let params = self.params;
        let state = &mut self.state;
        self.elapsed += repeat_steps(dt, substeps, |h| {
            rk4_step(state, h, |y| params.derivative(y));
        });
    }

    /// Current angles; angular velocities are recomputed from the momenta.
    pub fn readout(&self) -> TwoLinkReadout {
        let (omega1, omega2) = self.params.velocities(&self.state);
        TwoLinkReadout {
            theta1: self.state.theta1(),
            theta2: self.state.theta2(),
            omega1,
            omega2,
        }
    }

    pub fn positions(&self) -> TipPositions {
        self.params.tip_positions(self.state.theta1(), self.state.theta2())
    }

    pub fn energy(&self) -> f64 {
        self.params.energy(&self.state)
    }
}

#[derive(Debug, Clone)]
pub struct ChainSimulation {
    pendulum: MultiPendulum,
    q: Vec<f64>,
    qd: Vec<f64>,
    elapsed: f64,
}

impl ChainSimulation {
    /// `q` and `qd` are truncated or zero-padded to one entry per link.
    pub fn new(pendulum: MultiPendulum, mut q: Vec<f64>, mut qd: Vec<f64>) -> Self {
        let n = pendulum.link_count();
        q.resize(n, 0.0);
        qd.resize(n, 0.0);
        Self {
            pendulum,
            q,
            qd,
            elapsed: 0.0,
        }
    }

    pub fn from_config(config: &ChainConfig) -> Self {
        Self::new(config.pendulum(), config.initial_angles(), config.initial_velocities())
    }

    pub fn pendulum(&self) -> &MultiPendulum {
        &self.pendulum
    }

    pub fn angles(&self) -> &[f64] {
        &self.q
    }

    pub fn velocities(&self) -> &[f64] {
        &self.qd
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Runs `substeps` semi-implicit Euler steps of `dt` each (at least one)
    /// and returns the updated angles.
    pub fn step(&mut self, dt: f64, substeps: usize) -> &[f64] {
        let pendulum = &self.pendulum;
        let (q, qd) = (&mut self.q, &mut self.qd);
        self.elapsed += repeat_steps(dt, substeps, |h| {
            semi_implicit_euler_step(pendulum, q, qd, h);
        });
        &self.q
    }

    pub fn readout(&self) -> ChainReadout {
        ChainReadout {
            theta: self.q.clone(),
            omega: self.qd.clone(),
        }
    }

    pub fn positions(&self) -> Vec<DVec3> {
        self.pendulum.joint_positions(&self.q)
    }

    pub fn energy(&self) -> f64 {
        self.pendulum.energy(&self.q, &self.qd)
    }
}

/// The active model, chosen once at initialization.
#[derive(Debug, Clone)]
pub enum Simulation {
    TwoLink(TwoLinkSimulation),
    Chain(ChainSimulation),
}

impl Simulation {
    pub fn elapsed(&self) -> f64 {
        match self {
            Simulation::TwoLink(sim) => sim.elapsed(),
            Simulation::Chain(sim) => sim.elapsed(),
        }
    }

    pub fn energy(&self) -> f64 {
        match self {
            Simulation::TwoLink(sim) => sim.energy(),
            Simulation::Chain(sim) => sim.energy(),
        }
    }
}

/// Caller-owned simulation slot.
///
/// Initializing replaces whatever was running; a rejected configuration
/// leaves it untouched. Not synchronized: drive it from one place.
#[derive(Debug, Default, Clone)]
pub struct Simulator {
    active: Option<Simulation>,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Simulation> {
        self.active.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    pub fn init_two_link(&mut self, config: &TwoLinkConfig) -> SimResult<()> {
        let sim = TwoLinkSimulation::from_config(config).inspect_err(|err| {
            log::warn!("two-link init rejected: {err}");
        })?;
        log::debug!(
            "two-link init: L={:?} m={:?} g={} damping={}",
            sim.params.lengths,
            sim.params.masses,
            sim.params.effective_gravity(),
            sim.params.damping
        );
        self.active = Some(Simulation::TwoLink(sim));
        Ok(())
    }

    pub fn init_chain(&mut self, config: &ChainConfig) {
        let sim = ChainSimulation::from_config(config);
        log::debug!(
            "chain init: {} links, total length {}, g={}",
            sim.pendulum.link_count(),
            sim.pendulum.total_length(),
            sim.pendulum.gravity()
        );
        self.active = Some(Simulation::Chain(sim));
    }

    pub fn step_two_link(&mut self, dt: f64, substeps: usize) -> SimResult<()> {
        let sim = self.two_link_mut().ok_or(SimError::Uninitialized)?;
        log::trace!("two-link step: dt={dt} substeps={substeps}");
        sim.step(dt, substeps);
        Ok(())
    }

    pub fn two_link_state(&self) -> Option<TwoLinkReadout> {
        self.two_link().map(TwoLinkSimulation::readout)
    }

    pub fn two_link_positions(&self) -> Option<TipPositions> {
        self.two_link().map(TwoLinkSimulation::positions)
    }

    /// Advances the chain and returns a copy of its angles, or `None` when
    /// no chain is running.
    pub fn step_chain(&mut self, dt: f64, substeps: usize) -> Option<Vec<f64>> {
        let sim = self.chain_mut()?;
        log::trace!("chain step: dt={dt} substeps={substeps}");
        Some(sim.step(dt, substeps).to_vec())
    }

    pub fn chain_state(&self) -> Option<ChainReadout> {
        self.chain().map(ChainSimulation::readout)
    }

    pub fn chain_positions(&self) -> Option<Vec<DVec3>> {
        self.chain().map(ChainSimulation::positions)
    }

    fn two_link(&self) -> Option<&TwoLinkSimulation> {
        match &self.active {
            Some(Simulation::TwoLink(sim)) => Some(sim),
            _ => None,
        }
    }

    fn two_link_mut(&mut self) -> Option<&mut TwoLinkSimulation> {
        match &mut self.active {
            Some(Simulation::TwoLink(sim)) => Some(sim),
            _ => None,
        }
    }

    fn chain(&self) -> Option<&ChainSimulation> {
        match &self.active {
            Some(Simulation::Chain(sim)) => Some(sim),
            _ => None,
        }
    }

    fn chain_mut(&mut self) -> Option<&mut ChainSimulation> {
        match &mut self.active {
            Some(Simulation::Chain(sim)) => Some(sim),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_link_step_matches_manual_rk4() {
        let params = TwoLinkParams::new([1.0, 0.8], [1.0, 0.6]);
        let mut sim = TwoLinkSimulation::new(params, [0.5, -0.3], [0.0, 1.0]);
        let mut manual = *sim.state();

        sim.step(0.01, 2);
        for _ in 0..2 {
            rk4_step(&mut manual, 0.01, |y| params.derivative(y));
        }

        assert_eq!(*sim.state(), manual);
        assert_relative_eq!(sim.elapsed(), 0.02);
    }

    #[test]
    fn test_two_link_readout_recovers_initial_velocity() {
        let params = TwoLinkParams::new([1.0, 1.0], [1.0, 1.0]);
        let sim = TwoLinkSimulation::new(params, [0.2, 0.4], [1.5, -0.5]);
        let r = sim.readout();
        assert_eq!(r.theta1, 0.2);
        assert_eq!(r.theta2, 0.4);
        assert_relative_eq!(r.omega1, 1.5, epsilon = 1e-12);
        assert_relative_eq!(r.omega2, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_chain_step_returns_updated_angles() {
        let cfg = ChainConfig::new(2).with_angles(vec![0.0, 0.0]);
        let mut sim = ChainSimulation::from_config(&cfg);
        let angles = sim.step(0.005, 1).to_vec();
        assert_eq!(angles, sim.angles());
        // the inner link drops, the outer one swings back up relative to +X
        assert!(angles[0] < 0.0);
        assert!(angles[1] > 0.0);
        assert_relative_eq!(sim.elapsed(), 0.005);
    }

    #[test]
    fn test_chain_state_is_fitted_to_link_count() {
        let pendulum = ChainConfig::new(3).pendulum();
        let mut short = ChainSimulation::new(pendulum.clone(), vec![0.1, 0.2], vec![0.5]);
        assert_eq!(short.angles(), &[0.1, 0.2, 0.0]);
        assert_eq!(short.velocities(), &[0.5, 0.0, 0.0]);
        assert_eq!(short.step(0.01, 1).len(), 3);

        let long = ChainSimulation::new(pendulum, vec![0.3; 5], vec![0.0; 4]);
        assert_eq!(long.angles(), &[0.3; 3]);
        assert_eq!(long.velocities().len(), 3);
    }

    #[test]
    fn test_simulation_kind_energy() {
        let sim = Simulation::Chain(ChainSimulation::from_config(
            &ChainConfig::new(1).with_angles(vec![-std::f64::consts::FRAC_PI_2]),
        ));
        // rod 1.0 kg + bob 0.5 kg, centre of mass 2/3 m below the pivot
        assert_relative_eq!(sim.energy(), -1.5 * 9.81 * (2.0 / 3.0), epsilon = 1e-12);
        assert_eq!(sim.elapsed(), 0.0);
    }
}
