//! Integration tests for the simulation control surface.
//!
//! Exercises both models through `Simulator` the way a frame loop would:
//! initialize, step, read back.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use chain_pendulum::{
    AngleConvention, ChainConfig, SimError, Simulation, Simulator, TwoLinkConfig,
    TwoLinkSimulation,
};
use std::f64::consts::FRAC_PI_2;

fn unit_two_link() -> TwoLinkConfig {
    TwoLinkConfig::new([1.0, 1.0], [1.0, 1.0])
}

#[test]
fn uninitialized_simulator_is_inert() {
    let mut sim = Simulator::new();
    assert!(!sim.is_initialized());
    assert!(matches!(sim.step_two_link(0.01, 1), Err(SimError::Uninitialized)));
    assert!(sim.two_link_state().is_none());
    assert!(sim.two_link_positions().is_none());
    assert!(sim.step_chain(0.01, 1).is_none());
    assert!(sim.chain_state().is_none());
    assert!(sim.chain_positions().is_none());
}

#[test]
fn hanging_two_link_stays_put() {
    let mut sim = Simulator::new();
    sim.init_two_link(&unit_two_link().with_gravity(9.81)).unwrap();
    sim.step_two_link(0.01, 10).unwrap();

    let state = sim.two_link_state().unwrap();
    assert_abs_diff_eq!(state.theta1, 0.0);
    assert_abs_diff_eq!(state.theta2, 0.0);
    assert_abs_diff_eq!(state.omega1, 0.0);
    assert_abs_diff_eq!(state.omega2, 0.0);

    let tips = sim.two_link_positions().unwrap().to_array();
    assert_eq!(tips, [0.0, -1.0, 0.0, -2.0]);
}

#[test]
fn rejected_config_keeps_previous_state() {
    let mut sim = Simulator::new();
    sim.init_two_link(&unit_two_link().with_angles(0.4, 0.1)).unwrap();
    sim.step_two_link(0.01, 5).unwrap();
    let before = sim.two_link_state().unwrap();

    let three_links = TwoLinkConfig {
        links: 3,
        ..unit_two_link()
    };
    assert!(sim.init_two_link(&three_links).is_err());

    let mut short = unit_two_link();
    short.lengths.truncate(1);
    assert!(sim.init_two_link(&short).is_err());

    assert_eq!(sim.two_link_state().unwrap(), before);
}

#[test]
fn substeps_repeat_whole_steps() {
    let mut repeated = Simulator::new();
    let mut single = Simulator::new();
    let mut once = Simulator::new();
    let config = unit_two_link().with_angles(1.0, -0.5);
    for sim in [&mut repeated, &mut single, &mut once] {
        sim.init_two_link(&config).unwrap();
    }

    repeated.step_two_link(0.01, 3).unwrap();
    for _ in 0..3 {
        single.step_two_link(0.01, 1).unwrap();
    }
    once.step_two_link(0.01, 1).unwrap();

    assert_eq!(repeated.two_link_state(), single.two_link_state());
    assert_ne!(repeated.two_link_state(), once.two_link_state());
    assert_relative_eq!(repeated.active().unwrap().elapsed(), 0.03, epsilon = 1e-15);
    assert_relative_eq!(once.active().unwrap().elapsed(), 0.01);
}

#[test]
fn zero_substeps_still_steps_once() {
    let mut sim = Simulator::new();
    sim.init_chain(&ChainConfig::new(2));
    let angles = sim.step_chain(0.01, 0).unwrap();
    assert_eq!(angles.len(), 2);
    assert_relative_eq!(sim.active().unwrap().elapsed(), 0.01);
}

#[test]
fn rk4_is_fourth_order() {
    // Small oscillation, no damping: error at t = 1 s against a fine run.
    let config = unit_two_link().with_angles(0.1, 0.05);
    let run = |dt: f64| {
        let mut sim = TwoLinkSimulation::from_config(&config).unwrap();
        sim.step(dt, (1.0 / dt).round() as usize);
        *sim.state()
    };

    let reference = run(0.0005);
    let error = |dt: f64| {
        let s = run(dt);
        s.0.iter()
            .zip(reference.0.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    };

    let ratio = error(0.02) / error(0.01);
    assert!((12.0..20.0).contains(&ratio), "error ratio {ratio}");
}

#[test]
fn chain_reports_state_and_positions() {
    let mut sim = Simulator::new();
    let config = ChainConfig::new(3)
        .with_lengths(vec![1.0, 0.5, 0.25])
        .with_angles(vec![0.2, -0.4, 1.0])
        .with_velocities(vec![0.5]);
    sim.init_chain(&config);

    let state = sim.chain_state().unwrap();
    assert_eq!(state.theta, vec![0.2, -0.4, 1.0]);
    assert_eq!(state.omega, vec![0.5, 0.0, 0.0]);

    let angles = sim.step_chain(0.002, 2).unwrap();
    let state = sim.chain_state().unwrap();
    assert_eq!(angles, state.theta);

    let positions = sim.chain_positions().unwrap();
    assert_eq!(positions.len(), 3);
    for p in &positions {
        assert_eq!(p.z, 0.0);
    }
    let reach = positions[2].truncate().length();
    assert!(reach <= 1.75 + 1e-12);
}

#[test]
fn hanging_chain_stays_put() {
    let mut sim = Simulator::new();
    let down = AngleConvention::Hanging.convert(0.0, AngleConvention::Absolute);
    sim.init_chain(&ChainConfig::new(4).with_angles(vec![down; 4]));
    let angles = sim.step_chain(1.0 / 240.0, 240).unwrap();
    for a in angles {
        assert_abs_diff_eq!(a, -FRAC_PI_2, epsilon = 1e-9);
    }
    let tip = sim.chain_positions().unwrap()[3];
    assert_abs_diff_eq!(tip.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(tip.y, -4.0, epsilon = 1e-9);
}

#[test]
fn chain_energy_stays_bounded() {
    let mut sim = Simulator::new();
    sim.init_chain(&ChainConfig::new(3).with_angles(vec![-0.5, -0.2, 0.3]));
    let e0 = sim.active().unwrap().energy();
    for _ in 0..2000 {
        sim.step_chain(0.001, 1);
    }
    let e1 = sim.active().unwrap().energy();
    assert!(((e1 - e0) / e0).abs() < 0.02, "drift from {e0} to {e1}");
}

#[test]
fn reinitializing_switches_model() {
    let mut sim = Simulator::new();
    sim.init_chain(&ChainConfig::new(2));
    assert!(matches!(sim.active(), Some(Simulation::Chain(_))));

    sim.init_two_link(&unit_two_link()).unwrap();
    assert!(matches!(sim.active(), Some(Simulation::TwoLink(_))));
    assert!(sim.step_chain(0.01, 1).is_none());
    assert!(sim.chain_state().is_none());

    sim.init_chain(&ChainConfig::new(2));
    assert!(matches!(sim.step_two_link(0.01, 1), Err(SimError::Uninitialized)));
    assert!(sim.two_link_state().is_none());
}

#[test]
fn json_configs_drive_both_models() {
    let mut sim = Simulator::new();
    let two = TwoLinkConfig::from_json(r#"{"L":[1,1],"rodMass":[1,1],"theta":[0.5,0.5]}"#).unwrap();
    sim.init_two_link(&two).unwrap();
    sim.step_two_link(0.01, 1).unwrap();
    assert!(sim.two_link_state().unwrap().theta1 < 0.5);

    let chain = ChainConfig::from_json(r#"{"L":[1,1,1],"theta":[0,0,0]}"#).unwrap();
    sim.init_chain(&chain);
    assert_eq!(sim.step_chain(0.01, 1).unwrap().len(), 3);
}

#[test]
fn massless_chain_goes_non_finite() {
    let mut sim = Simulator::new();
    sim.init_chain(
        &ChainConfig::new(2)
            .with_rod_masses(vec![0.0, 0.0])
            .with_bob_masses(vec![0.0, 0.0]),
    );
    let angles = sim.step_chain(0.01, 1).unwrap();
    assert!(angles.iter().all(|a| a.is_nan()));
}
