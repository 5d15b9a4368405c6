//! WASM entry point - pendulum simulation control for the browser front-end
//!
//! Exports the functions the page calls each frame. Bad input is logged and
//! ignored; calls before initialization return `undefined`.

use crate::config::{ChainConfig, TwoLinkConfig};
use crate::simulation::Simulator;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static SIMULATOR: RefCell<Simulator> = RefCell::new(Simulator::new());
}

fn substep_count(sub: Option<i32>) -> usize {
    sub.filter(|&v| v > 0).map_or(1, |v| v as usize)
}

#[wasm_bindgen]
pub struct ChainStateView {
    theta: Vec<f64>,
    omega: Vec<f64>,
}

#[wasm_bindgen]
impl ChainStateView {
    #[wasm_bindgen(getter)]
    pub fn theta(&self) -> Vec<f64> {
        self.theta.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn omega(&self) -> Vec<f64> {
        self.omega.clone()
    }
}

#[wasm_bindgen(js_name = chaosInit)]
pub fn chaos_init(json: &str) {
    let config = match TwoLinkConfig::from_json(json) {
        Ok(c) => c,
        Err(err) => {
            log::warn!("chaosInit: {err}");
            return;
        }
    };
    // rejection is already logged by the simulator
    let _ = SIMULATOR.with(|sim| sim.borrow_mut().init_two_link(&config));
}

#[wasm_bindgen(js_name = chaosStep)]
pub fn chaos_step(dt: f64, sub: Option<i32>) {
    let _ = SIMULATOR.with(|sim| sim.borrow_mut().step_two_link(dt, substep_count(sub)));
}

/// `[theta1, theta2, omega1, omega2]`
#[wasm_bindgen(js_name = chaosGetState)]
pub fn chaos_get_state() -> Option<Vec<f64>> {
    SIMULATOR.with(|sim| sim.borrow().two_link_state().map(|s| s.to_array().to_vec()))
}

/// `[x1, y1, x2, y2]`
#[wasm_bindgen(js_name = chaosGetPositions)]
pub fn chaos_get_positions() -> Option<Vec<f64>> {
    SIMULATOR.with(|sim| sim.borrow().two_link_positions().map(|p| p.to_array().to_vec()))
}

#[wasm_bindgen(js_name = InitPendulum)]
pub fn init_pendulum(json: &str) {
    match ChainConfig::from_json(json) {
        Ok(config) => SIMULATOR.with(|sim| sim.borrow_mut().init_chain(&config)),
        Err(err) => log::warn!("InitPendulum: {err}"),
    }
}

#[wasm_bindgen(js_name = StepPendulum)]
pub fn step_pendulum(dt: f64, sub: Option<i32>) -> Option<Vec<f64>> {
    SIMULATOR.with(|sim| sim.borrow_mut().step_chain(dt, substep_count(sub)))
}

#[wasm_bindgen(js_name = GetPendulumState)]
pub fn get_pendulum_state() -> Option<ChainStateView> {
    SIMULATOR.with(|sim| {
        sim.borrow().chain_state().map(|s| ChainStateView {
            theta: s.theta,
            omega: s.omega,
        })
    })
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Warn).expect("Failed to init logger");
}
