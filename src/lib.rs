//! # chain-pendulum
//!
//! Rigid pendulum chains for real-time visualization.
//!
//! ## Features
//! - Compound double pendulum in canonical momentum coordinates, advanced by RK4
//! - N-link planar chain via recursive Newton-Euler inverse dynamics, with
//!   forward dynamics from a probed mass matrix, advanced by semi-implicit Euler
//! - Tagged angle conventions for the two models
//! - Cross-platform: Native + WASM support
//!
//! ## Example
//! ```rust,ignore
//! use chain_pendulum::{ChainConfig, Simulator, TwoLinkConfig};
//!
//! let mut sim = Simulator::new();
//! sim.init_two_link(&TwoLinkConfig::new([1.0, 1.0], [1.0, 1.0]).with_angles(1.2, 0.4))?;
//! sim.step_two_link(1.0 / 240.0, 4)?;
//! let tips = sim.two_link_positions();
//!
//! sim.init_chain(&ChainConfig::new(5).with_angles(vec![0.0; 5]));
//! let angles = sim.step_chain(1.0 / 240.0, 1);
//! ```

pub mod config;
pub mod dynamics;
pub mod error;
pub mod math;
pub mod simulation;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ChainConfig, TwoLinkConfig, DEFAULT_GRAVITY};
pub use dynamics::{HamiltonianState, Link, MultiPendulum, TipPositions, TwoLinkParams};
pub use error::{SimError, SimResult};
pub use math::AngleConvention;
pub use simulation::{
    ChainReadout, ChainSimulation, Simulation, Simulator, TwoLinkReadout, TwoLinkSimulation,
};
