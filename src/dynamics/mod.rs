//! Pendulum dynamics
//!
//! Two models share this module:
//! - [`TwoLinkParams`]: closed-form compound double pendulum in canonical
//!   momentum coordinates, hanging angle convention, advanced by RK4.
//! - [`MultiPendulum`]: N-link chain solved by recursive Newton-Euler, absolute
//!   angle convention, advanced by semi-implicit Euler.

mod chain;
mod forward;
pub mod integrator;
mod link;
mod two_link;

pub use chain::MultiPendulum;
pub use integrator::{rk4_step, semi_implicit_euler_step, Integrable};
pub use link::Link;
pub use two_link::{HamiltonianState, TipPositions, TwoLinkParams};
