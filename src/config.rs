//! Initialization payloads for both pendulum models.
//!
//! Field names follow the JSON keys used by the browser front-end
//! (`links`, `L`, `rodMass`, `bobMass`, `g`, `damping`, `theta`, `omega`).
//! Every field is optional when deserializing, and `null` (which the browser
//! emits for `NaN`) reads as 0, both as a field and as an array entry.
//! Defaults and validation are applied when the config is resolved into a
//! model.

use crate::dynamics::{Link, MultiPendulum, TwoLinkParams};
use crate::error::{SimError, SimResult};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_GRAVITY: f64 = 9.81;

const DEFAULT_LINK_LENGTH: f64 = 1.0;
const DEFAULT_ROD_MASS: f64 = 1.0;
const DEFAULT_BOB_MASS: f64 = 0.5;

fn entry(values: &[f64], i: usize, default: f64) -> f64 {
    values.get(i).copied().unwrap_or(default)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_entries_as_zero<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Option<f64>>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Zero gravity means "unset".
pub(crate) fn resolve_gravity(g: f64) -> f64 {
    if g == 0.0 {
        DEFAULT_GRAVITY
    } else {
        g
    }
}

/// Setup for the two-link Hamiltonian model. Angles use the hanging
/// convention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoLinkConfig {
    /// Must be 2; 0 means 2.
    #[serde(deserialize_with = "null_as_default")]
    pub links: i64,
    #[serde(rename = "L", deserialize_with = "null_entries_as_zero")]
    pub lengths: Vec<f64>,
    #[serde(rename = "rodMass", deserialize_with = "null_entries_as_zero")]
    pub rod_masses: Vec<f64>,
    /// Accepted for symmetry with [`ChainConfig`]; the two-link dynamics
    /// ignore it.
    #[serde(rename = "bobMass", deserialize_with = "null_entries_as_zero")]
    pub bob_masses: Vec<f64>,
    #[serde(rename = "g", deserialize_with = "null_as_default")]
    pub gravity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub damping: f64,
    #[serde(deserialize_with = "null_entries_as_zero")]
    pub theta: Vec<f64>,
    #[serde(deserialize_with = "null_entries_as_zero")]
    pub omega: Vec<f64>,
}

impl TwoLinkConfig {
    pub fn new(lengths: [f64; 2], rod_masses: [f64; 2]) -> Self {
        Self {
            links: 2,
            lengths: lengths.to_vec(),
            rod_masses: rod_masses.to_vec(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_angles(mut self, theta1: f64, theta2: f64) -> Self {
        self.theta = vec![theta1, theta2];
        self
    }

    pub fn with_velocities(mut self, omega1: f64, omega2: f64) -> Self {
        self.omega = vec![omega1, omega2];
        self
    }

    /// Validates the link count and array lengths and builds the model
    /// parameters.
    pub fn params(&self) -> SimResult<TwoLinkParams> {
        let links = if self.links == 0 { 2 } else { self.links };
        if links != 2 {
            return Err(SimError::UnsupportedLinkCount {
                expected: 2,
                found: links.max(0) as usize,
            });
        }
        if self.lengths.len() < 2 {
            return Err(SimError::missing_entries("L", 2, self.lengths.len()));
        }
        if self.rod_masses.len() < 2 {
            return Err(SimError::missing_entries("rodMass", 2, self.rod_masses.len()));
        }

        Ok(TwoLinkParams {
            lengths: [self.lengths[0], self.lengths[1]],
            masses: [self.rod_masses[0], self.rod_masses[1]],
            gravity: self.gravity,
            damping: self.damping,
        })
    }

    pub fn initial_angles(&self) -> [f64; 2] {
        [entry(&self.theta, 0, 0.0), entry(&self.theta, 1, 0.0)]
    }

    pub fn initial_velocities(&self) -> [f64; 2] {
        [entry(&self.omega, 0, 0.0), entry(&self.omega, 1, 0.0)]
    }
}

/// Setup for the N-link chain. Angles use the absolute convention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Link count; 0 or negative infers it from `L` (2 if that is empty too).
    #[serde(deserialize_with = "null_as_default")]
    pub links: i64,
    #[serde(rename = "L", deserialize_with = "null_entries_as_zero")]
    pub lengths: Vec<f64>,
    #[serde(rename = "rodMass", deserialize_with = "null_entries_as_zero")]
    pub rod_masses: Vec<f64>,
    #[serde(rename = "bobMass", deserialize_with = "null_entries_as_zero")]
    pub bob_masses: Vec<f64>,
    #[serde(rename = "g", deserialize_with = "null_as_default")]
    pub gravity: f64,
    #[serde(deserialize_with = "null_entries_as_zero")]
    pub theta: Vec<f64>,
    #[serde(deserialize_with = "null_entries_as_zero")]
    pub omega: Vec<f64>,
}

impl ChainConfig {
    pub fn new(links: usize) -> Self {
        Self {
            links: links as i64,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_lengths(mut self, lengths: Vec<f64>) -> Self {
        self.lengths = lengths;
        self
    }

    pub fn with_rod_masses(mut self, rod_masses: Vec<f64>) -> Self {
        self.rod_masses = rod_masses;
        self
    }

    pub fn with_bob_masses(mut self, bob_masses: Vec<f64>) -> Self {
        self.bob_masses = bob_masses;
        self
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_angles(mut self, theta: Vec<f64>) -> Self {
        self.theta = theta;
        self
    }

    pub fn with_velocities(mut self, omega: Vec<f64>) -> Self {
        self.omega = omega;
        self
    }

    pub fn link_count(&self) -> usize {
        if self.links > 0 {
            self.links as usize
        } else if !self.lengths.is_empty() {
            self.lengths.len()
        } else {
            2
        }
    }

    /// Builds the chain, filling missing per-link entries with defaults.
    pub fn pendulum(&self) -> MultiPendulum {
        let links = (0..self.link_count())
            .map(|i| {
                Link::new(
                    entry(&self.lengths, i, DEFAULT_LINK_LENGTH),
                    entry(&self.rod_masses, i, DEFAULT_ROD_MASS),
                    entry(&self.bob_masses, i, DEFAULT_BOB_MASS),
                )
            })
            .collect();
        MultiPendulum::new(links, resolve_gravity(self.gravity))
    }

    pub fn initial_angles(&self) -> Vec<f64> {
        (0..self.link_count()).map(|i| entry(&self.theta, i, 0.0)).collect()
    }

    pub fn initial_velocities(&self) -> Vec<f64> {
        (0..self.link_count()).map(|i| entry(&self.omega, i, 0.0)).collect()
    }
}
