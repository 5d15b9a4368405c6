//! Error types for pendulum simulation setup and control.

use thiserror::Error;

/// Errors surfaced by configuration and simulation control.
///
/// Numeric degeneracy (singular mass matrix, vanishing momentum-map
/// denominator) is not represented here. It shows up as
/// `NaN`/`inf` in the simulation state instead.
#[derive(Debug, Error)]
pub enum SimError {
    /// The model only supports a fixed number of links.
    #[error("unsupported link count: expected {expected}, found {found}")]
    UnsupportedLinkCount {
        /// Link count the model requires.
        expected: usize,
        /// Link count requested by the configuration.
        found: usize,
    },

    /// A per-link array is shorter than the model needs.
    #[error("not enough `{field}` entries: need {needed}, found {found}")]
    MissingEntries {
        /// Configuration field name.
        field: &'static str,
        /// Minimum entry count.
        needed: usize,
        /// Supplied entry count.
        found: usize,
    },

    /// A step or query was issued before a matching initialization.
    #[error("simulation is not initialized")]
    Uninitialized,

    /// The configuration payload could not be parsed.
    #[error("invalid configuration json: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl SimError {
    /// Creates a missing entries error.
    #[must_use]
    pub const fn missing_entries(field: &'static str, needed: usize, found: usize) -> Self {
        Self::MissingEntries {
            field,
            needed,
            found,
        }
    }
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
