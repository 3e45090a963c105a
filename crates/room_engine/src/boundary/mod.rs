//! External service boundaries
//!
//! Asset retrieval, material retrieval, and layout solving are external
//! collaborators consumed through fixed call/return contracts. The core
//! neither implements nor replicates their logic; its job is to define the
//! trait seams and to enforce the contracts on every result that crosses
//! them. A malformed result is always surfaced as a contract violation,
//! never silently repaired, since coercing it would risk corrupting the
//! spatial consistency of the scene.
//!
//! All boundary calls are synchronous and potentially long-running; retry
//! policy belongs to the caller.

pub mod layout;
pub mod retrieval;

pub use layout::{solve_layout, LayoutSolver};
pub use retrieval::{fetch_element, fetch_material, ElementSource, MaterialSource};

use thiserror::Error;

use crate::scene::SceneError;

/// Errors raised at the external service boundaries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundaryError {
    /// A service returned a result violating its contract
    #[error("boundary contract violation: {reason}")]
    ContractViolation {
        /// What the result got wrong
        reason: String,
    },

    /// The request itself did not meet the boundary preconditions
    #[error("invalid boundary request: {0}")]
    InvalidRequest(String),

    /// A scene validation failure surfaced through the boundary
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The service itself reported a failure
    #[error("boundary service failure: {0}")]
    Service(String),
}

impl BoundaryError {
    /// Shorthand for a contract violation with a formatted reason
    pub(crate) fn violation(reason: impl Into<String>) -> Self {
        Self::ContractViolation {
            reason: reason.into(),
        }
    }
}
