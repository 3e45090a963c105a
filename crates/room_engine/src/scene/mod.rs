//! Scene data model
//!
//! A scene is a flat registry of named elements. Each element carries one or
//! more placements (instanced transforms of a shared asset), an optional
//! material, an optional bounding box, an optional catalog identifier, and
//! free-form metadata. The registry is the single mutable source of truth
//! for one modeling session.

pub mod element;
pub mod material;
pub mod placement;
pub mod registry;
pub mod shell;

pub use element::{Category, LightParams, Metadata, SceneElement};
pub use material::Material;
pub use placement::Placement;
pub use registry::SceneRegistry;
pub use shell::build_room_shell;

#[cfg(test)]
mod tests;

use thiserror::Error;

/// Validation errors raised by the scene model
///
/// All variants are local, synchronous validation failures. A failed
/// operation never leaves the registry partially modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Insert attempted with a key that already exists
    #[error("key '{0}' already exists in the scene")]
    DuplicateKey(String),

    /// Update or removal attempted on an absent key
    #[error("key '{0}' not found in the scene")]
    KeyNotFound(String),

    /// Placement data violates the model invariants
    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    /// Material data violates the model invariants
    #[error("invalid material: {0}")]
    InvalidMaterial(String),

    /// Category string outside the fixed enumeration
    #[error("invalid category '{0}'")]
    InvalidCategory(String),

    /// Registry key is not an identifier-style string
    #[error("invalid key '{0}': keys must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidKey(String),

    /// Element still sits at the retrieval default transform
    #[error("element '{0}' has not been placed yet")]
    UnplacedElement(String),

    /// Snapshot data could not be decoded
    #[error("malformed scene snapshot: {0}")]
    Snapshot(String),
}
