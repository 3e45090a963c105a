//! # Room Engine
//!
//! A declarative scene registry for 3D interior scenes.
//!
//! ## Features
//!
//! - **Scene Registry**: Flat, insertion-ordered mapping of named elements
//!   (walls, floors, ceilings, doors, windows, objects, lights)
//! - **Instancing via Placements**: Duplicate copies of an asset are extra
//!   transforms on one element, not extra registry entries
//! - **Transform Semantics**: Deterministic scale → rotate → translate
//!   composition with world-space AABB derivation
//! - **Boundary Contracts**: Trait seams for external asset-retrieval and
//!   layout-solving services, with contract enforcement and
//!   commit-or-reject transactions
//! - **Snapshot Shape**: Stable JSON hand-off format for renderers and
//!   exporters
//!
//! ## Quick Start
//!
//! ```rust
//! use room_engine::prelude::*;
//!
//! fn main() -> Result<(), SceneError> {
//!     let mut scene = SceneRegistry::new(Some("living room"));
//!
//!     let lamp = SceneElement::new(Category::Lights, vec![Placement::at(0.0, 0.0, 1.6)])
//!         .with_description("a tall floor lamp");
//!     scene.insert("floor_lamp_1", lamp)?;
//!
//!     // A second copy of the same lamp: one element, two placements.
//!     scene.duplicate_instance("floor_lamp_1", Placement::at(2.0, 1.0, 1.6))?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

pub mod foundation;
pub mod scene;
pub mod boundary;
pub mod config;

pub use scene::{
    Category, Material, Placement, SceneElement, SceneError, SceneRegistry,
};
pub use boundary::{BoundaryError, ElementSource, LayoutSolver, MaterialSource};
pub use config::{Config, ConfigError, RoomConfig};

/// Commonly used types, importable in one line
pub mod prelude {
    pub use crate::boundary::{
        fetch_element, fetch_material, solve_layout, BoundaryError, ElementSource, LayoutSolver,
        MaterialSource,
    };
    pub use crate::config::{Config, ConfigError, RoomConfig};
    pub use crate::foundation::math::{Aabb, Vec3};
    pub use crate::scene::{
        build_room_shell, Category, Material, Placement, SceneElement, SceneError, SceneRegistry,
    };
}
