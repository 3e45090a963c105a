//! In-process stand-ins for the retrieval and layout services
//!
//! A real deployment wires these traits to remote services; the demo uses
//! a keyword-matched furniture catalog and a solver that lines requested
//! objects up along the south wall at resting height.

use room_engine::prelude::*;

/// One catalog asset: keyword, identifier, bounding box
struct CatalogEntry {
    keyword: &'static str,
    identifier: &'static str,
    bbox_size: [f32; 3],
}

const FURNITURE: &[CatalogEntry] = &[
    CatalogEntry { keyword: "sofa", identifier: "catalog/sofa/0042", bbox_size: [1.9, 0.9, 0.8] },
    CatalogEntry { keyword: "coffee table", identifier: "catalog/table/0117", bbox_size: [1.1, 0.6, 0.45] },
    CatalogEntry { keyword: "tv stand", identifier: "catalog/tv_stand/0008", bbox_size: [1.6, 0.4, 1.2] },
    CatalogEntry { keyword: "lamp", identifier: "catalog/lamp/0301", bbox_size: [0.4, 0.4, 1.7] },
];

const SURFACES: &[(&str, &str)] = &[
    ("brick", "Bricks074"),
    ("concrete", "Concrete042A"),
    ("oak", "WoodFloor043"),
    ("fabric", "Fabric022"),
];

/// Keyword-matched furniture catalog
pub struct FurnitureCatalog;

impl ElementSource for FurnitureCatalog {
    fn fetch_element(
        &self,
        _scene: &SceneRegistry,
        description: &str,
    ) -> Result<SceneElement, BoundaryError> {
        let entry = FURNITURE
            .iter()
            .find(|e| description.contains(e.keyword))
            .ok_or_else(|| BoundaryError::Service(format!("no catalog match for \"{description}\"")))?;

        Ok(
            SceneElement::new(Category::Objects, vec![Placement::origin()])
                .with_description(description)
                .with_identifier(entry.identifier)
                .with_bbox_size(Vec3::from(entry.bbox_size)),
        )
    }
}

impl MaterialSource for FurnitureCatalog {
    fn fetch_material(&self, description: &str) -> Result<Material, BoundaryError> {
        let (_, id) = SURFACES
            .iter()
            .find(|(keyword, _)| description.contains(keyword))
            .ok_or_else(|| BoundaryError::Service(format!("no material match for \"{description}\"")))?;
        Material::new(*id, description).map_err(BoundaryError::from)
    }
}

/// Lines requested objects up along the south wall, spaced left to right
pub struct SouthWallSolver {
    /// Room depth in meters (the south wall sits at y = -depth/2)
    pub room_depth: f32,
}

impl LayoutSolver for SouthWallSolver {
    fn solve_layout(
        &self,
        scene: &SceneRegistry,
        keys: &[&str],
        _instruction: &str,
    ) -> Result<SceneRegistry, BoundaryError> {
        let mut result = scene.clone();
        let mut cursor = -2.0_f32;
        for key in keys {
            let element = result
                .get(key)
                .ok_or_else(|| BoundaryError::Service(format!("unknown key '{key}'")))?;
            let bbox = element
                .bbox_size
                .ok_or_else(|| BoundaryError::Service(format!("'{key}' has no bounding box")))?;

            let placement = Placement::at(
                cursor + bbox.x / 2.0,
                -self.room_depth / 2.0 + bbox.y / 2.0,
                bbox.z / 2.0,
            );
            cursor += bbox.x + 0.3;
            result.set_placements(key, vec![placement])?;
        }
        Ok(result)
    }
}
