//! Scene elements: the named entities of the registry
//!
//! An element is a category-tagged description of one asset together with
//! every placement of that asset in the room. N placements denote N
//! instanced copies sharing description, category, material, bounding box,
//! and identifier; this is the only duplication mechanism in the model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::foundation::math::{Aabb, Vec3};
use crate::scene::{Material, Placement, SceneError};

/// Fixed enumeration of scene element categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Floor sheets
    Floors,
    /// Wall segments
    Walls,
    /// Ceiling sheets
    Ceilings,
    /// Doors
    Doors,
    /// Windows
    Windows,
    /// Freestanding objects (furniture and props)
    Objects,
    /// Light sources
    Lights,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Self; 7] = [
        Self::Floors,
        Self::Walls,
        Self::Ceilings,
        Self::Doors,
        Self::Windows,
        Self::Objects,
        Self::Lights,
    ];

    /// Lowercase wire name of the category
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Floors => "floors",
            Self::Walls => "walls",
            Self::Ceilings => "ceilings",
            Self::Doors => "doors",
            Self::Windows => "windows",
            Self::Objects => "objects",
            Self::Lights => "lights",
        }
    }

    /// Whether elements of this category are structural flat sheets, for
    /// which a zero vertical extent is legitimate
    pub fn allows_flat_bbox(self) -> bool {
        matches!(self, Self::Floors | Self::Walls | Self::Ceilings)
    }

    /// Whether elements of this category arrive through asset retrieval
    ///
    /// Structural sheets are built at scene initialization and may
    /// legitimately sit at the room origin; retrievable elements at the
    /// origin default are treated as not yet placed.
    pub fn is_retrievable(self) -> bool {
        matches!(self, Self::Doors | Self::Windows | Self::Objects | Self::Lights)
    }
}

impl std::str::FromStr for Category {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| SceneError::InvalidCategory(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-form metadata attached to an element
pub type Metadata = IndexMap<String, serde_json::Value>;

/// Typed view of the light metadata convention
///
/// Lights carry their parameters as free-form metadata on the wire
/// (`light_intensity`, `light_type`, `light_color`); this struct is the
/// typed reading of those entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightParams {
    /// Light intensity in the renderer's units
    pub intensity: f32,

    /// Light type label, e.g. "point"
    pub light_type: String,

    /// RGB color, 0-255 per channel
    pub color: [u8; 3],
}

/// A named, category-tagged entity of the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneElement {
    /// Natural-language description of the element
    #[serde(default)]
    pub description: String,

    /// Category of the element
    pub category: Category,

    /// Placements of the element; never empty
    pub placements: Vec<Placement>,

    /// Default material applied to the element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,

    /// Axis-aligned bounding-box size before rotation, in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox_size: Option<Vec3>,

    /// Catalog/asset reference; expected once retrieval has completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Category-specific extras, e.g. a wall polygon or light parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl SceneElement {
    /// Create an element from its category and placements
    pub fn new(category: Category, placements: Vec<Placement>) -> Self {
        Self {
            description: String::new(),
            category,
            placements,
            material: None,
            bbox_size: None,
            identifier: None,
            metadata: None,
        }
    }

    /// Builder pattern: set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder pattern: set the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Builder pattern: set the bounding-box size
    pub fn with_bbox_size(mut self, size: Vec3) -> Self {
        self.bbox_size = Some(size);
        self
    }

    /// Builder pattern: set the catalog identifier
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Builder pattern: set one metadata entry
    pub fn with_metadata_entry(
        mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        self.metadata
            .get_or_insert_with(Metadata::new)
            .insert(key.into(), value);
        self
    }

    /// Validate the element invariants
    ///
    /// Placements must be non-empty and individually valid, the bounding
    /// box non-negative and finite, and the material well-formed. For
    /// freestanding objects a present bounding box must have a positive
    /// vertical extent; structural sheets may be flat.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.placements.is_empty() {
            return Err(SceneError::InvalidPlacement(
                "an element must have at least one placement".to_string(),
            ));
        }
        for placement in &self.placements {
            placement.validate()?;
        }
        if let Some(size) = self.bbox_size {
            if !size.iter().all(|c| c.is_finite() && *c >= 0.0) {
                return Err(SceneError::InvalidPlacement(format!(
                    "bbox_size components must be finite and non-negative, got [{}, {}, {}]",
                    size.x, size.y, size.z
                )));
            }
            if size.z == 0.0 && !self.category.allows_flat_bbox() {
                return Err(SceneError::InvalidPlacement(format!(
                    "{} elements must have a positive vertical extent",
                    self.category
                )));
            }
        }
        if let Some(material) = &self.material {
            material.validate()?;
        }
        Ok(())
    }

    /// Number of instanced copies this element denotes
    pub fn instance_count(&self) -> usize {
        self.placements.len()
    }

    /// Whether every placement still equals the retrieval default
    ///
    /// This is the heuristic signal that the element was retrieved but
    /// never placed; it is not a guarantee. Structural categories never
    /// read as unplaced, since floors and ceilings legitimately sit at the
    /// room origin.
    pub fn is_unplaced(&self) -> bool {
        self.category.is_retrievable()
            && self.placements.iter().all(Placement::is_retrieval_default)
    }

    /// World-space axis-aligned box of one instance
    ///
    /// Returns `None` when the element has no bounding box or the index is
    /// out of range.
    pub fn world_aabb(&self, instance: usize) -> Option<Aabb> {
        let bbox = self.bbox_size?;
        self.placements.get(instance).map(|p| p.world_aabb(bbox))
    }

    /// Whether one instance satisfies the floor-resting convention
    ///
    /// Only meaningful for elements with a bounding box; absent data reads
    /// as `false`.
    pub fn rests_on_floor(&self, instance: usize) -> bool {
        match (self.bbox_size, self.placements.get(instance)) {
            (Some(bbox), Some(placement)) => placement.rests_on_floor(bbox),
            _ => false,
        }
    }

    /// Read one metadata entry, if present
    pub fn metadata_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.as_ref()?.get(key)
    }

    /// Typed reading of the `polygon` metadata convention used by walls,
    /// floors, and ceilings
    ///
    /// Returns `None` when the entry is absent or malformed.
    pub fn polygon(&self) -> Option<Vec<Vec3>> {
        let value = self.metadata_value("polygon")?;
        let corners: Vec<[f32; 3]> = serde_json::from_value(value.clone()).ok()?;
        Some(corners.into_iter().map(Vec3::from).collect())
    }

    /// Typed reading of the light metadata convention
    ///
    /// Returns `None` when any of the three entries is absent or malformed.
    pub fn light_params(&self) -> Option<LightParams> {
        let metadata = self.metadata.as_ref()?;
        Some(LightParams {
            intensity: metadata.get("light_intensity")?.as_f64()? as f32,
            light_type: metadata.get("light_type")?.as_str()?.to_string(),
            color: serde_json::from_value(metadata.get("light_color")?.clone()).ok()?,
        })
    }

    /// Attach light parameters as metadata entries
    pub fn with_light_params(self, params: &LightParams) -> Self {
        self.with_metadata_entry("light_intensity", serde_json::json!(params.intensity))
            .with_metadata_entry("light_type", serde_json::json!(params.light_type))
            .with_metadata_entry("light_color", serde_json::json!(params.color))
    }
}
