//! Surface material description
//!
//! A material pairs a catalog identifier with the natural-language
//! description it was retrieved for. Materials are immutable values: they
//! may be cloned onto any number of elements and carry no ownership of them.

use serde::{Deserialize, Serialize};

use crate::scene::SceneError;

/// Identifier/description pair denoting a surface appearance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Catalog key of the material
    pub id: String,

    /// Description the material was retrieved for
    pub description: String,
}

impl Material {
    /// Create a new material
    ///
    /// The id is the only addressing mechanism into the material catalog,
    /// so an empty id is rejected.
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Result<Self, SceneError> {
        let material = Self {
            id: id.into(),
            description: description.into(),
        };
        material.validate()?;
        Ok(material)
    }

    /// Validate the material invariants
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.id.is_empty() {
            return Err(SceneError::InvalidMaterial(
                "material id must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_requires_id() {
        assert!(Material::new("", "bare plaster").is_err());

        let material = Material::new("Bricks074", "exposed brick, rough")
            .expect("non-empty id should be accepted");
        assert_eq!(material.id, "Bricks074");
    }
}
