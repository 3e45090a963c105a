//! Retrieval boundary: text prompt in, material or element out
//!
//! Retrieval services map a natural-language description to a concrete
//! catalog asset. They never mutate the registry; the element-retrieval
//! contract additionally fixes the initial transform of every result to the
//! room origin, so a freshly retrieved element is expected to overlap
//! whatever sits there until a subsequent placement step resolves it.

use crate::boundary::BoundaryError;
use crate::scene::{Material, SceneElement, SceneRegistry};

/// External material-retrieval service
pub trait MaterialSource {
    /// Map a description to a catalog material
    ///
    /// Pure function of the description; no registry access.
    fn fetch_material(&self, description: &str) -> Result<Material, BoundaryError>;
}

/// External element-retrieval service
pub trait ElementSource {
    /// Map a description to a brand-new scene element
    ///
    /// The registry is a read-only snapshot for context-aware retrieval
    /// (e.g. avoiding duplicate styles). The result must carry exactly one
    /// placement at the room origin with zero rotation and unit scale.
    fn fetch_element(
        &self,
        scene: &SceneRegistry,
        description: &str,
    ) -> Result<SceneElement, BoundaryError>;
}

/// Fetch a material and enforce the retrieval contract
///
/// The caller decides where to attach the result; nothing is written to any
/// registry here.
pub fn fetch_material(
    source: &impl MaterialSource,
    description: &str,
) -> Result<Material, BoundaryError> {
    let material = source.fetch_material(description)?;
    material
        .validate()
        .map_err(|e| BoundaryError::violation(format!("retrieved material: {e}")))?;
    log::debug!("retrieved material '{}' for \"{}\"", material.id, description);
    Ok(material)
}

/// Fetch a new element and enforce the retrieval contract
///
/// Violations: an invalid element, a missing catalog identifier, or any
/// initial transform other than a single origin placement. The result is
/// not inserted anywhere; the caller picks a key and must re-place the
/// element before it is usable.
pub fn fetch_element(
    source: &impl ElementSource,
    scene: &SceneRegistry,
    description: &str,
) -> Result<SceneElement, BoundaryError> {
    let element = source.fetch_element(scene, description)?;

    element
        .validate()
        .map_err(|e| BoundaryError::violation(format!("retrieved element: {e}")))?;
    if element.identifier.is_none() {
        return Err(BoundaryError::violation(
            "retrieved element carries no catalog identifier",
        ));
    }
    if element.placements.len() != 1 {
        return Err(BoundaryError::violation(format!(
            "retrieved element must have exactly one placement, got {}",
            element.placements.len()
        )));
    }
    if !element.placements[0].is_retrieval_default() {
        return Err(BoundaryError::violation(
            "retrieved element must be placed at the room origin with zero rotation and unit scale",
        ));
    }

    log::debug!(
        "retrieved element '{}' for \"{}\"",
        element.identifier.as_deref().unwrap_or_default(),
        description
    );
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::{Category, Placement};

    struct FixedElement(SceneElement);

    impl ElementSource for FixedElement {
        fn fetch_element(
            &self,
            _scene: &SceneRegistry,
            _description: &str,
        ) -> Result<SceneElement, BoundaryError> {
            Ok(self.0.clone())
        }
    }

    struct FixedMaterial(Material);

    impl MaterialSource for FixedMaterial {
        fn fetch_material(&self, _description: &str) -> Result<Material, BoundaryError> {
            Ok(self.0.clone())
        }
    }

    fn sofa() -> SceneElement {
        SceneElement::new(Category::Objects, vec![Placement::origin()])
            .with_description("brown leather sofa")
            .with_bbox_size(Vec3::new(1.5, 0.8, 0.8))
            .with_identifier("catalog/sofa/123")
    }

    #[test]
    fn test_conforming_element_passes() {
        let scene = SceneRegistry::new(None);
        let element = fetch_element(&FixedElement(sofa()), &scene, "brown leather sofa")
            .expect("conforming result");
        assert_eq!(element.placements.len(), 1);
        assert!(element.is_unplaced());
    }

    #[test]
    fn test_pre_placed_element_rejected() {
        let scene = SceneRegistry::new(None);
        let mut element = sofa();
        element.placements = vec![Placement::at(1.0, 0.0, 0.4)];
        let err = fetch_element(&FixedElement(element), &scene, "sofa").unwrap_err();
        assert!(matches!(err, BoundaryError::ContractViolation { .. }));
    }

    #[test]
    fn test_multi_placement_element_rejected() {
        let scene = SceneRegistry::new(None);
        let mut element = sofa();
        element.placements = vec![Placement::origin(), Placement::origin()];
        let err = fetch_element(&FixedElement(element), &scene, "sofa").unwrap_err();
        assert!(matches!(err, BoundaryError::ContractViolation { .. }));
    }

    #[test]
    fn test_missing_identifier_rejected() {
        let scene = SceneRegistry::new(None);
        let mut element = sofa();
        element.identifier = None;
        let err = fetch_element(&FixedElement(element), &scene, "sofa").unwrap_err();
        assert!(matches!(err, BoundaryError::ContractViolation { .. }));
    }

    #[test]
    fn test_material_contract() {
        let good = Material::new("Bricks074", "exposed brick").expect("valid");
        let fetched = fetch_material(&FixedMaterial(good.clone()), "exposed brick")
            .expect("conforming result");
        assert_eq!(fetched, good);

        let bad = Material {
            id: String::new(),
            description: "nameless".to_string(),
        };
        let err = fetch_material(&FixedMaterial(bad), "nameless").unwrap_err();
        assert!(matches!(err, BoundaryError::ContractViolation { .. }));
    }
}
