//! The scene registry: single mutable source of truth for one session
//!
//! An insertion-ordered mapping from unique identifier-style keys to scene
//! elements, plus a room-type tag. Keys are the only addressing mechanism
//! into the scene; uniqueness holds across all categories. The registry is
//! an explicit value threaded through every operation, never an ambient
//! singleton, and every mutating operation validates before touching state
//! so that a failed call is a no-op.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::scene::{Material, Metadata, Placement, SceneElement, SceneError};

/// Ordered registry of named scene elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneRegistry {
    /// Elements of the scene, keyed by unique identifier-style names
    #[serde(default)]
    pub objects: IndexMap<String, SceneElement>,

    /// Room type label, e.g. "warehouse"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
}

/// Check that a key is an identifier-style string
fn validate_key(key: &str) -> Result<(), SceneError> {
    let mut chars = key.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if starts_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(SceneError::InvalidKey(key.to_string()))
    }
}

impl SceneRegistry {
    /// Create an empty registry with an optional room type
    pub fn new(room_type: Option<&str>) -> Self {
        Self {
            objects: IndexMap::new(),
            room_type: room_type.map(str::to_string),
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    /// Get an element by key
    pub fn get(&self, key: &str) -> Option<&SceneElement> {
        self.objects.get(key)
    }

    /// Get a mutable element by key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut SceneElement> {
        self.objects.get_mut(key)
    }

    /// Whether the registry contains a key
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// Key/element pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SceneElement)> {
        self.objects.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry holds no elements
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// First free key of the form `base_1`, `base_2`, ...
    ///
    /// Supports the descriptive, collision-free naming convention for
    /// duplicates and variants.
    pub fn fresh_key(&self, base: &str) -> String {
        (1..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_default() // unreachable: the key space is unbounded
    }

    // ========================================================================
    // Mutation API
    // ========================================================================

    /// Insert a new element under a unique key
    pub fn insert(&mut self, key: &str, element: SceneElement) -> Result<(), SceneError> {
        validate_key(key)?;
        if self.contains(key) {
            return Err(SceneError::DuplicateKey(key.to_string()));
        }
        element.validate()?;
        log::debug!("scene: insert '{}' ({})", key, element.category);
        self.objects.insert(key.to_string(), element);
        Ok(())
    }

    /// Replace an element's material
    pub fn set_material(&mut self, key: &str, material: Material) -> Result<(), SceneError> {
        material.validate()?;
        let element = self
            .objects
            .get_mut(key)
            .ok_or_else(|| SceneError::KeyNotFound(key.to_string()))?;
        log::debug!("scene: set material '{}' on '{}'", material.id, key);
        element.material = Some(material);
        Ok(())
    }

    /// Replace an element's placements wholesale
    ///
    /// An empty replacement is rejected: every element retains at least one
    /// placement at all times.
    pub fn set_placements(
        &mut self,
        key: &str,
        placements: Vec<Placement>,
    ) -> Result<(), SceneError> {
        if placements.is_empty() {
            return Err(SceneError::InvalidPlacement(format!(
                "cannot replace placements of '{key}' with an empty sequence"
            )));
        }
        for placement in &placements {
            placement.validate()?;
        }
        let element = self
            .objects
            .get_mut(key)
            .ok_or_else(|| SceneError::KeyNotFound(key.to_string()))?;
        log::debug!(
            "scene: replace {} placement(s) on '{}'",
            placements.len(),
            key
        );
        element.placements = placements;
        Ok(())
    }

    /// Replace an element's metadata
    pub fn set_metadata(&mut self, key: &str, metadata: Option<Metadata>) -> Result<(), SceneError> {
        let element = self
            .objects
            .get_mut(key)
            .ok_or_else(|| SceneError::KeyNotFound(key.to_string()))?;
        element.metadata = metadata;
        Ok(())
    }

    /// Append a placement to an element, adding one instanced copy
    ///
    /// Existing placements are untouched; the number of rendered copies
    /// increases by one and no new key is created.
    pub fn duplicate_instance(&mut self, key: &str, placement: Placement) -> Result<(), SceneError> {
        placement.validate()?;
        let element = self
            .objects
            .get_mut(key)
            .ok_or_else(|| SceneError::KeyNotFound(key.to_string()))?;
        log::debug!(
            "scene: duplicate instance of '{}' ({} -> {} copies)",
            key,
            element.placements.len(),
            element.placements.len() + 1
        );
        element.placements.push(placement);
        Ok(())
    }

    /// Remove one placement from an element by index
    ///
    /// Removing the last placement is rejected; remove the whole element
    /// instead.
    pub fn remove_instance(&mut self, key: &str, index: usize) -> Result<(), SceneError> {
        let element = self
            .objects
            .get_mut(key)
            .ok_or_else(|| SceneError::KeyNotFound(key.to_string()))?;
        if index >= element.placements.len() {
            return Err(SceneError::InvalidPlacement(format!(
                "placement index {index} out of range for '{key}' ({} placements)",
                element.placements.len()
            )));
        }
        if element.placements.len() == 1 {
            return Err(SceneError::InvalidPlacement(format!(
                "removing the last placement of '{key}' would leave it empty; remove the element instead"
            )));
        }
        element.placements.remove(index);
        Ok(())
    }

    /// Remove an element entirely
    ///
    /// Elements hold no cross-references, so removal has no effect on the
    /// rest of the scene. Insertion order of the remaining elements is
    /// preserved.
    pub fn remove(&mut self, key: &str) -> Result<SceneElement, SceneError> {
        let removed = self
            .objects
            .shift_remove(key)
            .ok_or_else(|| SceneError::KeyNotFound(key.to_string()))?;
        log::debug!("scene: remove '{}'", key);
        Ok(removed)
    }

    // ========================================================================
    // Export readiness
    // ========================================================================

    /// Keys of elements whose every placement still equals the retrieval
    /// default, in insertion order
    pub fn unplaced_keys(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, element)| element.is_unplaced())
            .map(|(key, _)| key)
            .collect()
    }

    /// Fail while any element remains in the retrieved-but-unplaced state
    pub fn ensure_export_ready(&self) -> Result<(), SceneError> {
        match self.unplaced_keys().first() {
            Some(key) => Err(SceneError::UnplacedElement((*key).to_string())),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Snapshot shape
    // ========================================================================

    /// Validate every key and element in the registry
    pub fn validate(&self) -> Result<(), SceneError> {
        for (key, element) in &self.objects {
            validate_key(key)?;
            element.validate()?;
        }
        Ok(())
    }

    /// Serialize the registry to the handed-off JSON shape
    pub fn to_json(&self) -> Result<String, SceneError> {
        serde_json::to_string_pretty(self).map_err(|e| SceneError::Snapshot(e.to_string()))
    }

    /// Decode a registry from the handed-off JSON shape
    ///
    /// Malformed categories or placements are rejected, never coerced; the
    /// decoded registry passes the same validation as one built through the
    /// mutation API.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let registry: Self =
            serde_json::from_str(json).map_err(|e| SceneError::Snapshot(e.to_string()))?;
        registry.validate()?;
        Ok(registry)
    }
}
