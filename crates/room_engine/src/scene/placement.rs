//! Placement: one instanced transform of a scene element
//!
//! A placement positions one copy of an asset's bounding box in the room.
//! The transform composition is fixed: the box is scaled uniformly about its
//! own center, rotated about the room axes, then translated so that its
//! center lands at `position`. The world-space axis-aligned box derived from
//! this composition is pure and deterministic, so collision and packing
//! reasoning performed elsewhere can reproduce it exactly.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{rotation_from_euler_deg, Aabb, Mat3, Mat4, Vec3};
use crate::scene::SceneError;

/// Tolerance used by the floor-resting convention check
pub const RESTING_TOLERANCE: f32 = 1e-6;

fn default_scale() -> f32 {
    1.0
}

/// Position, rotation, and uniform scale of one instance
///
/// `position` is the center of the transformed bounding box, not a corner.
/// `rotation` components are degrees about the room axes (x right, y depth,
/// z up), applied extrinsically in x, y, z order. `scale` is applied to the
/// bounding box before the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Bounding-box center in meters
    #[serde(default = "Vec3::zeros")]
    pub position: Vec3,

    /// Euler rotation in degrees, one component per room axis
    #[serde(default = "Vec3::zeros")]
    pub rotation: Vec3,

    /// Uniform pre-rotation scale factor, strictly positive
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: 1.0,
        }
    }
}

impl Placement {
    /// Placement at a position with zero rotation and unit scale
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Default::default()
        }
    }

    /// The placement given to every freshly retrieved element: room origin,
    /// zero rotation, unit scale
    pub fn origin() -> Self {
        Self::default()
    }

    /// Builder pattern: set the rotation in degrees
    pub fn with_rotation(mut self, pitch: f32, yaw: f32, roll: f32) -> Self {
        self.rotation = Vec3::new(pitch, yaw, roll);
        self
    }

    /// Builder pattern: set the uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Validate the placement invariants
    ///
    /// Scale must be strictly positive and every component finite.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(SceneError::InvalidPlacement(format!(
                "scale must be a positive finite number, got {}",
                self.scale
            )));
        }
        if !(self.position.iter().all(|c| c.is_finite())
            && self.rotation.iter().all(|c| c.is_finite()))
        {
            return Err(SceneError::InvalidPlacement(
                "position and rotation components must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether this placement still equals the retrieval default
    ///
    /// Used as the heuristic signal that an element was retrieved but never
    /// placed; it is exact equality on purpose, not a tolerance check.
    pub fn is_retrieval_default(&self) -> bool {
        *self == Self::default()
    }

    /// Rotation matrix for this placement
    pub fn rotation_matrix(&self) -> Mat3 {
        rotation_from_euler_deg(self.rotation)
    }

    /// Full transform matrix: translate * rotate * scale
    ///
    /// Applies to points of the bounding box expressed relative to its own
    /// center, so the composition is scale first, rotation second, and the
    /// final translation puts the box center at `position`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation_matrix().to_homogeneous()
            * Mat4::new_scaling(self.scale)
    }

    /// World-space axis-aligned box of a transformed bounding box
    ///
    /// `bbox_size` is the untransformed size of the asset. The extent of a
    /// rotated box along each world axis is |R| * half_extents, which is
    /// exact for axis-aligned input.
    pub fn world_aabb(&self, bbox_size: Vec3) -> Aabb {
        let half = bbox_size * (self.scale * 0.5);
        let rot = self.rotation_matrix();
        let world_half = rot.abs() * half;
        Aabb::from_center_half_extents(self.position, world_half)
    }

    /// Height at which a box of the given size rests on the floor
    ///
    /// The convention places the bounding-box center at half the scaled
    /// vertical extent.
    pub fn resting_height(&self, bbox_size: Vec3) -> f32 {
        bbox_size.z * self.scale * 0.5
    }

    /// Whether this placement satisfies the floor-resting convention
    pub fn rests_on_floor(&self, bbox_size: Vec3) -> bool {
        (self.position.z - self.resting_height(bbox_size)).abs() <= RESTING_TOLERANCE
    }
}
