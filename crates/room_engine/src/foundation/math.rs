//! Math utilities and types
//!
//! Provides the fundamental math types used by the scene model. The room
//! coordinate frame is right-handed with x pointing right, y into the room
//! depth, and z up; all distances are in meters.

pub use nalgebra::{Matrix3, Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Build a rotation matrix from Euler angles in degrees.
///
/// The components of `rotation` are rotations about the room axes in
/// declaration order: `rotation.x` about x (pitch), `rotation.y` about y
/// (yaw), `rotation.z` about z (roll). They are applied extrinsically in
/// that same order, so the composed matrix is `Rz * Ry * Rx`.
pub fn rotation_from_euler_deg(rotation: Vec3) -> Mat3 {
    let (rx, ry, rz) = (
        rotation.x.to_radians(),
        rotation.y.to_radians(),
        rotation.z.to_radians(),
    );
    // nalgebra composes from_euler_angles(r, p, y) as Rz(y) * Ry(p) * Rx(r),
    // which matches the x-then-y-then-z extrinsic order used here.
    *nalgebra::Rotation3::from_euler_angles(rx, ry, rz).matrix()
}

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,

    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its center and half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-extents of the box
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full size of the box along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest box containing both `self` and `other`
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Whether the two boxes overlap on every axis
    pub fn intersects(&self, other: &Self) -> bool {
        (self.min.x <= other.max.x && self.max.x >= other.min.x)
            && (self.min.y <= other.max.y && self.max.y >= other.min.y)
            && (self.min.z <= other.max.z && self.max.z >= other.min.z)
    }
}
