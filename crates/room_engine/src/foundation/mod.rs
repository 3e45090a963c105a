//! Foundation utilities: math types and logging

pub mod logging;
pub mod math;

pub use math::{Aabb, Mat3, Mat4, Vec3};
