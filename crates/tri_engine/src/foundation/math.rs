//! Math utilities and types
//!
//! Thin layer over nalgebra. All matrices follow OpenGL conventions:
//! right-handed view space, clip-space depth in `[-1, 1]`, column-major storage
//! (so `Mat4::as_slice` can be uploaded without transposing).

use std::f32::consts::PI;

pub use nalgebra::{Matrix4, Point3, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

/// Perspective projection with a vertical field of view in radians
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::new_perspective(aspect, fov_y, near, far)
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
}

/// Homogeneous rotation of `angle` radians around `axis`
///
/// The axis does not need to be normalized. A zero-length axis yields identity.
pub fn rotation(axis: Vec3, angle: f32) -> Mat4 {
    Unit::try_new(axis, f32::EPSILON)
        .map_or_else(Mat4::identity, |axis| Mat4::from_axis_angle(&axis, angle))
}

/// Check that `m` is a proper rigid rotation (no translation, no scale, no mirroring)
pub fn is_rotation(m: &Mat4, epsilon: f32) -> bool {
    let upper = m.fixed_view::<3, 3>(0, 0);
    let orthonormal =
        (upper * upper.transpose() - nalgebra::Matrix3::identity()).abs().max() <= epsilon;
    let proper = (upper.determinant() - 1.0).abs() <= epsilon;
    let affine_row = m.fixed_view::<1, 4>(3, 0);
    let homogeneous =
        (affine_row - nalgebra::RowVector4::new(0.0, 0.0, 0.0, 1.0)).abs().max() <= epsilon;
    let no_translation = m.fixed_view::<3, 1>(0, 3).abs().max() <= epsilon;

    orthonormal && proper && homogeneous && no_translation
}
