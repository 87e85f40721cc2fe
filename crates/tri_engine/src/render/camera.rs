//! Fixed perspective camera

use crate::config::CameraConfig;
use crate::foundation::math::{self, Mat4, Vec3};

/// Perspective camera looking at a fixed target
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera is looking at
    pub target: Vec3,
    /// Up vector, typically +Y
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width over height
    pub aspect: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl Camera {
    /// Perspective camera at `position` looking at the origin with +Y up
    #[cfg(test)]
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::y(),
            fov: math::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Build from configuration for a viewport with the given aspect ratio
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: config.eye.into(),
            target: config.target.into(),
            up: config.up.into(),
            fov: math::deg_to_rad(config.fov_degrees),
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        math::look_at(self.position, self.target, self.up)
    }

    /// Camera-to-clip transform
    pub fn projection_matrix(&self) -> Mat4 {
        math::perspective(self.fov, self.aspect, self.near, self.far)
    }
}
