//! Triangle demo configuration
//!
//! Every section has serde defaults, so a config file only needs the values it
//! changes. An empty file yields [`AppConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::Vec3;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window and context settings
    pub window: WindowConfig,
    /// Shader file locations
    pub shaders: ShaderConfig,
    /// Fixed camera
    pub camera: CameraConfig,
    /// Per-frame rendering behavior
    pub render: RenderConfig,
}

impl Config for AppConfig {}

impl AppConfig {
    /// Load `path` if it exists, otherwise fall back to defaults
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if path.exists() {
            log::info!("Loading configuration from {}", path.display());
            Self::load_from_file(path)?
        } else {
            log::debug!("No configuration at {}, using defaults", path.display());
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce a degenerate window, camera, or timer
    ///
    /// TOML accepts `nan` and `inf`, so every float is checked for finiteness
    /// before any range check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if let Some(name) = self.first_non_finite() {
            return invalid(format!("{name} must be finite"));
        }

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            ));
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return invalid(format!(
                "fov_degrees must be in (0, 180), got {}",
                camera.fov_degrees
            ));
        }
        if camera.near <= 0.0 {
            return invalid(format!("near plane must be positive, got {}", camera.near));
        }
        if camera.far <= camera.near {
            return invalid(format!(
                "far plane ({}) must be beyond near plane ({})",
                camera.far, camera.near
            ));
        }
        let forward = Vec3::from(camera.target) - Vec3::from(camera.eye);
        if forward.norm() <= f32::EPSILON {
            return invalid("camera eye and target must differ".to_string());
        }
        if forward.cross(&Vec3::from(camera.up)).norm() <= f32::EPSILON {
            return invalid("camera up must not be parallel to the view direction".to_string());
        }

        let render = &self.render;
        if Vec3::from(render.rotation_axis).norm() <= f32::EPSILON {
            return invalid("rotation_axis must be non-zero".to_string());
        }
        if render.rotation_speed < 0.0 {
            return invalid(format!(
                "rotation_speed must not be negative, got {}",
                render.rotation_speed
            ));
        }
        if render.report_interval_secs <= 0.0 {
            return invalid(format!(
                "report_interval_secs must be positive, got {}",
                render.report_interval_secs
            ));
        }
        Ok(())
    }

    fn first_non_finite(&self) -> Option<&'static str> {
        let camera = &self.camera;
        let render = &self.render;
        let f32_fields: [(&'static str, &[f32]); 8] = [
            ("camera.eye", &camera.eye),
            ("camera.target", &camera.target),
            ("camera.up", &camera.up),
            ("camera.fov_degrees", std::slice::from_ref(&camera.fov_degrees)),
            ("camera.near", std::slice::from_ref(&camera.near)),
            ("camera.far", std::slice::from_ref(&camera.far)),
            ("render.clear_color", &render.clear_color),
            ("render.rotation_axis", &render.rotation_axis),
        ];
        let f64_fields = [
            ("render.rotation_speed", render.rotation_speed),
            ("render.report_interval_secs", render.report_interval_secs),
        ];

        f32_fields
            .iter()
            .find(|(_, values)| values.iter().any(|v| !v.is_finite()))
            .map(|(name, _)| *name)
            .or_else(|| {
                f64_fields
                    .iter()
                    .find(|(_, value)| !value.is_finite())
                    .map(|(name, _)| *name)
            })
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in screen coordinates
    pub width: u32,
    /// Window height in screen coordinates
    pub height: u32,
    /// Whether the window can be resized
    pub resizable: bool,
    /// Wait for vertical sync on buffer swap
    pub vsync: bool,
    /// Requested OpenGL core profile version (major, minor)
    pub gl_version: (u32, u32),
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Spinning Triangle".to_string(),
            width: 800,
            height: 600,
            resizable: false,
            vsync: true,
            gl_version: (4, 1),
        }
    }
}

impl WindowConfig {
    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Configuration for shader loading
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Path to the vertex shader GLSL source
    pub vertex_shader_path: String,
    /// Path to the fragment shader GLSL source
    pub fragment_shader_path: String,
}

impl ShaderConfig {
    /// Default vertex shader file name
    pub const VERTEX_SHADER_FILE: &'static str = "vertexShader.v.glsl";
    /// Default fragment shader file name
    pub const FRAGMENT_SHADER_FILE: &'static str = "fragmentShader.f.glsl";

    const SEARCH_DIRS: [&'static str; 3] = ["", "shaders/", "triangle_app/shaders/"];

    /// Create shader config with automatic path resolution
    ///
    /// Tries a few common locations so the binary works when launched from the
    /// workspace root as well as from the app directory.
    pub fn with_path_resolution(base_vertex: &str, base_fragment: &str) -> Self {
        Self {
            vertex_shader_path: Self::resolve_shader_path(base_vertex),
            fragment_shader_path: Self::resolve_shader_path(base_fragment),
        }
    }

    fn resolve_shader_path(base: &str) -> String {
        Self::SEARCH_DIRS
            .iter()
            .map(|dir| format!("{dir}{base}"))
            .find(|candidate| Path::new(candidate).exists())
            .unwrap_or_else(|| base.to_string())
    }
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self::with_path_resolution(Self::VERTEX_SHADER_FILE, Self::FRAGMENT_SHADER_FILE)
    }
}

/// Fixed camera parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position in world space
    pub eye: [f32; 3],
    /// Look-at target in world space
    pub target: [f32; 3],
    /// Up direction
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [3.0, 3.0, 3.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 10.0,
        }
    }
}

/// Per-frame rendering behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// RGBA clear color
    pub clear_color: [f32; 4],
    /// Axis the model spins around
    pub rotation_axis: [f32; 3],
    /// Spin speed in radians per second
    pub rotation_speed: f64,
    /// Seconds between frame-rate reports
    pub report_interval_secs: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [1.0, 1.0, 1.0, 1.0],
            rotation_axis: [0.0, 0.0, 1.0],
            rotation_speed: 1.0,
            report_interval_secs: 1.0,
        }
    }
}
