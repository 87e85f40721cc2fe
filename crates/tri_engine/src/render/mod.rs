//! Rendering
//!
//! - **`opengl`**: RAII wrappers over GL objects and the GLFW window
//! - **`window`**: window trait driven by the frame loop
//! - **`shader_source`**: GLSL file loading
//! - **`camera`** / **`mesh`**: the fixed scene
//! - **`renderer`**: per-frame drawing

pub mod camera;
pub mod mesh;
pub mod opengl;
pub mod renderer;
pub mod shader_source;
pub mod window;

pub use camera::Camera;
pub use mesh::Mesh;
pub use renderer::{FrameRenderer, RenderSettings, TriangleRenderer};
pub use shader_source::{ShaderPair, ShaderSource, ShaderStage};
pub use window::WindowBackend;
