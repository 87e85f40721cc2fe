//! OpenGL rendering backend
//!
//! Thin RAII wrappers over `glow`. Every handle keeps an `Rc` to the GL
//! function table and deletes its object on drop, so handles must be dropped
//! while the context that created them is still current. The `Rc` also keeps
//! them `!Send`, pinning them to the context thread.

pub mod buffer;
pub mod context;
pub mod shader;
pub mod window;

pub use buffer::{VertexArray, VertexBuffer};
pub use context::GlContext;
pub use shader::{Shader, ShaderProgram};
pub use window::{GlfwWindow, WindowError};

use crate::render::shader_source::ShaderStage;
use thiserror::Error;

/// OpenGL errors
#[derive(Error, Debug)]
pub enum GlError {
    /// The driver refused to allocate an object
    #[error("Failed to create {object}: {reason}")]
    ObjectCreation {
        /// Kind of object, e.g. "vertex buffer"
        object: &'static str,
        /// Driver message
        reason: String,
    },

    /// GLSL compilation failed
    #[error("Failed to compile {stage} shader {origin}: {log}")]
    ShaderCompile {
        /// Stage being compiled
        stage: ShaderStage,
        /// Source file or label
        origin: String,
        /// Driver info log
        log: String,
    },

    /// Program linking failed
    #[error("Failed to link program: {log}")]
    ProgramLink {
        /// Driver info log
        log: String,
    },

    /// A vertex attribute the renderer needs is not active in the program
    #[error("Vertex attribute '{0}' not found in shader program")]
    MissingAttribute(String),

    /// Vertex data is unusable
    #[error("Invalid vertex data: {0}")]
    InvalidVertexData(String),
}

/// Result type for OpenGL operations
pub type GlResult<T> = Result<T, GlError>;
