//! GLSL source loading
//!
//! Shaders are compiled by the driver at startup, so all that happens on the
//! CPU side is reading the text and tagging it with its pipeline stage.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Pipeline stage a shader is compiled for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment shader
    Fragment,
}

impl ShaderStage {
    /// OpenGL shader type enum
    pub const fn gl_type(self) -> u32 {
        match self {
            Self::Vertex => glow::VERTEX_SHADER,
            Self::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Shader source loading errors
#[derive(Error, Debug)]
pub enum ShaderSourceError {
    /// File could not be read
    #[error("Failed to read {stage} shader {path:?}: {source}")]
    Read {
        /// Stage the file was meant for
        stage: ShaderStage,
        /// Offending path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// File was read but contains no code
    #[error("{stage} shader {path:?} is empty")]
    Empty {
        /// Stage the file was meant for
        stage: ShaderStage,
        /// Offending path
        path: PathBuf,
    },
}

/// GLSL text for one stage
#[derive(Debug, Clone)]
pub struct ShaderSource {
    stage: ShaderStage,
    origin: String,
    code: String,
}

impl ShaderSource {
    /// Wrap in-memory GLSL
    pub fn new(stage: ShaderStage, origin: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            stage,
            origin: origin.into(),
            code: code.into(),
        }
    }

    /// Read GLSL from a UTF-8 text file
    pub fn from_file(
        stage: ShaderStage,
        path: impl AsRef<Path>,
    ) -> Result<Self, ShaderSourceError> {
        let path = path.as_ref();
        let code = std::fs::read_to_string(path).map_err(|source| ShaderSourceError::Read {
            stage,
            path: path.to_path_buf(),
            source,
        })?;

        if code.trim().is_empty() {
            return Err(ShaderSourceError::Empty {
                stage,
                path: path.to_path_buf(),
            });
        }

        log::debug!("Loaded {} shader from {} ({} bytes)", stage, path.display(), code.len());
        Ok(Self::new(stage, path.display().to_string(), code))
    }

    /// Stage this source targets
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// Where the source came from, used in diagnostics
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// GLSL code
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Vertex and fragment sources for one program
#[derive(Debug, Clone)]
pub struct ShaderPair {
    /// Vertex stage
    pub vertex: ShaderSource,
    /// Fragment stage
    pub fragment: ShaderSource,
}

impl ShaderPair {
    /// Load both stages from disk
    pub fn load(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderSourceError> {
        Ok(Self {
            vertex: ShaderSource::from_file(ShaderStage::Vertex, vertex_path)?,
            fragment: ShaderSource::from_file(ShaderStage::Fragment, fragment_path)?,
        })
    }
}
