//! # Tri Engine
//!
//! Opens a GLFW window with an OpenGL 4.1 core context, compiles a GLSL
//! shader pair from disk, uploads a hard-coded triangle, and spins it around
//! the Z axis while printing frame-rate statistics once per second.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tri_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     tri_engine::foundation::logging::init();
//!     let config = AppConfig::load_or_default("triangle.toml")?;
//!     Engine::run(&config)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

pub mod config;
pub mod foundation;
pub mod render;

mod engine;

pub use engine::{run_frames, Engine, EngineError, RunSummary};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{AppConfig, Config, ConfigError},
        foundation::{
            math::{Mat4, Vec3},
            time::{FrameReport, FrameStats, Spinner},
        },
        render::{Camera, FrameRenderer, Mesh, WindowBackend},
        Engine, EngineError, RunSummary,
    };
}
