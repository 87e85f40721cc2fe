//! Window abstraction used by the frame loop
//!
//! - **`backend`**: the trait the frame loop drives
//! - The GLFW implementation lives in `../opengl/window.rs`

pub mod backend;

pub use backend::WindowBackend;
