//! Window management using GLFW
//!
//! Creates a window with an OpenGL core-profile context and makes it current
//! on the calling thread. GLFW requires that thread to be the main thread on
//! some platforms, so the window must be created and driven from `main`.

use std::os::raw::c_void;

use glfw::{Action, Context, Key, WindowEvent};
use thiserror::Error;

use crate::config::WindowConfig;
use crate::render::window::WindowBackend;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// `glfwInit` failed
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// Window or context creation failed, usually an unsupported GL version
    #[error(
        "Failed to create {width}x{height} window with an OpenGL {major}.{minor} core context"
    )]
    CreationFailed {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Requested GL major version
        major: u32,
        /// Requested GL minor version
        minor: u32,
    },
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window with a current OpenGL context
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
}

impl GlfwWindow {
    /// Create a visible window and make its context current
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        Self::create(config, true)
    }

    /// Create an invisible window, useful for context-only work such as driver tests
    pub fn new_hidden(config: &WindowConfig) -> WindowResult<Self> {
        Self::create(config, false)
    }

    fn create(config: &WindowConfig, visible: bool) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::log_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        let (major, minor) = config.gl_version;
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));
        glfw.window_hint(glfw::WindowHint::Visible(visible));
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed {
                width: config.width,
                height: config.height,
                major,
                minor,
            })?;

        window.make_current();
        glfw.set_swap_interval(if config.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        window.set_key_polling(true);
        window.set_close_polling(true);
        window.set_framebuffer_size_polling(true);

        log::info!(
            "Created {}x{} window '{}' (OpenGL {}.{} core)",
            config.width,
            config.height,
            config.title,
            major,
            minor
        );

        Ok(Self { glfw, window, events })
    }

    /// Address of a GL entry point for this window's context
    pub fn proc_address(&mut self, name: &str) -> *const c_void {
        self.window.get_proc_address(name) as *const c_void
    }

    fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Key(Key::Escape, _, Action::Press, _) | WindowEvent::Close => {
                self.window.set_should_close(true);
            }
            // The frame loop picks up the new size through `framebuffer_size`
            WindowEvent::FramebufferSize(width, height) => {
                log::debug!("Framebuffer resized to {width}x{height}");
            }
            _ => {}
        }
    }
}

impl WindowBackend for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
        let pending: Vec<WindowEvent> = glfw::flush_messages(&self.events)
            .map(|(_, event)| event)
            .collect();
        for event in &pending {
            self.handle_event(event);
        }
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    #[allow(clippy::cast_sign_loss)]
    fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }
}
