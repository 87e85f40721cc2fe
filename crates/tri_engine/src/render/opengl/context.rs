//! GL function table loading

use std::rc::Rc;

use glow::HasContext;

use super::GlfwWindow;

/// Shared handle to the loaded GL function table
#[derive(Clone)]
pub struct GlContext {
    gl: Rc<glow::Context>,
}

impl GlContext {
    /// Load GL entry points for the window's context
    ///
    /// The window's context must be current on this thread.
    pub fn load(window: &mut GlfwWindow) -> Self {
        // SAFETY: the context was made current when the window was created and
        // GLFW returns entry points valid for that context.
        let gl = unsafe { glow::Context::from_loader_function(|name| window.proc_address(name)) };
        Self { gl: Rc::new(gl) }
    }

    /// `GL_VERSION` string reported by the driver
    pub fn version(&self) -> String {
        // SAFETY: querying a string parameter has no preconditions beyond a current context
        unsafe { self.gl.get_parameter_string(glow::VERSION) }
    }

    /// `GL_RENDERER` string reported by the driver
    pub fn renderer(&self) -> String {
        // SAFETY: see `version`
        unsafe { self.gl.get_parameter_string(glow::RENDERER) }
    }

    /// Borrow the raw function table
    pub fn raw(&self) -> &glow::Context {
        &self.gl
    }

    pub(crate) fn shared(&self) -> Rc<glow::Context> {
        Rc::clone(&self.gl)
    }
}

impl std::fmt::Debug for GlContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlContext").finish_non_exhaustive()
    }
}
