//! Vertex buffer and vertex array objects
//!
//! Static geometry only: data is uploaded once with `STATIC_DRAW`.

use std::rc::Rc;

use glow::HasContext;

use super::{GlContext, GlError, GlResult};

/// Vertex buffer object with RAII cleanup
pub struct VertexBuffer {
    gl: Rc<glow::Context>,
    buffer: glow::Buffer,
}

impl VertexBuffer {
    /// Upload `data` into a new `ARRAY_BUFFER`
    ///
    /// Leaves the buffer bound to `ARRAY_BUFFER`.
    pub fn new(context: &GlContext, data: &[f32]) -> GlResult<Self> {
        if data.is_empty() {
            return Err(GlError::InvalidVertexData("vertex buffer data is empty".to_string()));
        }

        let gl = context.shared();
        // SAFETY: the byte slice is a view of `data`, which outlives the upload
        let buffer = unsafe {
            let buffer = gl.create_buffer().map_err(|reason| GlError::ObjectCreation {
                object: "vertex buffer",
                reason,
            })?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(data),
                glow::STATIC_DRAW,
            );
            buffer
        };

        log::debug!("Uploaded vertex buffer with {} floats", data.len());
        Ok(Self { gl, buffer })
    }

    /// Bind to `ARRAY_BUFFER`
    pub fn bind(&self) {
        // SAFETY: the buffer is live for the lifetime of `self`
        unsafe { self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.buffer)) };
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        // SAFETY: the handle is owned by this wrapper and not used after drop
        unsafe { self.gl.delete_buffer(self.buffer) };
    }
}

/// Vertex array object with RAII cleanup
pub struct VertexArray {
    gl: Rc<glow::Context>,
    vao: glow::VertexArray,
}

impl VertexArray {
    /// Create and bind a new vertex array
    pub fn new(context: &GlContext) -> GlResult<Self> {
        let gl = context.shared();
        // SAFETY: plain object creation on the current context
        let vao = unsafe {
            let vao = gl.create_vertex_array().map_err(|reason| GlError::ObjectCreation {
                object: "vertex array",
                reason,
            })?;
            gl.bind_vertex_array(Some(vao));
            vao
        };
        Ok(Self { gl, vao })
    }

    /// Bind this vertex array
    pub fn bind(&self) {
        // SAFETY: the VAO is live for the lifetime of `self`
        unsafe { self.gl.bind_vertex_array(Some(self.vao)) };
    }

    /// Point attribute `location` at tightly packed float vectors in `buffer`
    ///
    /// Binds both this VAO and the buffer.
    #[allow(clippy::cast_possible_wrap)]
    pub fn set_float_attribute(
        &self,
        buffer: &VertexBuffer,
        location: u32,
        components: usize,
    ) -> GlResult<()> {
        if !(1..=4).contains(&components) {
            return Err(GlError::InvalidVertexData(format!(
                "attribute must have 1 to 4 components, got {components}"
            )));
        }

        self.bind();
        buffer.bind();
        // SAFETY: both objects are bound and the layout matches the uploaded floats
        unsafe {
            self.gl.enable_vertex_attrib_array(location);
            self.gl
                .vertex_attrib_pointer_f32(location, components as i32, glow::FLOAT, false, 0, 0);
        }
        Ok(())
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        // SAFETY: the handle is owned by this wrapper and not used after drop
        unsafe { self.gl.delete_vertex_array(self.vao) };
    }
}
