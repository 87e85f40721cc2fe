//! Triangle renderer
//!
//! Owns the shader program and mesh buffers and issues one draw call per
//! frame. Projection and view are uploaded once; only the model matrix
//! changes between frames. A framebuffer resize resets the viewport and
//! re-uploads the projection for the new aspect ratio.

use glow::HasContext;

use crate::foundation::math::Mat4;
use crate::render::camera::Camera;
use crate::render::mesh::{Mesh, POSITION_COMPONENTS};
use crate::render::opengl::{
    GlContext, GlError, GlResult, ShaderProgram, VertexArray, VertexBuffer,
};
use crate::render::shader_source::ShaderPair;

/// Uniform holding the projection matrix
pub const PROJECTION_UNIFORM: &str = "projection";
/// Uniform holding the view matrix
pub const CAMERA_UNIFORM: &str = "camera";
/// Uniform holding the model matrix
pub const MODEL_UNIFORM: &str = "model";
/// Vertex position attribute
pub const POSITION_ATTRIBUTE: &str = "vert";

/// Something that can draw one frame for a given model transform
pub trait FrameRenderer {
    /// Clear the framebuffer and draw with `model`
    fn draw_frame(&mut self, model: &Mat4) -> GlResult<()>;

    /// Adapt viewport and projection to a new framebuffer size in pixels
    fn resize(&mut self, size: (u32, u32)) -> GlResult<()>;
}

/// Static-state options applied at startup
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    /// RGBA clear color
    pub clear_color: [f32; 4],
    /// Viewport size in pixels
    pub viewport: (u32, u32),
}

/// Draws a single mesh with a perspective camera
pub struct TriangleRenderer {
    vao: VertexArray,
    _vbo: VertexBuffer,
    program: ShaderProgram,
    projection_location: Option<glow::UniformLocation>,
    model_location: Option<glow::UniformLocation>,
    vertex_count: i32,
    camera: Camera,
    context: GlContext,
}

impl TriangleRenderer {
    /// Compile shaders, upload constant uniforms and the mesh, and set global GL state
    pub fn new(
        context: &GlContext,
        sources: &ShaderPair,
        camera: &Camera,
        mesh: &Mesh,
        settings: RenderSettings,
    ) -> GlResult<Self> {
        let program = ShaderProgram::from_sources(context, sources)?;
        program.bind();

        let projection_location = program.uniform_location(PROJECTION_UNIFORM);
        program.set_mat4(projection_location.as_ref(), &camera.projection_matrix());

        let camera_location = program.uniform_location(CAMERA_UNIFORM);
        program.set_mat4(camera_location.as_ref(), &camera.view_matrix());

        let model_location = program.uniform_location(MODEL_UNIFORM);
        program.set_mat4(model_location.as_ref(), &Mat4::identity());

        let vertex_count = i32::try_from(mesh.vertex_count()).map_err(|_| {
            GlError::InvalidVertexData(format!("{} vertices exceed GLsizei", mesh.vertex_count()))
        })?;

        let vao = VertexArray::new(context)?;
        let vbo = VertexBuffer::new(context, mesh.positions())?;
        let position_location = program.attrib_location(POSITION_ATTRIBUTE)?;
        vao.set_float_attribute(&vbo, position_location, POSITION_COMPONENTS)?;

        apply_global_state(context.raw(), settings);

        log::info!(
            "Renderer ready: {vertex_count} vertices, viewport {:?}",
            settings.viewport
        );
        Ok(Self {
            vao,
            _vbo: vbo,
            program,
            projection_location,
            model_location,
            vertex_count,
            camera: camera.clone(),
            context: context.clone(),
        })
    }
}

/// Aspect ratio of a framebuffer, or `None` while it has no area (minimized)
pub(crate) fn aspect_ratio((width, height): (u32, u32)) -> Option<f32> {
    (width > 0 && height > 0).then_some(width as f32 / height as f32)
}

#[allow(clippy::cast_possible_wrap)]
fn set_viewport(gl: &glow::Context, (width, height): (u32, u32)) {
    // SAFETY: viewport change on the current context
    unsafe { gl.viewport(0, 0, width as i32, height as i32) };
}

fn apply_global_state(gl: &glow::Context, settings: RenderSettings) {
    let [r, g, b, a] = settings.clear_color;
    set_viewport(gl, settings.viewport);
    // SAFETY: fixed-function state changes on the current context
    unsafe {
        gl.enable(glow::DEPTH_TEST);
        gl.depth_func(glow::LESS);
        gl.clear_color(r, g, b, a);
    }
}

impl FrameRenderer for TriangleRenderer {
    fn draw_frame(&mut self, model: &Mat4) -> GlResult<()> {
        let gl = self.context.raw();
        // SAFETY: clearing the default framebuffer on the current context
        unsafe { gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT) };

        self.program.bind();
        self.program.set_mat4(self.model_location.as_ref(), model);
        self.vao.bind();

        // SAFETY: the bound VAO holds exactly `vertex_count` vertices
        unsafe { gl.draw_arrays(glow::TRIANGLES, 0, self.vertex_count) };
        Ok(())
    }

    fn resize(&mut self, size: (u32, u32)) -> GlResult<()> {
        let Some(aspect) = aspect_ratio(size) else {
            log::debug!("Skipping resize to empty framebuffer {size:?}");
            return Ok(());
        };
        set_viewport(self.context.raw(), size);

        self.camera.aspect = aspect;
        self.program.bind();
        self.program
            .set_mat4(self.projection_location.as_ref(), &self.camera.projection_matrix());
        log::debug!("Viewport resized to {}x{} (aspect {aspect:.3})", size.0, size.1);
        Ok(())
    }
}
