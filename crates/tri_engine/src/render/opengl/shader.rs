//! Shader compilation and program linking
//!
//! GLSL is compiled by the driver at runtime. Compile and link failures carry
//! the driver's info log so a bad shader is reported with the reason.

use std::rc::Rc;

use glow::HasContext;

use super::{GlContext, GlError, GlResult};
use crate::foundation::math::Mat4;
use crate::render::shader_source::{ShaderPair, ShaderSource, ShaderStage};

/// Compiled shader object with RAII cleanup
pub struct Shader {
    gl: Rc<glow::Context>,
    shader: glow::Shader,
}

impl Shader {
    /// Compile GLSL source for its stage
    pub fn compile(context: &GlContext, source: &ShaderSource) -> GlResult<Self> {
        let gl = context.shared();
        let stage = source.stage();

        // SAFETY: plain object creation and compilation on the current context;
        // the shader is deleted on every failure path.
        unsafe {
            let shader = gl
                .create_shader(stage.gl_type())
                .map_err(|reason| GlError::ObjectCreation {
                    object: "shader",
                    reason,
                })?;
            gl.shader_source(shader, source.code());
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(GlError::ShaderCompile {
                    stage,
                    origin: source.origin().to_string(),
                    log: log.trim_end().to_string(),
                });
            }

            log::debug!("Compiled {} shader from {}", stage, source.origin());
            Ok(Self { gl, shader })
        }
    }

    /// Raw shader handle
    pub fn handle(&self) -> glow::Shader {
        self.shader
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        // SAFETY: the handle is owned by this wrapper and not used after drop
        unsafe { self.gl.delete_shader(self.shader) };
    }
}

/// Linked shader program with RAII cleanup
pub struct ShaderProgram {
    gl: Rc<glow::Context>,
    program: glow::Program,
}

impl ShaderProgram {
    /// Link a vertex and a fragment shader
    ///
    /// The shaders are detached after linking; dropping them afterwards frees
    /// the shader objects while the program keeps its binary.
    pub fn link(context: &GlContext, vertex: &Shader, fragment: &Shader) -> GlResult<Self> {
        let gl = context.shared();

        // SAFETY: both shaders are live compiled objects from the same context
        unsafe {
            let program = gl.create_program().map_err(|reason| GlError::ObjectCreation {
                object: "shader program",
                reason,
            })?;
            gl.attach_shader(program, vertex.handle());
            gl.attach_shader(program, fragment.handle());
            gl.link_program(program);

            let linked = gl.get_program_link_status(program);
            gl.detach_shader(program, vertex.handle());
            gl.detach_shader(program, fragment.handle());

            if !linked {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(GlError::ProgramLink {
                    log: log.trim_end().to_string(),
                });
            }

            Ok(Self { gl, program })
        }
    }

    /// Compile both stages of `sources` and link them
    pub fn from_sources(context: &GlContext, sources: &ShaderPair) -> GlResult<Self> {
        let vertex = Shader::compile(context, &sources.vertex)?;
        let fragment = Shader::compile(context, &sources.fragment)?;
        let program = Self::link(context, &vertex, &fragment)?;
        log::info!(
            "Linked shader program ({} + {})",
            sources.vertex.origin(),
            sources.fragment.origin()
        );
        Ok(program)
    }

    /// Make this the active program
    pub fn bind(&self) {
        // SAFETY: the program is live for the lifetime of `self`
        unsafe { self.gl.use_program(Some(self.program)) };
    }

    /// Look up a uniform by name
    ///
    /// Drivers strip uniforms the shader never reads, so a missing uniform is
    /// logged rather than treated as fatal. Setting a `None` location is a no-op.
    pub fn uniform_location(&self, name: &str) -> Option<glow::UniformLocation> {
        // SAFETY: query on a live program
        let location = unsafe { self.gl.get_uniform_location(self.program, name) };
        if location.is_none() {
            log::warn!("Uniform '{name}' is not active in the shader program");
        }
        location
    }

    /// Look up a vertex attribute by name
    pub fn attrib_location(&self, name: &str) -> GlResult<u32> {
        // SAFETY: query on a live program
        unsafe { self.gl.get_attrib_location(self.program, name) }
            .ok_or_else(|| GlError::MissingAttribute(name.to_string()))
    }

    /// Upload a 4x4 matrix uniform; the program must be bound
    pub fn set_mat4(&self, location: Option<&glow::UniformLocation>, value: &Mat4) {
        // nalgebra is column-major, matching GL without transposition
        // SAFETY: the slice holds exactly 16 floats
        unsafe { self.gl.uniform_matrix_4_f32_slice(location, false, value.as_slice()) };
    }

    /// Raw program handle
    pub fn handle(&self) -> glow::Program {
        self.program
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        // SAFETY: the handle is owned by this wrapper and not used after drop
        unsafe { self.gl.delete_program(self.program) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowConfig;
    use crate::render::opengl::GlfwWindow;

    const VALID_VERTEX: &str =
        "#version 410 core\nin vec3 vert;\nvoid main() { gl_Position = vec4(vert, 1.0); }\n";
    const VALID_FRAGMENT: &str =
        "#version 410 core\nout vec4 color;\nvoid main() { color = vec4(1.0); }\n";

    fn hidden_context() -> (GlfwWindow, GlContext) {
        let mut window =
            GlfwWindow::new_hidden(&WindowConfig::default()).expect("window with GL context");
        let context = GlContext::load(&mut window);
        (window, context)
    }

    #[test]
    #[ignore = "requires a display and an OpenGL 4.1 driver"]
    fn test_malformed_glsl_fails_with_info_log() {
        let (_window, context) = hidden_context();
        let source = ShaderSource::new(
            ShaderStage::Vertex,
            "broken.v.glsl",
            "#version 410 core\nvoid main() { this is not glsl }\n",
        );

        match Shader::compile(&context, &source) {
            Err(GlError::ShaderCompile { stage, origin, log }) => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert_eq!(origin, "broken.v.glsl");
                assert!(!log.is_empty(), "driver should explain the failure");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("malformed GLSL compiled"),
        }
    }

    #[test]
    #[ignore = "requires a display and an OpenGL 4.1 driver"]
    fn test_valid_pair_links_and_exposes_vert_attribute() {
        let (_window, context) = hidden_context();
        let sources = ShaderPair {
            vertex: ShaderSource::new(ShaderStage::Vertex, "vertex", VALID_VERTEX),
            fragment: ShaderSource::new(ShaderStage::Fragment, "fragment", VALID_FRAGMENT),
        };

        let program = ShaderProgram::from_sources(&context, &sources).unwrap();
        assert!(program.attrib_location("vert").is_ok());
        assert!(matches!(program.attrib_location("missing"), Err(GlError::MissingAttribute(_))));
    }

    #[test]
    fn test_compile_error_message_includes_stage_and_log() {
        let err = GlError::ShaderCompile {
            stage: ShaderStage::Fragment,
            origin: "fragmentShader.f.glsl".to_string(),
            log: "0:3(1): error: syntax error".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("fragment shader"));
        assert!(message.contains("fragmentShader.f.glsl"));
        assert!(message.contains("syntax error"));
    }
}
