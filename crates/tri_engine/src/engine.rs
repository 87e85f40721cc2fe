//! Startup sequence and frame loop

use thiserror::Error;

use crate::config::{AppConfig, ConfigError};
use crate::foundation::math::Vec3;
use crate::foundation::time::{FrameReport, FrameStats, Spinner};
use crate::render::opengl::{GlContext, GlError, GlfwWindow, WindowError};
use crate::render::shader_source::{ShaderPair, ShaderSourceError};
use crate::render::{
    Camera, FrameRenderer, Mesh, RenderSettings, TriangleRenderer, WindowBackend,
};

/// Engine-level errors
///
/// Every variant is fatal; the caller is expected to report it and exit.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Window or context creation failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Shader files could not be read
    #[error("Shader source error: {0}")]
    ShaderSource(#[from] ShaderSourceError),

    /// GL object creation, compilation, or linking failed
    #[error("OpenGL error: {0}")]
    Gl(#[from] GlError),
}

/// What happened during a run of the frame loop
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Frames drawn and presented
    pub frames_rendered: u64,
    /// Frame-rate reports printed
    pub reports_emitted: u64,
    /// Most recent report, if any
    pub last_report: Option<FrameReport>,
    /// Accumulated rotation angle in radians when the loop ended
    pub final_angle: f64,
}

/// Main engine entry point
pub struct Engine;

impl Engine {
    /// Open the window, build the renderer, and spin until the window closes
    pub fn run(config: &AppConfig) -> Result<RunSummary, EngineError> {
        config.validate()?;
        log::info!("Initializing engine...");

        let sources = ShaderPair::load(
            &config.shaders.vertex_shader_path,
            &config.shaders.fragment_shader_path,
        )?;

        // Declared before the renderer so it is dropped after every GL object
        let mut window = GlfwWindow::new(&config.window)?;
        let context = GlContext::load(&mut window);
        println!("OpenGL version {}", context.version());
        log::info!("OpenGL renderer: {}", context.renderer());

        let camera = Camera::from_config(&config.camera, config.window.aspect_ratio());
        let settings = RenderSettings {
            clear_color: config.render.clear_color,
            viewport: window.framebuffer_size(),
        };
        let mut renderer =
            TriangleRenderer::new(&context, &sources, &camera, &Mesh::triangle(), settings)?;

        let start = window.time();
        let mut spinner = Spinner::new(
            Vec3::from(config.render.rotation_axis),
            config.render.rotation_speed,
            start,
        );
        let mut stats = FrameStats::new(start, config.render.report_interval_secs);

        log::info!("Starting main loop...");
        let summary = run_frames(&mut window, &mut renderer, &mut spinner, &mut stats)?;
        log::info!(
            "Main loop finished after {} frames ({} reports)",
            summary.frames_rendered,
            summary.reports_emitted
        );
        Ok(summary)
    }
}

/// Drive frames until the window asks to close
///
/// Each iteration follows framebuffer resizes, advances the rotation, records
/// the frame for statistics (printing a report to stdout when one is due),
/// draws, presents, and polls events.
pub fn run_frames<W, R>(
    window: &mut W,
    renderer: &mut R,
    spinner: &mut Spinner,
    stats: &mut FrameStats,
) -> Result<RunSummary, GlError>
where
    W: WindowBackend + ?Sized,
    R: FrameRenderer + ?Sized,
{
    let mut summary = RunSummary::default();
    let mut viewport = window.framebuffer_size();

    while !window.should_close() {
        let size = window.framebuffer_size();
        if size != viewport {
            renderer.resize(size)?;
            viewport = size;
        }

        let now = window.time();
        spinner.advance(now);

        if let Some(report) = stats.record_frame(now) {
            println!("{report}");
            log::debug!("{} frames in the last interval", report.frames);
            summary.reports_emitted += 1;
            summary.last_report = Some(report);
        }

        renderer.draw_frame(&spinner.model_matrix())?;
        window.swap_buffers();
        window.poll_events();
        summary.frames_rendered += 1;
    }

    summary.final_angle = spinner.angle();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{is_rotation, Mat4};
    use approx::assert_relative_eq;

    /// Fake window with a clock that advances a fixed step per swap
    struct ScriptedWindow {
        now: f64,
        step: f64,
        swaps: u64,
        close_after: u64,
        should_close: bool,
        size: (u32, u32),
        /// Framebuffer sizes applied when polling after the given swap count
        resizes: Vec<(u64, (u32, u32))>,
    }

    impl ScriptedWindow {
        fn new(step: f64, close_after: u64) -> Self {
            Self {
                now: 0.0,
                step,
                swaps: 0,
                close_after,
                should_close: false,
                size: (800, 600),
                resizes: Vec::new(),
            }
        }
    }

    impl WindowBackend for ScriptedWindow {
        fn should_close(&self) -> bool {
            self.should_close
        }

        fn set_should_close(&mut self, should_close: bool) {
            self.should_close = should_close;
        }

        fn poll_events(&mut self) {
            let swaps = self.swaps;
            if let Some(&(_, size)) = self.resizes.iter().find(|(after, _)| *after == swaps) {
                self.size = size;
            }
            if self.swaps >= self.close_after {
                self.set_should_close(true);
            }
        }

        fn swap_buffers(&mut self) {
            self.swaps += 1;
            self.now += self.step;
        }

        fn time(&self) -> f64 {
            self.now
        }

        fn framebuffer_size(&self) -> (u32, u32) {
            self.size
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        models: Vec<Mat4>,
        /// Frame index (models drawn so far) and size of each resize
        resizes: Vec<(usize, (u32, u32))>,
        fail_on: Option<usize>,
    }

    impl FrameRenderer for RecordingRenderer {
        fn draw_frame(&mut self, model: &Mat4) -> Result<(), GlError> {
            if self.fail_on == Some(self.models.len()) {
                return Err(GlError::InvalidVertexData("scripted failure".to_string()));
            }
            self.models.push(*model);
            Ok(())
        }

        fn resize(&mut self, size: (u32, u32)) -> Result<(), GlError> {
            self.resizes.push((self.models.len(), size));
            Ok(())
        }
    }

    #[test]
    fn test_reports_once_per_second() {
        // 4 fps for 3 seconds: frames drawn at t = 0.0, 0.25, ..., 2.75
        let mut window = ScriptedWindow::new(0.25, 12);
        let mut renderer = RecordingRenderer::default();
        let mut spinner = Spinner::new(Vec3::z(), 1.0, 0.0);
        let mut stats = FrameStats::new(0.0, 1.0);

        let summary = run_frames(&mut window, &mut renderer, &mut spinner, &mut stats).unwrap();

        assert_eq!(summary.frames_rendered, 12);
        assert_eq!(renderer.models.len(), 12);
        // Boundaries crossed at t = 1.0 and t = 2.0
        assert_eq!(summary.reports_emitted, 2);
        let report = summary.last_report.unwrap();
        assert_eq!(report.frames, 4);
        assert_relative_eq!(report.frames_per_second, 4.0);
    }

    #[test]
    fn test_angle_follows_wall_clock() {
        let mut window = ScriptedWindow::new(0.5, 6);
        let mut renderer = RecordingRenderer::default();
        let mut spinner = Spinner::new(Vec3::z(), 0.2, 0.0);
        let mut stats = FrameStats::new(0.0, 1.0);

        let summary = run_frames(&mut window, &mut renderer, &mut spinner, &mut stats).unwrap();

        // Last frame was drawn at t = 2.5
        assert_relative_eq!(summary.final_angle, 0.5, epsilon = 1e-12);
        assert_relative_eq!(renderer.models[0], Mat4::identity(), epsilon = 1e-7);
        assert!(renderer.models.iter().all(|m| is_rotation(m, 1e-5)));
        assert_ne!(renderer.models[1], renderer.models[0]);
    }

    #[test]
    fn test_closed_window_renders_nothing() {
        let mut window = ScriptedWindow::new(0.1, 0);
        window.set_should_close(true);
        let mut renderer = RecordingRenderer::default();
        let mut spinner = Spinner::new(Vec3::z(), 1.0, 0.0);
        let mut stats = FrameStats::new(0.0, 1.0);

        let summary = run_frames(&mut window, &mut renderer, &mut spinner, &mut stats).unwrap();
        assert_eq!(summary, RunSummary::default());
    }

    #[test]
    fn test_draw_error_stops_the_loop() {
        let mut window = ScriptedWindow::new(0.1, 100);
        let mut renderer = RecordingRenderer {
            fail_on: Some(3),
            ..RecordingRenderer::default()
        };
        let mut spinner = Spinner::new(Vec3::z(), 1.0, 0.0);
        let mut stats = FrameStats::new(0.0, 1.0);

        let err = run_frames(&mut window, &mut renderer, &mut spinner, &mut stats).unwrap_err();
        assert!(matches!(err, GlError::InvalidVertexData(_)));
        assert_eq!(renderer.models.len(), 3);
        assert_eq!(window.swaps, 3);
    }

    #[test]
    fn test_framebuffer_resize_reaches_renderer_before_next_draw() {
        let mut window = ScriptedWindow::new(0.1, 6);
        window.resizes = vec![(2, (1024, 768)), (4, (0, 0))];
        let mut renderer = RecordingRenderer::default();
        let mut spinner = Spinner::new(Vec3::z(), 1.0, 0.0);
        let mut stats = FrameStats::new(0.0, 1.0);

        let summary = run_frames(&mut window, &mut renderer, &mut spinner, &mut stats).unwrap();

        assert_eq!(summary.frames_rendered, 6);
        assert_eq!(renderer.resizes, vec![(2, (1024, 768)), (4, (0, 0))]);
    }

    #[test]
    fn test_unchanged_framebuffer_never_resizes() {
        let mut window = ScriptedWindow::new(0.1, 10);
        let mut renderer = RecordingRenderer::default();
        let mut spinner = Spinner::new(Vec3::z(), 1.0, 0.0);
        let mut stats = FrameStats::new(0.0, 1.0);

        run_frames(&mut window, &mut renderer, &mut spinner, &mut stats).unwrap();
        assert!(renderer.resizes.is_empty());
    }
}
