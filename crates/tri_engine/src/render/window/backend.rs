//! Backend-agnostic window trait
//!
//! The frame loop only needs to know when to stop, how to present, how big
//! the framebuffer is, and what time it is. Keeping that behind a trait lets
//! the loop run against a fake window in tests.

/// Window operations the frame loop depends on
pub trait WindowBackend {
    /// Check if the window should close
    ///
    /// True once the user closed the window or pressed Escape, or after
    /// [`set_should_close`](Self::set_should_close) was called with `true`.
    fn should_close(&self) -> bool;

    /// Set whether the window should close
    fn set_should_close(&mut self, should_close: bool);

    /// Process pending window system events
    fn poll_events(&mut self);

    /// Present the back buffer; blocks for vsync when enabled
    fn swap_buffers(&mut self);

    /// Seconds since the window system was initialized
    fn time(&self) -> f64;

    /// Framebuffer size in pixels, which differs from the window size on HiDPI displays
    fn framebuffer_size(&self) -> (u32, u32);
}
