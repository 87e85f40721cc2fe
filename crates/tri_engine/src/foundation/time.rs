//! Frame timing: rotation accumulation and frame-rate statistics
//!
//! Both types take timestamps in seconds (as returned by `glfwGetTime`) instead
//! of reading a clock themselves, so the frame loop owns the single source of
//! time and tests can drive them with exact values.

use std::f64::consts::TAU;
use std::fmt;

use crate::foundation::math::{self, Mat4, Vec3};

/// Accumulates a rotation angle from wall-clock timestamps
#[derive(Debug, Clone)]
pub struct Spinner {
    axis: Vec3,
    speed: f64,
    angle: f64,
    last_time: f64,
}

impl Spinner {
    /// Create a spinner rotating `speed` radians per second around `axis`, starting at `start_time`
    ///
    /// Negative and non-finite speeds are replaced by zero so the angle never
    /// decreases and never leaves the finite range.
    pub fn new(axis: Vec3, speed: f64, start_time: f64) -> Self {
        Self {
            axis,
            speed: if speed.is_finite() { speed.max(0.0) } else { 0.0 },
            angle: 0.0,
            last_time: start_time,
        }
    }

    /// Advance to `now` and return the accumulated angle
    ///
    /// Timestamps older than the previous one contribute nothing.
    pub fn advance(&mut self, now: f64) -> f64 {
        let delta = (now - self.last_time).max(0.0);
        self.angle += delta * self.speed;
        self.last_time = self.last_time.max(now);
        self.angle
    }

    /// Total angle in radians since creation
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Model matrix for the current angle
    #[allow(clippy::cast_possible_truncation)]
    pub fn model_matrix(&self) -> Mat4 {
        // Wrap before narrowing so precision doesn't decay over long runs
        let wrapped = self.angle.rem_euclid(TAU) as f32;
        math::rotation(self.axis, wrapped)
    }
}

/// Frame-rate sample covering one report interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Frames rendered during the interval
    pub frames: u32,
    /// Average frame time in milliseconds
    pub ms_per_frame: f64,
    /// Average frame rate
    pub frames_per_second: f64,
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} ms/frame => {:.6} frame/s",
            self.ms_per_frame, self.frames_per_second
        )
    }
}

/// Counts frames and emits a [`FrameReport`] once per interval
#[derive(Debug, Clone)]
pub struct FrameStats {
    interval: f64,
    boundary: f64,
    frames: u32,
}

impl FrameStats {
    /// Default report interval in seconds
    pub const DEFAULT_INTERVAL: f64 = 1.0;

    /// Start counting at `start_time`, reporting every `interval` seconds
    pub fn new(start_time: f64, interval: f64) -> Self {
        Self {
            interval: if interval > 0.0 { interval } else { Self::DEFAULT_INTERVAL },
            boundary: start_time,
            frames: 0,
        }
    }

    /// Record a rendered frame at `now`
    ///
    /// Frames are counted in the half-open window `(boundary, now]`, so a frame
    /// stamped exactly at the start time belongs to no interval. Returns a
    /// report when a full interval has passed since the last report boundary.
    /// Rates are measured over the real elapsed time. The boundary moves
    /// forward by whole intervals, so a long stall yields one report rather
    /// than one per missed interval.
    pub fn record_frame(&mut self, now: f64) -> Option<FrameReport> {
        let elapsed = now - self.boundary;
        if elapsed <= 0.0 {
            return None;
        }
        self.frames += 1;

        if elapsed < self.interval {
            return None;
        }

        let frames = self.frames;
        let report = FrameReport {
            frames,
            ms_per_frame: elapsed * 1000.0 / f64::from(frames),
            frames_per_second: f64::from(frames) / elapsed,
        };

        self.frames = 0;
        self.boundary += (elapsed / self.interval).floor() * self.interval;
        Some(report)
    }

    /// Frames counted since the last report
    pub fn pending_frames(&self) -> u32 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::is_rotation;
    use approx::assert_relative_eq;

    #[test]
    fn test_spinner_angle_grows_with_elapsed_time() {
        let mut spinner = Spinner::new(Vec3::z(), 0.5, 10.0);
        assert_relative_eq!(spinner.advance(10.0), 0.0);
        assert_relative_eq!(spinner.advance(12.0), 1.0);
        assert_relative_eq!(spinner.advance(13.0), 1.5);
    }

    #[test]
    fn test_spinner_is_monotonic() {
        let mut spinner = Spinner::new(Vec3::z(), 1.0, 0.0);
        let timestamps = [0.1, 0.3, 0.2, 0.25, 0.9, 0.9, 2.5];
        let mut previous = spinner.angle();
        for t in timestamps {
            let angle = spinner.advance(t);
            assert!(angle >= previous, "angle went backwards at t={t}");
            previous = angle;
        }
        // Out-of-order stamps neither subtract nor double count
        assert_relative_eq!(previous, 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_spinner_negative_speed_is_clamped() {
        let mut spinner = Spinner::new(Vec3::z(), -3.0, 0.0);
        assert_relative_eq!(spinner.advance(5.0), 0.0);
    }

    #[test]
    fn test_spinner_non_finite_speed_keeps_a_valid_rotation() {
        for speed in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            let mut spinner = Spinner::new(Vec3::z(), speed, 0.0);
            assert_relative_eq!(spinner.advance(0.5), 0.0);
            assert!(is_rotation(&spinner.model_matrix(), 1e-5));
        }
    }

    #[test]
    fn test_spinner_model_matrix_stays_a_rotation() {
        let mut spinner = Spinner::new(Vec3::new(0.0, 0.0, 1.0), 1.0, 0.0);
        for step in 1..200 {
            spinner.advance(f64::from(step) * 37.3);
            assert!(is_rotation(&spinner.model_matrix(), 1e-4));
        }
    }

    #[test]
    fn test_frame_stats_reports_once_per_second() {
        let mut stats = FrameStats::new(0.0, 1.0);
        let mut reports = Vec::new();
        // 60 fps for three seconds
        for frame in 1..=180 {
            if let Some(report) = stats.record_frame(f64::from(frame) / 60.0) {
                reports.push(report);
            }
        }
        assert_eq!(reports.len(), 3);
        for report in &reports {
            assert_eq!(report.frames, 60);
            assert_relative_eq!(report.frames_per_second, 60.0, epsilon = 1e-9);
            assert_relative_eq!(report.ms_per_frame, 1000.0 / 60.0, epsilon = 1e-9);
        }
        assert_eq!(stats.pending_frames(), 0);
    }

    #[test]
    fn test_frame_stats_stall_yields_single_report() {
        let mut stats = FrameStats::new(0.0, 1.0);
        assert!(stats.record_frame(0.5).is_none());
        let report = stats.record_frame(3.7).expect("report after stall");
        assert_eq!(report.frames, 2);
        assert_relative_eq!(report.frames_per_second, 2.0 / 3.7, epsilon = 1e-12);
        assert_relative_eq!(report.ms_per_frame, 1850.0, epsilon = 1e-9);
        // Boundary is now 3.0, the next frame is still inside that interval
        assert!(stats.record_frame(3.8).is_none());
        assert!(stats.record_frame(4.0).is_some());
    }

    #[test]
    fn test_frame_stats_skips_frame_at_start_time() {
        let mut stats = FrameStats::new(2.0, 1.0);
        assert!(stats.record_frame(2.0).is_none());
        assert_eq!(stats.pending_frames(), 0);
        assert!(stats.record_frame(2.5).is_none());
        let report = stats.record_frame(3.0).expect("report at boundary");
        assert_eq!(report.frames, 2);
        assert_relative_eq!(report.frames_per_second, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_frame_stats_invalid_interval_falls_back_to_default() {
        let mut stats = FrameStats::new(0.0, 0.0);
        assert!(stats.record_frame(0.5).is_none());
        assert!(stats.record_frame(1.0).is_some());
    }

    #[test]
    fn test_frame_report_display() {
        let report = FrameReport {
            frames: 50,
            ms_per_frame: 20.0,
            frames_per_second: 50.0,
        };
        assert_eq!(report.to_string(), "20.000000 ms/frame => 50.000000 frame/s");
    }
}
