//! Frame timing.
//!
//! The spiral sway reads wall-clock milliseconds, so the clock reports
//! elapsed time as `f64` milliseconds. Motion itself is per frame and never
//! scaled by delta time.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//!
//! // In the frame loop:
//! clock.tick();
//! let frame = FrameInput { time_ms: clock.elapsed_ms(), .. };
//! ```

use std::time::{Duration, Instant};

/// Display refresh interval assumed by headless runs.
pub const HEADLESS_FRAME: Duration = Duration::from_micros(16_667);

/// Time tracking for the frame loop.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    /// Milliseconds since start.
    elapsed_ms: f64,
    /// Seconds since the previous tick.
    delta_secs: f32,
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    /// When set, every tick advances by exactly this much.
    fixed_delta: Option<Duration>,
}

impl FrameClock {
    /// A clock following real time, starting now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            elapsed_ms: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            fixed_delta: None,
        }
    }

    /// A clock that ignores real time and advances `step` per tick.
    pub fn fixed(step: Duration) -> Self {
        Self {
            fixed_delta: Some(step),
            ..Self::new()
        }
    }

    /// Advance one frame. Returns elapsed milliseconds.
    pub fn tick(&mut self) -> f64 {
        self.frame_count += 1;

        if let Some(step) = self.fixed_delta {
            self.delta_secs = step.as_secs_f32();
            self.elapsed_ms += step.as_secs_f64() * 1000.0;
            self.fps = 1.0 / self.delta_secs.max(f32::EPSILON);
            return self.elapsed_ms;
        }

        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_ms = now.duration_since(self.start).as_secs_f64() * 1000.0;

        // Update FPS periodically
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.elapsed_ms
    }

    /// Milliseconds since start, as of the last tick.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Seconds between the last two ticks.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Ticks since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, averaged over half a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
