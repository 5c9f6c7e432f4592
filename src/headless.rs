//! Windowless runs into a [`Raster`].
//!
//! Used by the `--headless` command line mode and by benchmarks. The clock is
//! fixed at 60 frames per second so runs with the same seed produce the same
//! image.

use glam::Vec2;

use crate::engine::{Engine, FrameInput};
use crate::raster::Raster;
use crate::time::{FrameClock, HEADLESS_FRAME};

/// How to drive a headless run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessRun {
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    /// Fixed pointer position.
    pub pointer: Vec2,
    /// Hold the pointer down for the whole run.
    pub pointer_held: bool,
    /// Fire the mode's burst at the pointer before the first frame.
    pub burst: bool,
}

impl HeadlessRun {
    pub fn new(width: u32, height: u32, frames: u32) -> Self {
        Self {
            width,
            height,
            frames,
            pointer: Vec2::new(width as f32 * 0.5, height as f32 * 0.5),
            pointer_held: false,
            burst: true,
        }
    }

    /// Run the engine and return the final frame.
    pub fn run(&self, engine: &mut Engine) -> Raster {
        let mut raster = Raster::new(self.width, self.height);
        let mut clock = FrameClock::fixed(HEADLESS_FRAME);

        if self.burst {
            engine.burst_at(self.pointer);
        }

        for _ in 0..self.frames {
            let frame = FrameInput {
                pointer: self.pointer,
                pointer_held: self.pointer_held,
                time_ms: clock.tick(),
            };
            engine.update(&mut raster, &frame);
        }

        log::info!(
            "Headless run: {} frames at {}x{}, {} particles alive",
            self.frames,
            self.width,
            self.height,
            engine.len()
        );
        raster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Mode};

    #[test]
    fn test_same_seed_same_image() {
        let config = Config {
            mode: Mode::Firework,
            ..Default::default()
        };
        let run = HeadlessRun::new(64, 48, 20);

        let a = run.run(&mut Engine::with_seed(config.clone(), 11));
        let b = run.run(&mut Engine::with_seed(config, 11));
        assert_eq!(a.pixels(), b.pixels());
        assert!(a.pixels().iter().any(|&v| v != 0));
    }

    #[test]
    fn test_zero_frames_leaves_raster_blank() {
        let mut engine = Engine::with_seed(Config::default(), 2);
        let raster = HeadlessRun::new(16, 16, 0).run(&mut engine);
        assert!(raster.pixels().iter().all(|&v| v == 0));
        assert_eq!(engine.len(), 15);
    }
}
