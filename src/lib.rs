//! # sparkfield
//!
//! An interactive 2D particle playground. Particles are spawned by the
//! pointer, by bursts and by a steady ambient drizzle, move under one of six
//! force rules, leave fading trails, and retire when they run out of life or
//! fall off the bottom of the surface.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sparkfield::prelude::*;
//!
//! let mut engine = Engine::new(Config::default());
//! let mut raster = Raster::new(800, 600);
//!
//! engine.burst_at(Vec2::new(400.0, 300.0));
//! engine.update(&mut raster, &FrameInput {
//!     pointer: Vec2::new(400.0, 300.0),
//!     pointer_held: false,
//!     time_ms: 16.7,
//! });
//! ```
//!
//! ## Core Concepts
//!
//! ### Modes
//!
//! A [`Mode`] is picked when a particle is created and never changes. The
//! active mode in the [`Config`] only decides what new particles become,
//! so switching modes leaves a mixed population that each follows its own
//! rule:
//!
//! | Mode | Launch | Force | Drawn as |
//! |------|--------|-------|----------|
//! | Rain | slow drift down | gravity | plain disc |
//! | Firework | radial burst | none | disc, strong glow |
//! | Spiral | ring | sway + half gravity | ring outline |
//! | Bounce | upward | gravity, floor and walls | disc, glow |
//! | Magnetic | radial | pull to pointer | disc, glow |
//! | Vortex | ring | swirl around pointer | disc, glow |
//!
//! ### Frames
//!
//! [`Engine::update`] fades the previous frame instead of clearing it, steps
//! and draws every particle, drops the ones that did not survive, then runs
//! ambient, auto-explode and pointer emission. Drawing goes through the
//! [`Surface`] trait: [`Raster`] is the software target used on screen and
//! headless, [`Recorder`] captures draw calls for tests.
//!
//! ### Configuration
//!
//! [`Config`] is plain data with serde support. Live changes are partial
//! [`ConfigPatch`]es merged shallowly; [`controls::Command`] clamps user
//! input before it reaches the engine.

pub mod config;
pub mod controls;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod headless;
pub mod input;
pub mod particle;
pub mod raster;
pub mod renderer;
pub mod rules;
pub mod spawn;
pub mod surface;
pub mod time;
#[cfg(feature = "egui")]
pub mod ui;
pub mod visuals;
pub mod window;

pub use config::{Config, ConfigPatch, EmissionRates, Mode};
pub use engine::{Engine, FrameInput, FrameStats};
pub use error::{AppError, ConfigError, GpuError, SnapshotError};
pub use glam::Vec2;
pub use headless::HeadlessRun;
pub use particle::{Particle, Trail, TrailPoint};
pub use raster::Raster;
pub use surface::{DrawCommand, Recorder, Surface};
pub use visuals::{Color, ColorTheme};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use sparkfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Config, ConfigPatch, EmissionRates, Mode};
    pub use crate::controls::Command;
    pub use crate::emitter::Burst;
    pub use crate::engine::{Engine, FrameInput, FrameStats};
    pub use crate::headless::HeadlessRun;
    pub use crate::particle::Particle;
    pub use crate::raster::Raster;
    pub use crate::surface::{Recorder, Surface};
    pub use crate::visuals::{Color, ColorTheme};
    pub use crate::Vec2;
}
