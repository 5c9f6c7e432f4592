//! Particle emission: single spawns and multi-particle bursts.
//!
//! # Spawn velocity table
//!
//! | Mode | vx | vy |
//! |------|----|----|
//! | Rain | `uniform(-1, 1)` | `uniform(2, 5)` |
//! | Firework | `cos(a) * s` | burst: `sin(a) * s - 3`, else `uniform(2, 6)` |
//! | Spiral | `cos(a') * r * 0.1` | `sin(a') * r * 0.1 + 2` |
//! | Bounce | `uniform(-2, 2)` | `uniform(1, 3)` |
//! | Magnetic | `uniform(-1, 1)` | `uniform(1, 3)` |
//! | Vortex | `cos(a') * r * 0.05` | `sin(a') * r * 0.05 + 1` |
//!
//! Firework speed `s` is `uniform(5, 17)` for bursts and `uniform(1, 4)`
//! otherwise. Spiral radius `r` is `uniform(20, 70)`, vortex `uniform(10, 40)`.
//!
//! # Bursts
//!
//! | Burst | Count | Shape | Mode of children |
//! |-------|-------|-------|------------------|
//! | [`Burst::Explosion`] | 25 in firework mode, else 15 | all at the center | current |
//! | [`Burst::SpiralRing`] | 8 | ring of radius 30 | spiral |
//! | [`Burst::VortexRing`] | 12 | ring of radius 40 | vortex |

use glam::Vec2;

use crate::config::{Config, Mode};
use crate::particle::Particle;
use crate::spawn::{ring_position, SpawnContext};

/// Explosion size in firework mode.
pub const FIREWORK_EXPLOSION_COUNT: usize = 25;
/// Explosion size in every other mode.
pub const EXPLOSION_COUNT: usize = 15;

pub const SPIRAL_RING_COUNT: usize = 8;
pub const SPIRAL_RING_RADIUS: f32 = 30.0;

pub const VORTEX_RING_COUNT: usize = 12;
pub const VORTEX_RING_RADIUS: f32 = 40.0;

/// Height ambient particles enter at, just above the top edge.
pub const AMBIENT_SPAWN_Y: f32 = -10.0;

/// Half-size of the box pointer-held particles are scattered in.
pub const POINTER_JITTER: f32 = 10.0;

impl Mode {
    /// Spawn-velocity table: one entry per mode.
    pub fn launch_velocity(self, ctx: &mut SpawnContext, is_burst: bool) -> Vec2 {
        match self {
            Mode::Rain => Vec2::new(ctx.random_range(-1.0, 1.0), ctx.random_range(2.0, 5.0)),
            Mode::Firework => {
                let angle = ctx.random_angle();
                if is_burst {
                    let speed = ctx.random_range(5.0, 17.0);
                    Vec2::new(angle.cos() * speed, angle.sin() * speed - 3.0)
                } else {
                    let speed = ctx.random_range(1.0, 4.0);
                    Vec2::new(angle.cos() * speed, ctx.random_range(2.0, 6.0))
                }
            }
            Mode::Spiral => {
                let angle = ctx.random_angle();
                let radius = ctx.random_range(20.0, 70.0);
                Vec2::new(angle.cos() * radius * 0.1, angle.sin() * radius * 0.1 + 2.0)
            }
            Mode::Bounce => Vec2::new(ctx.random_range(-2.0, 2.0), ctx.random_range(1.0, 3.0)),
            Mode::Magnetic => Vec2::new(ctx.random_range(-1.0, 1.0), ctx.random_range(1.0, 3.0)),
            Mode::Vortex => {
                let angle = ctx.random_angle();
                let radius = ctx.random_range(10.0, 40.0);
                Vec2::new(angle.cos() * radius * 0.05, angle.sin() * radius * 0.05 + 1.0)
            }
        }
    }
}

/// Build one particle at `position`.
///
/// Size and color come from `config` as it is right now; mode is explicit so
/// bursts can force their own.
pub fn spawn(
    ctx: &mut SpawnContext,
    config: &Config,
    position: Vec2,
    is_burst: bool,
    mode: Mode,
) -> Particle {
    let velocity = mode.launch_velocity(ctx, is_burst);
    let size = ctx.random_range(0.0, config.particle_size as f32) + 2.0;
    let color = *ctx.pick(config.palette());

    let mut particle = Particle::new(position, velocity, size, color, mode);
    particle.max_life = ctx.random_range(0.5, 1.0);
    particle
}

/// A multi-particle emission event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burst {
    /// Radial burst from one point in the current mode.
    Explosion,
    /// Ring of spiral particles.
    SpiralRing,
    /// Ring of vortex particles.
    VortexRing,
}

impl Burst {
    /// The burst a pointer press triggers in `mode`.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Spiral => Burst::SpiralRing,
            Mode::Vortex => Burst::VortexRing,
            Mode::Rain | Mode::Firework | Mode::Bounce | Mode::Magnetic => Burst::Explosion,
        }
    }

    /// Number of particles this burst produces under `config`.
    pub fn count(self, config: &Config) -> usize {
        match self {
            Burst::Explosion if config.mode == Mode::Firework => FIREWORK_EXPLOSION_COUNT,
            Burst::Explosion => EXPLOSION_COUNT,
            Burst::SpiralRing => SPIRAL_RING_COUNT,
            Burst::VortexRing => VORTEX_RING_COUNT,
        }
    }

    /// Produce the burst's particles around `center`.
    pub fn emit(self, ctx: &mut SpawnContext, config: &Config, center: Vec2) -> Vec<Particle> {
        let count = self.count(config);
        match self {
            Burst::Explosion => (0..count)
                .map(|_| spawn(ctx, config, center, true, config.mode))
                .collect(),
            Burst::SpiralRing => ring(ctx, config, center, SPIRAL_RING_RADIUS, count, Mode::Spiral),
            Burst::VortexRing => ring(ctx, config, center, VORTEX_RING_RADIUS, count, Mode::Vortex),
        }
    }
}

fn ring(
    ctx: &mut SpawnContext,
    config: &Config,
    center: Vec2,
    radius: f32,
    count: usize,
    mode: Mode,
) -> Vec<Particle> {
    (0..count)
        .map(|i| spawn(ctx, config, ring_position(center, radius, i, count), false, mode))
        .collect()
}

/// Radial burst in the current mode: 25 particles for fireworks, else 15.
pub fn explosion(ctx: &mut SpawnContext, config: &Config, center: Vec2) -> Vec<Particle> {
    Burst::Explosion.emit(ctx, config, center)
}

/// Eight spiral particles on a 30-unit ring.
pub fn spiral_burst(ctx: &mut SpawnContext, config: &Config, center: Vec2) -> Vec<Particle> {
    Burst::SpiralRing.emit(ctx, config, center)
}

/// Twelve vortex particles on a 40-unit ring.
pub fn vortex_burst(ctx: &mut SpawnContext, config: &Config, center: Vec2) -> Vec<Particle> {
    Burst::VortexRing.emit(ctx, config, center)
}

/// One particle entering at a random x just above the top edge.
pub fn ambient(ctx: &mut SpawnContext, config: &Config, surface_width: f32) -> Particle {
    let x = ctx.random_range(0.0, surface_width);
    spawn(ctx, config, Vec2::new(x, AMBIENT_SPAWN_Y), false, config.mode)
}
