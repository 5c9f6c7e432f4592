//! Per-mode force rules.
//!
//! Each frame a particle is integrated with the global speed multiplier and
//! then handed to the force table for its mode:
//!
//! | Mode | Force |
//! |------|-------|
//! | Rain | `vy += gravity` |
//! | Firework | none (ballistic) |
//! | Spiral | `vx += sin(t_ms * 0.01) * 0.1`, `vy += gravity * 0.5` |
//! | Bounce | `vy += gravity`, floor reflect `* -0.7`, wall reflect `* -0.8` |
//! | Magnetic | `strength / d²` toward the pointer within 200, `vy += gravity * 0.3` |
//! | Vortex | `0.5 / d` perpendicular to the pointer within 150, `vy += gravity * 0.2` |
//!
//! Particles never interact with each other, only with the pointer and the
//! surface bounds.

use glam::Vec2;

use crate::config::{Config, Mode};
use crate::particle::{Particle, LIFE_DECAY};

/// Floor bounce keeps this fraction of vertical speed.
pub const FLOOR_RESTITUTION: f32 = 0.7;
/// Wall bounce keeps this fraction of horizontal speed.
pub const WALL_RESTITUTION: f32 = 0.8;

/// Magnetic pull only acts inside this distance.
pub const MAGNETIC_RANGE: f32 = 200.0;
/// Vortex swirl only acts inside this distance.
pub const VORTEX_RANGE: f32 = 150.0;
/// Vortex swirl coefficient (force = coefficient / distance).
pub const VORTEX_STRENGTH: f32 = 0.5;

/// Spiral sway phase advance per millisecond of wall-clock time.
pub const SPIRAL_SWAY_RATE: f64 = 0.01;
/// Spiral sway amplitude per frame.
pub const SPIRAL_SWAY_AMPLITUDE: f32 = 0.1;

/// Everything a force rule may read besides the particle itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceContext {
    pub speed: f32,
    pub gravity: f32,
    pub magnetic_strength: f32,
    /// Pointer position in surface pixels.
    pub pointer: Vec2,
    /// Surface width and height in pixels.
    pub bounds: Vec2,
    /// Wall-clock milliseconds, drives the spiral sway.
    pub time_ms: f64,
}

impl ForceContext {
    pub fn new(config: &Config, pointer: Vec2, bounds: Vec2, time_ms: f64) -> Self {
        Self {
            speed: config.speed,
            gravity: config.gravity,
            magnetic_strength: config.magnetic_strength,
            pointer,
            bounds,
            time_ms,
        }
    }
}

/// Move by velocity scaled with the global speed multiplier.
#[inline]
pub fn integrate(particle: &mut Particle, speed: f32) {
    particle.position += particle.velocity * speed;
}

/// Force table: one entry per mode.
pub fn apply_forces(particle: &mut Particle, ctx: &ForceContext) {
    match particle.mode {
        Mode::Rain => {
            particle.velocity.y += ctx.gravity;
        }
        Mode::Firework => {}
        Mode::Spiral => {
            let sway = (ctx.time_ms * SPIRAL_SWAY_RATE).sin() as f32;
            particle.velocity.x += sway * SPIRAL_SWAY_AMPLITUDE;
            particle.velocity.y += ctx.gravity * 0.5;
        }
        Mode::Bounce => {
            particle.velocity.y += ctx.gravity;

            let floor = ctx.bounds.y - particle.size;
            if particle.position.y > floor {
                particle.position.y = floor;
                particle.velocity.y = -particle.velocity.y * FLOOR_RESTITUTION;
            }
            if particle.position.x < particle.size
                || particle.position.x > ctx.bounds.x - particle.size
            {
                particle.velocity.x = -particle.velocity.x * WALL_RESTITUTION;
            }
        }
        Mode::Magnetic => {
            let to_pointer = ctx.pointer - particle.position;
            let distance = to_pointer.length();
            if distance > 0.0 && distance < MAGNETIC_RANGE {
                let force = ctx.magnetic_strength / (distance * distance);
                particle.velocity += to_pointer / distance * force;
            }
            particle.velocity.y += ctx.gravity * 0.3;
        }
        Mode::Vortex => {
            let to_pointer = ctx.pointer - particle.position;
            let distance = to_pointer.length();
            if distance > 0.0 && distance < VORTEX_RANGE {
                let force = VORTEX_STRENGTH / distance;
                // perp() rotates (x, y) to (-y, x)
                particle.velocity += (to_pointer / distance).perp() * force;
            }
            particle.velocity.y += ctx.gravity * 0.2;
        }
    }
}

/// Integrate, apply the mode's forces, then decay life.
pub fn step(particle: &mut Particle, ctx: &ForceContext) {
    integrate(particle, ctx.speed);
    apply_forces(particle, ctx);
    particle.life -= LIFE_DECAY;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visuals::Color;

    const EPS: f32 = 1e-5;

    fn ctx() -> ForceContext {
        ForceContext {
            speed: 1.0,
            gravity: 0.1,
            magnetic_strength: 0.5,
            pointer: Vec2::new(400.0, 300.0),
            bounds: Vec2::new(800.0, 600.0),
            time_ms: 0.0,
        }
    }

    fn particle(mode: Mode, position: Vec2, velocity: Vec2) -> Particle {
        Particle::new(position, velocity, 4.0, Color::WHITE, mode)
    }

    #[test]
    fn test_integrate_applies_speed() {
        let mut p = particle(Mode::Firework, Vec2::new(10.0, 10.0), Vec2::new(2.0, -1.0));
        integrate(&mut p, 1.5);
        assert_eq!(p.position, Vec2::new(13.0, 8.5));
    }

    #[test]
    fn test_rain_gravity() {
        let mut p = particle(Mode::Rain, Vec2::new(100.0, 100.0), Vec2::new(0.0, 2.0));
        apply_forces(&mut p, &ctx());
        assert!((p.velocity.y - 2.1).abs() < EPS);
    }

    #[test]
    fn test_firework_is_ballistic() {
        let mut p = particle(Mode::Firework, Vec2::new(100.0, 100.0), Vec2::new(3.0, -4.0));
        apply_forces(&mut p, &ctx());
        assert_eq!(p.velocity, Vec2::new(3.0, -4.0));
    }

    #[test]
    fn test_bounce_floor() {
        let mut p = particle(Mode::Bounce, Vec2::new(100.0, 599.0), Vec2::new(0.0, 5.0));
        apply_forces(&mut p, &ctx());
        assert_eq!(p.position.y, 596.0);
        assert!((p.velocity.y + 5.1 * 0.7).abs() < EPS);
    }

    #[test]
    fn test_bounce_walls() {
        let mut left = particle(Mode::Bounce, Vec2::new(2.0, 100.0), Vec2::new(-3.0, 0.0));
        apply_forces(&mut left, &ctx());
        assert!((left.velocity.x - 2.4).abs() < EPS);

        let mut right = particle(Mode::Bounce, Vec2::new(799.0, 100.0), Vec2::new(3.0, 0.0));
        apply_forces(&mut right, &ctx());
        assert!((right.velocity.x + 2.4).abs() < EPS);

        let mut inside = particle(Mode::Bounce, Vec2::new(400.0, 100.0), Vec2::new(3.0, 0.0));
        apply_forces(&mut inside, &ctx());
        assert_eq!(inside.velocity.x, 3.0);
    }

    #[test]
    fn test_spiral_sway_follows_wall_clock() {
        let mut quiet = particle(Mode::Spiral, Vec2::ZERO, Vec2::ZERO);
        apply_forces(&mut quiet, &ctx());
        assert!(quiet.velocity.x.abs() < EPS);
        assert!((quiet.velocity.y - 0.05).abs() < EPS);

        // sin(157.08 * 0.01) ~= 1
        let mut swaying = particle(Mode::Spiral, Vec2::ZERO, Vec2::ZERO);
        apply_forces(&mut swaying, &ForceContext { time_ms: 157.079_63, ..ctx() });
        assert!((swaying.velocity.x - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_magnetic_inverse_square() {
        // 10 px left of the pointer
        let mut p = particle(Mode::Magnetic, Vec2::new(390.0, 300.0), Vec2::ZERO);
        apply_forces(&mut p, &ctx());
        assert!((p.velocity.x - 0.5 / 100.0).abs() < EPS);
        assert!((p.velocity.y - 0.03).abs() < EPS);
    }

    #[test]
    fn test_magnetic_out_of_range() {
        let mut far = particle(Mode::Magnetic, Vec2::new(100.0, 300.0), Vec2::ZERO);
        apply_forces(&mut far, &ctx());
        assert_eq!(far.velocity.x, 0.0);

        let mut on_pointer = particle(Mode::Magnetic, Vec2::new(400.0, 300.0), Vec2::ZERO);
        apply_forces(&mut on_pointer, &ctx());
        assert_eq!(on_pointer.velocity.x, 0.0);
        assert!(on_pointer.velocity.is_finite());
    }

    #[test]
    fn test_vortex_is_perpendicular() {
        // Particle left of the pointer: radial direction is +x, swirl is +y
        let mut p = particle(Mode::Vortex, Vec2::new(390.0, 300.0), Vec2::ZERO);
        apply_forces(&mut p, &ctx());
        assert!(p.velocity.x.abs() < EPS);
        assert!((p.velocity.y - (0.05 + 0.02)).abs() < EPS);
    }

    #[test]
    fn test_vortex_out_of_range() {
        let mut p = particle(Mode::Vortex, Vec2::new(400.0, 100.0), Vec2::ZERO);
        apply_forces(&mut p, &ctx());
        assert_eq!(p.velocity.x, 0.0);
        assert!((p.velocity.y - 0.02).abs() < EPS);
    }

    #[test]
    fn test_step_decays_life() {
        let mut p = particle(Mode::Rain, Vec2::ZERO, Vec2::new(0.0, 1.0));
        step(&mut p, &ctx());
        assert!((p.life - 0.98).abs() < EPS);
        assert_eq!(p.position, Vec2::new(0.0, 1.0));
    }
}
