//! The particle store and the per-frame update.
//!
//! [`Engine`] owns the live configuration, the particle population and the
//! random source. The frame driver calls [`Engine::update`] once per display
//! refresh with a surface and the current pointer state; everything else
//! (bursts, config changes, clearing) comes from the controls between frames.
//!
//! # Frame order
//!
//! 1. Fade the surface.
//! 2. For each particle, in store order: record trail, integrate, apply mode
//!    forces, decay life, draw trail, draw body, test survival.
//! 3. Compact the store, keeping survivors in order.
//! 4. Ambient emission, auto-explode, pointer-held emission.
//!
//! A surface with zero width or height skips the frame entirely.

use glam::Vec2;

use crate::config::{Config, ConfigPatch, Mode};
use crate::emitter::{self, Burst, POINTER_JITTER};
use crate::particle::{Particle, MAX_TRAIL_LENGTH};
use crate::renderer::Renderer;
use crate::rules::{self, ForceContext};
use crate::spawn::SpawnContext;
use crate::surface::Surface;

/// Pointer and clock state for one frame, supplied by the frame driver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer position in surface pixels.
    pub pointer: Vec2,
    /// Whether the primary button is down.
    pub pointer_held: bool,
    /// Wall-clock milliseconds; only differences matter.
    pub time_ms: f64,
}

/// What happened during one [`Engine::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Particles removed by the survival filter.
    pub retired: usize,
    /// Particles added by ambient, auto-explode and pointer emission.
    pub spawned: usize,
    /// Population after the frame.
    pub live: usize,
}

/// Particle simulation and rendering engine.
#[derive(Debug)]
pub struct Engine {
    config: Config,
    particles: Vec<Particle>,
    rng: SpawnContext,
    renderer: Renderer,
}

impl Engine {
    /// An empty engine with an entropy-seeded random source.
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, SpawnContext::new())
    }

    /// An empty engine whose randomness is reproducible.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, SpawnContext::seeded(seed))
    }

    fn with_rng(config: Config, rng: SpawnContext) -> Self {
        Self {
            config,
            particles: Vec::new(),
            rng,
            renderer: Renderer::new(),
        }
    }

    // ========== Configuration ==========

    /// The live configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Merge a partial update into the live configuration.
    ///
    /// Values are taken as given. Live particles keep their mode, color and
    /// size; only new particles and the shared force parameters change.
    pub fn update_config(&mut self, patch: &ConfigPatch) {
        log::debug!("Config update: {:?}", patch);
        self.config.merge(patch);
    }

    // ========== Particle store ==========

    /// Live particles in store order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Remove every particle.
    pub fn clear_particles(&mut self) {
        log::debug!("Clearing {} particles", self.particles.len());
        self.particles.clear();
    }

    /// Add an already built particle.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    // ========== Emission ==========

    /// Build one particle from the current config without adding it.
    pub fn create_particle(&mut self, position: Vec2, is_burst: bool, mode: Mode) -> Particle {
        emitter::spawn(&mut self.rng, &self.config, position, is_burst, mode)
    }

    /// Build one particle and add it to the store.
    pub fn spawn(&mut self, position: Vec2, is_burst: bool, mode: Mode) -> &Particle {
        let particle = self.create_particle(position, is_burst, mode);
        self.particles.push(particle);
        &self.particles[self.particles.len() - 1]
    }

    /// Fire a burst at `center`, returning how many particles it added.
    pub fn emit_burst(&mut self, burst: Burst, center: Vec2) -> usize {
        let particles = burst.emit(&mut self.rng, &self.config, center);
        log::debug!("{:?} at ({:.0}, {:.0}): {} particles", burst, center.x, center.y, particles.len());
        let count = particles.len();
        self.particles.extend(particles);
        count
    }

    /// Radial burst in the current mode (25 for fireworks, else 15).
    pub fn explosion(&mut self, center: Vec2) -> usize {
        self.emit_burst(Burst::Explosion, center)
    }

    /// Ring of 8 spiral particles.
    pub fn spiral_burst(&mut self, center: Vec2) -> usize {
        self.emit_burst(Burst::SpiralRing, center)
    }

    /// Ring of 12 vortex particles.
    pub fn vortex_burst(&mut self, center: Vec2) -> usize {
        self.emit_burst(Burst::VortexRing, center)
    }

    /// Pointer press: the burst that suits the current mode.
    pub fn burst_at(&mut self, center: Vec2) -> Burst {
        let burst = Burst::for_mode(self.config.mode);
        self.emit_burst(burst, center);
        burst
    }

    /// Pointer motion: while held, sometimes drop a particle exactly at the
    /// pointer. Returns whether one was spawned.
    pub fn pointer_moved(&mut self, pointer: Vec2, held: bool) -> bool {
        if !held || !self.rng.chance(self.config.emission.pointer_move) {
            return false;
        }
        let mode = self.config.mode;
        self.spawn(pointer, false, mode);
        true
    }

    // ========== Frame ==========

    /// Advance and draw one frame.
    pub fn update<S: Surface + ?Sized>(&mut self, surface: &mut S, frame: &FrameInput) -> FrameStats {
        if surface.is_empty() {
            log::trace!(
                "Skipping frame on empty {}x{} surface",
                surface.width(),
                surface.height()
            );
            return FrameStats {
                live: self.particles.len(),
                ..Default::default()
            };
        }

        let bounds = surface.size();
        self.renderer.fade(surface);

        let forces = ForceContext::new(&self.config, frame.pointer, bounds, frame.time_ms);
        let trail_length = self.config.trail_length;
        let before = self.particles.len();

        let Self { particles, renderer, .. } = self;
        particles.retain_mut(|particle| {
            particle.record_trail(trail_length);
            debug_assert!(particle.trail.len() <= trail_length.min(MAX_TRAIL_LENGTH));
            rules::step(particle, &forces);
            renderer.draw_trail(surface, particle);
            renderer.draw_particle(surface, particle, bounds.y)
        });

        let retired = before - self.particles.len();
        let spawned = self.emit_ambient(bounds, frame);

        FrameStats {
            retired,
            spawned,
            live: self.particles.len(),
        }
    }

    /// End-of-frame emission sources, in fixed order.
    fn emit_ambient(&mut self, bounds: Vec2, frame: &FrameInput) -> usize {
        let before = self.particles.len();
        let rates = self.config.emission;

        if self.rng.chance(rates.ambient) {
            let particle = emitter::ambient(&mut self.rng, &self.config, bounds.x);
            self.particles.push(particle);
        }

        if self.config.auto_explode
            && self.config.mode == Mode::Firework
            && self.rng.chance(rates.auto_explode)
        {
            let center = Vec2::new(
                self.rng.random_range(0.0, bounds.x),
                self.rng.random_range(0.0, bounds.y * 0.5),
            );
            self.explosion(center);
        }

        if frame.pointer_held && self.rng.chance(rates.pointer_held) {
            let position = self.rng.jitter(frame.pointer, POINTER_JITTER);
            let mode = self.config.mode;
            self.spawn(position, false, mode);
        }

        self.particles.len() - before
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmissionRates;
    use crate::surface::{DrawCommand, Recorder};

    fn quiet() -> Engine {
        Engine::with_seed(
            Config {
                emission: EmissionRates::NONE,
                ..Default::default()
            },
            1,
        )
    }

    #[test]
    fn test_empty_surface_is_a_no_op() {
        let mut engine = quiet();
        engine.spawn(Vec2::new(10.0, 10.0), false, Mode::Rain);
        let mut surface = Recorder::new(0.0, 480.0);

        let stats = engine.update(&mut surface, &FrameInput::default());

        assert_eq!(stats, FrameStats { retired: 0, spawned: 0, live: 1 });
        assert!(surface.commands().is_empty());
        assert_eq!(engine.particles()[0].life, 1.0);
        assert!(engine.particles()[0].trail.is_empty());
    }

    #[test]
    fn test_fade_comes_first() {
        let mut engine = quiet();
        engine.spawn(Vec2::new(10.0, 10.0), false, Mode::Firework);
        let mut surface = Recorder::new(100.0, 100.0);
        engine.update(&mut surface, &FrameInput::default());

        let commands = surface.commands();
        assert!(matches!(commands[0], DrawCommand::FillRect { .. }));
        assert!(matches!(commands[1], DrawCommand::FillCircle { .. }));
    }

    #[test]
    fn test_ambient_emission_enters_at_top() {
        let mut engine = Engine::with_seed(
            Config {
                emission: EmissionRates { ambient: 1.0, ..EmissionRates::NONE },
                ..Default::default()
            },
            3,
        );
        let mut surface = Recorder::new(200.0, 100.0);
        let stats = engine.update(&mut surface, &FrameInput::default());

        assert_eq!(stats.spawned, 1);
        assert_eq!(engine.particles()[0].position.y, -10.0);
    }

    #[test]
    fn test_pointer_held_emission_near_pointer() {
        let mut engine = Engine::with_seed(
            Config {
                emission: EmissionRates { pointer_held: 1.0, ..EmissionRates::NONE },
                ..Default::default()
            },
            5,
        );
        let mut surface = Recorder::new(200.0, 200.0);
        let frame = FrameInput {
            pointer: Vec2::new(100.0, 80.0),
            pointer_held: true,
            time_ms: 0.0,
        };
        for _ in 0..20 {
            engine.clear_particles();
            engine.update(&mut surface, &frame);
            let p = &engine.particles()[0];
            assert!((p.position - frame.pointer).abs().max_element() <= 10.0);
        }

        engine.clear_particles();
        engine.update(&mut surface, &FrameInput { pointer_held: false, ..frame });
        assert!(engine.is_empty());
    }

    #[test]
    fn test_auto_explode_only_in_firework_mode() {
        let rates = EmissionRates { auto_explode: 1.0, ..EmissionRates::NONE };
        let mut surface = Recorder::new(300.0, 200.0);

        let mut rain = Engine::with_seed(
            Config { auto_explode: true, emission: rates, ..Default::default() },
            7,
        );
        rain.update(&mut surface, &FrameInput::default());
        assert!(rain.is_empty());

        let mut firework = Engine::with_seed(
            Config {
                mode: Mode::Firework,
                auto_explode: true,
                emission: rates,
                ..Default::default()
            },
            7,
        );
        let stats = firework.update(&mut surface, &FrameInput::default());
        assert_eq!(stats.spawned, 25);
        let center = firework.particles()[0].position;
        assert!(center.x >= 0.0 && center.x < 300.0);
        assert!(center.y >= 0.0 && center.y < 100.0);
    }

    #[test]
    fn test_burst_at_follows_mode() {
        let mut engine = quiet();
        assert_eq!(engine.burst_at(Vec2::ZERO), Burst::Explosion);
        assert_eq!(engine.len(), 15);

        engine.update_config(&ConfigPatch::new().mode(Mode::Spiral));
        assert_eq!(engine.burst_at(Vec2::ZERO), Burst::SpiralRing);
        assert_eq!(engine.len(), 23);

        engine.update_config(&ConfigPatch::new().mode(Mode::Vortex));
        assert_eq!(engine.burst_at(Vec2::ZERO), Burst::VortexRing);
        assert_eq!(engine.len(), 35);
    }

    #[test]
    fn test_pointer_moved_requires_held() {
        let mut engine = Engine::with_seed(
            Config {
                emission: EmissionRates { pointer_move: 1.0, ..EmissionRates::NONE },
                ..Default::default()
            },
            9,
        );
        assert!(!engine.pointer_moved(Vec2::new(5.0, 5.0), false));
        assert!(engine.pointer_moved(Vec2::new(5.0, 5.0), true));
        assert_eq!(engine.particles()[0].position, Vec2::new(5.0, 5.0));
    }
}
