//! Live simulation configuration.
//!
//! A [`Config`] is a small value that every part of the engine reads each
//! frame. It is never captured by the engine's update path: the engine owns
//! one copy and passes it by reference into each per-frame call.
//!
//! Changes arrive as a [`ConfigPatch`], a shallow partial update where every
//! field is optional:
//!
//! ```ignore
//! engine.update_config(&ConfigPatch::new().mode(Mode::Vortex).speed(1.5));
//! ```
//!
//! The engine never validates what it is given. Range clamping is the job of
//! whoever owns the controls (see [`crate::controls`]), and configs loaded from
//! disk go through [`Config::validate`].

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::particle::MAX_TRAIL_LENGTH;
use crate::visuals::{Color, ColorTheme};

/// Allowed global speed multiplier.
pub const SPEED_RANGE: RangeInclusive<f32> = 0.1..=3.0;

/// Allowed base particle size.
pub const PARTICLE_SIZE_RANGE: RangeInclusive<u32> = 1..=8;

/// The two gravity settings the gravity toggle flips between.
pub const GRAVITY_STRONG: f32 = 0.1;
pub const GRAVITY_WEAK: f32 = 0.05;

/// Particle behaviour variant.
///
/// Chosen when a particle is created and never changed afterwards, so a
/// population can mix particles of several modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Falls under full gravity (default).
    #[default]
    Rain,
    /// Ballistic bursts with a strong glow.
    Firework,
    /// Time-driven lateral sway, drawn as rings.
    Spiral,
    /// Bounces off the floor and side walls, losing energy.
    Bounce,
    /// Pulled toward the pointer by an inverse-square force.
    Magnetic,
    /// Orbits the pointer.
    Vortex,
}

impl Mode {
    /// All modes in key-binding order (`1` through `6`).
    pub const ALL: [Mode; 6] = [
        Mode::Rain,
        Mode::Firework,
        Mode::Spiral,
        Mode::Bounce,
        Mode::Magnetic,
        Mode::Vortex,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Rain => "rain",
            Mode::Firework => "firework",
            Mode::Spiral => "spiral",
            Mode::Bounce => "bounce",
            Mode::Magnetic => "magnetic",
            Mode::Vortex => "vortex",
        }
    }
}

/// Per-frame spawn probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionRates {
    /// Chance per frame of one particle entering from above the top edge.
    pub ambient: f32,
    /// Chance per frame of a random explosion while auto-explode is active.
    pub auto_explode: f32,
    /// Chance per frame of a particle near the pointer while it is held.
    pub pointer_held: f32,
    /// Chance per pointer move event of a particle at the pointer while held.
    pub pointer_move: f32,
}

impl EmissionRates {
    /// All sources off. Useful for stepping a fixed population.
    pub const NONE: EmissionRates = EmissionRates {
        ambient: 0.0,
        auto_explode: 0.0,
        pointer_held: 0.0,
        pointer_move: 0.0,
    };
}

impl Default for EmissionRates {
    fn default() -> Self {
        Self {
            ambient: 0.3,
            auto_explode: 0.02,
            pointer_held: 0.5,
            pointer_move: 0.3,
        }
    }
}

/// All tunable simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mode given to newly spawned particles.
    pub mode: Mode,
    /// Global velocity multiplier applied during integration.
    pub speed: f32,
    /// Downward acceleration per frame (scaled per mode).
    pub gravity: f32,
    /// Fire random explosions while in firework mode.
    pub auto_explode: bool,
    /// Trail capacity in samples.
    pub trail_length: usize,
    /// Palette new particles sample from.
    pub color_theme: ColorTheme,
    /// Base particle size; actual radius is `uniform(0, size) + 2`.
    pub particle_size: u32,
    /// Coefficient of the magnetic mode's inverse-square pull.
    pub magnetic_strength: f32,
    /// Spawn probabilities.
    pub emission: EmissionRates,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Rain,
            speed: 1.0,
            gravity: GRAVITY_STRONG,
            auto_explode: false,
            trail_length: 5,
            color_theme: ColorTheme::Rainbow,
            particle_size: 3,
            magnetic_strength: 0.5,
            emission: EmissionRates::default(),
        }
    }
}

impl Config {
    /// The palette of the active theme.
    pub fn palette(&self) -> &'static [Color] {
        self.color_theme.palette()
    }

    /// Shallow-merge a patch into this config. Absent fields are untouched.
    pub fn merge(&mut self, patch: &ConfigPatch) {
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if let Some(speed) = patch.speed {
            self.speed = speed;
        }
        if let Some(gravity) = patch.gravity {
            self.gravity = gravity;
        }
        if let Some(auto_explode) = patch.auto_explode {
            self.auto_explode = auto_explode;
        }
        if let Some(trail_length) = patch.trail_length {
            self.trail_length = trail_length;
        }
        if let Some(color_theme) = patch.color_theme {
            self.color_theme = color_theme;
        }
        if let Some(particle_size) = patch.particle_size {
            self.particle_size = particle_size;
        }
        if let Some(magnetic_strength) = patch.magnetic_strength {
            self.magnetic_strength = magnetic_strength;
        }
        if let Some(emission) = patch.emission {
            self.emission = emission;
        }
    }

    /// Check every value against the ranges the controls allow.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed.is_finite() || !SPEED_RANGE.contains(&self.speed) {
            return Err(ConfigError::Invalid(format!(
                "speed {} outside {:?}",
                self.speed, SPEED_RANGE
            )));
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gravity {} must be finite and non-negative",
                self.gravity
            )));
        }
        if self.trail_length > MAX_TRAIL_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "trail_length {} exceeds {}",
                self.trail_length, MAX_TRAIL_LENGTH
            )));
        }
        if !PARTICLE_SIZE_RANGE.contains(&self.particle_size) {
            return Err(ConfigError::Invalid(format!(
                "particle_size {} outside {:?}",
                self.particle_size, PARTICLE_SIZE_RANGE
            )));
        }
        if !self.magnetic_strength.is_finite() {
            return Err(ConfigError::Invalid("magnetic_strength must be finite".into()));
        }
        let rates = [
            ("ambient", self.emission.ambient),
            ("auto_explode", self.emission.auto_explode),
            ("pointer_held", self.emission.pointer_held),
            ("pointer_move", self.emission.pointer_move),
        ];
        for (name, rate) in rates {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::Invalid(format!(
                    "emission.{} {} outside 0..=1",
                    name, rate
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write this config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// A partial [`Config`] update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    pub mode: Option<Mode>,
    pub speed: Option<f32>,
    pub gravity: Option<f32>,
    pub auto_explode: Option<bool>,
    pub trail_length: Option<usize>,
    pub color_theme: Option<ColorTheme>,
    pub particle_size: Option<u32>,
    pub magnetic_strength: Option<f32>,
    pub emission: Option<EmissionRates>,
}

impl ConfigPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn gravity(mut self, gravity: f32) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn auto_explode(mut self, enabled: bool) -> Self {
        self.auto_explode = Some(enabled);
        self
    }

    pub fn trail_length(mut self, length: usize) -> Self {
        self.trail_length = Some(length);
        self
    }

    pub fn color_theme(mut self, theme: ColorTheme) -> Self {
        self.color_theme = Some(theme);
        self
    }

    pub fn particle_size(mut self, size: u32) -> Self {
        self.particle_size = Some(size);
        self
    }

    pub fn magnetic_strength(mut self, strength: f32) -> Self {
        self.magnetic_strength = Some(strength);
        self
    }

    pub fn emission(mut self, rates: EmissionRates) -> Self {
        self.emission = Some(rates);
        self
    }

    /// True if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
