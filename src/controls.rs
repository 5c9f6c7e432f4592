//! User commands and their key bindings.
//!
//! Every user-facing change to the simulation, whether it comes from the
//! keyboard or the controls panel, is a [`Command`]. Commands that change
//! settings turn into a [`ConfigPatch`] with the range clamping applied
//! here, so the engine can take patches at face value.
//!
//! | Key | Command |
//! |-----|---------|
//! | `1`..`6` | select rain, firework, spiral, bounce, magnetic, vortex |
//! | `Space` | toggle auto-explode |
//! | `Up` / `Down` | speed +/- 0.1 |
//! | `G` | toggle gravity 0.1 / 0.05 |
//! | `T` | next color theme |
//! | `S` / `A` | particle size +/- 1 |
//! | `R` | clear particles |
//! | `C` | show or hide the controls panel |
//! | `P` | save a snapshot |

use crate::config::{
    Config, ConfigPatch, Mode, GRAVITY_STRONG, GRAVITY_WEAK, PARTICLE_SIZE_RANGE, SPEED_RANGE,
};
use crate::engine::Engine;
use crate::input::KeyCode;
use crate::particle::MAX_TRAIL_LENGTH;

/// Speed change per key press.
pub const SPEED_STEP: f32 = 0.1;

/// A user request.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectMode(Mode),
    SpeedUp,
    SpeedDown,
    ToggleGravity,
    CycleTheme,
    SizeUp,
    SizeDown,
    ToggleAutoExplode,
    /// Arbitrary settings from the controls panel, clamped on the way in.
    Set(ConfigPatch),
    Clear,
    ToggleControls,
    Snapshot,
}

/// Keyboard layout.
pub const KEY_BINDINGS: [(KeyCode, Command); 16] = [
    (KeyCode::Key1, Command::SelectMode(Mode::Rain)),
    (KeyCode::Key2, Command::SelectMode(Mode::Firework)),
    (KeyCode::Key3, Command::SelectMode(Mode::Spiral)),
    (KeyCode::Key4, Command::SelectMode(Mode::Bounce)),
    (KeyCode::Key5, Command::SelectMode(Mode::Magnetic)),
    (KeyCode::Key6, Command::SelectMode(Mode::Vortex)),
    (KeyCode::Space, Command::ToggleAutoExplode),
    (KeyCode::Up, Command::SpeedUp),
    (KeyCode::Down, Command::SpeedDown),
    (KeyCode::G, Command::ToggleGravity),
    (KeyCode::T, Command::CycleTheme),
    (KeyCode::S, Command::SizeUp),
    (KeyCode::A, Command::SizeDown),
    (KeyCode::R, Command::Clear),
    (KeyCode::C, Command::ToggleControls),
    (KeyCode::P, Command::Snapshot),
];

/// The command bound to `key`, if any.
pub fn binding(key: KeyCode) -> Option<Command> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, command)| command.clone())
}

/// Work a command leaves for the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontendAction {
    ToggleControls,
    Snapshot,
}

/// Round to one decimal and clamp into the speed range.
fn clamp_speed(speed: f32) -> f32 {
    let rounded = (speed * 10.0).round() / 10.0;
    rounded.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end())
}

fn clamp_size(size: u32) -> u32 {
    size.clamp(*PARTICLE_SIZE_RANGE.start(), *PARTICLE_SIZE_RANGE.end())
}

impl Command {
    /// The settings change this command makes against `config`, or `None`
    /// for commands that are not settings changes.
    pub fn to_patch(&self, config: &Config) -> Option<ConfigPatch> {
        let patch = match self {
            Command::SelectMode(mode) => ConfigPatch::new().mode(*mode),
            Command::SpeedUp => ConfigPatch::new().speed(clamp_speed(config.speed + SPEED_STEP)),
            Command::SpeedDown => ConfigPatch::new().speed(clamp_speed(config.speed - SPEED_STEP)),
            Command::ToggleGravity => {
                let gravity = if config.gravity == GRAVITY_STRONG {
                    GRAVITY_WEAK
                } else {
                    GRAVITY_STRONG
                };
                ConfigPatch::new().gravity(gravity)
            }
            Command::CycleTheme => ConfigPatch::new().color_theme(config.color_theme.next()),
            Command::SizeUp => {
                ConfigPatch::new().particle_size(clamp_size(config.particle_size.saturating_add(1)))
            }
            Command::SizeDown => {
                ConfigPatch::new().particle_size(clamp_size(config.particle_size.saturating_sub(1)))
            }
            Command::ToggleAutoExplode => ConfigPatch::new().auto_explode(!config.auto_explode),
            Command::Set(patch) => {
                let mut patch = patch.clone();
                patch.speed = patch.speed.map(clamp_speed);
                patch.particle_size = patch.particle_size.map(clamp_size);
                patch.trail_length = patch.trail_length.map(|n| n.min(MAX_TRAIL_LENGTH));
                patch
            }
            Command::Clear | Command::ToggleControls | Command::Snapshot => return None,
        };
        Some(patch)
    }

    /// Apply to the engine. Returns what the frontend still has to do.
    pub fn apply(&self, engine: &mut Engine) -> Option<FrontendAction> {
        if let Some(patch) = self.to_patch(engine.config()) {
            engine.update_config(&patch);
            return None;
        }
        match self {
            Command::Clear => {
                engine.clear_particles();
                None
            }
            Command::ToggleControls => Some(FrontendAction::ToggleControls),
            Command::Snapshot => Some(FrontendAction::Snapshot),
            _ => None,
        }
    }

    /// Short help text.
    pub fn describe(&self) -> &'static str {
        match self {
            Command::SelectMode(Mode::Rain) => "rain mode",
            Command::SelectMode(Mode::Firework) => "firework mode",
            Command::SelectMode(Mode::Spiral) => "spiral mode",
            Command::SelectMode(Mode::Bounce) => "bounce mode",
            Command::SelectMode(Mode::Magnetic) => "magnetic mode",
            Command::SelectMode(Mode::Vortex) => "vortex mode",
            Command::SpeedUp => "faster",
            Command::SpeedDown => "slower",
            Command::ToggleGravity => "toggle gravity",
            Command::CycleTheme => "next theme",
            Command::SizeUp => "bigger particles",
            Command::SizeDown => "smaller particles",
            Command::ToggleAutoExplode => "toggle auto-explode",
            Command::Set(_) => "set",
            Command::Clear => "clear",
            Command::ToggleControls => "toggle controls",
            Command::Snapshot => "save snapshot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visuals::ColorTheme;

    #[test]
    fn test_digit_keys_select_modes() {
        let keys = [
            KeyCode::Key1,
            KeyCode::Key2,
            KeyCode::Key3,
            KeyCode::Key4,
            KeyCode::Key5,
            KeyCode::Key6,
        ];
        for (key, mode) in keys.into_iter().zip(Mode::ALL) {
            assert_eq!(binding(key), Some(Command::SelectMode(mode)));
        }
        assert_eq!(binding(KeyCode::Escape), None);
    }

    #[test]
    fn test_speed_steps_and_clamps() {
        let mut config = Config::default();
        for _ in 0..40 {
            config.merge(&Command::SpeedUp.to_patch(&config).unwrap());
        }
        assert_eq!(config.speed, 3.0);

        for _ in 0..40 {
            config.merge(&Command::SpeedDown.to_patch(&config).unwrap());
        }
        assert_eq!(config.speed, 0.1);

        config.merge(&Command::SpeedUp.to_patch(&config).unwrap());
        assert_eq!(config.speed, 0.2);
    }

    #[test]
    fn test_size_clamps() {
        let mut config = Config { particle_size: 8, ..Default::default() };
        config.merge(&Command::SizeUp.to_patch(&config).unwrap());
        assert_eq!(config.particle_size, 8);

        config.particle_size = 1;
        config.merge(&Command::SizeDown.to_patch(&config).unwrap());
        assert_eq!(config.particle_size, 1);
    }

    #[test]
    fn test_gravity_toggle() {
        let mut config = Config::default();
        config.merge(&Command::ToggleGravity.to_patch(&config).unwrap());
        assert_eq!(config.gravity, GRAVITY_WEAK);
        config.merge(&Command::ToggleGravity.to_patch(&config).unwrap());
        assert_eq!(config.gravity, GRAVITY_STRONG);
    }

    #[test]
    fn test_theme_cycles() {
        let mut config = Config::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            config.merge(&Command::CycleTheme.to_patch(&config).unwrap());
            seen.push(config.color_theme);
        }
        assert_eq!(
            seen,
            [ColorTheme::Fire, ColorTheme::Ice, ColorTheme::Neon, ColorTheme::Rainbow]
        );
    }

    #[test]
    fn test_panel_patch_is_clamped() {
        let patch = Command::Set(ConfigPatch::new().speed(9.0).particle_size(0).trail_length(3))
            .to_patch(&Config::default())
            .unwrap();
        assert_eq!(patch.speed, Some(3.0));
        assert_eq!(patch.particle_size, Some(1));
        assert_eq!(patch.trail_length, Some(3));

        let patch = Command::Set(ConfigPatch::new().trail_length(15))
            .to_patch(&Config::default())
            .unwrap();
        assert_eq!(patch.trail_length, Some(MAX_TRAIL_LENGTH));
    }

    #[test]
    fn test_apply_to_engine() {
        let mut engine = Engine::with_seed(Config::default(), 0);
        engine.explosion(glam::Vec2::ZERO);

        assert_eq!(Command::ToggleAutoExplode.apply(&mut engine), None);
        assert!(engine.config().auto_explode);

        assert_eq!(Command::Clear.apply(&mut engine), None);
        assert!(engine.is_empty());

        assert_eq!(Command::Snapshot.apply(&mut engine), Some(FrontendAction::Snapshot));
        assert_eq!(
            Command::ToggleControls.apply(&mut engine),
            Some(FrontendAction::ToggleControls)
        );
    }
}
