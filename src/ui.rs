//! The controls panel (requires the `egui` feature).
//!
//! The panel never touches the engine. It reads the live [`Config`] and
//! returns the [`Command`]s the user issued this frame, which go through
//! the same path as key presses.

use crate::config::{Config, ConfigPatch, Mode, GRAVITY_STRONG, PARTICLE_SIZE_RANGE, SPEED_RANGE};
use crate::controls::Command;
use crate::particle::MAX_TRAIL_LENGTH;
use crate::visuals::ColorTheme;

/// Draw the panel and collect what the user asked for.
pub fn controls_panel(
    ctx: &egui::Context,
    config: &Config,
    particle_count: usize,
    fps: f32,
) -> Vec<Command> {
    let mut commands = Vec::new();

    egui::Window::new("Controls")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("{} particles, {:.0} fps", particle_count, fps));
            ui.separator();

            ui.label("Mode (1-6)");
            ui.horizontal_wrapped(|ui| {
                for mode in Mode::ALL {
                    if ui.selectable_label(config.mode == mode, mode.name()).clicked() {
                        commands.push(Command::SelectMode(mode));
                    }
                }
            });

            let mut speed = config.speed;
            let slider = egui::Slider::new(&mut speed, SPEED_RANGE)
                .step_by(0.1)
                .text("speed (Up/Down)");
            if ui.add(slider).changed() {
                commands.push(Command::Set(ConfigPatch::new().speed(speed)));
            }

            let mut size = config.particle_size;
            let slider = egui::Slider::new(&mut size, PARTICLE_SIZE_RANGE).text("size (S/A)");
            if ui.add(slider).changed() {
                commands.push(Command::Set(ConfigPatch::new().particle_size(size)));
            }

            let mut trail = config.trail_length;
            let slider = egui::Slider::new(&mut trail, 0..=MAX_TRAIL_LENGTH).text("trail");
            if ui.add(slider).changed() {
                commands.push(Command::Set(ConfigPatch::new().trail_length(trail)));
            }

            let mut strength = config.magnetic_strength;
            let slider = egui::Slider::new(&mut strength, 0.0..=5.0).text("magnet");
            if ui.add(slider).changed() {
                commands.push(Command::Set(ConfigPatch::new().magnetic_strength(strength)));
            }

            ui.label("Theme (T)");
            ui.horizontal(|ui| {
                for theme in ColorTheme::ALL {
                    if ui.selectable_label(config.color_theme == theme, theme.name()).clicked() {
                        commands.push(Command::Set(ConfigPatch::new().color_theme(theme)));
                    }
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                let gravity = if config.gravity == GRAVITY_STRONG { "normal" } else { "low" };
                if ui.button(format!("Gravity: {} (G)", gravity)).clicked() {
                    commands.push(Command::ToggleGravity);
                }
                let auto = if config.auto_explode { "on" } else { "off" };
                if ui.button(format!("Auto explode: {} (Space)", auto)).clicked() {
                    commands.push(Command::ToggleAutoExplode);
                }
            });

            ui.horizontal(|ui| {
                if ui.button("Clear (R)").clicked() {
                    commands.push(Command::Clear);
                }
                if ui.button("Snapshot (P)").clicked() {
                    commands.push(Command::Snapshot);
                }
                if ui.button("Hide (C)").clicked() {
                    commands.push(Command::ToggleControls);
                }
            });

            ui.separator();
            ui.small("Click or drag to emit. Move while held for trails.");
        });

    commands
}
