//! Draws particles and their trails onto a [`Surface`].
//!
//! Frames are never hard-cleared. [`Renderer::fade`] composites a
//! low-opacity black rectangle over everything, so earlier frames linger as
//! motion smears on top of the explicit per-particle trails.

use glam::Vec2;

use crate::particle::Particle;
use crate::surface::{PolylineVertex, Surface};
use crate::visuals::{DrawStyle, FADE_ALPHA, FADE_COLOR, TRAIL_ALPHA_SCALE, TRAIL_WIDTH_SCALE};

/// Stateless drawing apart from a reusable vertex buffer.
#[derive(Debug, Default)]
pub struct Renderer {
    vertices: Vec<PolylineVertex>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Darken the whole surface toward black.
    pub fn fade<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_rect(Vec2::ZERO, surface.size(), FADE_COLOR, FADE_ALPHA);
    }

    /// Stroke the particle's trail. Needs at least two samples.
    pub fn draw_trail<S: Surface + ?Sized>(&mut self, surface: &mut S, particle: &Particle) {
        if particle.trail.len() < 2 {
            return;
        }
        self.vertices.clear();
        self.vertices.extend(particle.trail.iter().map(|point| PolylineVertex {
            position: point.position,
            alpha: point.life * TRAIL_ALPHA_SCALE,
        }));
        surface.stroke_polyline(&self.vertices, particle.size * TRAIL_WIDTH_SCALE, particle.color);
    }

    /// Draw the particle body and report whether it survives the frame.
    ///
    /// Dead particles are not drawn. Ring-style particles return from inside
    /// their draw branch; disc-style particles fall through to the shared
    /// check after drawing.
    pub fn draw_particle<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        particle: &Particle,
        surface_height: f32,
    ) -> bool {
        if particle.life > 0.0 {
            let alpha = particle.life;
            match particle.mode.draw_style() {
                DrawStyle::Ring { line_width } => {
                    surface.stroke_circle(
                        particle.position,
                        particle.size,
                        line_width,
                        particle.color,
                        alpha,
                    );
                    return particle.survives(surface_height);
                }
                DrawStyle::Disc { glow } => {
                    surface.fill_circle(particle.position, particle.size, particle.color, alpha, glow);
                }
            }
        }
        particle.survives(surface_height)
    }
}
