//! The drawing surface the renderer targets.
//!
//! [`Surface`] is the boundary between the simulation and whatever puts
//! pixels on screen. It offers only the primitives the renderer needs;
//! coordinates are pixels with the origin top-left and y pointing down.
//!
//! Two implementations ship with the crate:
//! - [`Raster`](crate::Raster): a software rasterizer used for the window and
//!   for headless runs.
//! - [`Recorder`]: stores the calls as [`DrawCommand`]s, for tests and tools.

use glam::Vec2;

use crate::visuals::Color;

/// A polyline vertex with its own opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineVertex {
    pub position: Vec2,
    /// Opacity of the segment that ends at this vertex. Ignored for the
    /// first vertex.
    pub alpha: f32,
}

/// 2D drawing primitives.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> f32;

    /// Height in pixels.
    fn height(&self) -> f32;

    /// Composite a solid rectangle at `alpha` opacity.
    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color, alpha: f32);

    /// Filled circle, with a soft halo `glow` pixels wide when `glow > 0`.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32, glow: f32);

    /// Unfilled circle outline.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color, alpha: f32);

    /// Connected line segments. Segment `i - 1 -> i` uses `vertices[i].alpha`.
    fn stroke_polyline(&mut self, vertices: &[PolylineVertex], line_width: f32, color: Color);

    /// Size as a vector.
    fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    /// True when there is nothing to draw on.
    fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

/// A recorded [`Surface`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        min: Vec2,
        max: Vec2,
        color: Color,
        alpha: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
        glow: f32,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        line_width: f32,
        color: Color,
        alpha: f32,
    },
    StrokePolyline {
        vertices: Vec<PolylineVertex>,
        line_width: f32,
        color: Color,
    },
}

/// A surface that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Calls recorded since creation or the last [`Recorder::take`].
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded calls.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for Recorder {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::FillRect { min, max, color, alpha });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32, glow: f32) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
            alpha,
            glow,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            line_width,
            color,
            alpha,
        });
    }

    fn stroke_polyline(&mut self, vertices: &[PolylineVertex], line_width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokePolyline {
            vertices: vertices.to_vec(),
            line_width,
            color,
        });
    }
}
