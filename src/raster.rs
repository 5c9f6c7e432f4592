//! Software rasterizer implementing [`Surface`].
//!
//! Pixels are stored as premultiplied RGBA8 in an [`image::RgbaImage`]. A new
//! raster is fully transparent; repeated fades accumulate toward opaque
//! black, the same way an HTML canvas behaves under a translucent fill.
//! Shapes use one pixel of anti-aliased coverage at their edges.

use std::path::Path;

use glam::Vec2;
use image::{DynamicImage, RgbaImage};

use crate::error::SnapshotError;
use crate::surface::{PolylineVertex, Surface};
use crate::visuals::Color;

/// Peak opacity of a glow halo relative to the body.
const GLOW_INTENSITY: f32 = 0.5;

/// CPU drawing target.
#[derive(Debug, Clone)]
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    /// A transparent raster.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Reallocate for a new size. Contents are discarded when the size changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Raw premultiplied RGBA bytes, row-major, no padding.
    pub fn pixels(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// One premultiplied pixel.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Write the frame as a PNG, composited over black.
    pub fn snapshot(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let (w, h) = self.image.dimensions();
        if w == 0 || h == 0 {
            return Err(SnapshotError::EmptyFrame);
        }
        // Premultiplied color over black is the color channels themselves
        let rgb = DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
        rgb.save(path.as_ref())?;
        log::info!("Saved snapshot to {}", path.as_ref().display());
        Ok(())
    }

    /// Pixel rows and columns touched by the box `min..max`, clipped.
    fn span(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = self.image.dimensions();
        if !(min.is_finite() && max.is_finite()) {
            return None;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(w);
        let y1 = (max.y.ceil().max(0.0) as u32).min(h);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Source-over composite of `color` at `alpha` onto one pixel.
    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Color, alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let keep = 1.0 - a;
        let px = &mut self.image.get_pixel_mut(x, y).0;
        let src = [color.r, color.g, color.b, 255];
        for (dst, src) in px.iter_mut().zip(src) {
            *dst = (src as f32 * a + *dst as f32 * keep).round() as u8;
        }
    }

    /// Visit every pixel center in a box with its coverage from `shade`.
    fn shade_box(
        &mut self,
        min: Vec2,
        max: Vec2,
        color: Color,
        alpha: f32,
        shade: impl Fn(Vec2) -> f32,
    ) {
        let Some((x0, y0, x1, y1)) = self.span(min, max) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = shade(center);
                if coverage > 0.0 {
                    self.blend(x, y, color, alpha * coverage);
                }
            }
        }
    }
}

/// Distance from `p` to the segment `a..b`.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Surface for Raster {
    fn width(&self) -> f32 {
        self.image.width() as f32
    }

    fn height(&self) -> f32 {
        self.image.height() as f32
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color, alpha: f32) {
        self.shade_box(min, max, color, alpha, |p| {
            if p.cmpge(min).all() && p.cmplt(max).all() {
                1.0
            } else {
                0.0
            }
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32, glow: f32) {
        let glow = glow.max(0.0);
        let extent = Vec2::splat(radius + glow + 1.0);
        self.shade_box(center - extent, center + extent, color, alpha, |p| {
            let d = p.distance(center);
            let body = (radius + 0.5 - d).clamp(0.0, 1.0);
            if glow > 0.0 && d > radius - 0.5 {
                let falloff = (1.0 - (d - radius) / glow).clamp(0.0, 1.0);
                body.max(falloff * falloff * GLOW_INTENSITY)
            } else {
                body
            }
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, line_width: f32, color: Color, alpha: f32) {
        let half = line_width * 0.5;
        let extent = Vec2::splat(radius + half + 1.0);
        self.shade_box(center - extent, center + extent, color, alpha, |p| {
            (half + 0.5 - (p.distance(center) - radius).abs()).clamp(0.0, 1.0)
        });
    }

    fn stroke_polyline(&mut self, vertices: &[PolylineVertex], line_width: f32, color: Color) {
        let half = line_width * 0.5;
        let pad = Vec2::splat(half + 1.0);
        for pair in vertices.windows(2) {
            let (a, b) = (pair[0].position, pair[1].position);
            self.shade_box(a.min(b) - pad, a.max(b) + pad, color, pair[1].alpha, |p| {
                (half + 0.5 - segment_distance(p, a, b)).clamp(0.0, 1.0)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::hex(0xFF0000);

    #[test]
    fn test_new_raster_is_transparent() {
        let raster = Raster::new(4, 3);
        assert_eq!(raster.dimensions(), (4, 3));
        assert_eq!(raster.pixels().len(), 4 * 3 * 4);
        assert!(raster.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_rect_opaque() {
        let mut raster = Raster::new(4, 4);
        raster.fill_rect(Vec2::ZERO, Vec2::new(2.0, 4.0), RED, 1.0);
        assert_eq!(raster.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(raster.pixel(1, 3), [255, 0, 0, 255]);
        assert_eq!(raster.pixel(2, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_fade_darkens_and_accumulates_alpha() {
        let mut raster = Raster::new(2, 2);
        raster.fill_rect(Vec2::ZERO, Vec2::splat(2.0), Color::WHITE, 1.0);
        raster.fill_rect(Vec2::ZERO, Vec2::splat(2.0), Color::BLACK, 0.1);
        let [r, g, b, a] = raster.pixel(0, 0);
        assert!((229..=230).contains(&r), "{}", r);
        assert_eq!((r, r, a), (g, b, 255));

        let mut empty = Raster::new(1, 1);
        for _ in 0..100 {
            empty.fill_rect(Vec2::ZERO, Vec2::ONE, Color::BLACK, 0.1);
        }
        let [r, g, b, a] = empty.pixel(0, 0);
        assert_eq!((r, g, b), (0, 0, 0));
        assert!(a > 250);
    }

    #[test]
    fn test_fill_circle_covers_center_only() {
        let mut raster = Raster::new(20, 20);
        raster.fill_circle(Vec2::new(10.0, 10.0), 3.0, RED, 1.0, 0.0);
        assert_eq!(raster.pixel(10, 10), [255, 0, 0, 255]);
        assert_eq!(raster.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(raster.pixel(10, 16), [0, 0, 0, 0]);
    }

    #[test]
    fn test_glow_reaches_beyond_body() {
        let mut plain = Raster::new(30, 30);
        plain.fill_circle(Vec2::new(15.0, 15.0), 3.0, RED, 1.0, 0.0);
        let mut glowing = Raster::new(30, 30);
        glowing.fill_circle(Vec2::new(15.0, 15.0), 3.0, RED, 1.0, 8.0);

        assert_eq!(plain.pixel(21, 15)[3], 0);
        assert!(glowing.pixel(21, 15)[3] > 0);
    }

    #[test]
    fn test_stroke_circle_leaves_center_empty() {
        let mut raster = Raster::new(20, 20);
        raster.stroke_circle(Vec2::new(10.0, 10.0), 5.0, 2.0, RED, 1.0);
        assert_eq!(raster.pixel(10, 10), [0, 0, 0, 0]);
        assert!(raster.pixel(15, 10)[0] > 0);
    }

    #[test]
    fn test_polyline_segment_alpha() {
        let mut raster = Raster::new(20, 10);
        let vertices = [
            PolylineVertex { position: Vec2::new(0.0, 5.5), alpha: 0.0 },
            PolylineVertex { position: Vec2::new(10.0, 5.5), alpha: 0.5 },
            PolylineVertex { position: Vec2::new(20.0, 5.5), alpha: 0.0 },
        ];
        raster.stroke_polyline(&vertices, 1.0, RED);

        // First segment drawn at half opacity, second invisible
        assert_eq!(raster.pixel(5, 5), [128, 0, 0, 128]);
        assert_eq!(raster.pixel(15, 5), [0, 0, 0, 0]);
    }

    #[test]
    fn test_offscreen_shapes_are_clipped() {
        let mut raster = Raster::new(10, 10);
        raster.fill_circle(Vec2::new(-50.0, -50.0), 4.0, RED, 1.0, 10.0);
        raster.fill_circle(Vec2::new(f32::NAN, 5.0), 4.0, RED, 1.0, 0.0);
        assert!(raster.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_resize_keeps_or_resets() {
        let mut raster = Raster::new(4, 4);
        raster.fill_rect(Vec2::ZERO, Vec2::splat(4.0), RED, 1.0);
        raster.resize(4, 4);
        assert_eq!(raster.pixel(0, 0), [255, 0, 0, 255]);
        raster.resize(8, 2);
        assert_eq!(raster.dimensions(), (8, 2));
        assert_eq!(raster.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_snapshot() {
        let path = std::env::temp_dir().join(format!("sparkfield-snap-{}.png", std::process::id()));
        let mut raster = Raster::new(8, 8);
        raster.fill_circle(Vec2::splat(4.0), 2.0, RED, 1.0, 0.0);
        raster.snapshot(&path).unwrap();
        let written = image::open(&path).unwrap().to_rgb8();
        let _ = std::fs::remove_file(&path);
        assert_eq!(written.dimensions(), (8, 8));
        assert_eq!(written.get_pixel(4, 4).0, [255, 0, 0]);

        let empty = Raster::new(0, 0);
        assert!(matches!(empty.snapshot(&path), Err(SnapshotError::EmptyFrame)));
    }
}
