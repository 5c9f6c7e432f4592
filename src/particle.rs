//! The particle value type and its trail ring buffer.

use glam::Vec2;

use crate::config::Mode;
use crate::visuals::Color;

/// Largest trail the controls allow; the ring buffer's fixed storage size.
pub const MAX_TRAIL_LENGTH: usize = 10;

/// Life lost per frame.
pub const LIFE_DECAY: f32 = 0.02;

/// How far below the bottom edge a particle may fall before it is retired.
pub const OFFSCREEN_MARGIN: f32 = 50.0;

/// A recorded trail sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrailPoint {
    pub position: Vec2,
    /// The particle's life when the sample was taken.
    pub life: f32,
}

/// Fixed-capacity ring of recent positions, oldest first.
///
/// Storage never reallocates. The effective capacity is passed on each push
/// so it can follow the live `trail_length` setting; when it shrinks, the
/// oldest samples are dropped until the trail fits.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: [TrailPoint; MAX_TRAIL_LENGTH],
    /// Index of the oldest sample.
    head: usize,
    len: usize,
}

impl Trail {
    /// Append a sample, evicting the oldest ones beyond `capacity`.
    pub fn push(&mut self, point: TrailPoint, capacity: usize) {
        let capacity = capacity.min(MAX_TRAIL_LENGTH);
        if capacity == 0 {
            self.clear();
            return;
        }
        while self.len >= capacity {
            self.pop_oldest();
        }
        let tail = (self.head + self.len) % MAX_TRAIL_LENGTH;
        self.points[tail] = point;
        self.len += 1;
    }

    fn pop_oldest(&mut self) -> Option<TrailPoint> {
        if self.len == 0 {
            return None;
        }
        let point = self.points[self.head];
        self.head = (self.head + 1) % MAX_TRAIL_LENGTH;
        self.len -= 1;
        Some(point)
    }

    /// Number of recorded samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sample `index`, counting from the oldest.
    pub fn get(&self, index: usize) -> Option<TrailPoint> {
        (index < self.len).then(|| self.points[(self.head + index) % MAX_TRAIL_LENGTH])
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = TrailPoint> + '_ {
        (0..self.len).map(move |i| self.points[(self.head + i) % MAX_TRAIL_LENGTH])
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

/// A single simulated point.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Canvas-space position in pixels, y pointing down.
    pub position: Vec2,
    /// Velocity in pixels per frame, before the global speed multiplier.
    pub velocity: Vec2,
    /// Radius in pixels.
    pub size: f32,
    /// Sampled from the palette active at creation; never re-themed.
    pub color: Color,
    /// Starts at 1, loses [`LIFE_DECAY`] per frame, retired at or below 0.
    pub life: f32,
    /// Randomized at creation. Informational only; decay ignores it.
    pub max_life: f32,
    /// Behaviour variant, fixed for the particle's lifetime.
    pub mode: Mode,
    /// Recent positions for rendering.
    pub trail: Trail,
}

impl Particle {
    /// A fresh particle at full life with an empty trail.
    pub fn new(position: Vec2, velocity: Vec2, size: f32, color: Color, mode: Mode) -> Self {
        Self {
            position,
            velocity,
            size,
            color,
            life: 1.0,
            max_life: 1.0,
            mode,
            trail: Trail::default(),
        }
    }

    /// Push the current position and life onto the trail.
    pub fn record_trail(&mut self, capacity: usize) {
        self.trail.push(
            TrailPoint {
                position: self.position,
                life: self.life,
            },
            capacity,
        );
    }

    /// Survival predicate: still has life and has not fallen off the bottom.
    #[inline]
    pub fn survives(&self, surface_height: f32) -> bool {
        self.life > 0.0 && self.position.y < surface_height + OFFSCREEN_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(i: usize) -> TrailPoint {
        TrailPoint {
            position: Vec2::new(i as f32, 0.0),
            life: 1.0,
        }
    }

    #[test]
    fn test_trail_fills_to_capacity() {
        let mut trail = Trail::default();
        for i in 0..5 {
            trail.push(point(i), 5);
            assert_eq!(trail.len(), i + 1);
        }
        trail.push(point(5), 5);
        assert_eq!(trail.len(), 5);

        // Oldest dropped first
        let xs: Vec<f32> = trail.iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_trail_wraps_storage() {
        let mut trail = Trail::default();
        for i in 0..37 {
            trail.push(point(i), MAX_TRAIL_LENGTH);
        }
        assert_eq!(trail.len(), MAX_TRAIL_LENGTH);
        assert_eq!(trail.get(0).unwrap().position.x, 27.0);
        assert_eq!(trail.get(9).unwrap().position.x, 36.0);
        assert!(trail.get(10).is_none());
    }

    #[test]
    fn test_trail_shrinks_with_capacity() {
        let mut trail = Trail::default();
        for i in 0..10 {
            trail.push(point(i), 10);
        }
        trail.push(point(10), 2);
        assert_eq!(trail.len(), 2);
        let xs: Vec<f32> = trail.iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![9.0, 10.0]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut trail = Trail::default();
        trail.push(point(0), 3);
        trail.push(point(1), 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_capacity_above_storage_is_capped() {
        let mut trail = Trail::default();
        for i in 0..20 {
            trail.push(point(i), 50);
        }
        assert_eq!(trail.len(), MAX_TRAIL_LENGTH);
    }

    #[test]
    fn test_survival_predicate() {
        let mut p = Particle::new(Vec2::new(0.0, 100.0), Vec2::ZERO, 3.0, Color::WHITE, Mode::Rain);
        assert!(p.survives(600.0));

        p.position.y = 649.0;
        assert!(p.survives(600.0));
        p.position.y = 650.0;
        assert!(!p.survives(600.0));

        p.position.y = 0.0;
        p.life = 0.0;
        assert!(!p.survives(600.0));
    }

    #[test]
    fn test_record_trail_uses_current_state() {
        let mut p = Particle::new(Vec2::new(3.0, 4.0), Vec2::ZERO, 3.0, Color::WHITE, Mode::Rain);
        p.life = 0.5;
        p.record_trail(5);
        assert_eq!(
            p.trail.get(0),
            Some(TrailPoint { position: Vec2::new(3.0, 4.0), life: 0.5 })
        );
    }
}
