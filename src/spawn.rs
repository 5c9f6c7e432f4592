//! Random sampling helpers used by emission and the frame loop.
//!
//! All randomness in the engine flows through one [`SpawnContext`], so a
//! seeded context reproduces a run exactly.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Seedable random source with the sampling shapes particles need.
#[derive(Debug, Clone)]
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// A context seeded from OS entropy; different every run.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// A reproducible context.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`.
    ///
    /// Degenerate ranges (`min == max`) return `min` instead of panicking.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.random() * (max - min)
    }

    /// Uniform angle in `[0, 2π)`.
    #[inline]
    pub fn random_angle(&mut self) -> f32 {
        self.random() * TAU
    }

    /// True with probability `p`. `p <= 0` is never, `p >= 1` is always.
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.random() < p
    }

    /// Uniformly pick one item. `items` must be non-empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        debug_assert!(!items.is_empty(), "cannot pick from an empty slice");
        &items[self.rng.gen_range(0..items.len())]
    }

    // ========== Position helpers ==========

    /// Random point within `±half_extent` of `center` on each axis.
    pub fn jitter(&mut self, center: Vec2, half_extent: f32) -> Vec2 {
        center
            + Vec2::new(
                self.random_range(-half_extent, half_extent),
                self.random_range(-half_extent, half_extent),
            )
    }
}

impl Default for SpawnContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The `index`-th of `count` points evenly spaced on a circle, starting at
/// angle 0 and going the positive angle direction.
pub fn ring_position(center: Vec2, radius: f32, index: usize, count: usize) -> Vec2 {
    let angle = index as f32 / count as f32 * TAU;
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_range_bounds() {
        let mut ctx = SpawnContext::seeded(7);
        for _ in 0..1000 {
            let v = ctx.random_range(2.0, 5.0);
            assert!((2.0..5.0).contains(&v));
        }
        assert_eq!(ctx.random_range(3.0, 3.0), 3.0);
    }

    #[test]
    fn test_chance_extremes() {
        let mut ctx = SpawnContext::seeded(1);
        for _ in 0..100 {
            assert!(!ctx.chance(0.0));
            assert!(ctx.chance(1.0));
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SpawnContext::seeded(42);
        let mut b = SpawnContext::seeded(42);
        for _ in 0..10 {
            assert_eq!(a.random(), b.random());
        }
    }

    #[test]
    fn test_jitter_stays_in_box() {
        let mut ctx = SpawnContext::seeded(3);
        let center = Vec2::new(100.0, 50.0);
        for _ in 0..500 {
            let p = ctx.jitter(center, 10.0);
            assert!((p - center).abs().max_element() <= 10.0);
        }
    }

    #[test]
    fn test_ring_position() {
        let c = Vec2::new(10.0, 20.0);
        let p0 = ring_position(c, 30.0, 0, 8);
        assert!((p0 - Vec2::new(40.0, 20.0)).length() < 1e-4);

        let p2 = ring_position(c, 30.0, 2, 8);
        assert!((p2 - Vec2::new(10.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn test_pick_covers_items() {
        let mut ctx = SpawnContext::seeded(9);
        let items = [1, 2, 3];
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[*ctx.pick(&items) as usize - 1] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
