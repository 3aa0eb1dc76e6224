//! Oriented rectangles with known lower edge, for tests, benches and demos.
//!
//! Model
//! - Lower-left corner `origin`, lower edge of length `width` inclined by
//!   `angle` ∈ (0, π/2), upper edge offset by `height` along the left normal.
//! - For such an angle the lower-left corner is the unique min-y point and the
//!   lower-right corner the unique max-x point, so corner selection is
//!   order-independent.
//! - The corner list may start anywhere and run either way round.

use nalgebra::{Point2, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Boundary;
use crate::error::Result;

/// Rectangle parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedRect {
    pub origin: Point2<f64>,
    pub width: f64,
    pub height: f64,
    /// Radians; inclination of the lower edge.
    pub angle: f64,
}

impl OrientedRect {
    /// Corners counter-clockwise from lower-left.
    pub fn corners(&self) -> [Point2<f64>; 4] {
        let (s, c) = self.angle.sin_cos();
        let along = Vector2::new(c, s) * self.width;
        let up = Vector2::new(-s, c) * self.height;
        let ll = self.origin;
        [ll, ll + along, ll + along + up, ll + up]
    }

    /// Corner list starting at index `start` (mod 4), optionally clockwise.
    pub fn boundary(&self, start: usize, clockwise: bool) -> Result<Boundary> {
        let mut pts = self.corners().to_vec();
        if clockwise {
            pts.reverse();
        }
        let n = pts.len();
        pts.rotate_left(start % n);
        Boundary::new(pts)
    }
}

/// Sampling ranges for `draw_rect`.
#[derive(Clone, Copy, Debug)]
pub struct RectCfg {
    /// Lower-left corners are drawn from `center ± spread` in both axes.
    pub center: Point2<f64>,
    pub spread: f64,
    pub side_min: f64,
    pub side_max: f64,
    /// Angle range kept strictly inside (0, π/2).
    pub angle_min: f64,
    pub angle_max: f64,
}

impl Default for RectCfg {
    fn default() -> Self {
        // projected-coordinate magnitudes similar to survey plots
        Self {
            center: Point2::new(262_900.0, 53_100.0),
            spread: 1_000.0,
            side_min: 10.0,
            side_max: 200.0,
            angle_min: 0.01,
            angle_max: std::f64::consts::FRAC_PI_2 - 0.01,
        }
    }
}

/// Draw one rectangle, its start index and direction from a seeded RNG.
pub fn draw_rect(cfg: &RectCfg, seed: u64) -> (OrientedRect, usize, bool) {
    let mut rng = StdRng::seed_from_u64(seed);
    let rect = OrientedRect {
        origin: Point2::new(
            cfg.center.x + rng.gen_range(-cfg.spread..=cfg.spread),
            cfg.center.y + rng.gen_range(-cfg.spread..=cfg.spread),
        ),
        width: rng.gen_range(cfg.side_min..=cfg.side_max),
        height: rng.gen_range(cfg.side_min..=cfg.side_max),
        angle: rng.gen_range(cfg.angle_min..=cfg.angle_max),
    };
    (rect, rng.gen_range(0..4), rng.gen_bool(0.5))
}
