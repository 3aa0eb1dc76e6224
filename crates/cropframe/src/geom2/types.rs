//! Basic 2D types for crop boundaries.
//!
//! - `Boundary`: owned, validated, unclosed corner list of a crop region.
//! - `Corners`: the two reference corners anchoring the rotation.
//! - `AngleUnit`: post-multiplied unit scaling for the solved angle.

use nalgebra::{Point2, Vector2};

use crate::error::{GeomError, Result};

/// Fewest points a `Boundary` may hold.
pub const MIN_BOUNDARY_POINTS: usize = 3;

/// Unclosed, ordered corner list of a crop region.
///
/// Order carries no meaning (any start, any direction) and the first point is
/// not repeated at the end. Coordinates are finite.
#[derive(Clone, Debug, PartialEq)]
pub struct Boundary {
    pts: Vec<Point2<f64>>,
}

impl Boundary {
    pub fn new(points: Vec<Point2<f64>>) -> Result<Self> {
        if points.len() < MIN_BOUNDARY_POINTS {
            return Err(GeomError::InvalidBoundary(format!(
                "need at least {MIN_BOUNDARY_POINTS} points, got {}",
                points.len()
            )));
        }
        if let Some((i, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(GeomError::InvalidBoundary(format!(
                "point {i} ({}, {}) is not finite",
                p.x, p.y
            )));
        }
        Ok(Self { pts: points })
    }

    /// Build from `[x, y]` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = [f64; 2]>,
    {
        Self::new(pairs.into_iter().map(|[x, y]| Point2::new(x, y)).collect())
    }

    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.pts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    /// Always false; kept for the `len` convention.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.pts.iter().map(|p| [p.x, p.y]).collect()
    }
}

/// Reference corners of a boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corners {
    /// Point with minimum y (first in input order on ties).
    pub lower_left: Point2<f64>,
    /// Point with maximum x (first in input order on ties).
    pub lower_right: Point2<f64>,
}

impl Corners {
    /// Lower edge as a vector from lower-left to lower-right.
    #[inline]
    pub fn edge(&self) -> Vector2<f64> {
        self.lower_right - self.lower_left
    }
}

/// Unit for a solved angle. Conversion is a pure post-multiplication of the
/// radian value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
    /// Arbitrary factor applied to radians.
    Scaled(f64),
}

impl AngleUnit {
    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            AngleUnit::Radians => 1.0,
            AngleUnit::Degrees => 180.0 / std::f64::consts::PI,
            AngleUnit::Scaled(k) => k,
        }
    }

    #[inline]
    pub fn from_radians(self, radians: f64) -> f64 {
        radians * self.factor()
    }
}
