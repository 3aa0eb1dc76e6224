//! Homogeneous rotation/translation matrices and point transforms.
//!
//! Convention
//! - 2D transforms are built as 3×3 matrices acting on `[x, y, 1]`.
//! - `embed_h3` lifts them into the 4×4 xyz layout expected downstream by
//!   inserting an identity z row and column; z passes through unchanged.
//! - `transform_point` on a 4×4 uses `[x, y, 1, 1]`. That is only sound while
//!   the x/y rows of the third column are zero, which every matrix built here
//!   satisfies; anything else is rejected.

use nalgebra::{Matrix3, Matrix4, Point2, Vector2, Vector4};

use super::cfg::INERT_COLUMN_EPS;
use super::corners::select_corners;
use super::solvers::corner_angle;
use super::types::Corners;
use crate::error::{GeomError, Result};

/// Rotation about the origin that levels an edge inclined by `angle`:
///
/// ```text
/// [  cos  sin  0 ]
/// [ -sin  cos  0 ]
/// [  0    0    1 ]
/// ```
///
/// Acting on column vectors this turns points by `-angle`.
#[inline]
pub fn rotation_h3(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(
        c, s, 0.0, //
        -s, c, 0.0, //
        0.0, 0.0, 1.0,
    )
}

/// Translation by `-shift`.
#[inline]
pub fn translation_h3(shift: Vector2<f64>) -> Matrix3<f64> {
    Matrix3::new(
        1.0, 0.0, -shift.x, //
        0.0, 1.0, -shift.y, //
        0.0, 0.0, 1.0,
    )
}

/// Lift a 2D homogeneous transform into the 4×4 xyz layout.
pub fn embed_h3(m: &Matrix3<f64>) -> Matrix4<f64> {
    Matrix4::new(
        m[(0, 0)], m[(0, 1)], 0.0, m[(0, 2)], //
        m[(1, 0)], m[(1, 1)], 0.0, m[(1, 2)], //
        0.0, 0.0, 1.0, 0.0, //
        m[(2, 0)], m[(2, 1)], 0.0, m[(2, 2)],
    )
}

/// 4×4 rotation matrix for `angle` radians.
#[inline]
pub fn rotation_matrix(angle: f64) -> Matrix4<f64> {
    embed_h3(&rotation_h3(angle))
}

/// 4×4 matrix translating by `-shift` in x/y.
#[inline]
pub fn translation_from_shift(shift: Vector2<f64>) -> Matrix4<f64> {
    embed_h3(&translation_h3(shift))
}

#[inline]
fn apply_h3(m: &Matrix3<f64>, p: &Point2<f64>) -> Point2<f64> {
    let v = m * p.to_homogeneous();
    Point2::new(v.x, v.y)
}

/// Apply a 4×4 matrix to `(x, y)` via `M · [x, y, 1, 1]ᵗ`, keeping the first
/// two components.
pub fn transform_point(p: &Point2<f64>, m: &Matrix4<f64>) -> Result<Point2<f64>> {
    let (m02, m12) = (m[(0, 2)], m[(1, 2)]);
    if !(m02.abs() <= INERT_COLUMN_EPS && m12.abs() <= INERT_COLUMN_EPS) {
        return Err(GeomError::InvalidMatrix(format!(
            "third column must be zero in the x/y rows, got ({m02}, {m12})"
        )));
    }
    let v = m * Vector4::new(p.x, p.y, 1.0, 1.0);
    Ok(Point2::new(v.x, v.y))
}

pub fn transform_points(points: &[Point2<f64>], m: &Matrix4<f64>) -> Result<Vec<Point2<f64>>> {
    points.iter().map(|p| transform_point(p, m)).collect()
}

/// Build a 4×4 matrix from nested rows; anything but 4 rows of 4 is rejected.
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<Matrix4<f64>> {
    if rows.len() != 4 {
        return Err(GeomError::InvalidMatrix(format!(
            "expected 4 rows, got {}",
            rows.len()
        )));
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != 4) {
        return Err(GeomError::InvalidMatrix(format!(
            "row {i} has {} columns, expected 4",
            row.len()
        )));
    }
    Ok(Matrix4::from_fn(|r, c| rows[r][c]))
}

/// Everything derived from one boundary: corners, angle, and the two 2D
/// homogeneous transforms.
#[derive(Clone, Copy, Debug)]
pub struct Normalization {
    pub corners: Corners,
    /// Radians.
    pub angle: f64,
    pub rotation: Matrix3<f64>,
    pub translation: Matrix3<f64>,
}

impl Normalization {
    pub fn derive(points: &[Point2<f64>]) -> Result<Self> {
        let corners = select_corners(points)?;
        let angle = corner_angle(&corners)?;
        let rotation = rotation_h3(angle);
        let shifted = apply_h3(&rotation, &corners.lower_left);
        let translation = translation_h3(shifted.coords);
        Ok(Self {
            corners,
            angle,
            rotation,
            translation,
        })
    }

    #[inline]
    pub fn rotation4(&self) -> Matrix4<f64> {
        embed_h3(&self.rotation)
    }

    #[inline]
    pub fn translation4(&self) -> Matrix4<f64> {
        embed_h3(&self.translation)
    }

    /// Translation after rotation, as one 4×4.
    #[inline]
    pub fn combined4(&self) -> Matrix4<f64> {
        embed_h3(&(self.translation * self.rotation))
    }

    /// Map a point into the canonical frame.
    #[inline]
    pub fn apply(&self, p: &Point2<f64>) -> Point2<f64> {
        apply_h3(&(self.translation * self.rotation), p)
    }
}

/// Translation that moves the rotated lower-left corner of `points` to the origin.
pub fn translation_matrix(points: &[Point2<f64>]) -> Result<Matrix4<f64>> {
    Normalization::derive(points).map(|n| n.translation4())
}

/// Single matrix mapping `points` into the canonical frame
/// (`translation · rotation`).
pub fn normalization_matrix(points: &[Point2<f64>]) -> Result<Matrix4<f64>> {
    Normalization::derive(points).map(|n| n.combined4())
}
