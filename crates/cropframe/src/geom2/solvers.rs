//! Lower-edge inclination.
//!
//! `angle = atan((lr.y - ll.y) / (lr.x - ll.x))` in radians, single quadrant,
//! so the result lies in (-π/2, π/2). A vertical lower edge has no angle
//! under this formulation and is reported as `DegenerateGeometry`.
use nalgebra::Point2;

use super::corners::select_corners;
use super::types::{AngleUnit, Corners};
use crate::error::{GeomError, Result};

/// Angle of the edge from `corners.lower_left` to `corners.lower_right`.
pub fn corner_angle(corners: &Corners) -> Result<f64> {
    let edge = corners.edge();
    if edge.x == 0.0 {
        return Err(GeomError::DegenerateGeometry(format!(
            "lower-left ({}, {}) and lower-right ({}, {}) share x; the lower edge is vertical",
            corners.lower_left.x,
            corners.lower_left.y,
            corners.lower_right.x,
            corners.lower_right.y
        )));
    }
    let angle = (edge.y / edge.x).atan();
    tracing::debug!(angle, "lower_edge_angle");
    Ok(angle)
}

/// Rotation angle of a boundary in radians.
pub fn rotation_angle(points: &[Point2<f64>]) -> Result<f64> {
    corner_angle(&select_corners(points)?)
}

/// Rotation angle of a boundary in `unit`.
pub fn rotation_angle_in(points: &[Point2<f64>], unit: AngleUnit) -> Result<f64> {
    rotation_angle(points).map(|rad| unit.from_radians(rad))
}
