//! Reference corner selection.
//!
//! Lower-left is the point with the smallest y, lower-right the point with the
//! largest x. Ties resolve to the first such point in input order, so results
//! depend on point order when the extremes are not unique. Callers that need
//! geometric uniqueness must pre-validate.

use nalgebra::Point2;

use super::types::Corners;
use crate::error::{GeomError, Result};

/// First point whose key beats every earlier one under `better`.
fn first_extreme<K, B>(points: &[Point2<f64>], key: K, better: B, what: &str) -> Result<Point2<f64>>
where
    K: Fn(&Point2<f64>) -> f64,
    B: Fn(f64, f64) -> bool,
{
    let (first, rest) = points.split_first().ok_or_else(|| {
        GeomError::InvalidBoundary(format!("cannot select the {what} corner of an empty point set"))
    })?;
    let mut best = *first;
    for p in rest {
        // strict comparison keeps the earliest point on ties
        if better(key(p), key(&best)) {
            best = *p;
        }
    }
    Ok(best)
}

/// Point with minimum y.
pub fn lower_left(points: &[Point2<f64>]) -> Result<Point2<f64>> {
    first_extreme(points, |p| p.y, |a, b| a < b, "lower-left")
}

/// Point with maximum x.
pub fn lower_right(points: &[Point2<f64>]) -> Result<Point2<f64>> {
    first_extreme(points, |p| p.x, |a, b| a > b, "lower-right")
}

pub fn select_corners(points: &[Point2<f64>]) -> Result<Corners> {
    let corners = Corners {
        lower_left: lower_left(points)?,
        lower_right: lower_right(points)?,
    };
    tracing::debug!(
        ll_x = corners.lower_left.x,
        ll_y = corners.lower_left.y,
        lr_x = corners.lower_right.x,
        lr_y = corners.lower_right.y,
        "corners"
    );
    Ok(corners)
}
