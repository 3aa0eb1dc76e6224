//! Text forms handed to the pipeline template.
//!
//! - `polygon_wkt`: closed WKT ring, `POLYGON((x1 y1, ..., x1 y1))`.
//! - `matrix_tokens`: 16 space-separated scalars in row-major order, or the
//!   literal `None` when no matrix is given.
//!
//! Scalars use Rust's shortest round-trip float formatting (`{:?}`), so
//! `262986.2` prints as `262986.2` and parsing the text back is exact.

use nalgebra::{Matrix4, Point2};

use crate::error::{GeomError, Result};

/// Placeholder emitted for an absent matrix; templates test for it.
pub const NONE_TOKEN: &str = "None";

#[inline]
fn scalar(v: f64) -> String {
    format!("{v:?}")
}

/// Close the ring by repeating the first point and render it as WKT.
pub fn polygon_wkt(points: &[Point2<f64>]) -> Result<String> {
    let first = points.first().ok_or_else(|| {
        GeomError::InvalidBoundary("cannot render a polygon from an empty point set".into())
    })?;
    let ring = points
        .iter()
        .chain(std::iter::once(first))
        .map(|p| format!("{} {}", scalar(p.x), scalar(p.y)))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!("POLYGON(({ring}))"))
}

pub fn matrix_tokens(m: Option<&Matrix4<f64>>) -> String {
    let Some(m) = m else {
        return NONE_TOKEN.to_string();
    };
    // nalgebra stores column-major; walk rows explicitly
    (0..4)
        .flat_map(|r| (0..4).map(move |c| m[(r, c)]))
        .map(scalar)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inverse of `matrix_tokens`: `None` for the placeholder, otherwise exactly
/// 16 finite row-major scalars.
pub fn parse_matrix(text: &str) -> Result<Option<Matrix4<f64>>> {
    let text = text.trim();
    if text == NONE_TOKEN {
        return Ok(None);
    }
    let vals = text
        .split_whitespace()
        .map(|t| match t.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            Ok(_) => Err(GeomError::InvalidMatrix(format!("non-finite token {t:?}"))),
            Err(e) => Err(GeomError::InvalidMatrix(format!("token {t:?}: {e}"))),
        })
        .collect::<Result<Vec<f64>>>()?;
    if vals.len() != 16 {
        return Err(GeomError::InvalidMatrix(format!(
            "expected 16 tokens, got {}",
            vals.len()
        )));
    }
    Ok(Some(Matrix4::from_row_slice(&vals)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::{rotation_matrix, translation_from_shift};
    use nalgebra::{point, vector};
    use proptest::prelude::*;

    #[test]
    fn plot_polygon_text() {
        let pts = [
            point![262986.2, 53128.25],
            point![262967.5, 53029.84],
            point![262870.1, 53048.72],
            point![262888.9, 53148.19],
        ];
        assert_eq!(
            polygon_wkt(&pts).unwrap(),
            "POLYGON((262986.2 53128.25, 262967.5 53029.84, 262870.1 53048.72, \
             262888.9 53148.19, 262986.2 53128.25))"
        );
    }

    #[test]
    fn single_point_ring() {
        assert_eq!(
            polygon_wkt(&[point![1.5, -2.0]]).unwrap(),
            "POLYGON((1.5 -2.0, 1.5 -2.0))"
        );
    }

    #[test]
    fn empty_polygon_is_invalid_boundary() {
        assert!(matches!(polygon_wkt(&[]), Err(GeomError::InvalidBoundary(_))));
    }

    #[test]
    fn absent_matrix_is_none_token() {
        assert_eq!(matrix_tokens(None), "None");
        assert_eq!(parse_matrix("None").unwrap(), None);
    }

    #[test]
    fn tokens_are_row_major() {
        let m = translation_from_shift(vector![3.0, -4.5]);
        assert_eq!(
            matrix_tokens(Some(&m)),
            "1.0 0.0 0.0 -3.0 0.0 1.0 0.0 4.5 0.0 0.0 1.0 0.0 0.0 0.0 0.0 1.0"
        );
    }

    #[test]
    fn malformed_tokens_are_invalid_matrix() {
        assert!(matches!(parse_matrix("1 2 3"), Err(GeomError::InvalidMatrix(_))));
        assert!(matches!(
            parse_matrix(&["1"; 17].join(" ")),
            Err(GeomError::InvalidMatrix(_))
        ));
        let mut toks = vec!["0"; 16];
        toks[5] = "abc";
        assert!(matches!(
            parse_matrix(&toks.join(" ")),
            Err(GeomError::InvalidMatrix(_))
        ));
        toks[5] = "inf";
        assert!(matches!(
            parse_matrix(&toks.join(" ")),
            Err(GeomError::InvalidMatrix(_))
        ));
    }

    proptest! {
        /// Closed ring: one extra pair, first pair repeated last.
        #[test]
        fn prop_polygon_closed(pairs in prop::collection::vec((-1e6f64..1e6, -1e6f64..1e6), 1..12)) {
            let pts: Vec<_> = pairs.iter().map(|&(x, y)| point![x, y]).collect();
            let wkt = polygon_wkt(&pts).unwrap();
            let body = wkt
                .strip_prefix("POLYGON((")
                .and_then(|s| s.strip_suffix("))"))
                .unwrap();
            let ring: Vec<&str> = body.split(", ").collect();
            prop_assert_eq!(ring.len(), pts.len() + 1);
            prop_assert_eq!(ring[0], ring[ring.len() - 1]);
        }

        /// Serialized tokens parse back to the identical matrix.
        #[test]
        fn prop_matrix_tokens_round_trip(
            theta in -4.0f64..4.0,
            sx in -1e6f64..1e6,
            sy in -1e6f64..1e6,
        ) {
            for m in [rotation_matrix(theta), translation_from_shift(vector![sx, sy])] {
                let back = parse_matrix(&matrix_tokens(Some(&m))).unwrap();
                prop_assert_eq!(back, Some(m));
            }
        }
    }
}
