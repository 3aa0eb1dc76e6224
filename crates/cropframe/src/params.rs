//! Result bundle and the parameter tree handed to the pipeline template.
//!
//! The template sees three groups, mirroring the rendered pipeline:
//! `pipeline` (ground-filter thresholds, passed through untouched), `crop`
//! (WKT polygon) and `matrix` (rotation and translation as token strings).

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::{matrix_tokens, polygon_wkt};
use crate::geom2::{Boundary, Normalization};

/// Geometry derived from one boundary. Built once, never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformationParameters {
    pub rotation: Matrix4<f64>,
    pub translation: Matrix4<f64>,
    pub polygon_wkt: String,
}

impl TransformationParameters {
    pub fn derive(boundary: &Boundary) -> Result<Self> {
        let n = Normalization::derive(boundary.points())?;
        Self::from_normalization(boundary, &n)
    }

    /// Reuse a normalization already solved for `boundary`.
    pub fn from_normalization(boundary: &Boundary, norm: &Normalization) -> Result<Self> {
        Ok(Self {
            rotation: norm.rotation4(),
            translation: norm.translation4(),
            polygon_wkt: polygon_wkt(boundary.points())?,
        })
    }
}

/// Ground-filter thresholds forwarded verbatim to the template.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    pub slope: f64,
    pub window: u32,
    pub threshold: f64,
    pub scalar: f64,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            slope: 0.08,
            window: 15,
            threshold: 0.05,
            scalar: 1.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropParams {
    pub polygon: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatrixParams {
    /// Rotation tokens (the template calls it the transformation).
    pub transformation: String,
    pub translation: String,
}

/// Full template context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PdalParams {
    pub pipeline: PipelineParams,
    pub crop: CropParams,
    pub matrix: MatrixParams,
}

impl PdalParams {
    pub fn new(pipeline: PipelineParams, geometry: &TransformationParameters) -> Self {
        Self {
            pipeline,
            crop: CropParams {
                polygon: geometry.polygon_wkt.clone(),
            },
            matrix: MatrixParams {
                transformation: matrix_tokens(Some(&geometry.rotation)),
                translation: matrix_tokens(Some(&geometry.translation)),
            },
        }
    }

    pub fn from_boundary(boundary: &Boundary, pipeline: PipelineParams) -> Result<Self> {
        Ok(Self::new(pipeline, &TransformationParameters::derive(boundary)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse_matrix;
    use crate::geom2::{rotation_angle, rotation_matrix, translation_matrix};

    fn plot() -> Boundary {
        Boundary::from_pairs([
            [262986.2, 53128.25],
            [262967.5, 53029.84],
            [262870.1, 53048.72],
            [262888.9, 53148.19],
        ])
        .unwrap()
    }

    #[test]
    fn derive_matches_component_functions() {
        let b = plot();
        let g = TransformationParameters::derive(&b).unwrap();
        assert_eq!(g.rotation, rotation_matrix(rotation_angle(b.points()).unwrap()));
        assert_eq!(g.translation, translation_matrix(b.points()).unwrap());
        assert!(g.polygon_wkt.starts_with("POLYGON((262986.2 53128.25, "));
    }

    #[test]
    fn bundle_carries_geometry_as_text() {
        let b = plot();
        let p = PdalParams::from_boundary(&b, PipelineParams::default()).unwrap();
        let g = TransformationParameters::derive(&b).unwrap();
        assert_eq!(parse_matrix(&p.matrix.transformation).unwrap(), Some(g.rotation));
        assert_eq!(parse_matrix(&p.matrix.translation).unwrap(), Some(g.translation));
        assert_eq!(p.crop.polygon, g.polygon_wkt);
        assert_eq!(p.pipeline.window, 15);
    }

    #[test]
    fn from_normalization_agrees_with_derive() {
        let b = plot();
        let n = Normalization::derive(b.points()).unwrap();
        let g = TransformationParameters::from_normalization(&b, &n).unwrap();
        assert_eq!(g, TransformationParameters::derive(&b).unwrap());
        assert_eq!(
            PdalParams::new(PipelineParams::default(), &g),
            PdalParams::from_boundary(&b, PipelineParams::default()).unwrap()
        );
    }

    #[test]
    fn pipeline_defaults_fill_missing_fields() {
        let p: PipelineParams = serde_json::from_str(r#"{"slope": 0.2}"#).unwrap();
        assert_eq!(p.slope, 0.2);
        assert_eq!(p.window, 15);
        assert_eq!(p.threshold, 0.05);
        assert_eq!(p.scalar, 1.5);
    }
}
