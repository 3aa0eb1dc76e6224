//! Canonical-frame normalization for rectangular crop regions.
//!
//! Given the corners of an arbitrarily oriented crop rectangle in a projected
//! coordinate system, derive the rotation that levels its lower edge and the
//! translation that moves its lower-left corner to the origin, then emit the
//! polygon and matrices as text for a point-cloud pipeline template.
//!
//! Layout
//! - `geom2`: points, boundaries, corner selection, angle, matrices.
//! - `format`: WKT polygon and matrix token serializers.
//! - `params`: result bundle and the parameter tree handed to templates.
//! - `render`: template rendering and atomic artifact writes.

pub mod error;
pub mod format;
pub mod geom2;
pub mod params;
pub mod render;

pub use error::GeomError;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::GeomError;
    pub use crate::format::{matrix_tokens, parse_matrix, polygon_wkt};
    pub use crate::geom2::{
        lower_left, lower_right, normalization_matrix, rotation_angle, rotation_angle_in,
        rotation_matrix, select_corners, transform_point, transform_points, translation_matrix,
        AngleUnit, Boundary, Corners,
    };
    pub use crate::params::{PdalParams, PipelineParams, TransformationParameters};
    pub use nalgebra::{Matrix4 as Mat4, Point2 as Pt2};
}
