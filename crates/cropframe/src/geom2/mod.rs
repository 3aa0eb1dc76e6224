//! Planar geometry for crop-region normalization.
//!
//! Pipeline
//! - `corners`: pick the lower-left (min y) and lower-right (max x) reference
//!   corners, first match in input order on ties.
//! - `solvers`: inclination of the lower edge, `atan(dy/dx)`, with optional
//!   unit scaling.
//! - `maps`: homogeneous rotation/translation matrices and point transforms.
//!   The 3×3 form `[x, y, 1]` is the source of truth; the 4×4 form consumed
//!   downstream is an embedding with an inert z row and column.
//!
//! Postcondition of the whole chain: the lower-left corner maps to the origin
//! and the lower edge to the non-negative x axis.

mod cfg;
pub mod corners;
pub mod maps;
pub mod sample;
mod solvers;
mod types;

pub use corners::{lower_left, lower_right, select_corners};
pub use maps::{
    embed_h3, matrix_from_rows, normalization_matrix, rotation_h3, rotation_matrix,
    transform_point, transform_points, translation_from_shift, translation_h3,
    translation_matrix, Normalization,
};
pub use solvers::{corner_angle, rotation_angle, rotation_angle_in};
pub use types::{AngleUnit, Boundary, Corners, MIN_BOUNDARY_POINTS};
