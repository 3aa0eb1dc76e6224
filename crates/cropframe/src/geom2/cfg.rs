//! Tolerance defaults (internal).
//!
//! Fixed constants; the pipeline is deterministic and has no tuning knobs.

/// Largest magnitude tolerated in the x/y rows of a 4×4 matrix's third column
/// before `transform_point` refuses it. The `[x, y, 1, 1]` homogeneous vector
/// feeds that column straight into the result.
pub(crate) const INERT_COLUMN_EPS: f64 = 1e-12;
