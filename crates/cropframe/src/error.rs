use thiserror::Error;

/// Geometric precondition failures.
///
/// All of these are deterministic: retrying with the same input cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeomError {
    /// Too few points, or non-finite coordinates.
    #[error("invalid boundary: {0}")]
    InvalidBoundary(String),

    /// Lower-left and lower-right corners share an x coordinate, so the
    /// lower-edge angle is undefined.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Matrix is not 4×4, has non-finite entries, or breaks the inert
    /// third-column convention of the point transformer.
    #[error("invalid matrix: {0}")]
    InvalidMatrix(String),
}

pub type Result<T> = std::result::Result<T, GeomError>;
