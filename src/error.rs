//! Errors reported when a minimization or a fit is set up with inconsistent input.
//!
//! Running the minimizer itself never fails: a search that does not converge
//! is reported through [`Solution`](crate::minimizer::Solution).

/// Errors produced while constructing a simplex or fitting a path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Returned when two vectors that must share a length do not.
    #[error("dimension mismatch: expected {expected} values but got {got}")]
    DimensionMismatch {
        /// The required length.
        expected: usize,
        /// The length that was supplied.
        got: usize,
    },

    /// Returned when an explicit simplex does not have exactly one more vertex than dimensions.
    #[error("malformed simplex: {vertices} vertices in {dimensions} dimensions")]
    MalformedSimplex {
        /// Number of rows supplied.
        vertices: usize,
        /// Number of columns supplied.
        dimensions: usize,
    },

    /// Returned when a path has too few points for the requested shape.
    #[error("path needs at least {needed} points but has {got}")]
    PathTooShort {
        /// Minimum number of points.
        needed: usize,
        /// Number of points in the path.
        got: usize,
    },

    /// Returned when all points of a path coincide.
    #[error("path has zero length")]
    DegeneratePath,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
