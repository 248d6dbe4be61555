use thiserror::Error;

/// Error type for covariance estimation and rotation extraction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinalgError {
    /// Source and destination arrays must have the same length
    #[error("Source and destination arrays must have the same length ({src} != {dst})")]
    MismatchedLengths {
        /// Number of source points
        src: usize,
        /// Number of destination points
        dst: usize,
    },

    /// The point set is empty
    #[error("Point set is empty")]
    EmptyPointSet,

    /// The singular value decomposition did not converge
    #[error("SVD did not converge")]
    SvdNotConverged,

    /// The symmetric eigendecomposition did not converge
    #[error("Symmetric eigendecomposition did not converge")]
    EigenNotConverged,

    /// The rotation is still a reflection after the single allowed correction.
    #[error("Rotation is improper after reflection correction (det = {determinant})")]
    ImproperRotation {
        /// Determinant of the rejected matrix
        determinant: f64,
    },
}
