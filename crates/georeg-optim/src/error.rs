use thiserror::Error;

/// Errors that can occur while evaluating residuals or optimizing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimError {
    /// Dimension mismatch between expected and actual values
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// The function has no residuals to minimize
    #[error("Function has no outputs")]
    NoResiduals,

    /// Residual evaluation produced NaN or infinity
    #[error("Residual evaluation produced non-finite values")]
    NonFiniteResidual,

    /// Linear system solve failed (singular matrix)
    #[error("Linear system solve failed: {0}")]
    SolveFailed(String),
}
