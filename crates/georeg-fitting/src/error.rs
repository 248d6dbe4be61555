use georeg_linalg::LinalgError;
use georeg_optim::OptimError;
use thiserror::Error;

/// Errors that can occur while fitting a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// The two correspondence sets (or points and weights) differ in length
    #[error("Mismatched lengths: {left} != {right}")]
    MismatchedLengths {
        /// Length of the first sequence
        left: usize,
        /// Length of the second sequence
        right: usize,
    },

    /// Not enough points for the model
    #[error("Fitting requires at least {required} points, got {actual}")]
    InsufficientPoints {
        /// Minimum number of points required
        required: usize,
        /// Number of usable points provided
        actual: usize,
    },

    /// A parameter vector has the wrong length for its codec
    #[error("Parameter vector length mismatch: expected {expected}, got {actual}")]
    ParameterLength {
        /// Length required by the codec
        expected: usize,
        /// Length provided
        actual: usize,
    },

    /// A weight is negative, NaN or infinite
    #[error("Invalid weight at index {index}")]
    InvalidWeight {
        /// Index of the offending weight
        index: usize,
    },

    /// The data does not determine a unique model
    #[error("Degenerate configuration: {0}")]
    Degenerate(String),

    /// Linear algebra failure
    #[error(transparent)]
    Linalg(#[from] LinalgError),

    /// Nonlinear optimization failure
    #[error(transparent)]
    Optim(#[from] OptimError),
}

impl FitError {
    /// Returns true for invariant violations that indicate a numerical defect rather than bad input.
    ///
    /// Only a rotation that is still improper after the reflection correction is fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, FitError::Linalg(LinalgError::ImproperRotation { .. }))
    }
}
