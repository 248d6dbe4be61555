use crate::OptimError;

/// A function mapping `N` parameters to `M` residuals.
///
/// This is the contract between model-specific residual adapters and the solver: the solver only
/// sees a flat parameter vector and the residual vector it produces.
pub trait FunctionNtoM<T> {
    /// Number of parameters `N`.
    fn num_inputs(&self) -> usize;

    /// Number of residuals `M`.
    fn num_outputs(&self) -> usize;

    /// Evaluate the residuals for `input`, writing them into `output`.
    ///
    /// # Errors
    ///
    /// Implementations return [`OptimError::DimensionMismatch`] when `input.len()` differs from
    /// [`FunctionNtoM::num_inputs`] or `output.len()` from [`FunctionNtoM::num_outputs`].
    fn process(&self, input: &[T], output: &mut [T]) -> Result<(), OptimError>;

    /// Check the lengths of `input` and `output` against the function dimensions.
    fn check_dimensions(&self, input: &[T], output: &[T]) -> Result<(), OptimError> {
        if input.len() != self.num_inputs() {
            return Err(OptimError::DimensionMismatch {
                expected: self.num_inputs(),
                actual: input.len(),
            });
        }
        if output.len() != self.num_outputs() {
            return Err(OptimError::DimensionMismatch {
                expected: self.num_outputs(),
                actual: output.len(),
            });
        }
        Ok(())
    }
}
