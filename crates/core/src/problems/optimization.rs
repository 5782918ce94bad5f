use crate::Vector;

/// A scalar objective over `P` variables, minimized by gradient-based solvers.
///
/// Evaluation takes `&mut self` so implementations can reuse scratch space,
/// such as a trajectory buffer, across calls without interior mutability.
pub trait Objective<const P: usize> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the objective cannot be computed at `x`,
    /// for example because an underlying simulation failed.
    fn evaluate(&mut self, x: &Vector<P>) -> Result<f64, Self::Error>;

    /// Writes the gradient at `x` into `out`.
    ///
    /// `value` is the objective at `x`, already computed by the caller, so
    /// finite-difference implementations do not need to evaluate it again.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if any evaluation needed for the gradient fails.
    fn gradient(&mut self, x: &Vector<P>, value: f64, out: &mut Vector<P>)
    -> Result<(), Self::Error>;
}
