use epifit_core::Vector;

/// Indicates why the minimizer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The relative step fell below the tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a minimization.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<const P: usize> {
    /// Final solver status.
    pub status: Status,

    /// Best estimate of the minimizer.
    pub x: Vector<P>,

    /// Objective value at `x`.
    pub objective: f64,

    /// Number of outer iterations performed.
    pub iters: usize,

    /// Number of line searches that stalled.
    pub stalls: usize,
}

impl<const P: usize> Solution<P> {
    pub(super) fn new(
        status: Status,
        x: Vector<P>,
        objective: f64,
        iters: usize,
        stalls: usize,
    ) -> Self {
        Self {
            status,
            x,
            objective,
            iters,
            stalls,
        }
    }
}
