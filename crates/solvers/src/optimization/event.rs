use epifit_core::Vector;

/// Events emitted by the minimizers.
#[derive(Debug)]
pub enum Event<'a, const P: usize> {
    /// An outer iteration completed its line search.
    Iterated {
        iter: usize,

        /// The point the iteration started from.
        x: &'a Vector<P>,

        /// Objective value at `x`.
        objective: f64,

        /// The step chosen by the line search.
        step: f64,

        /// `step * ‖d‖ / ‖x‖`, compared against the tolerance.
        residual: f64,
    },

    /// The objective failed at a line-search trial point.
    ///
    /// The trial is rejected and the step halved unless the observer stops.
    TrialFailed {
        iter: usize,
        step: f64,
        error: &'a (dyn std::error::Error + 'static),
    },

    /// The line search exhausted its halvings without satisfying both
    /// conditions. The last trial step is used anyway.
    LineSearchStalled { iter: usize, step: f64 },

    /// CGM discarded a converged conjugate direction and retried along the
    /// negative gradient.
    SteepestDescentRetry { iter: usize },
}

impl<const P: usize> Event<'_, P> {
    /// Returns the iteration that produced this event.
    #[must_use]
    pub fn iter(&self) -> usize {
        match self {
            Self::Iterated { iter, .. }
            | Self::TrialFailed { iter, .. }
            | Self::LineSearchStalled { iter, .. }
            | Self::SteepestDescentRetry { iter } => *iter,
        }
    }
}
