/// How a line search ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Both conditions held after `halvings` halvings of the initial step.
    Accepted { step: f64, halvings: usize },

    /// The halving budget or the step floor was reached first.
    ///
    /// `step` is the last step tried, which callers may still take.
    Stalled { step: f64 },

    /// An observer stopped the search after a failed trial.
    Interrupted { step: f64 },
}

impl Outcome {
    /// Returns the step carried by this outcome.
    #[must_use]
    pub fn step(&self) -> f64 {
        match self {
            Self::Accepted { step, .. } | Self::Stalled { step } | Self::Interrupted { step } => {
                *step
            }
        }
    }
}
