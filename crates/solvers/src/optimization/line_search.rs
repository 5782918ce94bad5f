//! Backtracking line search with relaxed Wolfe conditions.
//!
//! Starting from `initial_step`, the search halves the step until the trial
//! point `x + αd` satisfies both
//!
//! ```text
//! f(x + αd)       <= f(x) + c1 α (g·d)     (Armijo)
//! -(d · g(x + αd)) <= -c2 (g·d)              (curvature)
//! ```
//!
//! or the halving budget runs out, or the step drops to `min_step`. A trial
//! where the objective fails is rejected like one that violates Armijo.

mod config;
mod outcome;

pub use config::{Config, ConfigError};
pub use outcome::Outcome;

use epifit_core::{Objective, Vector};
use log::warn;

use super::Action;

/// A configured line search.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineSearch {
    config: Config,
}

impl LineSearch {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Searches along `direction` from `position`.
    ///
    /// `value` and `gradient` are the objective and its gradient at `position`.
    /// Whenever the objective fails at a trial point, `on_failure` receives the
    /// trial step and the error and may return [`Action::StopEarly`].
    ///
    /// The returned step never exceeds `initial_step`. An accepted step always
    /// satisfies the Armijo inequality.
    #[allow(clippy::too_many_arguments)]
    pub fn search<const P: usize, O, F>(
        &self,
        objective: &mut O,
        position: &Vector<P>,
        direction: &Vector<P>,
        value: f64,
        gradient: &Vector<P>,
        initial_step: f64,
        mut on_failure: F,
    ) -> Outcome
    where
        O: Objective<P>,
        F: FnMut(f64, &O::Error) -> Option<Action>,
    {
        let Config {
            c1,
            c2,
            max_halvings,
            min_step,
        } = self.config;

        let slope = direction.dot(gradient);
        let curvature_bound = -c2 * slope;
        let mut trial_gradient = Vector::zeros();
        let mut step = initial_step;

        for halvings in 0..max_halvings {
            if step <= min_step {
                return Outcome::Stalled { step };
            }

            let trial = position + direction * step;
            let accepted = match Self::try_point(
                objective,
                &trial,
                value + c1 * step * slope,
                &mut trial_gradient,
            ) {
                Ok(true) => -direction.dot(&trial_gradient) <= curvature_bound,
                Ok(false) => false,
                Err(error) => {
                    warn!("line search trial at step {step:e} failed: {error}");
                    if let Some(Action::StopEarly) = on_failure(step, &error) {
                        return Outcome::Interrupted { step };
                    }
                    false
                }
            };

            if accepted {
                return Outcome::Accepted { step, halvings };
            }
            step *= 0.5;
        }

        Outcome::Stalled { step }
    }

    /// Evaluates a trial point and, if it passes Armijo, its gradient.
    fn try_point<const P: usize, O: Objective<P>>(
        objective: &mut O,
        trial: &Vector<P>,
        armijo_bound: f64,
        trial_gradient: &mut Vector<P>,
    ) -> Result<bool, O::Error> {
        let trial_value = objective.evaluate(trial)?;
        if trial_value <= armijo_bound {
            objective.gradient(trial, trial_value, trial_gradient)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
