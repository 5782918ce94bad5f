//! Gradient-based minimization of an [`Objective`].
//!
//! Both minimizers share a backtracking [`line_search`] with relaxed Wolfe
//! conditions, report progress through the same [`Event`] type, and return the
//! same [`Solution`].
//!
//! # Solvers
//!
//! - [`bfgs`]: quasi-Newton with a dense Hessian approximation
//! - [`cgm`]: nonlinear conjugate gradient with periodic restarts
//!
//! # Observer Events
//!
//! - [`Event::Iterated`]: an outer iteration finished its line search
//! - [`Event::TrialFailed`]: the objective failed at a line-search trial point
//! - [`Event::LineSearchStalled`]: the line search ran out of halvings
//! - [`Event::SteepestDescentRetry`]: CGM fell back to steepest descent
//!
//! Observers can return [`Action::StopEarly`] from any event.
//!
//! [`Objective`]: epifit_core::Objective

mod action;
mod error;
mod event;
mod finite_difference;
mod solution;

pub mod bfgs;
pub mod cgm;
pub mod line_search;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use finite_difference::forward_difference;
pub use solution::{Solution, Status};

use epifit_core::Observer;
use log::{debug, warn};

use line_search::Outcome;

/// Bookkeeping shared by the minimizers for each line-search outcome.
///
/// Returns the step to take, or `None` if an observer asked to stop.
fn settle<const P: usize, Obs>(
    outcome: Outcome,
    iter: usize,
    stalls: &mut usize,
    observer: &mut Obs,
) -> Option<f64>
where
    Obs: for<'a> Observer<Event<'a, P>, Action>,
{
    match outcome {
        Outcome::Accepted { step, halvings } => {
            debug!("iter {iter}: accepted step {step:e} after {halvings} halvings");
            Some(step)
        }
        Outcome::Stalled { step } => {
            *stalls += 1;
            warn!("iter {iter}: line search stalled at step {step:e}");
            match observer.observe(&Event::LineSearchStalled { iter, step }) {
                Some(Action::StopEarly) => None,
                None => Some(step),
            }
        }
        Outcome::Interrupted { .. } => None,
    }
}
