//! Nonlinear conjugate gradient minimization.
//!
//! # Algorithm
//!
//! Each iteration `k` evaluates the objective and gradient at `x`, then picks
//! a direction:
//!
//! - on a restart (`k` a multiple of the dimension `P`), `d = -g`
//! - otherwise `d = -g + β d_prev`, with β from the configured [`Formula`]
//!
//! After the line search, the relative step `α‖d‖ / ‖x‖` is compared with the
//! tolerance. A conjugate direction that looks converged is not trusted: the
//! solver searches again along `-g` and only stops if that step is also below
//! the tolerance.
//!
//! The default initial step of 0.01 is small. On badly scaled objectives the
//! curvature condition may never hold from it, every line search stalls, and
//! the tiny steps read as convergence. Raise it with
//! [`Config::with_max_step`] for such problems.

mod config;
mod formula;


pub use config::{Config, ConfigError};
pub use formula::Formula;

use epifit_core::{Objective, Observer, Vector};
use log::{debug, info, warn};

use super::{Action, Error, Event, Solution, Status, line_search::LineSearch, settle};

/// Minimizes `objective` with nonlinear conjugate gradients starting from `start`.
///
/// The observer receives an [`Event`] for every completed iteration, every
/// failed trial point, every stall, and every steepest descent retry, and may
/// stop the solver at any of them.
///
/// # Errors
///
/// Returns an error if the objective or its gradient fails at an iterate.
pub fn minimize<const P: usize, O, Obs>(
    objective: &mut O,
    start: Vector<P>,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<P>, Error>
where
    O: Objective<P>,
    Obs: for<'a> Observer<Event<'a, P>, Action>,
{
    let search = LineSearch::new(*config.line_search());
    let formula = config.formula();

    let mut x = start;
    let mut value = f64::NAN;
    let mut gradient = Vector::zeros();
    let mut direction = Vector::zeros();
    let mut stalls = 0;

    for iter in 0..config.max_iters() {
        let x_norm = x.norm();
        value = objective.evaluate(&x).map_err(Error::objective)?;
        let previous = gradient;
        objective
            .gradient(&x, value, &mut gradient)
            .map_err(Error::objective)?;

        let restart = iter % P == 0;
        direction = if restart {
            -gradient
        } else {
            -gradient + direction * formula.beta(&gradient, &previous)
        };

        let mut line_search = |direction: &Vector<P>, observer: &mut Obs, stalls: &mut usize| {
            let outcome = search.search(
                objective,
                &x,
                direction,
                value,
                &gradient,
                config.max_step(),
                |step, error| observer.observe(&Event::TrialFailed { iter, step, error }),
            );
            settle::<P, _>(outcome, iter, stalls, observer)
        };

        let Some(mut step) = line_search(&direction, &mut observer, &mut stalls) else {
            return Ok(Solution::new(Status::StoppedByObserver, x, value, iter, stalls));
        };
        let mut residual = step * direction.norm() / x_norm;

        if residual < config.tolerance() && !restart {
            if let Some(Action::StopEarly) =
                observer.observe(&Event::SteepestDescentRetry { iter })
            {
                return Ok(Solution::new(Status::StoppedByObserver, x, value, iter, stalls));
            }
            direction = -gradient;
            let Some(retry) = line_search(&direction, &mut observer, &mut stalls) else {
                return Ok(Solution::new(Status::StoppedByObserver, x, value, iter, stalls));
            };
            step = retry;
            residual = step * direction.norm() / x_norm;
        }
        debug!("cgm iter {iter}: f = {value:e}, residual = {residual:e}");

        let event = Event::Iterated {
            iter,
            x: &x,
            objective: value,
            step,
            residual,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution::new(Status::StoppedByObserver, x, value, iter + 1, stalls));
        }

        if residual < config.tolerance() {
            info!("cgm converged after {} iterations, f = {value:e}", iter + 1);
            return Ok(Solution::new(Status::Converged, x, value, iter + 1, stalls));
        }

        x += direction * step;
    }

    if config.max_iters() > 0 {
        value = objective.evaluate(&x).map_err(Error::objective)?;
    }
    warn!(
        "cgm reached {} iterations without converging, f = {value:e}",
        config.max_iters()
    );
    Ok(Solution::new(Status::MaxIters, x, value, config.max_iters(), stalls))
}

/// Minimizes `objective` with nonlinear conjugate gradients without observer
/// support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the objective or its gradient fails at an iterate.
pub fn minimize_unobserved<const P: usize, O>(
    objective: &mut O,
    start: Vector<P>,
    config: &Config,
) -> Result<Solution<P>, Error>
where
    O: Objective<P>,
{
    minimize(objective, start, config, ())
}
