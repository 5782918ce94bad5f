//! BFGS quasi-Newton minimization.
//!
//! # Algorithm
//!
//! The solver keeps a dense approximation `H` of the Hessian, starting from
//! the identity. Each iteration:
//!
//! 1. Solves `H d = -g` by LU factorization for the search direction.
//! 2. Runs the [line search](crate::optimization::line_search) along `d`
//!    from the configured maximum step.
//! 3. Stops if the relative step `α‖d‖ / ‖x‖` is below the tolerance.
//! 4. Otherwise moves to `x + αd`, re-evaluates the gradient, and updates
//!
//! ```text
//! H += -(H d)(Hᵀ d)ᵀ / ((Hᵀ d)·d) + y yᵀ / ((d·y) α)      where y = g_new - g_old
//! ```
//!
//! The update is written in terms of the direction `d` rather than the step
//! `αd`. The two agree when `H` is symmetric, which it stays only up to
//! rounding, and the update applies `Hᵀd` where the textbook form has `Hd`.
//!
//! A stalled line search is counted and reported, and its last step is
//! taken anyway.

mod config;


pub use config::{Config, ConfigError};

use epifit_core::{Const, DimMin, Matrix, Objective, Observer, Vector, lu_solve_in_place};
use log::{debug, info, warn};

use super::{Action, Error, Event, Solution, Status, line_search::LineSearch, settle};

/// Minimizes `objective` with BFGS starting from `start`.
///
/// The observer receives an [`Event`] for every completed line search, every
/// failed trial point, and every stall, and may stop the solver at any of them.
///
/// # Errors
///
/// Returns an error if the objective or its gradient fails at an accepted
/// point, or if the Hessian approximation becomes singular.
pub fn minimize<const P: usize, O, Obs>(
    objective: &mut O,
    start: Vector<P>,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<P>, Error>
where
    O: Objective<P>,
    Obs: for<'a> Observer<Event<'a, P>, Action>,
    Const<P>: DimMin<Const<P>, Output = Const<P>>,
{
    let search = LineSearch::new(*config.line_search());

    let mut x = start;
    let mut value = objective.evaluate(&x).map_err(Error::objective)?;
    let mut gradient = Vector::zeros();
    objective
        .gradient(&x, value, &mut gradient)
        .map_err(Error::objective)?;

    let mut hessian = Matrix::<P>::identity();
    let mut stalls = 0;

    for iter in 0..config.max_iters() {
        let mut direction = -gradient;
        if !lu_solve_in_place(hessian, &mut direction) {
            return Err(Error::SingularHessian { iter });
        }

        let outcome = search.search(
            objective,
            &x,
            &direction,
            value,
            &gradient,
            config.max_step(),
            |step, error| observer.observe(&Event::TrialFailed { iter, step, error }),
        );
        let Some(step) = settle::<P, _>(outcome, iter, &mut stalls, &mut observer) else {
            return Ok(Solution::new(Status::StoppedByObserver, x, value, iter, stalls));
        };

        let residual = step * direction.norm() / x.norm();
        debug!("bfgs iter {iter}: f = {value:e}, residual = {residual:e}");

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
            info!("bfgs converged after {} iterations, f = {value:e}", iter + 1);
            return Ok(Solution::new(Status::Converged, x, value, iter + 1, stalls));
        }

        x += direction * step;
        let previous = gradient;
        value = objective.evaluate(&x).map_err(Error::objective)?;
        objective
            .gradient(&x, value, &mut gradient)
            .map_err(Error::objective)?;

        let y = gradient - previous;
        let hs = hessian * direction;
        let sh = hessian.tr_mul(&direction);
        hessian += -(hs * sh.transpose()) / sh.dot(&direction)
            + (y * y.transpose()) / (direction.dot(&y) * step);
    }

    warn!(
        "bfgs reached {} iterations without converging, f = {value:e}",
        config.max_iters()
    );
    Ok(Solution::new(Status::MaxIters, x, value, config.max_iters(), stalls))
}

/// Minimizes `objective` with BFGS without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the objective or its gradient fails at an accepted
/// point, or if the Hessian approximation becomes singular.
pub fn minimize_unobserved<const P: usize, O>(
    objective: &mut O,
    start: Vector<P>,
    config: &Config,
) -> Result<Solution<P>, Error>
where
    O: Objective<P>,
    Const<P>: DimMin<Const<P>, Output = Const<P>>,
{
    minimize(objective, start, config, ())
}
