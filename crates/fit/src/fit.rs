use epifit_core::{Parameterized, VectorField};
use epifit_models::{Rates, Siqrd};
use epifit_solvers::{
    ode::{
        ExplicitEuler, Heun, ImplicitEuler, NewtonConfig, Scheme, SolveError, StepGrid,
        Trajectory, TrajectorySolver,
    },
    optimization::{Solution, bfgs, cgm},
};
use log::info;

use crate::{Error, FitConfig, Guess, LeastSquares, Observations, OptimizerKind, RATIO, SchemeKind};

/// The outcome of [`fit`].
#[derive(Debug, Clone)]
pub struct Fit {
    /// Rates at the reported minimizer.
    pub rates: Rates,

    /// Optimizer result, including status and iteration counts.
    pub solution: Solution<5>,

    /// Grid of the final simulation: one day past the last observation.
    pub grid: StepGrid,

    /// The fitted model simulated from the day 0 observation over `grid`.
    pub trajectory: Trajectory<5>,
}

/// Fits SIQRD rates to `observations`, starting from `guess`.
///
/// The model starts from the day 0 observation; any outbreak in `guess` is
/// ignored. After the search the fitted model is simulated once more on the
/// same step size, through one day past the last observation.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the observations have
/// no population, the objective fails at an iterate, or the final
/// simulation fails.
pub fn fit(
    config: &FitConfig,
    observations: &Observations<5>,
    guess: &Guess,
) -> Result<Fit, Error> {
    match config.scheme {
        SchemeKind::ExplicitEuler => {
            fit_with(config, observations, guess, <ExplicitEuler as Scheme<5>>::from_grid)
        }
        SchemeKind::Heun => fit_with(config, observations, guess, <Heun as Scheme<5>>::from_grid),
        SchemeKind::ImplicitEuler => {
            let newton = NewtonConfig::new(config.newton.max_iters(), config.newton.tolerance())?;
            fit_with(config, observations, guess, |grid| {
                ImplicitEuler::<5>::with_config(grid, newton)
            })
        }
    }
}

fn fit_with<S, B>(
    config: &FitConfig,
    observations: &Observations<5>,
    guess: &Guess,
    build: B,
) -> Result<Fit, Error>
where
    S: Scheme<5>,
    B: Fn(StepGrid) -> S,
{
    info!(
        "fitting {} days with {} and {:?}",
        observations.len(),
        S::NAME,
        config.optimizer
    );

    let model = Siqrd::new(guess.rates, *observations.initial());
    let mut objective = LeastSquares::with_scheme(model, observations.clone(), &build)?;
    let start = guess.rates.to_vector();

    let solution = match config.optimizer {
        OptimizerKind::Bfgs => {
            let mut settings = bfgs::Config::new(config.tolerance)?;
            if let Some(max_iters) = config.max_iters {
                settings = settings.with_max_iters(max_iters);
            }
            if let Some(max_step) = config.max_step {
                settings = settings.with_max_step(max_step)?;
            }
            bfgs::minimize_unobserved(&mut objective, start, &settings)?
        }
        OptimizerKind::Cgm => {
            let mut settings = cgm::Config::new(config.tolerance)?.with_formula(config.formula);
            if let Some(max_iters) = config.max_iters {
                settings = settings.with_max_iters(max_iters);
            }
            if let Some(max_step) = config.max_step {
                settings = settings.with_max_step(max_step)?;
            }
            cgm::minimize_unobserved(&mut objective, start, &settings)?
        }
    };
    info!(
        "{:?} after {} iterations ({} stalled line searches), objective {:e}",
        solution.status, solution.iters, solution.stalls, solution.objective
    );

    let mut model = objective.into_field();
    model.set_parameters(&solution.x);
    model.set_initial_condition(observations.initial());

    let days = observations.len();
    #[allow(clippy::cast_precision_loss)]
    let grid = StepGrid::new(days * RATIO, days as f64)?;
    let trajectory = simulate_with(&model, build(grid))?;

    Ok(Fit {
        rates: Rates::from_vector(&solution.x),
        solution,
        grid,
        trajectory,
    })
}

/// Simulates `field` from its initial condition across `grid` with scheme `S`.
///
/// # Errors
///
/// Returns an error if the scheme fails to take a step.
pub fn simulate<S, F, const N: usize>(
    field: &F,
    grid: StepGrid,
) -> Result<Trajectory<N>, SolveError>
where
    S: Scheme<N>,
    F: VectorField<N>,
{
    simulate_with(field, S::from_grid(grid))
}

/// Simulates `field` from its initial condition with an already configured scheme.
///
/// # Errors
///
/// Returns an error if the scheme fails to take a step.
pub fn simulate_with<S, F, const N: usize>(
    field: &F,
    scheme: S,
) -> Result<Trajectory<N>, SolveError>
where
    S: Scheme<N>,
    F: VectorField<N>,
{
    let mut solver = TrajectorySolver::new(scheme);
    let mut trajectory = solver.buffer();
    solver.solve(field, &mut trajectory)?;
    Ok(trajectory)
}
