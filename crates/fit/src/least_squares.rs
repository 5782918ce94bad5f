use epifit_core::{Objective, Parameterized, Vector, VectorField};
use epifit_solvers::{
    ode::{Scheme, SolveError, StepGrid, Trajectory, TrajectorySolver},
    optimization::forward_difference,
};
use log::trace;

use crate::{Error, Observations};

/// Integration steps per observed day.
pub const RATIO: usize = 8;

/// Perturbation used by the forward-difference gradient.
pub const GRADIENT_STEP: f64 = 1e-5;

/// Normalized least-squares mismatch between a simulated model and observations.
///
/// For parameters `p`, the model is integrated from the day 0 observation over
/// `days - 1` days with [`RATIO`] steps per day, and
///
/// ```text
/// L(p) = Σ_d ‖obs_d - x(d)‖² / (days · (Σ obs_0)²)
/// ```
///
/// The trajectory buffer is allocated once and reused by every evaluation.
#[derive(Debug, Clone)]
pub struct LeastSquares<F, S, const N: usize> {
    field: F,
    solver: TrajectorySolver<S>,
    trajectory: Trajectory<N>,
    observations: Observations<N>,
    scale: f64,
}

impl<F, S, const N: usize> LeastSquares<F, S, N>
where
    F: VectorField<N>,
    S: Scheme<N>,
{
    /// Builds the objective with the scheme's default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the day 0 observation has a zero or non-finite
    /// total.
    pub fn new(field: F, observations: Observations<N>) -> Result<Self, Error> {
        Self::with_scheme(field, observations, <S as Scheme<N>>::from_grid)
    }

    /// Builds the objective with a scheme constructed by `build` for the
    /// fine grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the day 0 observation has a zero or non-finite
    /// total.
    pub fn with_scheme(
        field: F,
        observations: Observations<N>,
        build: impl FnOnce(StepGrid) -> S,
    ) -> Result<Self, Error> {
        let days = observations.len();
        let population = observations.initial().sum();
        #[allow(clippy::cast_precision_loss)]
        let scale = days as f64 * population * population;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::Scale(scale));
        }

        #[allow(clippy::cast_precision_loss)]
        let grid = StepGrid::new((days - 1) * RATIO, (days - 1) as f64)?;
        let solver = TrajectorySolver::new(build(grid));
        let trajectory = solver.buffer();

        Ok(Self {
            field,
            solver,
            trajectory,
            observations,
            scale,
        })
    }

    #[must_use]
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Consumes the objective and returns the model with its last parameters.
    #[must_use]
    pub fn into_field(self) -> F {
        self.field
    }

    #[must_use]
    pub fn observations(&self) -> &Observations<N> {
        &self.observations
    }

    /// Returns the fine grid the model is integrated on.
    #[must_use]
    pub fn grid(&self) -> StepGrid {
        self.solver.scheme().grid()
    }

    /// Returns the trajectory from the most recent evaluation.
    #[must_use]
    pub fn trajectory(&self) -> &Trajectory<N> {
        &self.trajectory
    }

    /// Returns the normalization `days · (Σ obs_0)²`.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl<F, S, const N: usize, const P: usize> Objective<P> for LeastSquares<F, S, N>
where
    F: VectorField<N> + Parameterized<P>,
    S: Scheme<N>,
{
    type Error = SolveError;

    fn evaluate(&mut self, x: &Vector<P>) -> Result<f64, Self::Error> {
        self.field.set_parameters(x);
        self.field.set_initial_condition(self.observations.initial());
        self.solver.solve(&self.field, &mut self.trajectory)?;

        let total: f64 = self
            .observations
            .iter()
            .enumerate()
            .map(|(day, observed)| (observed - self.trajectory.column(day * RATIO)).norm_squared())
            .sum();

        let value = total / self.scale;
        trace!("least squares at {x:?}: {value:e}");
        Ok(value)
    }

    fn gradient(
        &mut self,
        x: &Vector<P>,
        value: f64,
        out: &mut Vector<P>,
    ) -> Result<(), Self::Error> {
        forward_difference(
            |probe: &Vector<P>| <Self as Objective<P>>::evaluate(&mut *self, probe),
            x,
            value,
            GRADIENT_STEP,
            out,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use epifit_core::Matrix;
    use epifit_models::{Rates, Siqrd};
    use epifit_solvers::ode::{ExplicitEuler, Heun};

    use crate::simulate;

    fn rates() -> Rates {
        Rates {
            alpha: 0.02,
            beta: 0.5,
            gamma: 0.1,
            delta: 0.05,
            mu: 0.02,
        }
    }

    fn synthetic(days: usize) -> Observations<5> {
        let model = Siqrd::new(rates(), Vector::<5>::new(990.0, 10.0, 0.0, 0.0, 0.0));
        let grid = StepGrid::new((days - 1) * RATIO, (days - 1) as f64).unwrap();
        let trajectory = simulate::<Heun, _, 5>(&model, grid).unwrap();
        let states = (0..days)
            .map(|day| trajectory.column(day * RATIO).into_owned())
            .collect();
        Observations::new(states).unwrap()
    }

    fn objective(days: usize) -> LeastSquares<Siqrd, Heun, 5> {
        let observations = synthetic(days);
        let model = Siqrd::new(rates(), *observations.initial());
        LeastSquares::new(model, observations).unwrap()
    }

    /// x' = -k x on one component, with k the single parameter.
    struct Decay {
        rate: f64,
        initial: Vector<1>,
    }

    impl VectorField<1> for Decay {
        fn initial_condition(&self) -> Vector<1> {
            self.initial
        }

        fn set_initial_condition(&mut self, state: &Vector<1>) {
            self.initial = *state;
        }

        fn derivative_into(&self, state: &Vector<1>, out: &mut Vector<1>) {
            *out = state * -self.rate;
        }

        fn jacobian(&self, _state: &Vector<1>, out: &mut Matrix<1>) {
            *out = Matrix::<1>::new(-self.rate);
        }
    }

    impl Parameterized<1> for Decay {
        fn parameters(&self) -> Vector<1> {
            Vector::<1>::new(self.rate)
        }

        fn set_parameters(&mut self, parameters: &Vector<1>) {
            self.rate = parameters[0];
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn vanishes_on_exact_reproduction() {
        let mut objective = objective(20);
        assert_eq!(objective.evaluate(&rates().to_vector()).unwrap(), 0.0);
    }

    #[test]
    fn positive_away_from_the_generating_rates() {
        let mut objective = objective(20);
        let truth = rates().to_vector();

        for i in 0..5 {
            let mut shifted = truth;
            shifted[i] *= 1.2;
            assert!(objective.evaluate(&shifted).unwrap() > 0.0);
        }
        assert!(objective.evaluate(&(truth * 0.0)).unwrap() > 0.0);
    }

    #[test]
    fn matches_hand_computed_value() {
        // Explicit Euler with 8 steps per day gives x(1) = (1 - k/8)⁸ x(0).
        let observations = Observations::new(vec![
            Vector::<1>::new(2.0),
            Vector::<1>::new(1.0),
        ])
        .unwrap();
        let field = Decay {
            rate: 0.0,
            initial: Vector::zeros(),
        };
        let mut objective = LeastSquares::<_, ExplicitEuler, 1>::new(field, observations).unwrap();

        let k = 0.5;
        let predicted = 2.0 * (1.0 - k / 8.0_f64).powi(8);
        let expected = (1.0 - predicted).powi(2) / (2.0 * 4.0);

        assert_relative_eq!(
            objective.evaluate(&Vector::<1>::new(k)).unwrap(),
            expected,
            max_relative = 1e-12
        );
        assert_eq!(objective.trajectory().ncols(), 9);
        assert_abs_diff_eq!(objective.scale(), 8.0);
    }

    #[test]
    fn gradient_points_uphill() {
        let observations = Observations::new(vec![
            Vector::<1>::new(2.0),
            Vector::<1>::new(1.0),
            Vector::<1>::new(0.5),
        ])
        .unwrap();
        let field = Decay {
            rate: 0.0,
            initial: Vector::zeros(),
        };
        let mut objective = LeastSquares::<_, Heun, 1>::new(field, observations).unwrap();

        // The best rate is near ln 2; check both sides against a central difference.
        for k in [0.3, 1.2] {
            let x = Vector::<1>::new(k);
            let value = objective.evaluate(&x).unwrap();
            let mut gradient = Vector::zeros();
            objective.gradient(&x, value, &mut gradient).unwrap();

            let h = 1e-6;
            let central = (objective.evaluate(&Vector::<1>::new(k + h)).unwrap()
                - objective.evaluate(&Vector::<1>::new(k - h)).unwrap())
                / (2.0 * h);
            assert!(gradient.dot(&Vector::<1>::new(central)) > 0.0);
            assert_relative_eq!(gradient[0], central, max_relative = 1e-3);
        }
    }

    #[test]
    fn gradient_restores_parameters_between_coordinates() {
        let mut objective = objective(10);
        let x = rates().to_vector() * 1.1;
        let value = objective.evaluate(&x).unwrap();

        let mut gradient = Vector::zeros();
        objective.gradient(&x, value, &mut gradient).unwrap();

        let mut expected = Vector::<5>::zeros();
        for i in 0..5 {
            let mut probe = x;
            probe[i] += GRADIENT_STEP;
            expected[i] = (objective.evaluate(&probe).unwrap() - value) / GRADIENT_STEP;
        }
        assert_relative_eq!(gradient, expected, epsilon = 1e-15);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn rejects_zero_population() {
        let observations = Observations::new(vec![Vector::<5>::zeros(); 3]).unwrap();
        let model = Siqrd::new(rates(), Vector::zeros());

        let error = LeastSquares::<_, Heun, 5>::new(model, observations).unwrap_err();
        assert!(matches!(error, Error::Scale(s) if s == 0.0));
    }

    #[test]
    fn single_day_is_trivially_fitted() {
        let observations =
            Observations::new(vec![Vector::<5>::new(990.0, 10.0, 0.0, 0.0, 0.0)]).unwrap();
        let model = Siqrd::new(rates(), Vector::zeros());
        let mut objective = LeastSquares::<_, Heun, 5>::new(model, observations).unwrap();

        assert_abs_diff_eq!(objective.evaluate(&rates().to_vector()).unwrap(), 0.0);
        assert_eq!(objective.grid().steps(), 0);
    }
}
