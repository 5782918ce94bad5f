use epifit_core::{Vector, VectorField};

use super::{Error, Scheme, StepGrid};

/// Heun's method, a two-stage predictor-corrector.
///
/// ```text
/// p   = old + dt * f(old)
/// new = old + dt * (f(old) + f(p)) / 2
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heun {
    grid: StepGrid,
}

impl<const N: usize> Scheme<N> for Heun {
    const NAME: &'static str = "heun";

    fn from_grid(grid: StepGrid) -> Self {
        Self { grid }
    }

    fn grid(&self) -> StepGrid {
        self.grid
    }

    fn advance<F: VectorField<N>>(
        &mut self,
        field: &F,
        old: &Vector<N>,
        new: &mut Vector<N>,
    ) -> Result<(), Error> {
        let dt = self.grid.dt();

        let slope = field.derivative(old);
        let predictor = old + slope * dt;
        field.derivative_into(&predictor, new);

        *new = old + (slope + *new) * (0.5 * dt);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use epifit_core::Matrix;

    /// x' = -x, scalar.
    struct Decay;

    impl VectorField<1> for Decay {
        fn initial_condition(&self) -> Vector<1> {
            Vector::<1>::new(1.0)
        }

        fn set_initial_condition(&mut self, _state: &Vector<1>) {}

        fn derivative_into(&self, state: &Vector<1>, out: &mut Vector<1>) {
            *out = -state;
        }

        fn jacobian(&self, _state: &Vector<1>, out: &mut Matrix<1>) {
            *out = Matrix::<1>::new(-1.0);
        }
    }

    #[test]
    fn matches_second_order_taylor_step_on_linear_decay() {
        // For a linear field Heun reproduces 1 - h + h²/2 exactly.
        let h = 0.1;
        let mut scheme = <Heun as Scheme<1>>::from_grid(StepGrid::new(1, h).unwrap());

        let old = Vector::<1>::new(2.0);
        let mut new = Vector::zeros();
        scheme.advance(&Decay, &old, &mut new).unwrap();

        assert_relative_eq!(new[0], 2.0 * (1.0 - h + 0.5 * h * h), epsilon = 1e-15);
    }
}
