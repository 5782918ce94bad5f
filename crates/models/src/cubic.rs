use epifit_core::{Matrix, Vector, VectorField};

/// `N` decoupled components relaxing toward evenly spaced targets:
///
/// ```text
/// x_i' = -10 (x_i - k_i)³,   k_i = 0.1 i,   x_i(0) = 0.01 (i + 1)
/// ```
///
/// Each component has the closed-form solution
/// `x_i(t) = k_i ± 1 / sqrt(20 t + 1 / (m_i - k_i)²)`, with `m_i = x_i(0)` and
/// the sign of `m_i - k_i`. The field is mildly stiff and has no parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicRelaxation<const N: usize = 50> {
    initial: Vector<N>,
}

impl<const N: usize> Default for CubicRelaxation<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CubicRelaxation<N> {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new() -> Self {
        Self {
            initial: Vector::from_fn(|i, _| 0.01 * (i + 1) as f64),
        }
    }

    /// Returns the exact state at time `t`, starting from the current initial
    /// condition.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn exact(&self, t: f64) -> Vector<N> {
        Vector::from_fn(|i, _| {
            let target = Self::target(i);
            let offset = self.initial[i] - target;
            if offset == 0.0 {
                target
            } else {
                target + offset.signum() / (20.0 * t + offset.powi(-2)).sqrt()
            }
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn target(i: usize) -> f64 {
        0.1 * i as f64
    }
}

impl<const N: usize> VectorField<N> for CubicRelaxation<N> {
    fn initial_condition(&self) -> Vector<N> {
        self.initial
    }

    fn set_initial_condition(&mut self, state: &Vector<N>) {
        self.initial = *state;
    }

    fn derivative_into(&self, state: &Vector<N>, out: &mut Vector<N>) {
        for (i, (x, dx)) in state.iter().zip(out.iter_mut()).enumerate() {
            *dx = -10.0 * (x - Self::target(i)).powi(3);
        }
    }

    fn jacobian(&self, state: &Vector<N>, out: &mut Matrix<N>) {
        out.fill(0.0);
        for i in 0..N {
            out[(i, i)] = -30.0 * (state[i] - Self::target(i)).powi(2);
        }
    }
}
