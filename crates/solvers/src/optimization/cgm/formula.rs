use epifit_core::Vector;

/// Rule for the conjugacy coefficient β in `d = -g + β d_prev`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Formula {
    /// `β = ‖g‖² / ‖g_prev‖²`
    #[default]
    FletcherReeves,

    /// `β = g·(g - g_prev) / ‖g_prev‖²`
    PolakRibiere,
}

impl Formula {
    /// Computes β from the current and previous gradients.
    #[must_use]
    pub fn beta<const P: usize>(self, gradient: &Vector<P>, previous: &Vector<P>) -> f64 {
        let denominator = previous.norm_squared();
        match self {
            Self::FletcherReeves => gradient.norm_squared() / denominator,
            Self::PolakRibiere => gradient.dot(&(gradient - previous)) / denominator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn coefficients_match_definitions() {
        let gradient = Vector::<2>::new(1.0, 2.0);
        let previous = Vector::<2>::new(2.0, 0.0);

        assert_relative_eq!(Formula::FletcherReeves.beta(&gradient, &previous), 5.0 / 4.0);
        assert_relative_eq!(Formula::PolakRibiere.beta(&gradient, &previous), 3.0 / 4.0);
    }
}
