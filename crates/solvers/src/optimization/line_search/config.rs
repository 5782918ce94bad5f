use thiserror::Error;

/// Configuration for the backtracking line search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub(super) c1: f64,
    pub(super) c2: f64,
    pub(super) max_halvings: usize,
    pub(super) min_step: f64,
}

/// Errors that can occur when validating a line search config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("constants must satisfy 0 < c1 < c2 < 1")]
    Constants,

    #[error("min_step must be finite and non-negative")]
    MinStep,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            c1: 1e-4,
            c2: 0.9,
            max_halvings: 100,
            min_step: 0.0,
        }
    }
}

impl Config {
    /// Creates a new config with validated constants.
    ///
    /// # Errors
    ///
    /// Returns an error unless `0 < c1 < c2 < 1` and `min_step` is finite and
    /// non-negative.
    pub fn new(c1: f64, c2: f64, max_halvings: usize, min_step: f64) -> Result<Self, ConfigError> {
        if !(0.0 < c1 && c1 < c2 && c2 < 1.0) {
            return Err(ConfigError::Constants);
        }
        Self {
            c1,
            c2,
            max_halvings,
            min_step: 0.0,
        }
        .with_min_step(min_step)
    }

    /// Returns a copy with a different step floor.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_step` is negative or non-finite.
    pub fn with_min_step(self, min_step: f64) -> Result<Self, ConfigError> {
        if !min_step.is_finite() || min_step < 0.0 {
            return Err(ConfigError::MinStep);
        }
        Ok(Self { min_step, ..self })
    }

    /// Returns the sufficient-decrease constant.
    #[must_use]
    pub fn c1(&self) -> f64 {
        self.c1
    }

    /// Returns the curvature constant.
    #[must_use]
    pub fn c2(&self) -> f64 {
        self.c2
    }

    /// Returns the maximum number of halvings.
    #[must_use]
    pub fn max_halvings(&self) -> usize {
        self.max_halvings
    }

    /// Returns the step floor; the search stops once the step is not above it.
    #[must_use]
    pub fn min_step(&self) -> f64 {
        self.min_step
    }
}
