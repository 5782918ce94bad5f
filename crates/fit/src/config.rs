use epifit_solvers::{ode::NewtonConfig, optimization::cgm::Formula};
use serde::{Deserialize, Serialize};

/// Integration scheme used to simulate each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchemeKind {
    #[serde(rename = "fwe")]
    ExplicitEuler,

    #[serde(rename = "bwe")]
    ImplicitEuler,

    #[default]
    #[serde(rename = "heun")]
    Heun,
}

/// Minimizer used to search the rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    #[default]
    Bfgs,
    Cgm,
}

/// Settings for [`fit`](crate::fit).
///
/// Every field has a default, so an empty TOML document is a valid config:
///
/// ```toml
/// scheme = "heun"        # "fwe", "bwe" or "heun"
/// optimizer = "cgm"      # "bfgs" or "cgm"
/// formula = "polak-ribiere"
/// tolerance = 1e-10
/// max_iters = 500
/// max_step = 1.0
///
/// [newton]
/// max_iters = 50
/// tolerance = 1e-13
/// ```
///
/// `max_iters` and `max_step` override the optimizer defaults when present.
/// `formula` only applies to CGM and `newton` only to the implicit scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitConfig {
    pub scheme: SchemeKind,
    pub optimizer: OptimizerKind,
    pub formula: Formula,
    pub tolerance: f64,
    pub max_iters: Option<usize>,
    pub max_step: Option<f64>,
    pub newton: NewtonConfig,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeKind::default(),
            optimizer: OptimizerKind::default(),
            formula: Formula::default(),
            tolerance: 1e-10,
            max_iters: None,
            max_step: None,
            newton: NewtonConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: FitConfig = toml::from_str("").unwrap();
        assert_eq!(config, FitConfig::default());
        assert_eq!(config.scheme, SchemeKind::Heun);
        assert_eq!(config.optimizer, OptimizerKind::Bfgs);
    }

    #[test]
    fn parses_full_document() {
        let config: FitConfig = toml::from_str(
            r#"
            scheme = "bwe"
            optimizer = "cgm"
            formula = "polak-ribiere"
            tolerance = 1e-9
            max_iters = 500
            max_step = 1.0

            [newton]
            max_iters = 50
            tolerance = 1e-13
            "#,
        )
        .unwrap();

        assert_eq!(config.scheme, SchemeKind::ImplicitEuler);
        assert_eq!(config.optimizer, OptimizerKind::Cgm);
        assert_eq!(config.formula, Formula::PolakRibiere);
        assert_eq!(config.max_iters, Some(500));
        assert_eq!(config.max_step, Some(1.0));
        assert_eq!(config.newton, NewtonConfig::new(50, 1e-13).unwrap());
    }

    #[test]
    fn rejects_unknown_keys_and_schemes() {
        assert!(toml::from_str::<FitConfig>("schema = \"heun\"").is_err());
        assert!(toml::from_str::<FitConfig>("scheme = \"rk4\"").is_err());
    }
}
