use thiserror::Error;

/// Errors from parsing observation and parameter text sources.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("source is empty")]
    Empty,

    #[error("line {line}: expected {expected} values, found {found}")]
    Arity {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: cannot parse `{token}` as a number")]
    Number { line: usize, token: String },

    #[error("line {line}: value is not finite")]
    NonFinite { line: usize },

    #[error("dimension {found} does not match the model dimension {expected}")]
    Dimension { expected: usize, found: usize },

    #[error("header declares {expected} days, found {found}")]
    Days { expected: usize, found: usize },

    #[error("at least one day of observations is required")]
    NoDays,

    #[error("expected 5 rates optionally followed by S0 and I0, found {0} values")]
    Guess(usize),
}

/// Parses every token on a line as a number.
pub(crate) fn numbers<'a, T>(
    line: usize,
    tokens: impl Iterator<Item = &'a str>,
) -> Result<Vec<T>, SourceError>
where
    T: std::str::FromStr,
{
    tokens
        .map(|token| {
            token.parse().map_err(|_| SourceError::Number {
                line,
                token: token.to_owned(),
            })
        })
        .collect()
}

/// Rejects NaN and infinities.
pub(crate) fn finite(line: usize, values: &[f64]) -> Result<(), SourceError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(SourceError::NonFinite { line })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_reports_bad_token() {
        assert_eq!(
            numbers::<f64>(1, " 1.5  -2e3\t0 ".split_whitespace()),
            Ok(vec![1.5, -2e3, 0.0])
        );
        assert_eq!(
            numbers::<usize>(7, "3 x".split_whitespace()),
            Err(SourceError::Number {
                line: 7,
                token: "x".into()
            })
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(finite(2, &[1.0, f64::INFINITY]), Err(SourceError::NonFinite { line: 2 }));
        assert!(finite(2, &[1.0, 0.0]).is_ok());
    }
}
