//! # Input Normalization Module
//!
//! Turns user-typed math text into the syntax the expression parser
//! expects. Users coming from other tools write exponentiation as `**`;
//! the parser speaks `^`. Equations may be written with an explicit `=`
//! sign or as a bare expression that is implicitly equated to zero; either
//! way the solver receives a single zero-normalized expression.

use crate::solver::error::SolverError;

/// Rewrites an expression into parser syntax: `**` becomes `^` and
/// surrounding whitespace is dropped.
pub fn normalize_expression(input: &str) -> String {
    input.trim().replace("**", "^")
}

/// Rewrites an equation into a single expression equal to zero.
///
/// `lhs = rhs` becomes `(lhs) - (rhs)`; input without an `=` sign is
/// already in that form. More than one `=` sign is rejected.
pub fn normalize_equation(input: &str) -> Result<String, SolverError> {
    let normalized = normalize_expression(input);
    let mut sides = normalized.split('=');
    let lhs = sides.next().unwrap_or_default().trim();
    match (sides.next(), sides.next()) {
        (None, _) => Ok(lhs.to_string()),
        (Some(rhs), None) => {
            let rhs = rhs.trim();
            if lhs.is_empty() || rhs.is_empty() {
                return Err(SolverError::Validation(format!(
                    "equation `{}` is missing a side",
                    input.trim()
                )));
            }
            Ok(format!("({}) - ({})", lhs, rhs))
        }
        (Some(_), Some(_)) => Err(SolverError::Validation(format!(
            "equation `{}` contains more than one `=` sign",
            input.trim()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_double_star_power() {
        assert_eq!(normalize_expression("x**2 + 1"), "x^2 + 1");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_expression("  sin(x)  "), "sin(x)");
    }

    #[test]
    fn test_normalize_equation_with_equals() {
        assert_eq!(
            normalize_equation("x^2 = 4").unwrap(),
            "(x^2) - (4)"
        );
    }

    #[test]
    fn test_normalize_equation_implicit_zero() {
        assert_eq!(normalize_equation("x^2 - 4").unwrap(), "x^2 - 4");
    }

    #[test]
    fn test_normalize_equation_rewrites_power() {
        assert_eq!(
            normalize_equation("x**2 = 4").unwrap(),
            "(x^2) - (4)"
        );
    }

    #[test]
    fn test_normalize_equation_two_equals_rejected() {
        assert!(normalize_equation("x = y = 4").is_err());
    }

    #[test]
    fn test_normalize_equation_empty_side_rejected() {
        assert!(normalize_equation("x^2 =").is_err());
    }
}
