//! # Limits Module
//!
//! Limit evaluation in three stages:
//! 1. direct substitution of the approach point;
//! 2. L'Hôpital's rule for quotients that substitute to 0/0 or inf/inf,
//!    with a recursion cap;
//! 3. a numerical approach sequence from the requested side(s), with a
//!    divergence check for infinite limits and a left/right comparison for
//!    two-sided limits.
//!
//! The approach point may be `±inf`; results are `f64` and may themselves
//! be infinite. Values that land within 1e-6 of an integer are snapped to
//! it, so the numerical fallback reports `1` rather than `0.9999999983`.

use crate::symbolic::expr::Expr;
use strum_macros::{Display, EnumString};

/// Direction from which the approach point is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    #[default]
    Both,
    Left,
    Right,
}

const MAX_LHOPITAL_DEPTH: usize = 6;
/// magnitude beyond which a monotonically growing sample sequence is
/// declared divergent
const DIVERGENCE_THRESHOLD: f64 = 1e8;
const CONVERGENCE_TOL: f64 = 1e-5;
const SNAP_TOL: f64 = 1e-6;

impl Expr {
    /// Limit of the expression as `var` approaches `point` from `side`.
    pub fn limit(&self, var: &str, point: f64, side: Side) -> Result<f64, String> {
        if let Some(free) = self.variables().iter().find(|name| *name != var) {
            return Err(format!(
                "expression depends on a second variable `{}`",
                free
            ));
        }
        limit_inner(&self.simplify(), var, point, side, 0)
    }
}

fn limit_inner(
    expr: &Expr,
    var: &str,
    point: f64,
    side: Side,
    depth: usize,
) -> Result<f64, String> {
    // stage 1: substitution
    if point.is_finite() {
        let value = expr.eval_at(var, point);
        if value.is_finite() {
            return Ok(snap(value));
        }
    }

    // stage 2: L'Hôpital for indeterminate quotients
    if let Expr::Div(numerator, denominator) = expr {
        let num_value = probe(numerator, var, point);
        let den_value = probe(denominator, var, point);
        let both_zero = num_value.abs() < 1e-9 && den_value.abs() < 1e-9;
        let both_infinite = num_value.is_infinite() && den_value.is_infinite();
        if (both_zero || both_infinite) && depth < MAX_LHOPITAL_DEPTH {
            let quotient = Expr::Div(
                numerator.diff(var).boxed(),
                denominator.diff(var).boxed(),
            )
            .simplify();
            log::debug!(
                "L'Hopital step {}: `{}` -> `{}`",
                depth + 1,
                expr,
                quotient
            );
            if let Ok(value) = limit_inner(&quotient, var, point, side, depth + 1) {
                return Ok(value);
            }
        }
    }

    // stage 3: numerical approach sequence
    if point.is_infinite() {
        let samples = sample_towards_infinity(expr, var, point.signum());
        return sequence_limit(&samples)
            .ok_or_else(|| could_not_determine(expr, var, point));
    }
    match side {
        Side::Right => {
            let samples = sample_one_sided(expr, var, point, 1.0);
            sequence_limit(&samples).ok_or_else(|| could_not_determine(expr, var, point))
        }
        Side::Left => {
            let samples = sample_one_sided(expr, var, point, -1.0);
            sequence_limit(&samples).ok_or_else(|| could_not_determine(expr, var, point))
        }
        Side::Both => {
            let left = sequence_limit(&sample_one_sided(expr, var, point, -1.0));
            let right = sequence_limit(&sample_one_sided(expr, var, point, 1.0));
            match (left, right) {
                (Some(l), Some(r)) if limits_agree(l, r) => Ok(snap((l + r) / 2.0)),
                (Some(l), Some(r)) => Err(format!(
                    "limit of `{}` does not exist: left-hand limit {} differs from right-hand limit {}",
                    expr, l, r
                )),
                _ => Err(could_not_determine(expr, var, point)),
            }
        }
    }
}

/// Value of the expression "at" the point: plain substitution for finite
/// points, evaluation at a large magnitude for infinite ones.
fn probe(expr: &Expr, var: &str, point: f64) -> f64 {
    if point.is_finite() {
        expr.eval_at(var, point)
    } else {
        expr.eval_at(var, point.signum() * 1e8)
    }
}

fn sample_one_sided(expr: &Expr, var: &str, point: f64, direction: f64) -> Vec<f64> {
    (1..=10)
        .map(|k| expr.eval_at(var, point + direction * 10f64.powi(-k)))
        .collect()
}

fn sample_towards_infinity(expr: &Expr, var: &str, sign: f64) -> Vec<f64> {
    (1..=8)
        .map(|k| expr.eval_at(var, sign * 10f64.powi(k)))
        .collect()
}

/// Decides what a sequence of samples converges to. `None` when the
/// samples neither settle nor diverge cleanly.
fn sequence_limit(samples: &[f64]) -> Option<f64> {
    let last = *samples.last()?;
    let prev = samples[samples.len() - 2];
    if last.is_finite() && prev.is_finite() {
        if (last - prev).abs() <= CONVERGENCE_TOL * (1.0 + last.abs()) {
            return Some(snap(last));
        }
        // monotone growth in magnitude towards the divergence threshold
        let growing = samples
            .windows(2)
            .all(|pair| pair[1].abs() >= pair[0].abs());
        if growing && last.abs() >= DIVERGENCE_THRESHOLD {
            return Some(last.signum() * f64::INFINITY);
        }
        return None;
    }
    // the tail overflowed f64: treat as divergence if the finite prefix
    // was already growing
    if last.is_infinite() {
        return Some(last);
    }
    None
}

fn limits_agree(left: f64, right: f64) -> bool {
    if left.is_infinite() || right.is_infinite() {
        return left == right;
    }
    (left - right).abs() <= 1e-4 * (1.0 + left.abs().max(right.abs()))
}

fn snap(value: f64) -> f64 {
    if (value - value.round()).abs() < SNAP_TOL {
        value.round() + 0.0
    } else {
        value
    }
}

fn could_not_determine(expr: &Expr, var: &str, point: f64) -> String {
    format!(
        "could not determine the limit of `{}` as {} approaches {}",
        expr, var, point
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_limit_sinx_over_x() {
        let expr = Expr::parse("sin(x)/x").unwrap();
        assert_eq!(expr.limit("x", 0.0, Side::Both).unwrap(), 1.0);
    }

    #[test]
    fn test_limit_by_substitution() {
        let expr = Expr::parse("x^2 + 1").unwrap();
        assert_eq!(expr.limit("x", 2.0, Side::Both).unwrap(), 5.0);
    }

    #[test]
    fn test_limit_removable_singularity() {
        // (x^2 - 1)/(x - 1) -> 2 as x -> 1
        let expr = Expr::parse("(x^2 - 1)/(x - 1)").unwrap();
        assert_eq!(expr.limit("x", 1.0, Side::Both).unwrap(), 2.0);
    }

    #[test]
    fn test_one_sided_limits_of_reciprocal() {
        let expr = Expr::parse("1/x").unwrap();
        assert_eq!(
            expr.limit("x", 0.0, Side::Right).unwrap(),
            f64::INFINITY
        );
        assert_eq!(
            expr.limit("x", 0.0, Side::Left).unwrap(),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_two_sided_limit_does_not_exist() {
        let expr = Expr::parse("1/x").unwrap();
        let err = expr.limit("x", 0.0, Side::Both).unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn test_limit_at_infinity() {
        let expr = Expr::parse("exp(-x)").unwrap();
        assert_eq!(expr.limit("x", f64::INFINITY, Side::Both).unwrap(), 0.0);
    }

    #[test]
    fn test_limit_ratio_at_infinity() {
        // (2*x + 1)/(x + 3) -> 2 as x -> inf
        let expr = Expr::parse("(2*x + 1)/(x + 3)").unwrap();
        let value = expr.limit("x", f64::INFINITY, Side::Both).unwrap();
        assert_relative_eq!(value, 2.0, max_relative = 1e-4);
    }

    #[test]
    fn test_limit_second_variable_rejected() {
        let expr = Expr::parse("x + y").unwrap();
        assert!(expr.limit("x", 0.0, Side::Both).is_err());
    }

    #[test]
    fn test_side_parses_from_str() {
        assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!(Side::Right.to_string(), "right");
    }
}
