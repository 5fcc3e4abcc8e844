//! # Series Expansion Module
//!
//! Taylor expansion of a one-variable expression about a point. The
//! expansion is built term by term from successive derivatives, each
//! evaluated at the expansion point, with simplification between steps so
//! the derivative trees do not explode. Terms with a zero coefficient are
//! skipped, so `sin(x)` about 0 comes out as odd powers only.

use crate::symbolic::expr::Expr;

/// Coefficients below this magnitude contribute nothing visible to the
/// polynomial and are dropped.
const TERM_EPS: f64 = 1e-12;

impl Expr {
    /// Taylor polynomial of the expression about `x0`, including terms up
    /// to `(x - x0)^order`.
    ///
    /// `Err` when a derivative cannot be evaluated at the expansion point
    /// (a pole or a domain edge, e.g. `ln(x)` about 0).
    pub fn taylor(&self, var: &str, x0: f64, order: usize) -> Result<Expr, String> {
        if let Some(free) = self.variables().iter().find(|name| *name != var) {
            return Err(format!(
                "expression depends on a second variable `{}`",
                free
            ));
        }
        let mut terms: Vec<Expr> = Vec::new();
        let mut derivative = self.simplify();
        let mut factorial = 1.0;
        for n in 0..=order {
            if n > 0 {
                derivative = derivative.diff(var).simplify();
                factorial *= n as f64;
            }
            let value = derivative.eval_at(var, x0);
            if !value.is_finite() {
                return Err(format!(
                    "cannot expand `{}` about {}: derivative of order {} is not finite there",
                    self, x0, n
                ));
            }
            let coefficient = value / factorial;
            if coefficient.abs() < TERM_EPS {
                continue;
            }
            terms.push(taylor_term(var, x0, coefficient, n));
        }
        log::debug!(
            "taylor expansion of `{}` about {} to order {}: {} non-zero terms",
            self,
            x0,
            order,
            terms.len()
        );
        let series = match terms.split_first() {
            None => Expr::Const(0.0),
            Some((first, rest)) => rest
                .iter()
                .fold(first.clone(), |acc, term| acc + term.clone()),
        };
        Ok(series.simplify())
    }
}

/// Builds `coefficient * (x - x0)^n` without redundant factors.
fn taylor_term(var: &str, x0: f64, coefficient: f64, n: usize) -> Expr {
    if n == 0 {
        return Expr::Const(coefficient);
    }
    let offset = if x0 == 0.0 {
        Expr::var(var)
    } else {
        Expr::var(var) - Expr::Const(x0)
    };
    let power = if n == 1 {
        offset
    } else {
        offset.pow(Expr::Const(n as f64))
    };
    if coefficient == 1.0 {
        power
    } else {
        Expr::Const(coefficient) * power
    }
}
