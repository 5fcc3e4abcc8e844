//! # Equation Solving Module
//!
//! Closed-form solving for polynomial equations in one variable. The
//! expression is assumed to be zero-normalized already (`f(x) = 0`); the
//! solver extracts numeric coefficients of the polynomial in the solve
//! variable and applies the linear or quadratic formula. Equations of
//! higher degree, equations with symbolic coefficients and transcendental
//! equations return an `Err` that is shown to the user verbatim.
//!
//! Only real roots are reported; a quadratic with negative discriminant
//! yields an empty solution set.

use crate::symbolic::expr::Expr;

/// Coefficients below this magnitude are treated as zero when trimming the
/// polynomial degree.
const COEFF_EPS: f64 = 1e-12;

impl Expr {
    /// Solves `self = 0` for `var`. Returns the real solutions in ascending
    /// order; the set may be empty.
    pub fn solve_equation(&self, var: &str) -> Result<Vec<f64>, String> {
        if !self.contains_variable(var) {
            return Err(format!(
                "variable `{}` does not occur in the equation",
                var
            ));
        }
        let mut coeffs = self.simplify().polynomial_coefficients(var)?;
        while coeffs.len() > 1 && coeffs.last().is_some_and(|c| c.abs() < COEFF_EPS) {
            coeffs.pop();
        }
        match coeffs.len() - 1 {
            0 => {
                // either an identity (0 = 0) or a contradiction; no
                // discrete solution set in both cases
                log::info!("equation `{}` reduces to a constant", self);
                Ok(Vec::new())
            }
            1 => Ok(vec![-coeffs[0] / coeffs[1]]),
            2 => {
                let (c, b, a) = (coeffs[0], coeffs[1], coeffs[2]);
                let discriminant = b * b - 4.0 * a * c;
                if discriminant < 0.0 {
                    log::info!(
                        "equation `{}` has complex roots only (discriminant {})",
                        self,
                        discriminant
                    );
                    Ok(Vec::new())
                } else if discriminant < COEFF_EPS {
                    Ok(vec![-b / (2.0 * a)])
                } else {
                    let sqrt_d = discriminant.sqrt();
                    let mut roots = vec![(-b - sqrt_d) / (2.0 * a), (-b + sqrt_d) / (2.0 * a)];
                    roots.sort_by(|x, y| x.total_cmp(y));
                    Ok(roots)
                }
            }
            degree => Err(format!(
                "cannot solve polynomial equations of degree {}",
                degree
            )),
        }
    }

    /// Numeric coefficients of the expression viewed as a polynomial in
    /// `var`, lowest degree first. `Err` when the expression is not a
    /// polynomial with numeric coefficients.
    fn polynomial_coefficients(&self, var: &str) -> Result<Vec<f64>, String> {
        if !self.contains_variable(var) {
            let value = self
                .eval_const()
                .map_err(|reason| format!("non-numeric coefficient in equation: {}", reason))?;
            return Ok(vec![value]);
        }
        match self {
            Expr::Var(_) => Ok(vec![0.0, 1.0]),
            Expr::Add(lhs, rhs) => Ok(merge(
                lhs.polynomial_coefficients(var)?,
                rhs.polynomial_coefficients(var)?,
                1.0,
            )),
            Expr::Sub(lhs, rhs) => Ok(merge(
                lhs.polynomial_coefficients(var)?,
                rhs.polynomial_coefficients(var)?,
                -1.0,
            )),
            Expr::Mul(lhs, rhs) => Ok(convolve(
                &lhs.polynomial_coefficients(var)?,
                &rhs.polynomial_coefficients(var)?,
            )),
            Expr::Div(lhs, rhs) => {
                if rhs.contains_variable(var) {
                    return Err(format!(
                        "`{}` is not a polynomial in `{}`",
                        self, var
                    ));
                }
                let divisor = rhs
                    .eval_const()
                    .map_err(|reason| format!("non-numeric coefficient in equation: {}", reason))?;
                if divisor == 0.0 {
                    return Err("division by zero in equation".to_string());
                }
                let mut coeffs = lhs.polynomial_coefficients(var)?;
                for c in &mut coeffs {
                    *c /= divisor;
                }
                Ok(coeffs)
            }
            Expr::Pow(base, exp) => {
                let n = exp
                    .as_const()
                    .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= 64.0)
                    .ok_or_else(|| {
                        format!("`{}` is not a polynomial in `{}`", self, var)
                    })?;
                let base_coeffs = base.polynomial_coefficients(var)?;
                let mut result = vec![1.0];
                for _ in 0..n as usize {
                    result = convolve(&result, &base_coeffs);
                }
                Ok(result)
            }
            _ => Err(format!("`{}` is not a polynomial in `{}`", self, var)),
        }
    }
}

fn merge(lhs: Vec<f64>, rhs: Vec<f64>, sign: f64) -> Vec<f64> {
    let mut result = vec![0.0; lhs.len().max(rhs.len())];
    for (i, c) in lhs.into_iter().enumerate() {
        result[i] += c;
    }
    for (i, c) in rhs.into_iter().enumerate() {
        result[i] += sign * c;
    }
    result
}

fn convolve(lhs: &[f64], rhs: &[f64]) -> Vec<f64> {
    let mut result = vec![0.0; lhs.len() + rhs.len() - 1];
    for (i, a) in lhs.iter().enumerate() {
        for (j, b) in rhs.iter().enumerate() {
            result[i + j] += a * b;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solve_quadratic() {
        // x^2 - 4 = 0 -> {-2, 2}
        let expr = Expr::parse("x^2 - 4").unwrap();
        let roots = expr.solve_equation("x").unwrap();
        assert_eq!(roots, vec![-2.0, 2.0]);
    }

    #[test]
    fn test_solve_linear() {
        // 2*x + 6 = 0 -> {-3}
        let expr = Expr::parse("2*x + 6").unwrap();
        assert_eq!(expr.solve_equation("x").unwrap(), vec![-3.0]);
    }

    #[test]
    fn test_solve_double_root() {
        // x^2 - 2*x + 1 = 0 -> {1}
        let expr = Expr::parse("x^2 - 2*x + 1").unwrap();
        assert_eq!(expr.solve_equation("x").unwrap(), vec![1.0]);
    }

    #[test]
    fn test_solve_no_real_roots() {
        let expr = Expr::parse("x^2 + 1").unwrap();
        assert!(expr.solve_equation("x").unwrap().is_empty());
    }

    #[test]
    fn test_solve_expanded_product() {
        // (x - 1)*(x + 3) = 0 -> {-3, 1}
        let expr = Expr::parse("(x - 1)*(x + 3)").unwrap();
        let roots = expr.solve_equation("x").unwrap();
        assert_relative_eq!(roots[0], -3.0, max_relative = 1e-12);
        assert_relative_eq!(roots[1], 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_solve_variable_absent() {
        let expr = Expr::parse("y^2 - 4").unwrap();
        let err = expr.solve_equation("x").unwrap_err();
        assert!(err.contains("does not occur"));
    }

    #[test]
    fn test_solve_cubic_unsupported() {
        let expr = Expr::parse("x^3 - 1").unwrap();
        let err = expr.solve_equation("x").unwrap_err();
        assert!(err.contains("degree 3"));
    }

    #[test]
    fn test_solve_transcendental_unsupported() {
        let expr = Expr::parse("sin(x) - 1").unwrap();
        assert!(expr.solve_equation("x").is_err());
    }

    #[test]
    fn test_solve_symbolic_coefficient_unsupported() {
        let expr = Expr::parse("y*x - 1").unwrap();
        assert!(expr.solve_equation("x").is_err());
    }
}
