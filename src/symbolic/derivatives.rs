//! # Differentiation and Evaluation Module
//!
//! Extends [`Expr`] with analytical differentiation and numeric
//! evaluation. Differentiation is the recursive textbook rule set (power
//! rule, product rule, quotient rule, chain rule); evaluation walks the same
//! tree with a value bound to one variable, and `lambdify1d` wraps that walk
//! in a closure for repeated sampling (plotting, limits, series
//! coefficients).

use crate::symbolic::expr::Expr;
use crate::symbolic::utils::linspace;

impl Expr {
    /// Computes the analytical derivative with respect to a variable.
    ///
    /// Implements the standard rules:
    /// - power rule: d/dx(f^g) with constant g gives g*f^(g-1)*f'
    /// - product rule: d/dx(f*g) = f'*g + f*g'
    /// - quotient rule: d/dx(f/g) = (f'*g - g'*f)/g^2
    /// - chain rule for every function variant
    ///
    /// The result is not simplified; callers that want a readable expression
    /// apply [`Expr::simplify`] afterwards.
    pub fn diff(&self, var: &str) -> Expr {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                    Box::new(Expr::Mul(Box::new(rhs.diff(var)), lhs.clone())),
                )),
                Box::new(Expr::Mul(rhs.clone(), rhs.clone())),
            ),
            Expr::Pow(base, exp) => {
                if !exp.contains_variable(var) {
                    // g * f^(g-1) * f'
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            exp.clone(),
                            Box::new(Expr::Pow(
                                base.clone(),
                                Box::new(Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0)))),
                            )),
                        )),
                        Box::new(base.diff(var)),
                    )
                } else {
                    // general case via f^g = exp(g*ln(f))
                    let rewritten = Expr::Exp(Box::new(Expr::Mul(
                        exp.clone(),
                        Box::new(Expr::Ln(base.clone())),
                    )));
                    rewritten.diff(var)
                }
            }
            Expr::Exp(inner) => Expr::Mul(
                Box::new(Expr::Exp(inner.clone())),
                Box::new(inner.diff(var)),
            ),
            Expr::Ln(inner) => Expr::Div(Box::new(inner.diff(var)), inner.clone()),
            Expr::Sqrt(inner) => Expr::Div(
                Box::new(inner.diff(var)),
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(2.0)),
                    Box::new(Expr::Sqrt(inner.clone())),
                )),
            ),
            Expr::Sin(inner) => Expr::Mul(
                Box::new(Expr::Cos(inner.clone())),
                Box::new(inner.diff(var)),
            ),
            Expr::Cos(inner) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::Sin(inner.clone())),
                )),
                Box::new(inner.diff(var)),
            ),
            Expr::Tan(inner) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::Cos(inner.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(inner.diff(var)),
            ),
            Expr::Asin(inner) => Expr::Div(
                Box::new(inner.diff(var)),
                Box::new(Expr::Sqrt(Box::new(Expr::Sub(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(inner.clone(), Box::new(Expr::Const(2.0)))),
                )))),
            ),
            Expr::Acos(inner) => Expr::Div(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(inner.diff(var)),
                )),
                Box::new(Expr::Sqrt(Box::new(Expr::Sub(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(inner.clone(), Box::new(Expr::Const(2.0)))),
                )))),
            ),
            Expr::Atan(inner) => Expr::Div(
                Box::new(inner.diff(var)),
                Box::new(Expr::Add(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(inner.clone(), Box::new(Expr::Const(2.0)))),
                )),
            ),
        }
    }

    /// n-th derivative with simplification between steps so intermediate
    /// trees stay small.
    pub fn nth_derivative(&self, var: &str, n: usize) -> Expr {
        let mut expr = self.clone();
        for _ in 0..n {
            expr = expr.diff(var).simplify();
        }
        expr.simplify()
    }

    /// Evaluates the expression with one variable bound to a value.
    ///
    /// Any other variable in the tree evaluates to NaN; operations where the
    /// value leaves the real domain (e.g. `ln` of a negative number) also
    /// yield NaN, mirroring `f64` semantics.
    pub fn eval_at(&self, var: &str, value: f64) -> f64 {
        match self {
            Expr::Var(name) => {
                if name == var {
                    value
                } else {
                    f64::NAN
                }
            }
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => lhs.eval_at(var, value) + rhs.eval_at(var, value),
            Expr::Sub(lhs, rhs) => lhs.eval_at(var, value) - rhs.eval_at(var, value),
            Expr::Mul(lhs, rhs) => lhs.eval_at(var, value) * rhs.eval_at(var, value),
            Expr::Div(lhs, rhs) => lhs.eval_at(var, value) / rhs.eval_at(var, value),
            Expr::Pow(base, exp) => base.eval_at(var, value).powf(exp.eval_at(var, value)),
            Expr::Exp(inner) => inner.eval_at(var, value).exp(),
            Expr::Ln(inner) => inner.eval_at(var, value).ln(),
            Expr::Sqrt(inner) => inner.eval_at(var, value).sqrt(),
            Expr::Sin(inner) => inner.eval_at(var, value).sin(),
            Expr::Cos(inner) => inner.eval_at(var, value).cos(),
            Expr::Tan(inner) => inner.eval_at(var, value).tan(),
            Expr::Asin(inner) => inner.eval_at(var, value).asin(),
            Expr::Acos(inner) => inner.eval_at(var, value).acos(),
            Expr::Atan(inner) => inner.eval_at(var, value).atan(),
        }
    }

    /// Evaluates an expression with no free variables.
    ///
    /// Returns `Err` naming the first free variable if the expression still
    /// depends on one.
    pub fn eval_const(&self) -> Result<f64, String> {
        match self.variables().first() {
            Some(name) => Err(format!("expression depends on variable `{}`", name)),
            None => Ok(self.eval_at("", 0.0)),
        }
    }

    /// Converts the expression into a single-variable closure.
    pub fn lambdify1d<'a>(&'a self, var: &'a str) -> impl Fn(f64) -> f64 + 'a {
        move |x| self.eval_at(var, x)
    }

    /// Samples the expression over a linearly spaced domain.
    pub fn sample_linspace(&self, var: &str, start: f64, end: f64, num_values: usize) -> Vec<f64> {
        let f = self.lambdify1d(var);
        linspace(start, end, num_values)
            .into_iter()
            .map(f)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diff_power_plus_sin() {
        // d/dx (x^2 + sin(x)) = 2*x + cos(x)
        let expr = Expr::parse("x^2 + sin(x)").unwrap();
        let derivative = expr.diff("x");
        for x in [-2.0, -0.5, 0.0, 1.0, 3.0] {
            assert_relative_eq!(
                derivative.eval_at("x", x),
                2.0 * x + f64::cos(x),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_diff_constant_is_zero() {
        let expr = Expr::parse("3.5").unwrap();
        assert_eq!(expr.diff("x"), Expr::Const(0.0));
    }

    #[test]
    fn test_diff_other_variable_is_zero() {
        let expr = Expr::var("y");
        assert_eq!(expr.diff("x"), Expr::Const(0.0));
    }

    #[test]
    fn test_diff_quotient() {
        // d/dx (x / (x + 1)) = 1/(x+1)^2
        let expr = Expr::parse("x / (x + 1)").unwrap();
        let derivative = expr.diff("x");
        for x in [0.0, 1.0, 2.5] {
            assert_relative_eq!(
                derivative.eval_at("x", x),
                1.0 / ((x + 1.0) * (x + 1.0)),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_diff_variable_exponent() {
        // d/dx 2^x = 2^x * ln(2)
        let expr = Expr::parse("2^x").unwrap();
        let derivative = expr.diff("x");
        assert_relative_eq!(
            derivative.eval_at("x", 1.5),
            2f64.powf(1.5) * 2f64.ln(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_nth_derivative() {
        // d^2/dx^2 sin(x) = -sin(x)
        let expr = Expr::parse("sin(x)").unwrap();
        let second = expr.nth_derivative("x", 2);
        assert_relative_eq!(second.eval_at("x", 0.7), -f64::sin(0.7), max_relative = 1e-12);
    }

    #[test]
    fn test_diff_matches_numerical() {
        let expr = Expr::parse("exp(x) * cos(x) + ln(x)").unwrap();
        let derivative = expr.diff("x");
        let f = expr.lambdify1d("x");
        let h = 1e-6;
        for x in [0.5, 1.0, 2.0] {
            let numeric = (f(x + h) - f(x - h)) / (2.0 * h);
            assert_relative_eq!(derivative.eval_at("x", x), numeric, max_relative = 1e-5);
        }
    }

    #[test]
    fn test_eval_const() {
        let expr = Expr::parse("2 * pi").unwrap();
        assert_relative_eq!(expr.eval_const().unwrap(), std::f64::consts::TAU);
        assert!(Expr::var("x").eval_const().is_err());
    }

    #[test]
    fn test_sample_linspace() {
        let expr = Expr::parse("x^2").unwrap();
        let values = expr.sample_linspace("x", 0.0, 2.0, 3);
        assert_eq!(values, vec![0.0, 1.0, 4.0]);
    }
}
