//! # Symbolic Integration Module
//!
//! Rule-based integration for the expression tree. The rule set covers what
//! the interactive solver needs: sums and constant multiples, powers and
//! roots of linear arguments, exponentials, logarithms and trigonometric
//! functions of linear arguments, and the textbook closed forms for inverse
//! trig of the bare variable. Anything outside the rules returns an `Err`
//! with the offending subexpression; the dispatcher shows that message to
//! the user verbatim.
//!
//! Definite integration evaluates the antiderivative at the bounds; there is
//! no numeric-quadrature fallback.

use crate::symbolic::expr::Expr;

impl Expr {
    /// Indefinite integral with respect to `var`, without the integration
    /// constant.
    pub fn integrate(&self, var: &str) -> Result<Expr, String> {
        match self {
            // ∫ c dx = c*x for anything free of the integration variable
            _ if !self.contains_variable(var) => Ok(self.clone() * Expr::var(var)),

            // ∫ x dx = x^2/2
            Expr::Var(_) => {
                Ok(Expr::var(var).pow(Expr::Const(2.0)) / Expr::Const(2.0))
            }

            Expr::Add(lhs, rhs) => {
                let lhs_int = lhs.integrate(var)?;
                let rhs_int = rhs.integrate(var)?;
                Ok(lhs_int + rhs_int)
            }
            Expr::Sub(lhs, rhs) => {
                let lhs_int = lhs.integrate(var)?;
                let rhs_int = rhs.integrate(var)?;
                Ok(lhs_int - rhs_int)
            }

            // constant factors move out of the integral
            Expr::Mul(lhs, rhs) => {
                if !lhs.contains_variable(var) {
                    Ok(lhs.as_ref().clone() * rhs.integrate(var)?)
                } else if !rhs.contains_variable(var) {
                    Ok(rhs.as_ref().clone() * lhs.integrate(var)?)
                } else {
                    Err(format!("no integration rule for the product `{}`", self))
                }
            }

            Expr::Div(lhs, rhs) => {
                if !rhs.contains_variable(var) {
                    Ok(lhs.integrate(var)? / rhs.as_ref().clone())
                } else if !lhs.contains_variable(var) {
                    // ∫ c/(a*x + b) dx = (c/a) * ln(a*x + b)
                    let (a, _) = linear_coeffs(rhs, var)
                        .ok_or_else(|| format!("no integration rule for `{}`", self))?;
                    Ok(lhs.as_ref().clone() / Expr::Const(a) * rhs.as_ref().clone().ln())
                } else {
                    Err(format!("no integration rule for the quotient `{}`", self))
                }
            }

            Expr::Pow(base, exp) => self.integrate_power(base, exp, var),

            // ∫ exp(a*x + b) dx = exp(a*x + b)/a
            Expr::Exp(inner) => {
                let (a, _) = linear_inner(inner, var, self)?;
                Ok(inner.as_ref().clone().exp() / Expr::Const(a))
            }

            // ∫ ln(u) dx = (u*ln(u) - u)/a for linear u
            Expr::Ln(inner) => {
                let (a, _) = linear_inner(inner, var, self)?;
                let u = inner.as_ref().clone();
                Ok((u.clone() * u.clone().ln() - u) / Expr::Const(a))
            }

            // ∫ sqrt(u) dx = 2/(3*a) * u^(3/2) for linear u
            Expr::Sqrt(inner) => {
                let (a, _) = linear_inner(inner, var, self)?;
                Ok(Expr::Const(2.0 / (3.0 * a))
                    * inner.as_ref().clone().pow(Expr::Const(1.5)))
            }

            // ∫ sin(u) dx = -cos(u)/a for linear u
            Expr::Sin(inner) => {
                let (a, _) = linear_inner(inner, var, self)?;
                Ok(Expr::Const(-1.0 / a) * Expr::Cos(inner.clone()))
            }

            // ∫ cos(u) dx = sin(u)/a for linear u
            Expr::Cos(inner) => {
                let (a, _) = linear_inner(inner, var, self)?;
                Ok(Expr::Const(1.0 / a) * Expr::Sin(inner.clone()))
            }

            // ∫ tan(u) dx = -ln(cos(u))/a for linear u
            Expr::Tan(inner) => {
                let (a, _) = linear_inner(inner, var, self)?;
                Ok(Expr::Const(-1.0 / a) * Expr::Cos(inner.clone()).ln())
            }

            // by-parts closed forms for the bare variable
            Expr::Asin(inner) if **inner == Expr::var(var) => {
                let x = Expr::var(var);
                Ok(x.clone() * Expr::Asin(x.clone().boxed())
                    + (Expr::Const(1.0) - x.pow(Expr::Const(2.0))).sqrt())
            }
            Expr::Acos(inner) if **inner == Expr::var(var) => {
                let x = Expr::var(var);
                Ok(x.clone() * Expr::Acos(x.clone().boxed())
                    - (Expr::Const(1.0) - x.pow(Expr::Const(2.0))).sqrt())
            }
            Expr::Atan(inner) if **inner == Expr::var(var) => {
                let x = Expr::var(var);
                Ok(x.clone() * Expr::Atan(x.clone().boxed())
                    - (Expr::Const(1.0) + x.pow(Expr::Const(2.0))).ln() / Expr::Const(2.0))
            }

            _ => Err(format!("no integration rule for `{}`", self)),
        }
    }

    fn integrate_power(&self, base: &Expr, exp: &Expr, var: &str) -> Result<Expr, String> {
        // ∫ c^u dx = c^u/(a*ln(c)) for constant base and linear exponent
        if let Some(c) = base.as_const() {
            let (a, _) = linear_inner(exp, var, self)?;
            if c <= 0.0 {
                return Err(format!("no integration rule for `{}`", self));
            }
            return Ok(base.clone().pow(exp.clone()) / Expr::Const(a * c.ln()));
        }
        // ∫ u^n dx for linear u and constant n
        let n = exp
            .as_const()
            .ok_or_else(|| format!("no integration rule for `{}`", self))?;
        let (a, _) = linear_inner(base, var, self)?;
        if n == -1.0 {
            // ∫ u^-1 dx = ln(u)/a
            Ok(base.clone().ln() / Expr::Const(a))
        } else {
            Ok(base.clone().pow(Expr::Const(n + 1.0)) / Expr::Const(a * (n + 1.0)))
        }
    }

    /// Definite integral: antiderivative evaluated at the bounds.
    pub fn integrate_definite(&self, var: &str, lower: f64, upper: f64) -> Result<f64, String> {
        let antiderivative = self.integrate(var)?.simplify();
        log::debug!("antiderivative of `{}` is `{}`", self, antiderivative);
        let value = antiderivative.eval_at(var, upper) - antiderivative.eval_at(var, lower);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(format!(
                "definite integral of `{}` over [{}, {}] is not finite",
                self, lower, upper
            ))
        }
    }
}

/// Coefficients `(a, b)` such that the expression equals `a*x + b` with
/// numeric `a`, `b`. `None` when the expression is not linear in `var`.
fn linear_coeffs(expr: &Expr, var: &str) -> Option<(f64, f64)> {
    if !expr.contains_variable(var) {
        return expr.eval_const().ok().map(|value| (0.0, value));
    }
    match expr {
        Expr::Var(name) if name == var => Some((1.0, 0.0)),
        Expr::Add(lhs, rhs) => {
            let (a1, b1) = linear_coeffs(lhs, var)?;
            let (a2, b2) = linear_coeffs(rhs, var)?;
            Some((a1 + a2, b1 + b2))
        }
        Expr::Sub(lhs, rhs) => {
            let (a1, b1) = linear_coeffs(lhs, var)?;
            let (a2, b2) = linear_coeffs(rhs, var)?;
            Some((a1 - a2, b1 - b2))
        }
        Expr::Mul(lhs, rhs) => {
            if !lhs.contains_variable(var) {
                let c = lhs.eval_const().ok()?;
                let (a, b) = linear_coeffs(rhs, var)?;
                Some((c * a, c * b))
            } else if !rhs.contains_variable(var) {
                let c = rhs.eval_const().ok()?;
                let (a, b) = linear_coeffs(lhs, var)?;
                Some((c * a, c * b))
            } else {
                None
            }
        }
        Expr::Div(lhs, rhs) => {
            if rhs.contains_variable(var) {
                return None;
            }
            let c = rhs.eval_const().ok()?;
            if c == 0.0 {
                return None;
            }
            let (a, b) = linear_coeffs(lhs, var)?;
            Some((a / c, b / c))
        }
        _ => None,
    }
}

/// Linear-argument check shared by the function rules; maps a nonlinear
/// argument to the standard "no rule" error for the whole expression.
fn linear_inner(inner: &Expr, var: &str, whole: &Expr) -> Result<(f64, f64), String> {
    match linear_coeffs(inner, var) {
        Some((a, b)) if a != 0.0 => Ok((a, b)),
        _ => Err(format!("no integration rule for `{}`", whole)),
    }
}
