//! # Simplification Module
//!
//! Algebraic cleanup for symbolic expressions. The pass folds constant
//! subtrees and applies the usual identities (`x + 0 = x`, `x * 1 = x`,
//! `0 * x = 0`, `x^1 = x`, ...) bottom-up, and [`Expr::simplify`] iterates
//! the pass until the tree stops changing. Differentiation and Taylor
//! expansion produce heavily redundant trees, so this runs between every
//! derivative step.
//!
//! Function applications on constants (e.g. `sin(2)`) are left symbolic;
//! numeric evaluation is the job of `eval_at`, not the simplifier.

use crate::symbolic::expr::Expr;

const MAX_PASSES: usize = 64;

impl Expr {
    /// Simplifies the expression by iterating a folding pass to a fixpoint.
    pub fn simplify(&self) -> Expr {
        let mut current = self.clone();
        for _ in 0..MAX_PASSES {
            let next = current.simplify_once();
            if next == current {
                return next;
            }
            current = next;
        }
        current
    }

    fn simplify_once(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    (Expr::Const(a), _) if *a == 0.0 => rhs,
                    (_, Expr::Const(b)) if *b == 0.0 => lhs,
                    _ => Expr::Add(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    (_, Expr::Const(b)) if *b == 0.0 => lhs,
                    (Expr::Const(a), _) if *a == 0.0 => {
                        Expr::Mul(Expr::Const(-1.0).boxed(), rhs.boxed())
                    }
                    _ if lhs == rhs => Expr::Const(0.0),
                    _ => Expr::Sub(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    (Expr::Const(a), _) if *a == 0.0 => Expr::Const(0.0),
                    (_, Expr::Const(b)) if *b == 0.0 => Expr::Const(0.0),
                    (Expr::Const(a), _) if *a == 1.0 => rhs,
                    (_, Expr::Const(b)) if *b == 1.0 => lhs,
                    // keep the constant factor on the left and merge nested ones
                    (Expr::Const(a), Expr::Mul(inner_l, inner_r)) => {
                        if let Expr::Const(b) = inner_l.as_ref() {
                            Expr::Mul(Expr::Const(a * b).boxed(), inner_r.clone())
                        } else {
                            Expr::Mul(lhs.boxed(), rhs.boxed())
                        }
                    }
                    (_, Expr::Const(b)) => Expr::Mul(Expr::Const(*b).boxed(), lhs.boxed()),
                    _ => Expr::Mul(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    // leave 0/0 alone, it is the limit module's business
                    (Expr::Const(a), Expr::Const(_)) if *a == 0.0 => {
                        Expr::Div(lhs.boxed(), rhs.boxed())
                    }
                    (Expr::Const(a), _) if *a == 0.0 => Expr::Const(0.0),
                    (_, Expr::Const(b)) if *b == 1.0 => lhs,
                    _ => Expr::Div(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_once();
                let exp = exp.simplify_once();
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(*b)),
                    (_, Expr::Const(b)) if *b == 1.0 => base,
                    (_, Expr::Const(b)) if *b == 0.0 => Expr::Const(1.0),
                    (Expr::Const(a), _) if *a == 1.0 => Expr::Const(1.0),
                    _ => Expr::Pow(base.boxed(), exp.boxed()),
                }
            }
            Expr::Exp(inner) => Expr::Exp(inner.simplify_once().boxed()),
            Expr::Ln(inner) => Expr::Ln(inner.simplify_once().boxed()),
            Expr::Sqrt(inner) => Expr::Sqrt(inner.simplify_once().boxed()),
            Expr::Sin(inner) => Expr::Sin(inner.simplify_once().boxed()),
            Expr::Cos(inner) => Expr::Cos(inner.simplify_once().boxed()),
            Expr::Tan(inner) => Expr::Tan(inner.simplify_once().boxed()),
            Expr::Asin(inner) => Expr::Asin(inner.simplify_once().boxed()),
            Expr::Acos(inner) => Expr::Acos(inner.simplify_once().boxed()),
            Expr::Atan(inner) => Expr::Atan(inner.simplify_once().boxed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_folding() {
        let expr = Expr::parse("2 + 3 * 4").unwrap();
        assert_eq!(expr.simplify(), Expr::Const(14.0));
    }

    #[test]
    fn test_additive_identity() {
        let expr = Expr::var("x") + Expr::Const(0.0);
        assert_eq!(expr.simplify(), Expr::var("x"));
    }

    #[test]
    fn test_multiplicative_identities() {
        let one = Expr::var("x") * Expr::Const(1.0);
        assert_eq!(one.simplify(), Expr::var("x"));
        let zero = Expr::Const(0.0) * Expr::var("x");
        assert_eq!(zero.simplify(), Expr::Const(0.0));
    }

    #[test]
    fn test_power_identities() {
        let expr = Expr::var("x").pow(Expr::Const(1.0));
        assert_eq!(expr.simplify(), Expr::var("x"));
        let expr = Expr::var("x").pow(Expr::Const(0.0));
        assert_eq!(expr.simplify(), Expr::Const(1.0));
    }

    #[test]
    fn test_nested_constant_factors() {
        let expr = Expr::Const(2.0) * (Expr::Const(3.0) * Expr::var("x"));
        assert_eq!(expr.simplify(), Expr::Const(6.0) * Expr::var("x"));
    }

    #[test]
    fn test_self_subtraction() {
        let expr = Expr::Sin(Expr::var("x").boxed()) - Expr::Sin(Expr::var("x").boxed());
        assert_eq!(expr.simplify(), Expr::Const(0.0));
    }

    #[test]
    fn test_derivative_cleans_up() {
        // d/dx (x^2 + sin(x)) simplifies to 2*x + cos(x)
        let expr = Expr::parse("x^2 + sin(x)").unwrap();
        let derivative = expr.diff("x").simplify();
        assert_eq!(derivative.to_string(), "((2 * x) + cos(x))");
    }

    #[test]
    fn test_functions_of_constants_stay_symbolic() {
        let expr = Expr::Sin(Expr::Const(2.0).boxed());
        assert_eq!(expr.simplify(), Expr::Sin(Expr::Const(2.0).boxed()));
    }
}
