//! # Expression Tree Module
//!
//! The core symbolic type: a recursive tree of variables, numeric
//! constants, arithmetic operators and elementary functions. Everything
//! else in the engine (parsing, differentiation, integration, solving,
//! limits, series) is an `impl Expr` block in its own module, so this file
//! holds only the type, its constructors, display and the operator
//! overloads that make building trees readable.
//!
//! ```
//! use symcalc::symbolic::expr::Expr;
//! let f = Expr::var("x").pow(Expr::Const(2.0)) + Expr::Sin(Expr::var("x").boxed());
//! assert_eq!(f.to_string(), "((x^2) + sin(x))");
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A symbolic mathematical expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Var(String),
    Const(f64),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Exp(Box<Expr>),
    Ln(Box<Expr>),
    Sqrt(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Tan(Box<Expr>),
    Asin(Box<Expr>),
    Acos(Box<Expr>),
    Atan(Box<Expr>),
}

impl Expr {
    /// Shorthand for a variable node.
    pub fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    /// Moves the expression into a `Box`, the form every tree node stores
    /// its children in.
    pub fn boxed(self) -> Box<Expr> {
        Box::new(self)
    }

    pub fn pow(self, exponent: Expr) -> Expr {
        Expr::Pow(self.boxed(), exponent.boxed())
    }

    pub fn exp(self) -> Expr {
        Expr::Exp(self.boxed())
    }

    pub fn ln(self) -> Expr {
        Expr::Ln(self.boxed())
    }

    pub fn sqrt(self) -> Expr {
        Expr::Sqrt(self.boxed())
    }

    /// The numeric value if this node is a constant.
    pub fn as_const(&self) -> Option<f64> {
        match self {
            Expr::Const(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(value) if *value == 0.0)
    }

    /// Whether `var` occurs anywhere in the tree.
    pub fn contains_variable(&self, var: &str) -> bool {
        match self {
            Expr::Var(name) => name == var,
            Expr::Const(_) => false,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.contains_variable(var) || rhs.contains_variable(var)
            }
            Expr::Exp(inner)
            | Expr::Ln(inner)
            | Expr::Sqrt(inner)
            | Expr::Sin(inner)
            | Expr::Cos(inner)
            | Expr::Tan(inner)
            | Expr::Asin(inner)
            | Expr::Acos(inner)
            | Expr::Atan(inner) => inner.contains_variable(var),
        }
    }

    /// All variable names in the tree, sorted and deduplicated.
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names.sort();
        names.dedup();
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            Expr::Var(name) => names.push(name.clone()),
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.collect_variables(names);
                rhs.collect_variables(names);
            }
            Expr::Exp(inner)
            | Expr::Ln(inner)
            | Expr::Sqrt(inner)
            | Expr::Sin(inner)
            | Expr::Cos(inner)
            | Expr::Tan(inner)
            | Expr::Asin(inner)
            | Expr::Acos(inner)
            | Expr::Atan(inner) => inner.collect_variables(names),
        }
    }

    /// Replaces every occurrence of a variable with another expression.
    pub fn substitute(&self, var: &str, replacement: &Expr) -> Expr {
        let recurse = |e: &Expr| e.substitute(var, replacement).boxed();
        match self {
            Expr::Var(name) if name == var => replacement.clone(),
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(recurse(lhs), recurse(rhs)),
            Expr::Sub(lhs, rhs) => Expr::Sub(recurse(lhs), recurse(rhs)),
            Expr::Mul(lhs, rhs) => Expr::Mul(recurse(lhs), recurse(rhs)),
            Expr::Div(lhs, rhs) => Expr::Div(recurse(lhs), recurse(rhs)),
            Expr::Pow(lhs, rhs) => Expr::Pow(recurse(lhs), recurse(rhs)),
            Expr::Exp(inner) => Expr::Exp(recurse(inner)),
            Expr::Ln(inner) => Expr::Ln(recurse(inner)),
            Expr::Sqrt(inner) => Expr::Sqrt(recurse(inner)),
            Expr::Sin(inner) => Expr::Sin(recurse(inner)),
            Expr::Cos(inner) => Expr::Cos(recurse(inner)),
            Expr::Tan(inner) => Expr::Tan(recurse(inner)),
            Expr::Asin(inner) => Expr::Asin(recurse(inner)),
            Expr::Acos(inner) => Expr::Acos(recurse(inner)),
            Expr::Atan(inner) => Expr::Atan(recurse(inner)),
        }
    }

    /// Pins a variable to a numeric value, leaving the rest symbolic.
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        self.substitute(var, &Expr::Const(value))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(value) => write!(f, "{}", value),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({}^{})", base, exp),
            Expr::Exp(inner) => write!(f, "exp({})", inner),
            Expr::Ln(inner) => write!(f, "ln({})", inner),
            Expr::Sqrt(inner) => write!(f, "sqrt({})", inner),
            Expr::Sin(inner) => write!(f, "sin({})", inner),
            Expr::Cos(inner) => write!(f, "cos({})", inner),
            Expr::Tan(inner) => write!(f, "tan({})", inner),
            Expr::Asin(inner) => write!(f, "asin({})", inner),
            Expr::Acos(inner) => write!(f, "acos({})", inner),
            Expr::Atan(inner) => write!(f, "atan({})", inner),
        }
    }
}

impl Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::Mul(Expr::Const(-1.0).boxed(), self.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let expr = Expr::var("x").pow(Expr::Const(2.0)) + Expr::Sin(Expr::var("x").boxed());
        assert_eq!(expr.to_string(), "((x^2) + sin(x))");
    }

    #[test]
    fn test_display_quotient() {
        let expr = Expr::var("x") / (Expr::var("x") + Expr::Const(1.0));
        assert_eq!(expr.to_string(), "(x / (x + 1))");
    }

    #[test]
    fn test_operator_overloads() {
        let expr = Expr::var("x") + Expr::Const(1.0);
        assert_eq!(
            expr,
            Expr::Add(Expr::var("x").boxed(), Expr::Const(1.0).boxed())
        );
        let negated = -Expr::var("x");
        assert_eq!(
            negated,
            Expr::Mul(Expr::Const(-1.0).boxed(), Expr::var("x").boxed())
        );
    }

    #[test]
    fn test_contains_variable() {
        let expr = Expr::var("x") * Expr::Sin(Expr::var("y").boxed());
        assert!(expr.contains_variable("x"));
        assert!(expr.contains_variable("y"));
        assert!(!expr.contains_variable("z"));
    }

    #[test]
    fn test_variables_sorted_and_unique() {
        let expr = Expr::var("y") + Expr::var("x") * Expr::var("y");
        assert_eq!(expr.variables(), vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn test_substitute() {
        let expr = Expr::var("x").pow(Expr::Const(2.0));
        let substituted = expr.substitute("x", &(Expr::var("y") + Expr::Const(1.0)));
        assert_eq!(
            substituted,
            (Expr::var("y") + Expr::Const(1.0)).pow(Expr::Const(2.0))
        );
    }

    #[test]
    fn test_set_variable() {
        let expr = Expr::var("x") + Expr::var("y");
        assert_eq!(
            expr.set_variable("y", 2.0),
            Expr::var("x") + Expr::Const(2.0)
        );
    }

    #[test]
    fn test_as_const_and_is_zero() {
        assert_eq!(Expr::Const(3.0).as_const(), Some(3.0));
        assert_eq!(Expr::var("x").as_const(), None);
        assert!(Expr::Const(0.0).is_zero());
        assert!(!Expr::Const(0.5).is_zero());
    }
}
