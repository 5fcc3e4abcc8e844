//! # Symbolic Engine
//!
//! A small computer-algebra core for one-variable calculus: expression
//! trees with parsing and pretty-printing, analytical differentiation,
//! rule-based integration, polynomial equation solving, limits, Taylor
//! series and algebraic simplification.

/// differentiation rules and numeric evaluation of expression trees
pub mod derivatives;
/// the expression tree type, its constructors, operators and display
pub mod expr;
/// rule-based symbolic integration, indefinite and definite
pub mod integration;
/// limit evaluation: substitution, L'Hôpital, numeric approach
pub mod limits;
/// string to expression tree parsing
pub mod parse_expr;
/// Taylor series expansion
pub mod series;
/// algebraic simplification passes
pub mod simplify;
/// closed-form solving of polynomial equations
pub mod solve;
/// bracket matching and sampling helpers
pub mod utils;
