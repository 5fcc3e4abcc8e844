//! Turns a string expression into a symbolic expression.
//!
//! The parser splits the input at the rightmost `+`/`-` outside brackets,
//! then the rightmost `*`/`/`, then the leftmost `^` (power is right
//! associative), then function calls, bracketed groups, constants and
//! variables. Splitting at the rightmost operator of a precedence level
//! keeps left associativity without a separate tokenizer.
//!
//! Parse failures return `Err(String)` with the offending fragment; the
//! message is shown to the user as-is.
//!
//! # Example
//! ```
//! use symcalc::symbolic::expr::Expr;
//! let expr = Expr::parse("x^2 + sin(x)").unwrap();
//! assert_eq!(expr.to_string(), "((x^2) + sin(x))");
//! ```

use crate::symbolic::expr::Expr;
use crate::symbolic::utils::{find_matching_bracket, find_char_outside_brackets};
use std::f64::consts::{E, PI};

impl Expr {
    /// Parses a mathematical expression from string notation.
    ///
    /// Supported syntax: variables (`x`, `tau`), constants (`3.14`, `1e-6`,
    /// `pi`, `e`), operators `+ - * / ^`, functions (`sin`, `cos`, `tan`,
    /// `exp`, `ln`/`log`, `sqrt`, `asin`/`arcsin`, `acos`/`arccos`,
    /// `atan`/`arctan`) and brackets for grouping.
    pub fn parse(input: &str) -> Result<Expr, String> {
        parse_expression(input)
    }
}

/// Entry point used by [`Expr::parse`].
pub fn parse_expression(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty expression".to_string());
    }

    // addition and subtraction, rightmost binary occurrence
    if let Some((pos, op)) = find_rightmost_add_sub(input) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();
        if right.is_empty() {
            return Err(format!("dangling operator `{}` in `{}`", op, input));
        }
        let lhs = parse_expression(left)?;
        let rhs = parse_expression(right)?;
        return Ok(match op {
            '+' => Expr::Add(lhs.boxed(), rhs.boxed()),
            _ => Expr::Sub(lhs.boxed(), rhs.boxed()),
        });
    }

    // unary sign: reached only when no binary +/- is left at this level
    if let Some(rest) = input.strip_prefix('-') {
        return Ok(Expr::Mul(
            Expr::Const(-1.0).boxed(),
            parse_expression(rest)?.boxed(),
        ));
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_expression(rest);
    }

    // multiplication and division, rightmost occurrence
    if let Some((pos, op)) = find_rightmost_mul_div(input) {
        let left = input[..pos].trim();
        let right = input[pos + 1..].trim();
        if left.is_empty() || right.is_empty() {
            return Err(format!("dangling operator `{}` in `{}`", op, input));
        }
        let lhs = parse_expression(left)?;
        let rhs = parse_expression(right)?;
        return Ok(match op {
            '*' => Expr::Mul(lhs.boxed(), rhs.boxed()),
            _ => Expr::Div(lhs.boxed(), rhs.boxed()),
        });
    }

    // power, leftmost occurrence so that 2^3^2 parses as 2^(3^2)
    if let Some(pos) = find_char_outside_brackets(input, '^') {
        let base = input[..pos].trim();
        let exponent = input[pos + 1..].trim();
        if base.is_empty() || exponent.is_empty() {
            return Err(format!("dangling operator `^` in `{}`", input));
        }
        return Ok(Expr::Pow(
            parse_expression(base)?.boxed(),
            parse_expression(exponent)?.boxed(),
        ));
    }

    // function call: name(...) with the bracket pair spanning the rest
    if input.ends_with(')') {
        if let Some(paren) = input.find('(') {
            if paren > 0 && find_matching_bracket(input, paren) == Some(input.len() - 1) {
                let name = &input[..paren];
                if name.chars().all(|c| c.is_ascii_alphabetic()) {
                    let inner = parse_expression(&input[paren + 1..input.len() - 1])?;
                    return apply_function(name, inner);
                }
            }
        }
    }

    // fully bracketed group
    if input.starts_with('(') && find_matching_bracket(input, 0) == Some(input.len() - 1) {
        return parse_expression(&input[1..input.len() - 1]);
    }

    // numeric constant, including scientific notation
    if let Ok(value) = input.parse::<f64>() {
        return Ok(Expr::Const(value));
    }

    // named constants and variables
    match input {
        "pi" => return Ok(Expr::Const(PI)),
        "e" => return Ok(Expr::Const(E)),
        _ => {}
    }
    if is_identifier(input) {
        return Ok(Expr::Var(input.to_string()));
    }

    Err(format!("invalid expression fragment `{}`", input))
}

fn apply_function(name: &str, inner: Expr) -> Result<Expr, String> {
    let inner = inner.boxed();
    match name {
        "exp" => Ok(Expr::Exp(inner)),
        "ln" | "log" => Ok(Expr::Ln(inner)),
        "sqrt" => Ok(Expr::Sqrt(inner)),
        "sin" => Ok(Expr::Sin(inner)),
        "cos" => Ok(Expr::Cos(inner)),
        "tan" | "tg" => Ok(Expr::Tan(inner)),
        "asin" | "arcsin" => Ok(Expr::Asin(inner)),
        "acos" | "arccos" => Ok(Expr::Acos(inner)),
        "atan" | "arctan" => Ok(Expr::Atan(inner)),
        _ => Err(format!("unknown function `{}`", name)),
    }
}

fn is_identifier(input: &str) -> bool {
    let mut chars = input.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Rightmost `+` or `-` outside brackets that acts as a binary operator.
/// Signs at the start of the string, after another operator or after an
/// opening bracket are unary; the sign of a scientific-notation exponent
/// (`1e-6`) is part of the number.
fn find_rightmost_add_sub(input: &str) -> Option<(usize, char)> {
    let mut depth = 0;
    let mut found = None;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '+' | '-' if depth == 0 && is_binary_position(input.as_bytes(), i) => {
                found = Some((i, c));
            }
            _ => {}
        }
    }
    found
}

fn find_rightmost_mul_div(input: &str) -> Option<(usize, char)> {
    let mut depth = 0;
    let mut found = None;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '*' | '/' if depth == 0 => found = Some((i, c)),
            _ => {}
        }
    }
    found
}

fn is_binary_position(bytes: &[u8], pos: usize) -> bool {
    let mut j = pos;
    loop {
        if j == 0 {
            return false;
        }
        j -= 1;
        if !bytes[j].is_ascii_whitespace() {
            break;
        }
    }
    let prev = bytes[j] as char;
    if matches!(prev, '+' | '-' | '*' | '/' | '^' | '(') {
        return false;
    }
    // exponent sign of a number literal, e.g. 2e-3
    if (prev == 'e' || prev == 'E')
        && j > 0
        && (bytes[j - 1].is_ascii_digit() || bytes[j - 1] == b'.')
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constant() {
        assert_eq!(parse_expression("42").unwrap(), Expr::Const(42.0));
        assert_eq!(parse_expression("1e-6").unwrap(), Expr::Const(1e-6));
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(parse_expression("x").unwrap(), Expr::var("x"));
        assert_eq!(parse_expression("tau_1").unwrap(), Expr::var("tau_1"));
    }

    #[test]
    fn test_parse_named_constants() {
        assert_eq!(
            parse_expression("pi").unwrap(),
            Expr::Const(std::f64::consts::PI)
        );
        assert_eq!(
            parse_expression("e").unwrap(),
            Expr::Const(std::f64::consts::E)
        );
    }

    #[test]
    fn test_parse_addition() {
        assert_eq!(
            parse_expression("x + 2").unwrap(),
            Expr::var("x") + Expr::Const(2.0)
        );
    }

    #[test]
    fn test_parse_power() {
        assert_eq!(
            parse_expression("x^2").unwrap(),
            Expr::var("x").pow(Expr::Const(2.0))
        );
    }

    #[test]
    fn test_power_right_associative() {
        assert_eq!(
            parse_expression("2^3^2").unwrap(),
            Expr::Const(2.0).pow(Expr::Const(3.0).pow(Expr::Const(2.0)))
        );
    }

    #[test]
    fn test_left_associative_subtraction() {
        assert_eq!(
            parse_expression("x - 2 - 1").unwrap(),
            Expr::var("x") - Expr::Const(2.0) - Expr::Const(1.0)
        );
    }

    #[test]
    fn test_parse_unary_minus() {
        assert_eq!(
            parse_expression("-x").unwrap(),
            Expr::Mul(Expr::Const(-1.0).boxed(), Expr::var("x").boxed())
        );
        assert_eq!(
            parse_expression("x * -2").unwrap(),
            Expr::var("x") * Expr::Mul(Expr::Const(-1.0).boxed(), Expr::Const(2.0).boxed())
        );
    }

    #[test]
    fn test_parse_functions() {
        assert_eq!(
            parse_expression("sin(x)").unwrap(),
            Expr::Sin(Expr::var("x").boxed())
        );
        assert_eq!(
            parse_expression("log(x)").unwrap(),
            Expr::Ln(Expr::var("x").boxed())
        );
        assert_eq!(
            parse_expression("sqrt(x + 1)").unwrap(),
            Expr::Sqrt((Expr::var("x") + Expr::Const(1.0)).boxed())
        );
    }

    #[test]
    fn test_parse_nested_functions() {
        assert_eq!(
            parse_expression("sin(cos(x))").unwrap(),
            Expr::Sin(Expr::Cos(Expr::var("x").boxed()).boxed())
        );
    }

    #[test]
    fn test_parse_brackets() {
        assert_eq!(
            parse_expression("(x + y) * z").unwrap(),
            (Expr::var("x") + Expr::var("y")) * Expr::var("z")
        );
    }

    #[test]
    fn test_parse_complex_expression() {
        let expr = parse_expression("(x + y) * (z - 2) / exp(w)").unwrap();
        let expected = (Expr::var("x") + Expr::var("y")) * (Expr::var("z") - Expr::Const(2.0))
            / Expr::var("w").exp();
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_parse_scientific_notation_in_sum() {
        assert_eq!(
            parse_expression("1e-6 + x").unwrap(),
            Expr::Const(1e-6) + Expr::var("x")
        );
    }

    #[test]
    fn test_unknown_function() {
        let err = parse_expression("sinh(x)").unwrap_err();
        assert!(err.contains("unknown function"));
    }

    #[test]
    fn test_unmatched_brackets() {
        assert!(parse_expression("(x + y").is_err());
    }

    #[test]
    fn test_dangling_operator() {
        assert!(parse_expression("x +").is_err());
        assert!(parse_expression("x *").is_err());
    }
}
