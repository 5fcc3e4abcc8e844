//! # Request Dispatch Module
//!
//! The bridge between the user-facing surface and the symbolic engine.
//! A [`Request`] carries an operation tag plus the raw user text and
//! parameters; [`dispatch`] normalizes the text, parses it, routes it to
//! the right engine call and wraps the result in an [`Outcome`] ready for
//! display. All backend failures come back as [`SolverError::Backend`]
//! with the engine's message untouched.

use crate::solver::error::SolverError;
use crate::solver::normalize::{normalize_equation, normalize_expression};
use crate::solver::plots::plot_expression;
use crate::symbolic::expr::Expr;
use std::fmt;
use std::path::PathBuf;
use strum_macros::{Display, EnumString};

pub use crate::symbolic::limits::Side;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Diff,
    Integrate,
    Solve,
    Limit,
    Series,
    Plot,
}

/// One user request: the operation, the raw expression text and every
/// parameter any operation can take. Parameters irrelevant to the chosen
/// operation are ignored.
#[derive(Debug, Clone)]
pub struct Request {
    pub operation: Operation,
    pub expression: String,
    pub variable: String,
    /// derivative order, or the highest power of a series expansion
    pub order: usize,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    /// approach point of a limit or expansion point of a series, as typed
    /// by the user (`pi`, `inf` and `-oo` are all accepted)
    pub point: Option<String>,
    pub side: Side,
    pub range: (f64, f64),
    pub output: PathBuf,
}

impl Request {
    pub fn new(operation: Operation, expression: &str, variable: &str) -> Self {
        Request {
            operation,
            expression: expression.to_string(),
            variable: variable.to_string(),
            order: 1,
            lower: None,
            upper: None,
            point: None,
            side: Side::Both,
            range: (-10.0, 10.0),
            output: PathBuf::from("plot.png"),
        }
    }
}

/// Result of a dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Expression(Expr),
    Solutions(Vec<f64>),
    Value(f64),
    Plot(PathBuf),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Expression(expr) => write!(f, "{}", expr),
            Outcome::Solutions(roots) if roots.is_empty() => {
                write!(f, "no real solutions")
            }
            Outcome::Solutions(roots) => {
                let rendered: Vec<String> = roots.iter().map(|r| r.to_string()).collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Outcome::Value(value) => write!(f, "{}", value),
            Outcome::Plot(path) => write!(f, "plot written to {}", path.display()),
        }
    }
}

/// Routes a request to the symbolic engine and packages the result.
pub fn dispatch(request: &Request) -> Result<Outcome, SolverError> {
    log::info!(
        "{} `{}` with respect to `{}`",
        request.operation,
        request.expression.trim(),
        request.variable
    );
    let var = request.variable.as_str();
    match request.operation {
        Operation::Diff => {
            if request.order == 0 || request.order > 10 {
                return Err(SolverError::Validation(format!(
                    "derivative order must be between 1 and 10, got {}",
                    request.order
                )));
            }
            let expr = parse_normalized(&request.expression)?;
            Ok(Outcome::Expression(expr.nth_derivative(var, request.order)))
        }
        Operation::Integrate => {
            let expr = parse_normalized(&request.expression)?;
            match (request.lower, request.upper) {
                (Some(lower), Some(upper)) => {
                    let value = expr
                        .integrate_definite(var, lower, upper)
                        .map_err(SolverError::Backend)?;
                    Ok(Outcome::Value(value))
                }
                (None, None) => {
                    let antiderivative =
                        expr.integrate(var).map_err(SolverError::Backend)?;
                    Ok(Outcome::Expression(antiderivative.simplify()))
                }
                _ => Err(SolverError::Validation(
                    "a definite integral needs both bounds".to_string(),
                )),
            }
        }
        Operation::Solve => {
            let normalized = normalize_equation(&request.expression)?;
            let expr = Expr::parse(&normalized).map_err(|reason| SolverError::Parse {
                input: request.expression.trim().to_string(),
                reason,
            })?;
            let roots = expr.solve_equation(var).map_err(SolverError::Backend)?;
            Ok(Outcome::Solutions(roots))
        }
        Operation::Limit => {
            let expr = parse_normalized(&request.expression)?;
            let point = request
                .point
                .as_deref()
                .ok_or(SolverError::MissingParameter("point"))?;
            let point = parse_point(point)?;
            let value = expr
                .limit(var, point, request.side)
                .map_err(SolverError::Backend)?;
            Ok(Outcome::Value(value))
        }
        Operation::Series => {
            let expr = parse_normalized(&request.expression)?;
            let point = match request.point.as_deref() {
                Some(text) => {
                    let point = parse_point(text)?;
                    if !point.is_finite() {
                        return Err(SolverError::Validation(
                            "a series expansion point must be finite".to_string(),
                        ));
                    }
                    point
                }
                None => 0.0,
            };
            let series = expr
                .taylor(var, point, request.order)
                .map_err(SolverError::Backend)?;
            Ok(Outcome::Expression(series))
        }
        Operation::Plot => {
            let expr = parse_normalized(&request.expression)?;
            let (start, end) = request.range;
            plot_expression(&expr, var, start, end, &request.output)?;
            Ok(Outcome::Plot(request.output.clone()))
        }
    }
}

fn parse_normalized(input: &str) -> Result<Expr, SolverError> {
    let normalized = normalize_expression(input);
    Expr::parse(&normalized).map_err(|reason| SolverError::Parse {
        input: input.trim().to_string(),
        reason,
    })
}

/// Parses an approach point. `inf` and `oo` spellings denote the
/// infinities; anything else must evaluate to a number (`pi/2` is fine).
fn parse_point(text: &str) -> Result<f64, SolverError> {
    match text.trim() {
        "inf" | "+inf" | "oo" | "+oo" => return Ok(f64::INFINITY),
        "-inf" | "-oo" => return Ok(f64::NEG_INFINITY),
        _ => {}
    }
    let expr = parse_normalized(text)?;
    expr.eval_const()
        .map_err(|reason| SolverError::Validation(format!("point `{}`: {}", text.trim(), reason)))
}
