//! # Plotting Module
//!
//! Renders a one-variable expression to a PNG line chart. The expression
//! is sampled on a fixed grid over the requested range; samples where the
//! expression leaves the real domain (poles, `ln` of negatives) are
//! dropped from the series rather than breaking the chart.

use crate::solver::error::SolverError;
use crate::symbolic::expr::Expr;
use crate::symbolic::utils::linspace;
use plotters::prelude::*;
use std::path::Path;

const SAMPLES: usize = 1000;
const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

/// Plots `expr` over `[start, end]` and writes the chart to `path`.
pub fn plot_expression(
    expr: &Expr,
    var: &str,
    start: f64,
    end: f64,
    path: &Path,
) -> Result<(), SolverError> {
    if start >= end {
        return Err(SolverError::Validation(format!(
            "plot range [{}, {}] is empty",
            start, end
        )));
    }
    let f = expr.lambdify1d(var);
    let points: Vec<(f64, f64)> = linspace(start, end, SAMPLES)
        .into_iter()
        .map(|x| (x, f(x)))
        .filter(|(_, y)| y.is_finite())
        .collect();
    if points.is_empty() {
        return Err(SolverError::Validation(format!(
            "`{}` has no finite values on [{}, {}]",
            expr, start, end
        )));
    }
    if points.len() < SAMPLES {
        log::warn!(
            "`{}`: dropped {} non-finite samples on [{}, {}]",
            expr,
            SAMPLES - points.len(),
            start,
            end
        );
    }

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in &points {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    // pad the vertical axis so flat curves are not drawn on the border
    let padding = 0.05 * (y_max - y_min).max(1e-9);
    y_min -= padding;
    y_max += padding;

    let plot_error = |reason: String| SolverError::Plot {
        path: path.to_path_buf(),
        reason,
    };

    let root_area = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root_area
        .fill(&WHITE)
        .map_err(|e| plot_error(e.to_string()))?;
    let mut chart = ChartBuilder::on(&root_area)
        .caption(expr.to_string(), ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(start..end, y_min..y_max)
        .map_err(|e| plot_error(e.to_string()))?;
    chart
        .configure_mesh()
        .x_desc(var)
        .draw()
        .map_err(|e| plot_error(e.to_string()))?;
    chart
        .draw_series(LineSeries::new(points, &BLUE))
        .map_err(|e| plot_error(e.to_string()))?;
    root_area
        .present()
        .map_err(|e| plot_error(e.to_string()))?;
    log::info!("plot of `{}` written to {}", expr, path.display());
    Ok(())
}
