//! Ordinary least squares over (x, y) pairs.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ols {
    pub slope: f64,
    pub intercept: f64,
}

impl Ols {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits `y = slope * x + intercept` minimizing squared error. Requires at
/// least two distinct x values.
pub fn least_squares(points: &[(f64, f64)]) -> Result<Ols> {
    let n = points.len() as f64;
    if points.len() < 2 {
        return Err(Error::DegenerateRegression);
    }
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();

    let denom = n * sum_xx - sum_x * sum_x;
    if denom.abs() < f64::EPSILON * n * n {
        return Err(Error::DegenerateRegression);
    }
    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Ok(Ols { slope, intercept })
}
