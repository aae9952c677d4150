use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    #[error("size mismatch: {x_len} x values but {y_len} y values")]
    MismatchedLength { x_len: usize, y_len: usize },
    #[error("insufficient data: need at least 2 points, got {len}")]
    InsufficientData { len: usize },
    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },
    #[error("degenerate input: zero variance in X")]
    ZeroVariance,
    #[error("fitted line is not representable: slope {slope}, intercept {intercept}")]
    NonFiniteResult { slope: f64, intercept: f64 },
}

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn residuals<'a>(&'a self, xs: &'a [f64], ys: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
        xs.iter().zip(ys).map(move |(x, y)| y - self.predict(*x))
    }
}

impl fmt::Display for Regression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {:.2} * x + {:.2}", self.slope, self.intercept)
    }
}

/// Ordinary least squares fit of `ys` against `xs`.
pub fn lin_reg(xs: &[f64], ys: &[f64]) -> Result<Regression, RegressionError> {
    if xs.len() != ys.len() {
        return Err(RegressionError::MismatchedLength {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(RegressionError::InsufficientData { len: xs.len() });
    }
    if let Some(index) = xs
        .iter()
        .zip(ys)
        .position(|(x, y)| !x.is_finite() || !y.is_finite())
    {
        return Err(RegressionError::NonFinite { index });
    }
    // exact comparison: a mean of identical values can round away from them
    if xs.iter().all(|x| *x == xs[0]) {
        return Err(RegressionError::ZeroVariance);
    }

    // values are scaled into [-1, 1] before centring so no sum of products can overflow
    let scale_x = max_abs(xs);
    let scale_y = max_abs(ys);
    let mean_ux = mean(xs.iter().map(|x| x / scale_x));
    let mean_uy = mean(ys.iter().map(|y| y / scale_y));
    let dev_xs = xs.iter().map(|x| x / scale_x - mean_ux);
    let dev_ys = ys.iter().map(|y| y / scale_y - mean_uy);

    let x_squared = dev_xs.clone().fold(0.0, |acc, x| acc + x * x);
    if x_squared == 0.0 {
        return Err(RegressionError::ZeroVariance);
    }

    let slope =
        dev_ys.zip(dev_xs).fold(0.0, |acc, (y, x)| acc + x * y) / x_squared * (scale_y / scale_x);
    let intercept = mean_uy * scale_y - slope * (mean_ux * scale_x);
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(RegressionError::NonFiniteResult { slope, intercept });
    }
    Ok(Regression { slope, intercept })
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    values
        .enumerate()
        .fold(0.0, |mean, (i, v)| mean + (v - mean) / (i + 1) as f64)
}

/// Largest magnitude, or 1 for an all-zero sequence.
fn max_abs(values: &[f64]) -> f64 {
    let max = values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()));
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const XS: [f64; 11] = [10., 8., 13., 9., 11., 14., 6., 4., 12., 7., 5.];
    const YS: [f64; 11] = [
        8.04, 6.95, 7.58, 8.81, 8.33, 9.96, 7.24, 4.26, 10.84, 4.82, 5.68,
    ];

    #[test]
    fn first_anscombe_set() {
        let reg = lin_reg(&XS, &YS).unwrap();
        assert_relative_eq!(reg.slope, 55.01 / 110.0, epsilon = 1e-9);
        assert_relative_eq!(reg.intercept, 82.51 / 11.0 - 9.0 * 55.01 / 110.0, epsilon = 1e-9);
        assert_eq!(reg.to_string(), "y = 0.50 * x + 3.00");
    }

    #[test]
    fn exact_line_is_recovered() {
        let xs = [-2.0, 0.5, 1.0, 4.0, 7.5];
        let ys: Vec<f64> = xs.iter().map(|x| -1.25 * x + 4.0).collect();
        let reg = lin_reg(&xs, &ys).unwrap();
        assert_relative_eq!(reg.slope, -1.25, epsilon = 1e-12);
        assert_relative_eq!(reg.intercept, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn residuals_sum_to_zero() {
        let xs = [0.3, 1.7, 2.2, 5.9, 6.1, 9.4, 12.0];
        let ys = [1.0, -3.2, 4.4, 0.7, 8.8, 2.5, 11.1];
        let reg = lin_reg(&xs, &ys).unwrap();
        let total: f64 = reg.residuals(&xs, &ys).sum();
        assert!(total.abs() < 1e-9, "residual sum was {}", total);

        let reg = lin_reg(&XS, &YS).unwrap();
        assert!(reg.residuals(&XS, &YS).sum::<f64>().abs() < 1e-9);
    }

    #[test]
    fn line_passes_through_means() {
        let xs = [3.0, 3.5, 8.0, 11.0];
        let ys = [2.0, 9.0, -4.0, 6.5];
        let reg = lin_reg(&xs, &ys).unwrap();
        let mean = |values: &[f64]| values.iter().sum::<f64>() / values.len() as f64;
        assert_relative_eq!(reg.predict(mean(&xs)), mean(&ys), epsilon = 1e-9);
    }

    #[test]
    fn constant_x_is_degenerate() {
        let xs = [8.0; 11];
        assert_eq!(lin_reg(&xs, &YS), Err(RegressionError::ZeroVariance));

        let xs = [0.1, 0.1, 0.1];
        assert_eq!(
            lin_reg(&xs, &[1.0, 2.0, 3.0]),
            Err(RegressionError::ZeroVariance)
        );
    }

    #[test]
    fn length_mismatch() {
        assert_eq!(
            lin_reg(&XS, &YS[..10]),
            Err(RegressionError::MismatchedLength { x_len: 11, y_len: 10 })
        );
    }

    #[test]
    fn too_few_points() {
        assert_eq!(
            lin_reg(&[], &[]),
            Err(RegressionError::InsufficientData { len: 0 })
        );
        assert_eq!(
            lin_reg(&[1.0], &[2.0]),
            Err(RegressionError::InsufficientData { len: 1 })
        );
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(
            lin_reg(&[1.0, 2.0, 3.0], &[1.0, f64::NAN, 3.0]),
            Err(RegressionError::NonFinite { index: 1 })
        );
        assert_eq!(
            lin_reg(&[f64::INFINITY, 2.0], &[1.0, 3.0]),
            Err(RegressionError::NonFinite { index: 0 })
        );
    }

    #[test]
    fn huge_values_are_fitted() {
        let xs = [0.0, 1e300, 2e300];
        let reg = lin_reg(&xs, &xs).unwrap();
        assert_relative_eq!(reg.slope, 1.0, epsilon = 1e-12);
        assert!(reg.intercept.abs() <= 1e288, "intercept was {}", reg.intercept);

        let ys = [3.0e300, 2.0e300, 1.0e300];
        let reg = lin_reg(&xs, &ys).unwrap();
        assert_relative_eq!(reg.slope, -1.0, epsilon = 1e-12);
        assert_relative_eq!(reg.intercept, 3.0e300, max_relative = 1e-12);
    }

    #[test]
    fn unrepresentable_slope() {
        let result = lin_reg(&[0.0, 1e-300], &[0.0, 1e300]);
        match result {
            Err(RegressionError::NonFiniteResult { slope, .. }) => assert!(slope.is_infinite()),
            other => panic!("expected NonFiniteResult, got {:?}", other),
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            RegressionError::ZeroVariance.to_string(),
            "degenerate input: zero variance in X"
        );
    }
}
