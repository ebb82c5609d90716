//! Tukey (tapered cosine) windows.

use std::f64::consts::PI;

use crate::error::SpectralError;

/// Symmetric Hann window of length `n`.
fn hann_window(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![1.0];
    }
    let nm1 = (n - 1) as f64;
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / nm1).cos())
        .collect()
}

/// Symmetric Tukey window of length `n`.
///
/// A fraction `alpha` of the window is inside the cosine tapers, split evenly
/// between the two ends. `alpha <= 0` gives a rectangular window and
/// `alpha >= 1` a Hann window. Values are in [0, 1] and the window is
/// symmetric about its centre.
pub fn tukey_window(n: usize, alpha: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 || alpha <= 0.0 {
        return vec![1.0; n];
    }
    if alpha >= 1.0 {
        return hann_window(n);
    }

    let nm1 = (n - 1) as f64;
    let width = (alpha * nm1 / 2.0).floor() as usize;

    (0..n)
        .map(|i| {
            let x = i as f64;
            if i <= width {
                0.5 * (1.0 + (PI * (-1.0 + 2.0 * x / alpha / nm1)).cos())
            } else if i < n - width - 1 {
                1.0
            } else {
                0.5 * (1.0 + (PI * (-2.0 / alpha + 1.0 + 2.0 * x / alpha / nm1)).cos())
            }
        })
        .collect()
}

/// Multiply `series` by `window` sample by sample.
///
/// # Errors
/// * `SpectralError::WindowLengthMismatch` - lengths differ
pub fn apply_window(series: &[f64], window: &[f64]) -> Result<Vec<f64>, SpectralError> {
    if series.len() != window.len() {
        return Err(SpectralError::WindowLengthMismatch {
            window: window.len(),
            series: series.len(),
        });
    }
    Ok(series.iter().zip(window).map(|(x, w)| x * w).collect())
}

/// `series` tapered by a Tukey window of matching length.
///
/// # Errors
/// * `SpectralError::EmptySeries` - `series` is empty
pub fn windowed_segment(series: &[f64], alpha: f64) -> Result<Vec<f64>, SpectralError> {
    if series.is_empty() {
        return Err(SpectralError::EmptySeries);
    }
    apply_window(series, &tukey_window(series.len(), alpha))
}
