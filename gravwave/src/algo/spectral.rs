//! One-sided Fourier transforms with frequency-axis bookkeeping.
//!
//! Normalisation: the forward transform is the unnormalised DFT divided by the
//! sampling frequency, so `X(f)` approximates the continuous Fourier transform
//! and carries units of strain/Hz.

use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

use crate::error::SpectralError;
use crate::series::{FrequencyAxis, FrequencySeries};

fn check_sampling_frequency(sampling_frequency: f64) -> Result<(), SpectralError> {
    if sampling_frequency.is_finite() && sampling_frequency > 0.0 {
        Ok(())
    } else {
        Err(SpectralError::InvalidSamplingFrequency(sampling_frequency))
    }
}

/// One-sided DFT of a real time series.
///
/// # Arguments
/// * `series` - Real samples, evenly spaced
/// * `sampling_frequency` - Sampling frequency in Hz
///
/// # Returns
/// `⌊N/2⌋ + 1` bins scaled by `1/fs` on the axis f0 = 0, Δf = fs/N
///
/// # Errors
/// * `SpectralError::EmptySeries` - `series` is empty
/// * `SpectralError::InvalidSamplingFrequency` - `fs` not finite and positive
pub fn forward_transform(
    series: &[f64],
    sampling_frequency: f64,
) -> Result<FrequencySeries, SpectralError> {
    if series.is_empty() {
        return Err(SpectralError::EmptySeries);
    }
    check_sampling_frequency(sampling_frequency)?;

    let n = series.len();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);

    let mut buffer: Vec<Complex64> = series.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    fft.process(&mut buffer);

    let scale = 1.0 / sampling_frequency;
    let values: Vec<Complex64> = buffer[..n / 2 + 1].iter().map(|c| *c * scale).collect();

    let axis = FrequencyAxis::new(0.0, sampling_frequency / n as f64, values.len())?;
    FrequencySeries::new(axis, values)
}

/// Inverse of [`forward_transform`].
///
/// The negative-frequency half is rebuilt by Hermitian symmetry, so the
/// imaginary parts of the DC and (even `n_samples`) Nyquist bins are ignored.
///
/// # Errors
/// * `SpectralError::LengthMismatch` - `spectrum` does not have `⌊n_samples/2⌋ + 1` bins
pub fn inverse_transform(
    spectrum: &FrequencySeries,
    sampling_frequency: f64,
    n_samples: usize,
) -> Result<Vec<f64>, SpectralError> {
    if n_samples == 0 {
        return Err(SpectralError::EmptySeries);
    }
    check_sampling_frequency(sampling_frequency)?;
    let n_bins = n_samples / 2 + 1;
    if spectrum.len() != n_bins {
        return Err(SpectralError::LengthMismatch {
            frequencies: n_bins,
            values: spectrum.len(),
        });
    }

    let mut buffer = vec![Complex64::new(0.0, 0.0); n_samples];
    buffer[..n_bins].copy_from_slice(spectrum.values());
    for k in 1..n_samples - n_bins + 1 {
        buffer[n_samples - k] = buffer[k].conj();
    }

    let mut planner = FftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(n_samples);
    ifft.process(&mut buffer);

    let scale = sampling_frequency / n_samples as f64;
    Ok(buffer.into_iter().map(|c| c.re * scale).collect())
}

/// Amplitude spectral density of a one-sided frequency series, `2|x|√Δf`.
pub fn asd_from_freq_series(values: &[Complex64], df: f64) -> Vec<f64> {
    let root_df = df.sqrt();
    values.iter().map(|v| 2.0 * v.norm() * root_df).collect()
}

/// Power spectral density of a one-sided frequency series, the square of
/// [`asd_from_freq_series`].
pub fn psd_from_freq_series(values: &[Complex64], df: f64) -> Vec<f64> {
    asd_from_freq_series(values, df)
        .into_iter()
        .map(|a| a * a)
        .collect()
}
