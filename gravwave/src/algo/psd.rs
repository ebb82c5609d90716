use rand::prelude::*;
use rand_distr::StandardNormal;
use rustfft::num_complex::Complex64;

use crate::error::{DomainError, GwError, SpectralError};
use crate::series::{FrequencyAxis, FrequencySeries};

/// Validate PSD curve inputs for physical correctness.
///
/// # Errors
/// * `SpectralError::AxisTooShort` - fewer than 2 points
/// * `SpectralError::LengthMismatch` - frequency and value arrays differ in length
/// * `SpectralError::InvalidPsdPoint` - NaN/infinite/negative frequency or value,
///   or frequencies not strictly increasing
fn validate_psd_inputs(frequencies: &[f64], values: &[f64]) -> Result<(), SpectralError> {
    if frequencies.len() != values.len() {
        return Err(SpectralError::LengthMismatch {
            frequencies: frequencies.len(),
            values: values.len(),
        });
    }
    if frequencies.len() < 2 {
        return Err(SpectralError::AxisTooShort(frequencies.len()));
    }

    for (index, (&frequency, &value)) in frequencies.iter().zip(values).enumerate() {
        if !frequency.is_finite() {
            return Err(SpectralError::InvalidPsdPoint {
                index,
                reason: "frequency is not finite",
            });
        }
        if frequency < 0.0 {
            return Err(SpectralError::InvalidPsdPoint {
                index,
                reason: "frequency is negative",
            });
        }
        if !value.is_finite() {
            return Err(SpectralError::InvalidPsdPoint {
                index,
                reason: "power is not finite",
            });
        }
        if value < 0.0 {
            return Err(SpectralError::InvalidPsdPoint {
                index,
                reason: "power is negative",
            });
        }
        if index > 0 && frequency <= frequencies[index - 1] {
            return Err(SpectralError::InvalidPsdPoint {
                index,
                reason: "frequencies are not strictly increasing",
            });
        }
    }
    Ok(())
}

/// A single point of a power spectral density curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PsdPoint {
    /// Frequency in Hz
    pub frequency: f64,
    /// One-sided power spectral density in strain²/Hz
    pub power: f64,
}

/// One-sided detector noise power spectral density.
///
/// The curve owns its own frequency grid, independent of any data it is later
/// applied to, and is evaluated at arbitrary frequencies by linear
/// interpolation. There is no extrapolation: querying outside the grid is a
/// [`DomainError`].
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSpectralDensity {
    frequencies: Vec<f64>,
    values: Vec<f64>,
}

impl PowerSpectralDensity {
    /// Create a PSD curve from matching frequency and power arrays.
    ///
    /// # Arguments
    /// * `frequencies` - Strictly increasing, non-negative frequencies in Hz
    /// * `values` - Non-negative PSD values in strain²/Hz
    pub fn new(frequencies: Vec<f64>, values: Vec<f64>) -> Result<Self, SpectralError> {
        validate_psd_inputs(&frequencies, &values)?;
        Ok(Self {
            frequencies,
            values,
        })
    }

    /// Create a PSD curve from individual points.
    pub fn from_points(points: &[PsdPoint]) -> Result<Self, SpectralError> {
        let (frequencies, values) = points.iter().map(|p| (p.frequency, p.power)).unzip();
        Self::new(frequencies, values)
    }

    /// Create a PSD curve from an amplitude spectral density (squared pointwise).
    pub fn from_amplitude_spectral_density(
        frequencies: Vec<f64>,
        asd: &[f64],
    ) -> Result<Self, SpectralError> {
        Self::new(frequencies, asd.iter().map(|a| a * a).collect())
    }

    /// White noise PSD covering `[min_frequency, max_frequency]`.
    pub fn flat(level: f64, min_frequency: f64, max_frequency: f64) -> Result<Self, SpectralError> {
        Self::new(vec![min_frequency, max_frequency], vec![level, level])
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn min_frequency(&self) -> f64 {
        self.frequencies[0]
    }

    pub fn max_frequency(&self) -> f64 {
        self.frequencies[self.frequencies.len() - 1]
    }

    /// Amplitude spectral density values, √PSD.
    pub fn amplitude_spectral_density(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.sqrt()).collect()
    }

    /// Interpolate the PSD at `frequency`.
    ///
    /// # Errors
    /// * `DomainError` - `frequency` outside `[min_frequency, max_frequency]` (or NaN)
    pub fn interpolate(&self, frequency: f64) -> Result<f64, DomainError> {
        let min = self.min_frequency();
        let max = self.max_frequency();
        if !(min..=max).contains(&frequency) {
            return Err(DomainError {
                frequency,
                min,
                max,
            });
        }

        // First grid point strictly above the query
        let upper = self.frequencies.partition_point(|&f| f <= frequency);
        if upper == self.frequencies.len() {
            return Ok(self.values[upper - 1]);
        }
        let lower = upper - 1;

        let x0 = self.frequencies[lower];
        let x1 = self.frequencies[upper];
        let y0 = self.values[lower];
        let y1 = self.values[upper];
        let t = (frequency - x0) / (x1 - x0);
        Ok(y0 + t * (y1 - y0))
    }

    /// Interpolate the PSD at every bin of `axis`.
    pub fn interpolate_axis(&self, axis: &FrequencyAxis) -> Result<Vec<f64>, DomainError> {
        (0..axis.len())
            .map(|k| self.interpolate(axis.frequency(k)))
            .collect()
    }

    /// The PSD multiplied by `factor`, e.g. σ² for a noise-amplitude parameter.
    pub fn scaled(&self, factor: f64) -> Result<Self, SpectralError> {
        Self::new(
            self.frequencies.clone(),
            self.values.iter().map(|v| v * factor).collect(),
        )
    }

    /// Draw a coloured Gaussian noise realisation from this PSD.
    ///
    /// See [`noise_realisation`].
    pub fn noise_realisation(
        &self,
        sampling_frequency: f64,
        time_duration: f64,
        seed: Option<u64>,
    ) -> Result<FrequencySeries, GwError> {
        noise_realisation(self, sampling_frequency, time_duration, seed)
    }
}

/// Generate stationary coloured Gaussian noise in the frequency domain.
///
/// Each bin gets independent zero-mean Gaussian real and imaginary parts with
/// variance `psd(f) · fs · T / 4`. The DC bin and, for an even number of
/// samples, the Nyquist bin are set to zero.
///
/// # Arguments
/// * `psd` - Noise curve, must cover the whole one-sided axis [0, fs/2]
/// * `sampling_frequency` - Sampling frequency in Hz
/// * `time_duration` - Segment length in seconds
/// * `seed` - Optional random seed. If None, uses random seed
///
/// # Returns
/// Noise on the axis from [`FrequencyAxis::from_sampling`]
///
/// # Errors
/// * `GwError::Domain` - a bin frequency lies outside the PSD's range
/// * `GwError::Spectral` - invalid sampling frequency or duration
pub fn noise_realisation(
    psd: &PowerSpectralDensity,
    sampling_frequency: f64,
    time_duration: f64,
    seed: Option<u64>,
) -> Result<FrequencySeries, GwError> {
    if !(time_duration.is_finite() && time_duration > 0.0) {
        return Err(GwError::InvalidDuration(time_duration));
    }
    let axis = FrequencyAxis::from_sampling(sampling_frequency, time_duration)?;
    let psd_values = psd.interpolate_axis(&axis)?;

    let mut rng = match seed {
        Some(s) => rand::rngs::StdRng::seed_from_u64(s),
        None => rand::rngs::StdRng::from_entropy(),
    };

    let variance_scale = sampling_frequency * time_duration / 4.0;
    let mut values: Vec<Complex64> = psd_values
        .iter()
        .map(|&p| {
            let sigma = (p * variance_scale).sqrt();
            let re: f64 = rng.sample(StandardNormal);
            let im: f64 = rng.sample(StandardNormal);
            Complex64::new(sigma * re, sigma * im)
        })
        .collect();

    values[0] = Complex64::new(0.0, 0.0);
    let n_samples = (sampling_frequency * time_duration).round() as usize;
    if n_samples % 2 == 0 {
        if let Some(last) = values.last_mut() {
            *last = Complex64::new(0.0, 0.0);
        }
    }

    Ok(FrequencySeries::new(axis, values)?)
}
