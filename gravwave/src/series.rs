//! Frequency axes and complex frequency series.
//!
//! A [`FrequencyAxis`] is stored as (f0, df, len) rather than as an explicit
//! array, so two series can be checked for a shared axis in O(1).

use rustfft::num_complex::Complex64;

use crate::error::{AxisMismatchError, SpectralError};

/// Relative tolerance when comparing spacings and start frequencies.
const AXIS_TOLERANCE: f64 = 1e-9;

/// Uniform frequency axis f_k = f0 + k·df, k = 0..len.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyAxis {
    f0: f64,
    df: f64,
    len: usize,
}

impl FrequencyAxis {
    /// Create an axis from its start, spacing and length.
    ///
    /// # Errors
    /// * `SpectralError::InvalidSpacing` - `df` not finite and positive
    /// * `SpectralError::InvalidSamplingFrequency` - `f0` not finite
    pub fn new(f0: f64, df: f64, len: usize) -> Result<Self, SpectralError> {
        if !(df.is_finite() && df > 0.0) {
            return Err(SpectralError::InvalidSpacing(df));
        }
        if !f0.is_finite() {
            return Err(SpectralError::InvalidSamplingFrequency(f0));
        }
        Ok(Self { f0, df, len })
    }

    /// One-sided axis of a real series sampled at `sampling_frequency` for `time_duration`.
    ///
    /// The number of samples is `round(fs·T)`, the axis has `⌊N/2⌋ + 1` bins
    /// spaced by `fs/N` starting at 0 Hz.
    pub fn from_sampling(
        sampling_frequency: f64,
        time_duration: f64,
    ) -> Result<Self, SpectralError> {
        if !(sampling_frequency.is_finite() && sampling_frequency > 0.0) {
            return Err(SpectralError::InvalidSamplingFrequency(sampling_frequency));
        }
        let n_samples = (sampling_frequency * time_duration).round();
        if !(n_samples.is_finite() && n_samples >= 1.0) {
            return Err(SpectralError::EmptySeries);
        }
        let n_samples = n_samples as usize;
        Self::new(0.0, sampling_frequency / n_samples as f64, n_samples / 2 + 1)
    }

    /// Build an axis from explicit frequencies, checking uniform spacing.
    pub fn from_frequencies(frequencies: &[f64]) -> Result<Self, SpectralError> {
        if frequencies.len() < 2 {
            return Err(SpectralError::AxisTooShort(frequencies.len()));
        }
        let df = frequencies[1] - frequencies[0];
        let axis = Self::new(frequencies[0], df, frequencies.len())?;
        for (k, &f) in frequencies.iter().enumerate() {
            let expected = axis.frequency(k);
            if (f - expected).abs() > AXIS_TOLERANCE * expected.abs().max(df) {
                return Err(SpectralError::NonUniformAxis(k));
            }
        }
        Ok(axis)
    }

    pub fn f0(&self) -> f64 {
        self.f0
    }

    pub fn df(&self) -> f64 {
        self.df
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Frequency of bin `k` in Hz.
    pub fn frequency(&self, k: usize) -> f64 {
        self.f0 + k as f64 * self.df
    }

    /// Highest frequency on the axis.
    pub fn max_frequency(&self) -> f64 {
        self.frequency(self.len.saturating_sub(1))
    }

    /// Materialize the axis as an array.
    pub fn frequencies(&self) -> Vec<f64> {
        (0..self.len).map(|k| self.frequency(k)).collect()
    }

    /// Check that `other` is the same axis.
    ///
    /// # Errors
    /// The first disagreement found, in the order length, spacing, start.
    pub fn ensure_matches(&self, other: &FrequencyAxis) -> Result<(), AxisMismatchError> {
        if self.len != other.len {
            return Err(AxisMismatchError::Length {
                left: self.len,
                right: other.len,
            });
        }
        if (self.df - other.df).abs() > AXIS_TOLERANCE * self.df.abs().max(other.df.abs()) {
            return Err(AxisMismatchError::Spacing {
                left: self.df,
                right: other.df,
            });
        }
        if (self.f0 - other.f0).abs() > AXIS_TOLERANCE * self.df.max(self.f0.abs()) {
            return Err(AxisMismatchError::Start {
                left: self.f0,
                right: other.f0,
            });
        }
        Ok(())
    }
}

/// Complex amplitudes on a uniform frequency axis.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencySeries {
    axis: FrequencyAxis,
    values: Vec<Complex64>,
}

impl FrequencySeries {
    /// Pair values with an axis of the same length.
    pub fn new(axis: FrequencyAxis, values: Vec<Complex64>) -> Result<Self, SpectralError> {
        if axis.len() != values.len() {
            return Err(SpectralError::LengthMismatch {
                frequencies: axis.len(),
                values: values.len(),
            });
        }
        Ok(Self { axis, values })
    }

    /// Pair values with an explicit, uniformly spaced frequency array.
    pub fn from_arrays(frequencies: &[f64], values: Vec<Complex64>) -> Result<Self, SpectralError> {
        if frequencies.len() != values.len() {
            return Err(SpectralError::LengthMismatch {
                frequencies: frequencies.len(),
                values: values.len(),
            });
        }
        Self::new(FrequencyAxis::from_frequencies(frequencies)?, values)
    }

    /// All-zero series on `axis`.
    pub fn zeros(axis: FrequencyAxis) -> Self {
        Self {
            axis,
            values: vec![Complex64::new(0.0, 0.0); axis.len()],
        }
    }

    pub fn axis(&self) -> &FrequencyAxis {
        &self.axis
    }

    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [Complex64] {
        &mut self.values
    }

    pub fn into_values(self) -> Vec<Complex64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.axis.frequencies()
    }

    /// Add `other` bin by bin; the axes must match.
    pub fn add_assign(&mut self, other: &FrequencySeries) -> Result<(), AxisMismatchError> {
        self.axis.ensure_matches(&other.axis)?;
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a += *b;
        }
        Ok(())
    }

    /// Multiply every bin by a real scale factor.
    pub fn scaled(&self, factor: f64) -> FrequencySeries {
        Self {
            axis: self.axis,
            values: self.values.iter().map(|v| *v * factor).collect(),
        }
    }
}
