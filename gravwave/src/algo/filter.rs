//! Zero-phase Butterworth low-pass filtering.
//!
//! The filter is a cascade of second-order sections designed by the bilinear
//! transform with a pre-warped cutoff. [`ButterworthLowPass::filtfilt`] runs the
//! cascade forward and then backward over an odd extension of the series, which
//! squares the magnitude response and cancels the phase response.

use std::f64::consts::PI;

use crate::error::SpectralError;

/// Order of the filter used by [`band_limit`].
pub const BAND_LIMIT_ORDER: usize = 8;

/// One second-order section, normalised so that a0 = 1.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Biquad {
    /// Low-pass section for an analog prototype `1 / (s² + d·s + 1)` with the
    /// cutoff pre-warped to `k = tan(π fc / fs)`.
    fn low_pass(damping: f64, k: f64) -> Self {
        let k2 = k * k;
        let norm = 1.0 + damping * k + k2;
        let b0 = k2 / norm;
        Self {
            b0,
            b1: 2.0 * b0,
            b2: b0,
            a1: 2.0 * (k2 - 1.0) / norm,
            a2: (1.0 - damping * k + k2) / norm,
        }
    }

    /// Run the section over `samples` in place (transposed direct form II).
    ///
    /// The state starts at the steady state for a constant input equal to the
    /// first sample, which suppresses the start-up transient.
    fn run(&self, samples: &mut [f64]) {
        let Some(&first) = samples.first() else {
            return;
        };
        // Steady state of a unity-DC-gain section
        let mut z1 = (1.0 - self.b0) * first;
        let mut z2 = (self.b2 - self.a2) * first;

        for x in samples.iter_mut() {
            let input = *x;
            let output = self.b0 * input + z1;
            z1 = self.b1 * input - self.a1 * output + z2;
            z2 = self.b2 * input - self.a2 * output;
            *x = output;
        }
    }
}

/// Butterworth low-pass filter as a cascade of biquads.
#[derive(Debug, Clone, PartialEq)]
pub struct ButterworthLowPass {
    sections: Vec<Biquad>,
    cutoff: f64,
    sampling_frequency: f64,
}

impl ButterworthLowPass {
    /// Design a low-pass filter.
    ///
    /// # Arguments
    /// * `order` - Filter order, rounded up to the next even number
    /// * `cutoff` - -3 dB frequency in Hz, must lie in (0, fs/2)
    /// * `sampling_frequency` - Sampling frequency in Hz
    ///
    /// # Errors
    /// * `SpectralError::InvalidSamplingFrequency` - `fs` not finite and positive
    /// * `SpectralError::InvalidCutoff` - cutoff outside (0, fs/2)
    pub fn new(order: usize, cutoff: f64, sampling_frequency: f64) -> Result<Self, SpectralError> {
        if !(sampling_frequency.is_finite() && sampling_frequency > 0.0) {
            return Err(SpectralError::InvalidSamplingFrequency(sampling_frequency));
        }
        let nyquist = sampling_frequency / 2.0;
        if !(cutoff > 0.0 && cutoff < nyquist) {
            return Err(SpectralError::InvalidCutoff { cutoff, nyquist });
        }

        let n_sections = order.div_ceil(2).max(1);
        let full_order = 2 * n_sections;
        let k = (PI * cutoff / sampling_frequency).tan();

        // Conjugate pole pairs of the analog prototype sit at angles
        // (2i + 1)π / (2n) from the imaginary axis.
        let sections = (0..n_sections)
            .map(|i| {
                let angle = (2 * i + 1) as f64 * PI / (2 * full_order) as f64;
                Biquad::low_pass(2.0 * angle.sin(), k)
            })
            .collect();

        Ok(Self {
            sections,
            cutoff,
            sampling_frequency,
        })
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    pub fn order(&self) -> usize {
        2 * self.sections.len()
    }

    fn run_cascade(&self, samples: &mut [f64]) {
        for section in &self.sections {
            section.run(samples);
        }
    }

    /// Single forward pass (causal, with phase delay).
    pub fn filter(&self, series: &[f64]) -> Vec<f64> {
        let mut samples = series.to_vec();
        self.run_cascade(&mut samples);
        samples
    }

    /// Forward-backward pass with zero phase.
    ///
    /// The series is padded at both ends by an odd reflection about its end
    /// points before filtering, and the padding is removed afterwards.
    pub fn filtfilt(&self, series: &[f64]) -> Vec<f64> {
        let n = series.len();
        if n == 0 {
            return Vec::new();
        }
        let pad = (3 * (2 * self.sections.len() + 1)).min(n - 1);

        let first = series[0];
        let last = series[n - 1];
        let mut extended = Vec::with_capacity(n + 2 * pad);
        extended.extend((1..=pad).rev().map(|i| 2.0 * first - series[i]));
        extended.extend_from_slice(series);
        extended.extend((1..=pad).map(|i| 2.0 * last - series[n - 1 - i]));

        self.run_cascade(&mut extended);
        extended.reverse();
        self.run_cascade(&mut extended);
        extended.reverse();

        extended[pad..pad + n].to_vec()
    }
}

/// Zero-phase 8th-order Butterworth low-pass of `series`.
///
/// # Errors
/// * `SpectralError::EmptySeries` - `series` is empty
/// * `SpectralError::InvalidCutoff` - cutoff outside (0, fs/2)
pub fn band_limit(
    series: &[f64],
    sampling_frequency: f64,
    cutoff: f64,
) -> Result<Vec<f64>, SpectralError> {
    if series.is_empty() {
        return Err(SpectralError::EmptySeries);
    }
    let filter = ButterworthLowPass::new(BAND_LIMIT_ORDER, cutoff, sampling_frequency)?;
    Ok(filter.filtfilt(series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sine(frequency: f64, fs: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * PI * frequency * i as f64 / fs).sin())
            .collect()
    }

    fn rms(samples: &[f64]) -> f64 {
        (samples.iter().map(|x| x * x).sum::<f64>() / samples.len() as f64).sqrt()
    }

    #[test]
    fn test_sections_have_unity_dc_gain() {
        let filter = ButterworthLowPass::new(8, 100.0, 1000.0).unwrap();
        assert_eq!(filter.order(), 8);
        for s in &filter.sections {
            let gain = (s.b0 + s.b1 + s.b2) / (1.0 + s.a1 + s.a2);
            assert_relative_eq!(gain, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_constant_passes_unchanged() {
        let out = band_limit(&[3.5; 200], 1000.0, 50.0).unwrap();
        for v in out {
            assert_relative_eq!(v, 3.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_passband_is_zero_phase() {
        let fs = 1024.0;
        let input = sine(5.0, fs, 4096);
        let output = band_limit(&input, fs, 100.0).unwrap();

        // Away from the edges the output tracks the input sample by sample
        for i in 1000..3000 {
            assert_relative_eq!(output[i], input[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_stopband_is_attenuated() {
        let fs = 1024.0;
        let input = sine(300.0, fs, 4096);
        let output = band_limit(&input, fs, 100.0).unwrap();
        assert!(rms(&output[500..3500]) < 1e-6 * rms(&input));
    }

    #[test]
    fn test_cutoff_is_minus_six_db_after_two_passes() {
        let fs = 1024.0;
        let cutoff = 64.0;
        let input = sine(cutoff, fs, 8192);
        let output = band_limit(&input, fs, cutoff).unwrap();
        let ratio = rms(&output[2000..6000]) / rms(&input[2000..6000]);
        assert_relative_eq!(ratio, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_single_pass_delays_signal() {
        let fs = 1024.0;
        let input = sine(20.0, fs, 2048);
        let filter = ButterworthLowPass::new(8, 100.0, fs).unwrap();
        let causal = filter.filter(&input);
        let zero_phase = filter.filtfilt(&input);
        let causal_err: f64 = (1000..1100).map(|i| (causal[i] - input[i]).abs()).sum();
        let zero_phase_err: f64 = (1000..1100).map(|i| (zero_phase[i] - input[i]).abs()).sum();
        assert!(causal_err > 100.0 * zero_phase_err);
    }

    #[test]
    fn test_invalid_cutoff() {
        assert_eq!(
            band_limit(&[1.0, 2.0], 100.0, 50.0),
            Err(SpectralError::InvalidCutoff {
                cutoff: 50.0,
                nyquist: 50.0
            })
        );
        assert!(band_limit(&[1.0, 2.0], 100.0, 0.0).is_err());
        assert!(band_limit(&[1.0, 2.0], 100.0, f64::NAN).is_err());
    }

    #[test]
    fn test_empty_and_short_series() {
        assert_eq!(band_limit(&[], 100.0, 10.0), Err(SpectralError::EmptySeries));
        assert_eq!(band_limit(&[2.0], 100.0, 10.0).unwrap(), vec![2.0]);
    }
}
