//! Noise-weighted inner products and signal-to-noise ratios.
//!
//! These are the hot kernels of the likelihood: every evaluation computes one
//! optimal and one matched-filter SNR² per interferometer.

use rustfft::num_complex::Complex64;

use crate::algo::psd::PowerSpectralDensity;
use crate::detector::Interferometer;
use crate::error::{AxisMismatchError, GwError, Result};
use crate::series::{FrequencyAxis, FrequencySeries};

fn check_lengths(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(AxisMismatchError::Length { left, right }.into());
    }
    Ok(())
}

/// Reject PSD bins that are zero, negative or NaN. +∞ is allowed and removes
/// the bin from the sum.
pub(crate) fn check_psd(psd: &[f64]) -> Result<()> {
    match psd.iter().position(|&p| !(p > 0.0)) {
        Some(index) => Err(GwError::InvalidPsd {
            index,
            value: psd[index],
        }),
        None => Ok(()),
    }
}

/// Noise-weighted inner product ⟨a, b⟩ = (4/T) Σ conj(aₖ) bₖ / psdₖ.
///
/// # Arguments
/// * `a` - Series to be conjugated
/// * `b` - Series not conjugated
/// * `psd` - One-sided PSD on the same bins
/// * `time_duration` - Segment length T in seconds, 1/T is the bin width
///
/// # Errors
/// * `GwError::AxisMismatch` - the three arrays differ in length
/// * `GwError::InvalidPsd` - a PSD bin is zero, negative or NaN
/// * `GwError::InvalidDuration` - `time_duration` not finite and positive
pub fn noise_weighted_inner_product(
    a: &[Complex64],
    b: &[Complex64],
    psd: &[f64],
    time_duration: f64,
) -> Result<Complex64> {
    check_lengths(a.len(), b.len())?;
    check_lengths(a.len(), psd.len())?;
    if !(time_duration.is_finite() && time_duration > 0.0) {
        return Err(GwError::InvalidDuration(time_duration));
    }
    check_psd(psd)?;

    let sum: Complex64 = a
        .iter()
        .zip(b)
        .zip(psd)
        .map(|((x, y), p)| x.conj() * *y / *p)
        .sum();
    Ok(sum * (4.0 / time_duration))
}

/// Inner product against a PSD curve, 4·Re(Σ conj(a) b / PSD(f))·Δf.
///
/// `frequency` must be uniformly spaced; Δf is taken from its first two
/// entries. The PSD is interpolated at every frequency.
pub fn inner_product(
    a: &[Complex64],
    b: &[Complex64],
    frequency: &[f64],
    psd: &PowerSpectralDensity,
) -> Result<f64> {
    check_lengths(a.len(), b.len())?;
    check_lengths(a.len(), frequency.len())?;
    let axis = FrequencyAxis::from_frequencies(frequency)?;

    let psd_values = frequency
        .iter()
        .map(|&f| psd.interpolate(f))
        .collect::<std::result::Result<Vec<f64>, _>>()?;
    check_psd(&psd_values)?;

    let sum: Complex64 = a
        .iter()
        .zip(b)
        .zip(&psd_values)
        .map(|((x, y), p)| x.conj() * *y / *p)
        .sum();
    Ok(4.0 * sum.re * axis.df())
}

/// Matched-filter SNR², ⟨signal, d⟩ against the interferometer's data.
///
/// # Errors
/// * `GwError::NotReady` - no data or no interpolated PSD array
/// * `GwError::AxisMismatch` - `signal` is not on the data axis
pub fn matched_filter_snr_squared(
    signal: &FrequencySeries,
    interferometer: &Interferometer,
    time_duration: f64,
) -> Result<Complex64> {
    let data = interferometer.require_data()?;
    let psd = interferometer.require_psd_array()?;
    signal.axis().ensure_matches(data.axis())?;
    noise_weighted_inner_product(signal.values(), data.values(), psd, time_duration)
}

/// Optimal SNR², ⟨signal, signal⟩ with the interferometer's PSD.
pub fn optimal_snr_squared(
    signal: &FrequencySeries,
    interferometer: &Interferometer,
    time_duration: f64,
) -> Result<f64> {
    let data = interferometer.require_data()?;
    let psd = interferometer.require_psd_array()?;
    signal.axis().ensure_matches(data.axis())?;
    Ok(noise_weighted_inner_product(signal.values(), signal.values(), psd, time_duration)?.re)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::geometry::models;
    use crate::error::{NotReadyError, Requirement};
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_hand_computed_inner_product() {
        let a = [c(1.0, 1.0), c(2.0, 0.0)];
        let b = [c(0.0, 1.0), c(1.0, -1.0)];
        let psd = [2.0, 4.0];
        // conj(1+i)(i)/2 = (1+i)/2, 2(1-i)/4 = (1-i)/2, sum = 1
        let product = noise_weighted_inner_product(&a, &b, &psd, 4.0).unwrap();
        assert_relative_eq!(product.re, 1.0, epsilon = 1e-15);
        assert_relative_eq!(product.im, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_hermitian_symmetry_and_positivity() {
        let a: Vec<Complex64> = (0..16).map(|k| c(k as f64, 1.0 - k as f64)).collect();
        let b: Vec<Complex64> = (0..16).map(|k| c((k as f64).sin(), 0.5)).collect();
        let psd: Vec<f64> = (0..16).map(|k| 1.0 + k as f64).collect();

        let ab = noise_weighted_inner_product(&a, &b, &psd, 2.0).unwrap();
        let ba = noise_weighted_inner_product(&b, &a, &psd, 2.0).unwrap();
        assert_relative_eq!(ab.re, ba.re, epsilon = 1e-12);
        assert_relative_eq!(ab.im, -ba.im, epsilon = 1e-12);

        let aa = noise_weighted_inner_product(&a, &a, &psd, 2.0).unwrap();
        assert!(aa.re > 0.0);
        assert_relative_eq!(aa.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_signal_gives_zero() {
        let zeros = vec![c(0.0, 0.0); 8];
        let b = vec![c(3.0, -2.0); 8];
        let psd = vec![1.0; 8];
        assert_eq!(
            noise_weighted_inner_product(&zeros, &b, &psd, 1.0).unwrap(),
            c(0.0, 0.0)
        );
    }

    #[test]
    fn test_infinite_psd_removes_bin() {
        let a = [c(1.0, 0.0), c(5.0, 0.0)];
        let psd = [1.0, f64::INFINITY];
        let product = noise_weighted_inner_product(&a, &a, &psd, 1.0).unwrap();
        assert_relative_eq!(product.re, 4.0);
    }

    #[test]
    fn test_invalid_psd_values() {
        let a = [c(1.0, 0.0); 3];
        for bad in [0.0, -1.0, f64::NAN] {
            let err = noise_weighted_inner_product(&a, &a, &[1.0, bad, 1.0], 1.0).unwrap_err();
            assert!(matches!(err, GwError::InvalidPsd { index: 1, .. }));
        }
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let a = [c(1.0, 0.0); 3];
        let b = [c(1.0, 0.0); 4];
        assert_eq!(
            noise_weighted_inner_product(&a, &b, &[1.0; 3], 1.0),
            Err(GwError::AxisMismatch(AxisMismatchError::Length { left: 3, right: 4 }))
        );
        assert!(noise_weighted_inner_product(&a, &a, &[1.0; 2], 1.0).is_err());
    }

    #[test]
    fn test_invalid_duration() {
        let a = [c(1.0, 0.0)];
        assert_eq!(
            noise_weighted_inner_product(&a, &a, &[1.0], 0.0),
            Err(GwError::InvalidDuration(0.0))
        );
    }

    #[test]
    fn test_psd_object_variant_matches_array_variant() {
        let n = 33;
        let df = 0.5;
        let frequency: Vec<f64> = (0..n).map(|k| k as f64 * df).collect();
        let a: Vec<Complex64> = (0..n).map(|k| c(1.0 + k as f64, 0.3)).collect();
        let b: Vec<Complex64> = (0..n).map(|k| c(0.2, -(k as f64))).collect();
        let psd = PowerSpectralDensity::new(vec![0.0, 16.0], vec![1.0, 5.0]).unwrap();
        let psd_array = psd
            .interpolate_axis(&FrequencyAxis::from_frequencies(&frequency).unwrap())
            .unwrap();

        let via_curve = inner_product(&a, &b, &frequency, &psd).unwrap();
        // T = 1/df
        let via_array = noise_weighted_inner_product(&a, &b, &psd_array, 1.0 / df).unwrap();
        assert_relative_eq!(via_curve, via_array.re, max_relative = 1e-12);
    }

    #[test]
    fn test_psd_object_variant_propagates_domain_error() {
        let frequency = [0.0, 1.0, 2.0];
        let a = [c(1.0, 0.0); 3];
        let psd = PowerSpectralDensity::new(vec![0.5, 2.0], vec![1.0, 1.0]).unwrap();
        assert!(matches!(
            inner_product(&a, &a, &frequency, &psd),
            Err(GwError::Domain(_))
        ));
    }

    #[test]
    fn test_psd_object_variant_rejects_non_uniform_frequencies() {
        let frequency = [0.0, 1.0, 3.0];
        let a = [c(1.0, 0.0); 3];
        let psd = PowerSpectralDensity::new(vec![0.0, 4.0], vec![1.0, 1.0]).unwrap();
        assert!(matches!(
            inner_product(&a, &a, &frequency, &psd),
            Err(GwError::Spectral(_))
        ));
    }

    #[test]
    fn test_snr_requires_ready_interferometer() {
        let ifo = Interferometer::new("H1", models::H1.clone());
        let axis = FrequencyAxis::new(0.0, 1.0, 3).unwrap();
        let signal = FrequencySeries::zeros(axis);
        assert_eq!(
            optimal_snr_squared(&signal, &ifo, 1.0),
            Err(GwError::NotReady(NotReadyError {
                interferometer: "H1".to_string(),
                missing: Requirement::Data,
            }))
        );
    }

    #[test]
    fn test_snr_against_interferometer() {
        let fs = 16.0;
        let duration = 2.0;
        let axis = FrequencyAxis::from_sampling(fs, duration).unwrap();
        let mut ifo = Interferometer::new("L1", models::L1.clone());
        ifo.set_power_spectral_density(PowerSpectralDensity::flat(2.0, 0.0, fs / 2.0).unwrap());

        let data_values: Vec<Complex64> = (0..axis.len()).map(|k| c(k as f64, 0.0)).collect();
        ifo.set_data(fs, duration, FrequencySeries::new(axis, data_values).unwrap())
            .unwrap();

        let signal = FrequencySeries::new(axis, vec![c(1.0, 0.0); axis.len()]).unwrap();
        // Missing PSD array until set_spectral_densities
        assert!(matches!(
            optimal_snr_squared(&signal, &ifo, duration),
            Err(GwError::NotReady(NotReadyError {
                missing: Requirement::SpectralDensityArray,
                ..
            }))
        ));
        ifo.set_spectral_densities().unwrap();

        let n = axis.len() as f64;
        let optimal = optimal_snr_squared(&signal, &ifo, duration).unwrap();
        assert_relative_eq!(optimal, 4.0 / duration * n / 2.0, epsilon = 1e-12);

        let matched = matched_filter_snr_squared(&signal, &ifo, duration).unwrap();
        let index_sum = n * (n - 1.0) / 2.0;
        assert_relative_eq!(matched.re, 4.0 / duration * index_sum / 2.0, epsilon = 1e-12);

        let shorter = FrequencySeries::zeros(FrequencyAxis::new(0.0, 0.5, 5).unwrap());
        assert!(matches!(
            optimal_snr_squared(&shorter, &ifo, duration),
            Err(GwError::AxisMismatch(_))
        ));
    }
}
