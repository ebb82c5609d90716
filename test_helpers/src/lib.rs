//! Test helpers for gravwave
//!
//! This crate provides shared fixtures for the integration tests and
//! benchmarks: a white-noise PSD, a sine-Gaussian waveform model and fully
//! prepared interferometers with seeded noise.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use gravwave::{
    DetectorGeometry, FrequencyAxis, FrequencySeries, GwError, Interferometer, Parameters,
    PolarizationMode, PowerSpectralDensity, SkyLocation, WaveformGenerator,
    WaveformPolarizations,
};
use rustfft::num_complex::Complex64;

/// Sky location and time of the GW150914-like injection used across tests.
pub const INJECTION_RA: f64 = 1.375;
pub const INJECTION_DEC: f64 = -1.2108;
pub const INJECTION_PSI: f64 = 2.659;
pub const INJECTION_GEOCENT_TIME: f64 = 1_126_259_642.413;

/// Initialise `env_logger` for tests; repeated calls are harmless.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// White-noise PSD of `level` strain²/Hz covering [0, fs/2].
pub fn flat_psd(level: f64, sampling_frequency: f64) -> Result<PowerSpectralDensity, GwError> {
    Ok(PowerSpectralDensity::flat(level, 0.0, sampling_frequency / 2.0)?)
}

/// Injection parameters for [`SineGaussian`] at the standard sky location.
pub fn injection_parameters(amplitude: f64, central_frequency: f64) -> Parameters {
    Parameters::from([
        ("amplitude".to_string(), amplitude),
        ("central_frequency".to_string(), central_frequency),
        ("bandwidth".to_string(), 8.0),
        ("phase".to_string(), 0.3),
        ("ra".to_string(), INJECTION_RA),
        ("dec".to_string(), INJECTION_DEC),
        ("psi".to_string(), INJECTION_PSI),
        ("geocent_time".to_string(), INJECTION_GEOCENT_TIME),
    ])
}

/// The sky location in [`injection_parameters`].
pub fn injection_sky() -> SkyLocation {
    SkyLocation {
        ra: INJECTION_RA,
        dec: INJECTION_DEC,
        psi: INJECTION_PSI,
    }
}

/// Frequency-domain sine-Gaussian burst.
///
/// h₊(f) = A·exp(−(f − f₀)²/(2w²))·e^{iφ} and h× = −i·h₊/2, read from the
/// `amplitude`, `central_frequency`, `bandwidth` and `phase` parameters.
/// Negative amplitudes and non-positive bandwidths are outside the model.
#[derive(Debug, Clone, Copy)]
pub struct SineGaussian {
    pub axis: FrequencyAxis,
}

impl SineGaussian {
    pub fn new(sampling_frequency: f64, time_duration: f64) -> Result<Self, GwError> {
        Ok(Self {
            axis: FrequencyAxis::from_sampling(sampling_frequency, time_duration)?,
        })
    }
}

impl WaveformGenerator for SineGaussian {
    fn frequency_domain_strain(&self, parameters: &Parameters) -> Option<WaveformPolarizations> {
        let amplitude = *parameters.get("amplitude")?;
        let central_frequency = *parameters.get("central_frequency")?;
        let bandwidth = *parameters.get("bandwidth")?;
        let phase = parameters.get("phase").copied().unwrap_or(0.0);
        if amplitude < 0.0 || bandwidth <= 0.0 {
            return None;
        }

        let plus: Vec<Complex64> = (0..self.axis.len())
            .map(|k| {
                let offset = (self.axis.frequency(k) - central_frequency) / bandwidth;
                Complex64::from_polar(amplitude * (-0.5 * offset * offset).exp(), phase)
            })
            .collect();
        let cross: Vec<Complex64> = plus.iter().map(|h| *h * Complex64::new(0.0, -0.5)).collect();

        Some(BTreeMap::from([
            (PolarizationMode::Plus, FrequencySeries::new(self.axis, plus).ok()?),
            (PolarizationMode::Cross, FrequencySeries::new(self.axis, cross).ok()?),
        ]))
    }
}

/// An interferometer with seeded Gaussian noise and its PSD array set.
pub fn noisy_interferometer(
    name: &str,
    geometry: &DetectorGeometry,
    psd: PowerSpectralDensity,
    sampling_frequency: f64,
    time_duration: f64,
    seed: u64,
) -> Result<Interferometer, GwError> {
    let noise = psd.noise_realisation(sampling_frequency, time_duration, Some(seed))?;
    let mut ifo = Interferometer::new(name, geometry.clone()).with_power_spectral_density(psd);
    ifo.set_data(sampling_frequency, time_duration, noise)?;
    ifo.set_spectral_densities()?;
    Ok(ifo)
}

/// Sine wave sampled at `sampling_frequency`, for time-domain pipelines.
pub fn sine_series(frequency: f64, sampling_frequency: f64, n_samples: usize) -> Vec<f64> {
    (0..n_samples)
        .map(|i| (2.0 * PI * frequency * i as f64 / sampling_frequency).sin())
        .collect()
}
