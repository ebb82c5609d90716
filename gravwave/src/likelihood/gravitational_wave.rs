//! Matched-filter likelihood over a network of interferometers.

use log::debug;
use rustfft::num_complex::Complex64;

use super::waveform::WaveformGenerator;
use super::{checked, require_parameter, Likelihood, Parameters};
use crate::detector::Interferometer;
use crate::error::{GwError, NotReadyError, Requirement, Result};
use crate::geometry::SkyLocation;
use crate::inner_product::{
    matched_filter_snr_squared, noise_weighted_inner_product, optimal_snr_squared,
};

/// Parameter keys read by [`GravitationalWaveLikelihood`].
pub const RA_KEY: &str = "ra";
pub const DEC_KEY: &str = "dec";
pub const PSI_KEY: &str = "psi";
pub const GEOCENT_TIME_KEY: &str = "geocent_time";

/// Gaussian-noise likelihood of a waveform model given interferometer data.
///
/// log L = Σ_ifo [−½ ⟨h, h⟩ + Re ⟨h, d⟩], dropping the parameter-independent
/// −½ ⟨d, d⟩ term. With an unknown noise amplitude σ the PSD is scaled by σ²
/// and the full residual form Σ_ifo [−½ ⟨d − h, d − h⟩_σ − n·ln σ²] is used.
pub struct GravitationalWaveLikelihood<W> {
    interferometers: Vec<Interferometer>,
    waveform_generator: W,
    noise_amplitude_key: Option<String>,
}

impl<W: WaveformGenerator> GravitationalWaveLikelihood<W> {
    /// Build a likelihood over fully prepared interferometers.
    ///
    /// # Errors
    /// * `GwError::NotReady` - an interferometer has no data or no PSD array
    pub fn new(interferometers: Vec<Interferometer>, waveform_generator: W) -> Result<Self> {
        for ifo in &interferometers {
            ifo.require_data()?;
            ifo.require_psd_array()?;
        }
        debug!(
            "Likelihood over {} interferometers: {}",
            interferometers.len(),
            interferometers
                .iter()
                .map(|ifo| ifo.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Self {
            interferometers,
            waveform_generator,
            noise_amplitude_key: None,
        })
    }

    /// Treat the noise amplitude as unknown, read from `key` on every call.
    pub fn with_unknown_noise_amplitude(mut self, key: impl Into<String>) -> Self {
        self.noise_amplitude_key = Some(key.into());
        self
    }

    pub fn interferometers(&self) -> &[Interferometer] {
        &self.interferometers
    }

    pub fn waveform_generator(&self) -> &W {
        &self.waveform_generator
    }

    pub fn noise_amplitude_key(&self) -> Option<&str> {
        self.noise_amplitude_key.as_deref()
    }

    fn sky_and_time(parameters: &Parameters) -> Result<(SkyLocation, f64)> {
        let sky = SkyLocation::new(
            require_parameter(parameters, RA_KEY)?,
            require_parameter(parameters, DEC_KEY)?,
            require_parameter(parameters, PSI_KEY)?,
        )?;
        Ok((sky, require_parameter(parameters, GEOCENT_TIME_KEY)?))
    }

    fn duration(ifo: &Interferometer) -> Result<f64> {
        ifo.time_duration().ok_or_else(|| {
            GwError::NotReady(NotReadyError {
                interferometer: ifo.name().to_string(),
                missing: Requirement::Data,
            })
        })
    }
}

impl<W: WaveformGenerator> Likelihood for GravitationalWaveLikelihood<W> {
    fn log_likelihood(&self, parameters: &Parameters) -> Result<f64> {
        let (sky, geocent_time) = Self::sky_and_time(parameters)?;

        let sigma = match &self.noise_amplitude_key {
            Some(key) => {
                let sigma = require_parameter(parameters, key)?;
                if !(sigma.is_finite() && sigma > 0.0) {
                    return Ok(f64::NEG_INFINITY);
                }
                Some(sigma)
            }
            None => None,
        };

        let Some(polarizations) = self.waveform_generator.frequency_domain_strain(parameters)
        else {
            return Ok(f64::NEG_INFINITY);
        };

        let mut log_l = 0.0;
        for ifo in &self.interferometers {
            let signal = ifo.detector_response(&polarizations, &sky, geocent_time)?;
            let duration = Self::duration(ifo)?;

            match sigma {
                None => {
                    let optimal = optimal_snr_squared(&signal, ifo, duration)?;
                    let matched = matched_filter_snr_squared(&signal, ifo, duration)?;
                    log_l += -0.5 * optimal + matched.re;
                }
                Some(sigma) => {
                    let data = ifo.require_data()?;
                    data.axis().ensure_matches(signal.axis())?;
                    let residual: Vec<Complex64> = data
                        .values()
                        .iter()
                        .zip(signal.values())
                        .map(|(d, h)| *d - *h)
                        .collect();
                    let psd = ifo.require_psd_array()?;
                    // Divide by σ twice rather than forming σ², which can
                    // underflow or overflow for extreme but valid σ
                    let residual_power =
                        noise_weighted_inner_product(&residual, &residual, psd, duration)?.re
                            / sigma
                            / sigma;
                    log_l += -0.5 * residual_power - 2.0 * residual.len() as f64 * sigma.ln();
                }
            }
        }
        checked(log_l)
    }

    /// −½ Σ_ifo ⟨d, d⟩ with the unscaled PSD.
    fn noise_log_likelihood(&self) -> Result<f64> {
        let mut log_l = 0.0;
        for ifo in &self.interferometers {
            let data = ifo.require_data()?;
            let psd = ifo.require_psd_array()?;
            let duration = Self::duration(ifo)?;
            log_l -= 0.5
                * noise_weighted_inner_product(data.values(), data.values(), psd, duration)?.re;
        }
        checked(log_l)
    }

    /// Without a noise-amplitude parameter `log_likelihood` already omits the
    /// data-only term, so it is the ratio.
    fn log_likelihood_ratio(&self, parameters: &Parameters) -> Result<f64> {
        match self.noise_amplitude_key {
            None => self.log_likelihood(parameters),
            Some(_) => Ok(self.log_likelihood(parameters)? - self.noise_log_likelihood()?),
        }
    }
}
