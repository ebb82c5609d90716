//! One interferometer: site geometry, noise curve and frequency-domain data.

use std::f64::consts::PI;

use log::{debug, info};
use rustfft::num_complex::Complex64;

use super::geometry::DetectorGeometry;
use crate::algo::psd::PowerSpectralDensity;
use crate::error::{GeometryError, GwError, NotReadyError, Requirement, Result, SpectralError};
use crate::geometry::{antenna_response, polarization_tensor, time_delay_from_geocenter};
use crate::geometry::{PolarizationMode, SkyLocation};
use crate::inner_product::{check_psd, matched_filter_snr_squared, optimal_snr_squared};
use crate::likelihood::WaveformPolarizations;
use crate::series::{FrequencyAxis, FrequencySeries};

/// Lifecycle of an interferometer's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterferometerState {
    /// No data attached.
    Uninitialized,
    /// Data attached, nothing injected.
    Populated,
    /// At least one signal has been added to the data.
    Injected,
}

/// Sampling of the attached data segment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Segment {
    sampling_frequency: f64,
    time_duration: f64,
}

/// A gravitational-wave interferometer.
///
/// Setup (`set_data`, `set_power_spectral_density`, `set_spectral_densities`,
/// `inject_signal`) mutates the detector. Everything used during likelihood
/// evaluation takes `&self`.
#[derive(Debug, Clone)]
pub struct Interferometer {
    name: String,
    geometry: DetectorGeometry,
    power_spectral_density: Option<PowerSpectralDensity>,
    data: Option<FrequencySeries>,
    segment: Option<Segment>,
    psd_array: Option<Vec<f64>>,
    state: InterferometerState,
}

impl Interferometer {
    pub fn new(name: impl Into<String>, geometry: DetectorGeometry) -> Self {
        Self {
            name: name.into(),
            geometry,
            power_spectral_density: None,
            data: None,
            segment: None,
            psd_array: None,
            state: InterferometerState::Uninitialized,
        }
    }

    /// Builder form of [`Interferometer::set_power_spectral_density`].
    pub fn with_power_spectral_density(mut self, psd: PowerSpectralDensity) -> Self {
        self.set_power_spectral_density(psd);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &DetectorGeometry {
        &self.geometry
    }

    pub fn state(&self) -> InterferometerState {
        self.state
    }

    pub fn power_spectral_density(&self) -> Option<&PowerSpectralDensity> {
        self.power_spectral_density.as_ref()
    }

    pub fn data(&self) -> Option<&FrequencySeries> {
        self.data.as_ref()
    }

    /// The PSD interpolated onto the data axis by `set_spectral_densities`.
    pub fn power_spectral_density_array(&self) -> Option<&[f64]> {
        self.psd_array.as_deref()
    }

    pub fn sampling_frequency(&self) -> Option<f64> {
        self.segment.map(|s| s.sampling_frequency)
    }

    pub fn time_duration(&self) -> Option<f64> {
        self.segment.map(|s| s.time_duration)
    }

    fn not_ready(&self, missing: Requirement) -> NotReadyError {
        NotReadyError {
            interferometer: self.name.clone(),
            missing,
        }
    }

    pub(crate) fn require_data(&self) -> std::result::Result<&FrequencySeries, NotReadyError> {
        self.data
            .as_ref()
            .ok_or_else(|| self.not_ready(Requirement::Data))
    }

    pub(crate) fn require_psd_array(&self) -> std::result::Result<&[f64], NotReadyError> {
        self.psd_array
            .as_deref()
            .ok_or_else(|| self.not_ready(Requirement::SpectralDensityArray))
    }

    /// Attach a noise curve. Any previously interpolated PSD array is dropped.
    pub fn set_power_spectral_density(&mut self, psd: PowerSpectralDensity) {
        self.power_spectral_density = Some(psd);
        self.psd_array = None;
    }

    /// Attach frequency-domain strain data.
    ///
    /// The strain must lie on the axis implied by `sampling_frequency` and
    /// `time_duration`. Replaces any previous data, drops the interpolated PSD
    /// array and moves the detector to `Populated`.
    ///
    /// # Errors
    /// * `GwError::InvalidDuration` - `time_duration` not finite and positive
    /// * `GwError::AxisMismatch` - strain axis differs from the implied axis
    pub fn set_data(
        &mut self,
        sampling_frequency: f64,
        time_duration: f64,
        strain: FrequencySeries,
    ) -> Result<()> {
        if !(time_duration.is_finite() && time_duration > 0.0) {
            return Err(GwError::InvalidDuration(time_duration));
        }
        let axis = FrequencyAxis::from_sampling(sampling_frequency, time_duration)?;
        axis.ensure_matches(strain.axis())?;

        self.data = Some(strain);
        self.segment = Some(Segment {
            sampling_frequency,
            time_duration,
        });
        self.psd_array = None;
        self.state = InterferometerState::Populated;

        debug!(
            "{}: data set, fs = {} Hz, T = {} s, {} bins",
            self.name,
            sampling_frequency,
            time_duration,
            axis.len()
        );
        Ok(())
    }

    /// Interpolate the PSD onto the data axis.
    ///
    /// Valid after data has been set, before or after injections; the state is
    /// left unchanged.
    ///
    /// # Errors
    /// * `GwError::NotReady` - no data or no PSD curve
    /// * `GwError::Domain` - a data bin lies outside the PSD's frequency range
    /// * `GwError::InvalidPsd` - an interpolated bin is zero, negative or NaN
    pub fn set_spectral_densities(&mut self) -> Result<()> {
        let data = self.require_data()?;
        let psd = self
            .power_spectral_density
            .as_ref()
            .ok_or_else(|| self.not_ready(Requirement::PowerSpectralDensity))?;

        let array = psd.interpolate_axis(data.axis())?;
        check_psd(&array)?;
        debug!("{}: interpolated PSD onto {} bins", self.name, array.len());
        self.psd_array = Some(array);
        Ok(())
    }

    /// Antenna response F = D : P for one polarization mode.
    pub fn antenna_response(
        &self,
        sky: &SkyLocation,
        time: f64,
        mode: PolarizationMode,
    ) -> std::result::Result<f64, GeometryError> {
        let tensor = polarization_tensor(sky.ra, sky.dec, time, sky.psi, mode)?;
        Ok(antenna_response(self.geometry.detector_tensor(), &tensor))
    }

    /// Arrival time at this detector's vertex relative to the geocentre.
    pub fn time_delay_from_geocenter(
        &self,
        sky: &SkyLocation,
        time: f64,
    ) -> std::result::Result<f64, GeometryError> {
        time_delay_from_geocenter(self.geometry.vertex(), sky.ra, sky.dec, time)
    }

    /// Project a waveform onto this detector.
    ///
    /// R(f) = Σ_mode F_mode h_mode(f) e^{−2πifΔt}, with Δt the arrival time at
    /// the vertex relative to the geocentre.
    ///
    /// # Errors
    /// * `GwError::Spectral` - no polarizations given
    /// * `GwError::AxisMismatch` - the modes are not on a common axis
    /// * `GwError::Geometry` - invalid sky location or time
    pub fn detector_response(
        &self,
        polarizations: &WaveformPolarizations,
        sky: &SkyLocation,
        geocent_time: f64,
    ) -> Result<FrequencySeries> {
        let axis = *polarizations
            .values()
            .next()
            .ok_or(SpectralError::EmptySeries)?
            .axis();

        let mut response = vec![Complex64::new(0.0, 0.0); axis.len()];
        for (&mode, strain) in polarizations {
            axis.ensure_matches(strain.axis())?;
            let factor = self.antenna_response(sky, geocent_time, mode)?;
            for (r, h) in response.iter_mut().zip(strain.values()) {
                *r += *h * factor;
            }
        }

        let dt = self.time_delay_from_geocenter(sky, geocent_time)?;
        for (k, r) in response.iter_mut().enumerate() {
            let phase = -2.0 * PI * axis.frequency(k) * dt;
            *r *= Complex64::from_polar(1.0, phase);
        }

        Ok(FrequencySeries::new(axis, response)?)
    }

    /// Add a projected signal to the data and return the projection.
    ///
    /// Nothing is modified unless the injection succeeds. If the PSD array is
    /// set, the optimal and matched-filter SNRs of the injection are logged.
    ///
    /// # Errors
    /// * `GwError::NotReady` - `set_data` has not been called
    /// * `GwError::AxisMismatch` - the signal is not on the data axis
    pub fn inject_signal(
        &mut self,
        polarizations: &WaveformPolarizations,
        sky: &SkyLocation,
        geocent_time: f64,
    ) -> Result<FrequencySeries> {
        let data_axis = *self.require_data()?.axis();
        let signal = self.detector_response(polarizations, sky, geocent_time)?;
        data_axis.ensure_matches(signal.axis())?;

        // SNRs against the data after injection: ⟨s, d + s⟩ = ⟨s, d⟩ + ⟨s, s⟩
        let snr = match (&self.psd_array, self.time_duration()) {
            (Some(_), Some(duration)) => {
                let optimal = optimal_snr_squared(&signal, self, duration)?;
                let matched = matched_filter_snr_squared(&signal, self, duration)? + optimal;
                Some((optimal.sqrt(), matched))
            }
            _ => None,
        };

        if let Some(data) = self.data.as_mut() {
            data.add_assign(&signal)?;
        }
        self.state = InterferometerState::Injected;

        match snr {
            Some((optimal, matched)) => {
                info!("Injected signal in {}:", self.name);
                info!("  optimal SNR = {:.2}", optimal);
                info!("  matched filter SNR = {:.2}", matched / optimal);
            }
            None => info!("Injected signal in {}", self.name),
        }

        Ok(signal)
    }
}
