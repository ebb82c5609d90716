//! Gravitational-wave detector response and matched-filter likelihood
//!
//! This crate projects frequency-domain waveforms onto ground-based
//! interferometers, synthesizes coloured detector noise from a PSD, and scores
//! candidate signals against data with the noise-weighted inner product.

pub mod algo;
pub mod detector;
pub mod error;
pub mod events;
pub mod geometry;
pub mod inner_product;
pub mod likelihood;
pub mod series;
pub mod strain;

// Re-exports for easier access
pub use algo::psd::{noise_realisation, PowerSpectralDensity};
pub use detector::{models, DetectorGeometry, Interferometer, InterferometerState};
pub use error::{GwError, Result};
pub use events::{get_event_time, EventCatalog};
pub use geometry::{PolarizationMode, SkyLocation};
pub use inner_product::{
    inner_product, matched_filter_snr_squared, noise_weighted_inner_product, optimal_snr_squared,
};
pub use likelihood::{
    GaussianLikelihood, GravitationalWaveLikelihood, Likelihood, Parameters, WaveformGenerator,
    WaveformPolarizations,
};
pub use series::{FrequencyAxis, FrequencySeries};
pub use strain::{process_strain_data, StrainProcessingConfig};
