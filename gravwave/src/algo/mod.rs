//! Signal-processing algorithms for detector data
//!
//! This module provides noise PSD curves and noise synthesis, one-sided Fourier
//! transforms, Tukey windows and zero-phase low-pass filtering.

pub mod filter;
pub mod psd;
pub mod spectral;
pub mod window;

pub use filter::{band_limit, ButterworthLowPass};
pub use psd::{noise_realisation, PowerSpectralDensity, PsdPoint};
pub use spectral::{
    asd_from_freq_series, forward_transform, inverse_transform, psd_from_freq_series,
};
pub use window::{apply_window, tukey_window, windowed_segment};
