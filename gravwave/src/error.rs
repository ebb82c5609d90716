//! Error types for the detector-response and likelihood engine.
//!
//! Each concern reports its own `thiserror` enum so callers can match on the
//! failure that matters to them. Everything converges on [`GwError`], which is
//! what the public entry points return through the crate-level [`Result`].
//!
//! None of these conditions are recovered from inside the engine: a contract
//! violation in the geometry or inner-product path aborts the evaluation that
//! hit it and propagates to the caller.

use thiserror::Error;

/// Invalid sky coordinates or polarization mode names.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("declination {0} rad is outside [-pi/2, pi/2]")]
    DeclinationOutOfRange(f64),

    #[error("{0} is not a polarization mode")]
    UnknownMode(String),
}

/// Frequency axes of inner-product operands disagree.
///
/// Operands are never truncated or resampled to make them fit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AxisMismatchError {
    #[error("length mismatch: {left} bins vs {right} bins")]
    Length { left: usize, right: usize },

    #[error("spacing mismatch: df {left} Hz vs {right} Hz")]
    Spacing { left: f64, right: f64 },

    #[error("start mismatch: f0 {left} Hz vs {right} Hz")]
    Start { left: f64, right: f64 },
}

/// What an interferometer was missing when an operation was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// `set_data` has not been called.
    Data,
    /// No power spectral density curve is attached.
    PowerSpectralDensity,
    /// `set_spectral_densities` has not been called for the current data.
    SpectralDensityArray,
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::Data => write!(f, "strain data"),
            Requirement::PowerSpectralDensity => write!(f, "power spectral density"),
            Requirement::SpectralDensityArray => write!(f, "interpolated PSD array"),
        }
    }
}

/// An interferometer operation was invoked before its required prior state.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("interferometer {interferometer} is not ready: missing {missing}")]
pub struct NotReadyError {
    pub interferometer: String,
    pub missing: Requirement,
}

/// PSD interpolation queried outside the curve's frequency range.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("frequency {frequency} Hz is outside the PSD domain [{min}, {max}] Hz")]
pub struct DomainError {
    pub frequency: f64,
    pub min: f64,
    pub max: f64,
}

/// Malformed inputs to the spectral utilities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectralError {
    #[error("input series is empty")]
    EmptySeries,

    #[error("sampling frequency must be finite and > 0, got {0}")]
    InvalidSamplingFrequency(f64),

    #[error("window length {window} does not match series length {series}")]
    WindowLengthMismatch { window: usize, series: usize },

    #[error("cutoff {cutoff} Hz must lie in (0, {nyquist}) Hz")]
    InvalidCutoff { cutoff: f64, nyquist: f64 },

    #[error("cropping {crop} samples from each end leaves nothing of {len} samples")]
    CropTooLong { crop: usize, len: usize },

    #[error("{frequencies} frequencies paired with {values} values")]
    LengthMismatch { frequencies: usize, values: usize },

    #[error("frequency axis needs at least 2 points, got {0}")]
    AxisTooShort(usize),

    #[error("frequency spacing must be finite and > 0, got {0}")]
    InvalidSpacing(f64),

    #[error("frequency axis is not uniformly increasing at index {0}")]
    NonUniformAxis(usize),

    #[error("PSD point {index} is invalid: {reason}")]
    InvalidPsdPoint { index: usize, reason: &'static str },
}

/// Crate-wide error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GwError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    AxisMismatch(#[from] AxisMismatchError),

    #[error(transparent)]
    NotReady(#[from] NotReadyError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Spectral(#[from] SpectralError),

    #[error("PSD value at bin {index} must be > 0, got {value}")]
    InvalidPsd { index: usize, value: f64 },

    #[error("time duration must be finite and > 0, got {0}")]
    InvalidDuration(f64),

    #[error("missing parameter {0}")]
    MissingParameter(String),

    #[error("log-likelihood evaluated to NaN")]
    NonFiniteLikelihood,
}

pub type Result<T> = std::result::Result<T, GwError>;
