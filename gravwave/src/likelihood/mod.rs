//! Likelihood functions for parameter estimation
//!
//! A sampler only sees the [`Likelihood`] trait: it proposes a parameter map
//! and gets back a log-likelihood that is finite or −∞ (outside the model's
//! support). The implementations are stateless across calls and can be shared
//! between threads.

pub mod gaussian;
pub mod gravitational_wave;
pub mod waveform;

pub use gaussian::{GaussianLikelihood, NoiseLevel};
pub use gravitational_wave::GravitationalWaveLikelihood;
pub use waveform::{WaveformGenerator, WaveformPolarizations};

use std::collections::BTreeMap;

use crate::error::{GwError, Result};

/// Named parameter values proposed by a sampler.
pub type Parameters = BTreeMap<String, f64>;

/// Log-likelihood of a parameter set given fixed data.
pub trait Likelihood: Send + Sync {
    /// Log-likelihood at `parameters`, up to a parameter-independent constant.
    ///
    /// # Returns
    /// A finite value, or −∞ when the parameters are outside the model's support
    ///
    /// # Errors
    /// * `GwError::MissingParameter` - a required key is absent
    /// * `GwError::NonFiniteLikelihood` - the evaluation produced NaN
    fn log_likelihood(&self, parameters: &Parameters) -> Result<f64>;

    /// Log-likelihood of the data under the noise-only hypothesis.
    fn noise_log_likelihood(&self) -> Result<f64>;

    /// Log-likelihood ratio of signal versus noise.
    fn log_likelihood_ratio(&self, parameters: &Parameters) -> Result<f64> {
        Ok(self.log_likelihood(parameters)? - self.noise_log_likelihood()?)
    }
}

/// Look up a required parameter.
pub(crate) fn require_parameter(parameters: &Parameters, key: &str) -> Result<f64> {
    parameters
        .get(key)
        .copied()
        .ok_or_else(|| GwError::MissingParameter(key.to_string()))
}

/// Pass through finite values and −∞; NaN is an error.
pub(crate) fn checked(log_likelihood: f64) -> Result<f64> {
    if log_likelihood.is_nan() {
        return Err(GwError::NonFiniteLikelihood);
    }
    Ok(log_likelihood)
}
