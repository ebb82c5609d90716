//! Gaussian likelihood for generic regression problems.

use std::f64::consts::PI;

use super::{checked, require_parameter, Likelihood, Parameters};
use crate::error::{AxisMismatchError, GwError, Result};

/// Standard deviation of the Gaussian noise.
#[derive(Debug, Clone, PartialEq)]
pub enum NoiseLevel {
    /// Fixed σ.
    Known(f64),
    /// σ read from the named parameter on every evaluation.
    Parameter(String),
}

impl Default for NoiseLevel {
    fn default() -> Self {
        NoiseLevel::Parameter("sigma".to_string())
    }
}

/// Independent Gaussian residuals between data `y` and a model evaluated at `x`.
///
/// log L = −½ Σᵢ [(yᵢ − f(xᵢ; θ))²/σ² + ln(2πσ²)]
pub struct GaussianLikelihood<F> {
    x: Vec<f64>,
    y: Vec<f64>,
    model: F,
    noise: NoiseLevel,
}

impl<F> GaussianLikelihood<F>
where
    F: Fn(f64, &Parameters) -> f64 + Send + Sync,
{
    /// Build a likelihood with σ taken from the `sigma` parameter.
    ///
    /// # Errors
    /// * `GwError::AxisMismatch` - `x` and `y` differ in length
    pub fn new(x: Vec<f64>, y: Vec<f64>, model: F) -> Result<Self> {
        if x.len() != y.len() {
            return Err(AxisMismatchError::Length {
                left: x.len(),
                right: y.len(),
            }
            .into());
        }
        Ok(Self {
            x,
            y,
            model,
            noise: NoiseLevel::default(),
        })
    }

    pub fn with_noise_level(mut self, noise: NoiseLevel) -> Self {
        self.noise = noise;
        self
    }

    pub fn noise_level(&self) -> &NoiseLevel {
        &self.noise
    }

    fn sigma(&self, parameters: &Parameters) -> Result<f64> {
        match &self.noise {
            NoiseLevel::Known(sigma) => Ok(*sigma),
            NoiseLevel::Parameter(key) => require_parameter(parameters, key),
        }
    }

    fn log_likelihood_of_residuals(residuals: impl Iterator<Item = f64>, sigma: f64) -> f64 {
        if !(sigma.is_finite() && sigma > 0.0) {
            return f64::NEG_INFINITY;
        }
        // ln(2πσ²) without forming σ², which can underflow
        let normalisation = (2.0 * PI).ln() + 2.0 * sigma.ln();
        -0.5 * residuals
            .map(|r| (r / sigma).powi(2) + normalisation)
            .sum::<f64>()
    }
}

impl<F> Likelihood for GaussianLikelihood<F>
where
    F: Fn(f64, &Parameters) -> f64 + Send + Sync,
{
    fn log_likelihood(&self, parameters: &Parameters) -> Result<f64> {
        let sigma = self.sigma(parameters)?;
        let residuals = self
            .x
            .iter()
            .zip(&self.y)
            .map(|(&x, &y)| y - (self.model)(x, parameters));
        checked(Self::log_likelihood_of_residuals(residuals, sigma))
    }

    /// The data treated as pure noise. Needs a known σ.
    fn noise_log_likelihood(&self) -> Result<f64> {
        match &self.noise {
            NoiseLevel::Known(sigma) => checked(Self::log_likelihood_of_residuals(
                self.y.iter().copied(),
                *sigma,
            )),
            NoiseLevel::Parameter(key) => Err(GwError::MissingParameter(key.clone())),
        }
    }
}
