//! Validated sky location of a source.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use super::sidereal::wrap_two_pi;
use crate::error::GeometryError;

/// Sky location and polarization angle of an incoming wave.
///
/// Immutable for the duration of one likelihood evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyLocation {
    /// Right ascension in radians, [0, 2π)
    pub ra: f64,
    /// Declination in radians, [-π/2, π/2]
    pub dec: f64,
    /// Polarization angle in radians
    pub psi: f64,
}

impl SkyLocation {
    /// Create a sky location, wrapping `ra` into [0, 2π).
    ///
    /// # Errors
    /// * `GeometryError::NonFinite` - any angle is NaN or infinite
    /// * `GeometryError::DeclinationOutOfRange` - `dec` outside [-π/2, π/2]
    pub fn new(ra: f64, dec: f64, psi: f64) -> Result<Self, GeometryError> {
        validate_coordinates(ra, dec)?;
        check_finite("psi", psi)?;
        Ok(Self {
            ra: wrap_two_pi(ra),
            dec,
            psi,
        })
    }
}

pub(crate) fn check_finite(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { name, value })
    }
}

pub(crate) fn validate_coordinates(ra: f64, dec: f64) -> Result<(), GeometryError> {
    check_finite("ra", ra)?;
    check_finite("dec", dec)?;
    if !(-FRAC_PI_2..=FRAC_PI_2).contains(&dec) {
        return Err(GeometryError::DeclinationOutOfRange(dec));
    }
    Ok(())
}
