//! Earth-frame geometry for gravitational-wave detectors.
//!
//! This module converts a source's equatorial coordinates and arrival time into
//! the quantities a detector model needs:
//! - **sidereal**: GPS to GMST, equatorial to Earth-fixed (θ, φ)
//! - **vertex**: detector vertex positions, arm directions and detector tensors
//! - **tensor**: wave-frame polarization tensors for the six GW modes
//! - time delays between vertices (this file)
//!
//! Everything here is a pure function of its arguments. Callers that need the
//! same vertex repeatedly cache it themselves (see `DetectorGeometry`).

pub mod sidereal;
pub mod sky;
pub mod tensor;
pub mod vertex;

pub use sidereal::{gmst, sky_to_theta_phi};
pub use sky::SkyLocation;
pub use tensor::{antenna_response, polarization_tensor, wave_frame, PolarizationMode};
pub use vertex::{arm_unit_vector, detector_tensor, vertex_position};

use nalgebra::Vector3;

use crate::error::GeometryError;
use sky::{check_finite, validate_coordinates};

/// Speed of light in vacuum, m/s
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Unit propagation vector ω for a sky location at a given time.
///
/// ω = (sinθ cosφ, sinθ sinφ, cosθ) with (θ, φ) from [`sky_to_theta_phi`].
pub fn propagation_direction(ra: f64, dec: f64, time: f64) -> Vector3<f64> {
    let (theta, phi) = sky_to_theta_phi(ra, dec, gmst(time));
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vector3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

/// Time delay between two vertices for a wave from a given sky location.
///
/// Δt = ω·(vertex_b − vertex_a)/c. Swapping the vertices flips the sign and
/// identical vertices give exactly zero.
///
/// # Arguments
/// * `vertex_a` - First vertex, geocentric meters
/// * `vertex_b` - Second vertex, geocentric meters
/// * `ra` - Right ascension in radians
/// * `dec` - Declination in radians
/// * `time` - Geocentric GPS time in seconds
///
/// # Returns
/// Delay in seconds
pub fn time_delay(
    vertex_a: &Vector3<f64>,
    vertex_b: &Vector3<f64>,
    ra: f64,
    dec: f64,
    time: f64,
) -> Result<f64, GeometryError> {
    validate_coordinates(ra, dec)?;
    check_finite("time", time)?;

    let omega = propagation_direction(ra, dec, time);
    Ok(omega.dot(&(vertex_b - vertex_a)) / SPEED_OF_LIGHT)
}

/// Arrival time at `vertex` relative to the geocenter.
///
/// Equal to `time_delay(vertex, 0, ...)`: a detector on the side of the Earth
/// facing the source sees the wave first and gets a negative delay.
pub fn time_delay_from_geocenter(
    vertex: &Vector3<f64>,
    ra: f64,
    dec: f64,
    time: f64,
) -> Result<f64, GeometryError> {
    time_delay(vertex, &Vector3::zeros(), ra, dec, time)
}
