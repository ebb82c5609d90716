//! Sidereal time and equatorial to Earth-fixed angle conversion.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Earth rotation rate relative to the fixed stars, in rad/s.
const OMEGA_EARTH: f64 = 2.0 * PI * (1.0 / 365.2422 + 1.0) / 86400.0;

/// GPS time of the J2000 reference epoch used for the GMST expansion.
const GPS_2000: f64 = 630_720_013.0;

/// GMST at the reference epoch (6h 39m 51.251406103947375s), in radians.
const GMST_2000: f64 = (6.0 + 39.0 / 60.0 + 51.251_406_103_947_375 / 3600.0) * PI / 12.0;

/// Offset that aligns the linear expansion with the IAU model at J2000.
const CORRECTION_2000: f64 = -0.000_177_824_873_793_586_14;

/// Convert a GPS time to Greenwich Mean Sidereal Time.
///
/// # Arguments
/// * `time` - GPS time in seconds
///
/// # Returns
/// GMST in radians, wrapped to [0, 2π)
pub fn gmst(time: f64) -> f64 {
    let sidereal_time = OMEGA_EARTH * (time - GPS_2000) + GMST_2000 + CORRECTION_2000;
    wrap_two_pi(sidereal_time)
}

/// Convert equatorial coordinates to Earth-fixed polar angles.
///
/// φ = gmst − ra (mod 2π), θ = π/2 − dec. Declinations of exactly ±π/2 give
/// θ = 0 or π where the azimuth is meaningless; this is not special-cased.
///
/// # Arguments
/// * `ra` - Right ascension in radians
/// * `dec` - Declination in radians
/// * `gmst` - Greenwich Mean Sidereal Time in radians
///
/// # Returns
/// `(theta, phi)` in radians, θ ∈ [0, π] and φ ∈ [0, 2π)
pub fn sky_to_theta_phi(ra: f64, dec: f64, gmst: f64) -> (f64, f64) {
    let phi = wrap_two_pi(gmst - ra);
    let theta = FRAC_PI_2 - dec;
    (theta, phi)
}

pub(crate) fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
