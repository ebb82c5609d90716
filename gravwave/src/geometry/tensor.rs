//! Polarization tensors of the six gravitational-wave modes.
//!
//! See Nishizawa et al. (2009) arXiv:0903.0528 for the definitions. [u, v, w]
//! is the Earth frame and [m, n, ω] the wave frame.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;
use std::fmt;
use std::str::FromStr;

use super::sidereal::{gmst, sky_to_theta_phi};
use super::sky::{check_finite, validate_coordinates};
use crate::error::GeometryError;

/// Gravitational-wave polarization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolarizationMode {
    Plus,
    Cross,
    Breathing,
    Longitudinal,
    X,
    Y,
}

impl PolarizationMode {
    /// All modes in canonical order.
    pub const ALL: [PolarizationMode; 6] = [
        PolarizationMode::Plus,
        PolarizationMode::Cross,
        PolarizationMode::Breathing,
        PolarizationMode::Longitudinal,
        PolarizationMode::X,
        PolarizationMode::Y,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolarizationMode::Plus => "plus",
            PolarizationMode::Cross => "cross",
            PolarizationMode::Breathing => "breathing",
            PolarizationMode::Longitudinal => "longitudinal",
            PolarizationMode::X => "x",
            PolarizationMode::Y => "y",
        }
    }
}

impl fmt::Display for PolarizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolarizationMode {
    type Err = GeometryError;

    /// Case-insensitive parse of a mode name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolarizationMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| GeometryError::UnknownMode(s.to_string()))
    }
}

/// Wave-frame basis vectors (m, n, ω) for a sky location at a given time.
///
/// ω = m × n points along the direction of travel, away from the source.
pub fn wave_frame(
    ra: f64,
    dec: f64,
    time: f64,
    psi: f64,
) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
    let (theta, phi) = sky_to_theta_phi(ra, dec, gmst(time));
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_psi, cos_psi) = psi.sin_cos();

    let u = Vector3::new(cos_phi * cos_theta, cos_theta * sin_phi, -sin_theta);
    let v = Vector3::new(-sin_phi, cos_phi, 0.0);
    let m = -u * sin_psi - v * cos_psi;
    let n = -u * cos_psi + v * sin_psi;
    let omega = m.cross(&n);
    (m, n, omega)
}

/// Polarization tensor of one mode for a sky location and time.
///
/// # Arguments
/// * `ra` - Right ascension in radians
/// * `dec` - Declination in radians
/// * `time` - Geocentric GPS time in seconds
/// * `psi` - Polarization angle, counter-clockwise about the propagation direction
/// * `mode` - Polarization mode
///
/// # Errors
/// * `GeometryError` - non-finite inputs or declination outside [-π/2, π/2]
pub fn polarization_tensor(
    ra: f64,
    dec: f64,
    time: f64,
    psi: f64,
    mode: PolarizationMode,
) -> Result<Matrix3<f64>, GeometryError> {
    validate_coordinates(ra, dec)?;
    check_finite("time", time)?;
    check_finite("psi", psi)?;

    let (m, n, omega) = wave_frame(ra, dec, time, psi);
    let outer = |a: &Vector3<f64>, b: &Vector3<f64>| a * b.transpose();

    let tensor = match mode {
        PolarizationMode::Plus => outer(&m, &m) - outer(&n, &n),
        PolarizationMode::Cross => outer(&m, &n) + outer(&n, &m),
        PolarizationMode::Breathing => outer(&m, &m) + outer(&n, &n),
        PolarizationMode::Longitudinal => SQRT_2 * outer(&omega, &omega),
        PolarizationMode::X => outer(&m, &omega) + outer(&omega, &m),
        PolarizationMode::Y => outer(&n, &omega) + outer(&omega, &n),
    };
    Ok(tensor)
}

/// Contract a detector tensor with a polarization tensor, Σᵢⱼ DᵢⱼPᵢⱼ.
pub fn antenna_response(detector_tensor: &Matrix3<f64>, polarization_tensor: &Matrix3<f64>) -> f64 {
    detector_tensor.component_mul(polarization_tensor).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn frobenius(a: &Matrix3<f64>, b: &Matrix3<f64>) -> f64 {
        a.component_mul(b).sum()
    }

    #[test]
    fn test_mode_parsing_is_case_insensitive() {
        assert_eq!("PLUS".parse::<PolarizationMode>(), Ok(PolarizationMode::Plus));
        assert_eq!("Cross".parse::<PolarizationMode>(), Ok(PolarizationMode::Cross));
        assert_eq!("y".parse::<PolarizationMode>(), Ok(PolarizationMode::Y));
        assert_eq!(
            "Longitudinal".parse::<PolarizationMode>(),
            Ok(PolarizationMode::Longitudinal)
        );
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        assert_eq!(
            "vector".parse::<PolarizationMode>(),
            Err(GeometryError::UnknownMode("vector".to_string()))
        );
    }

    #[test]
    fn test_tensor_identities_over_random_skies() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let ra = rng.gen_range(0.0..TAU);
            let dec = rng.gen_range(-FRAC_PI_2..FRAC_PI_2);
            let time = rng.gen_range(1.0e9..1.3e9);
            let psi = rng.gen_range(0.0..PI);

            let plus = polarization_tensor(ra, dec, time, psi, PolarizationMode::Plus).unwrap();
            let cross = polarization_tensor(ra, dec, time, psi, PolarizationMode::Cross).unwrap();
            let breathing =
                polarization_tensor(ra, dec, time, psi, PolarizationMode::Breathing).unwrap();

            assert_relative_eq!(plus.trace(), 0.0, epsilon = 1e-12);
            assert_relative_eq!(cross.trace(), 0.0, epsilon = 1e-12);
            assert_relative_eq!(frobenius(&plus, &cross), 0.0, epsilon = 1e-12);
            assert_relative_eq!(breathing.trace(), 2.0, epsilon = 1e-12);

            for mode in PolarizationMode::ALL {
                let p = polarization_tensor(ra, dec, time, psi, mode).unwrap();
                assert_relative_eq!(p, p.transpose(), epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_wave_frame_is_orthonormal() {
        let (m, n, omega) = wave_frame(1.375, -1.2108, 1_126_259_642.413, 2.659);
        assert_relative_eq!(m.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(m.dot(&n), 0.0, epsilon = 1e-12);
        assert_relative_eq!(omega.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_psi_rotation_swaps_plus_and_cross() {
        // Rotating psi by pi/4 turns plus into (minus) cross
        let (ra, dec, time, psi) = (0.4, 0.2, 1.0e9, 0.3);
        let plus = polarization_tensor(ra, dec, time, psi, PolarizationMode::Plus).unwrap();
        let cross_rot =
            polarization_tensor(ra, dec, time, psi + PI / 4.0, PolarizationMode::Cross).unwrap();
        assert_relative_eq!(plus.abs(), cross_rot.abs(), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_declination_is_rejected() {
        let err = polarization_tensor(0.0, 1.7, 0.0, 0.0, PolarizationMode::Plus).unwrap_err();
        assert_eq!(err, GeometryError::DeclinationOutOfRange(1.7));
    }

    #[test]
    fn test_pole_is_well_defined() {
        let p = polarization_tensor(0.0, FRAC_PI_2, 0.0, 0.0, PolarizationMode::Plus).unwrap();
        assert!(p.iter().all(|v| v.is_finite()));
        assert_relative_eq!(p.trace(), 0.0, epsilon = 1e-12);
    }
}
