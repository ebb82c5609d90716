//! Detector site geometry on the reference Earth spheroid.

use nalgebra::{Matrix3, Vector3};

/// Semi-major axis of the reference ellipsoid in meters
pub const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// Semi-minor axis of the reference ellipsoid in meters
pub const SEMI_MINOR_AXIS: f64 = 6_356_752.314;

/// Geocentric position of a detector vertex.
///
/// Follows arXiv:gr-qc/0008066 Eqs. B11-B13 with the local radius of
/// curvature from LIGO-T980044 Section 2.1.
///
/// # Arguments
/// * `latitude` - Geodetic latitude in radians
/// * `longitude` - Longitude in radians, east positive
/// * `elevation` - Height above the ellipsoid in meters
///
/// # Returns
/// Vertex position in meters, Earth-fixed geocentric frame
pub fn vertex_position(latitude: f64, longitude: f64, elevation: f64) -> Vector3<f64> {
    let a2 = SEMI_MAJOR_AXIS * SEMI_MAJOR_AXIS;
    let b2 = SEMI_MINOR_AXIS * SEMI_MINOR_AXIS;
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();

    let radius = a2 / (a2 * cos_lat * cos_lat + b2 * sin_lat * sin_lat).sqrt();

    Vector3::new(
        (radius + elevation) * cos_lat * cos_lon,
        (radius + elevation) * cos_lat * sin_lon,
        (b2 / a2 * radius + elevation) * sin_lat,
    )
}

/// Unit vector along a detector arm in the Earth-fixed frame.
///
/// The arm is described in the local tangent frame of the vertex: `azimuth`
/// is measured counter-clockwise from local East towards North, `tilt` is the
/// elevation of the arm above the local horizontal.
pub fn arm_unit_vector(latitude: f64, longitude: f64, tilt: f64, azimuth: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();

    let e_long = Vector3::new(-sin_lon, cos_lon, 0.0);
    let e_lat = Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let e_h = Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

    e_long * (tilt.cos() * azimuth.cos()) + e_lat * (tilt.cos() * azimuth.sin()) + e_h * tilt.sin()
}

/// Detector tensor of an L-shaped interferometer, ½(x⊗x − y⊗y).
pub fn detector_tensor(x_arm: &Vector3<f64>, y_arm: &Vector3<f64>) -> Matrix3<f64> {
    0.5 * (x_arm * x_arm.transpose() - y_arm * y_arm.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_equator_prime_meridian() {
        let v = vertex_position(0.0, 0.0, 0.0);
        assert_relative_eq!(v.x, SEMI_MAJOR_AXIS, epsilon = 1e-6);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_north_pole_is_semi_minor_axis() {
        let v = vertex_position(FRAC_PI_2, 0.0, 0.0);
        assert_relative_eq!(v.z, SEMI_MINOR_AXIS, epsilon = 1e-3);
        assert!(v.x.abs() < 1e-6);
    }

    #[test]
    fn test_elevation_adds_along_normal() {
        let lat = 0.8;
        let lon = -2.0;
        let ground = vertex_position(lat, lon, 0.0);
        let raised = vertex_position(lat, lon, 100.0);
        let normal = Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin());
        assert_relative_eq!((raised - ground).norm(), 100.0, epsilon = 1e-6);
        assert_relative_eq!((raised - ground).normalize().dot(&normal), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arm_vectors_are_unit_and_orthogonal() {
        let lat = 0.81;
        let lon = -2.08;
        let x = arm_unit_vector(lat, lon, 0.0, 2.199);
        let y = arm_unit_vector(lat, lon, 0.0, 2.199 + FRAC_PI_2);
        assert_relative_eq!(x.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(y.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(x.dot(&y), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_detector_tensor_symmetric_traceless() {
        let x = arm_unit_vector(0.5, 0.3, 0.0, 0.4);
        let y = arm_unit_vector(0.5, 0.3, 0.0, 0.4 + FRAC_PI_2);
        let d = detector_tensor(&x, &y);
        assert_relative_eq!(d, d.transpose(), epsilon = 1e-15);
        assert_relative_eq!(d.trace(), 0.0, epsilon = 1e-12);
    }
}
