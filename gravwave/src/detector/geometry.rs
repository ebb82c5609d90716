//! Site description of an L-shaped interferometer and its cached geometry.

use nalgebra::{Matrix3, Vector3};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::sky::check_finite;
use crate::geometry::{arm_unit_vector, detector_tensor, vertex_position};

/// Surveyed location and arm orientation of a detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteParameters {
    /// Geodetic latitude of the vertex in degrees
    pub latitude: f64,
    /// Longitude of the vertex in degrees, east positive
    pub longitude: f64,
    /// Height of the vertex above the ellipsoid in meters
    pub elevation: f64,
    /// X-arm azimuth in degrees, counter-clockwise from local East
    pub x_azimuth: f64,
    /// Y-arm azimuth in degrees, counter-clockwise from local East
    pub y_azimuth: f64,
    /// X-arm tilt above the local horizontal in radians
    #[serde(default)]
    pub x_tilt: f64,
    /// Y-arm tilt above the local horizontal in radians
    #[serde(default)]
    pub y_tilt: f64,
}

impl SiteParameters {
    fn validate(&self) -> Result<(), GeometryError> {
        check_finite("latitude", self.latitude)?;
        check_finite("longitude", self.longitude)?;
        check_finite("elevation", self.elevation)?;
        check_finite("x_azimuth", self.x_azimuth)?;
        check_finite("y_azimuth", self.y_azimuth)?;
        check_finite("x_tilt", self.x_tilt)?;
        check_finite("y_tilt", self.y_tilt)?;
        Ok(())
    }
}

/// Detector geometry with the vertex, arm vectors and detector tensor cached.
///
/// These are derived from the site once at construction. Changing the site
/// means building a new geometry with [`DetectorGeometry::with_site`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SiteParameters", into = "SiteParameters")]
pub struct DetectorGeometry {
    site: SiteParameters,
    vertex: Vector3<f64>,
    x_arm: Vector3<f64>,
    y_arm: Vector3<f64>,
    tensor: Matrix3<f64>,
}

impl DetectorGeometry {
    /// Build the geometry for a site.
    ///
    /// # Errors
    /// * `GeometryError::NonFinite` - any site parameter is NaN or infinite
    pub fn new(site: SiteParameters) -> Result<Self, GeometryError> {
        site.validate()?;
        Ok(Self::from_validated(site))
    }

    fn from_validated(site: SiteParameters) -> Self {
        let latitude = site.latitude.to_radians();
        let longitude = site.longitude.to_radians();

        let vertex = vertex_position(latitude, longitude, site.elevation);
        let x_arm = arm_unit_vector(latitude, longitude, site.x_tilt, site.x_azimuth.to_radians());
        let y_arm = arm_unit_vector(latitude, longitude, site.y_tilt, site.y_azimuth.to_radians());
        let tensor = detector_tensor(&x_arm, &y_arm);

        Self {
            site,
            vertex,
            x_arm,
            y_arm,
            tensor,
        }
    }

    /// A new geometry for different site parameters.
    pub fn with_site(&self, site: SiteParameters) -> Result<Self, GeometryError> {
        Self::new(site)
    }

    pub fn site(&self) -> &SiteParameters {
        &self.site
    }

    /// Vertex position in geocentric meters.
    pub fn vertex(&self) -> &Vector3<f64> {
        &self.vertex
    }

    pub fn x_arm(&self) -> &Vector3<f64> {
        &self.x_arm
    }

    pub fn y_arm(&self) -> &Vector3<f64> {
        &self.y_arm
    }

    /// Detector tensor ½(x⊗x − y⊗y).
    pub fn detector_tensor(&self) -> &Matrix3<f64> {
        &self.tensor
    }
}

impl TryFrom<SiteParameters> for DetectorGeometry {
    type Error = GeometryError;

    fn try_from(site: SiteParameters) -> Result<Self, Self::Error> {
        Self::new(site)
    }
}

impl From<DetectorGeometry> for SiteParameters {
    fn from(geometry: DetectorGeometry) -> Self {
        geometry.site
    }
}

fn dms(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Predefined detector sites
pub mod models {
    use super::*;

    /// LIGO Hanford Observatory
    pub static H1: Lazy<DetectorGeometry> = Lazy::new(|| {
        DetectorGeometry::from_validated(SiteParameters {
            latitude: dms(46.0, 27.0, 18.528),
            longitude: -dms(119.0, 24.0, 27.5657),
            elevation: 142.554,
            x_azimuth: 125.9994,
            y_azimuth: 215.994,
            x_tilt: -6.195e-4,
            y_tilt: 1.25e-5,
        })
    });

    /// LIGO Livingston Observatory
    pub static L1: Lazy<DetectorGeometry> = Lazy::new(|| {
        DetectorGeometry::from_validated(SiteParameters {
            latitude: dms(30.0, 33.0, 46.4196),
            longitude: -dms(90.0, 46.0, 27.2654),
            elevation: -6.574,
            x_azimuth: 197.7165,
            y_azimuth: 287.7165,
            x_tilt: -3.121e-4,
            y_tilt: -6.107e-4,
        })
    });

    /// Virgo, Cascina
    pub static V1: Lazy<DetectorGeometry> = Lazy::new(|| {
        DetectorGeometry::from_validated(SiteParameters {
            latitude: dms(43.0, 37.0, 53.0921),
            longitude: dms(10.0, 30.0, 16.1878),
            elevation: 51.884,
            x_azimuth: 70.5674,
            y_azimuth: 160.5674,
            x_tilt: 0.0,
            y_tilt: 0.0,
        })
    });

    /// Look up a predefined site by its two-character code, case-insensitively.
    pub fn by_name(name: &str) -> Option<&'static DetectorGeometry> {
        match name.to_ascii_uppercase().as_str() {
            "H1" => Some(&H1),
            "L1" => Some(&L1),
            "V1" => Some(&V1),
            _ => None,
        }
    }
}
