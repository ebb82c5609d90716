//! Detector models
//!
//! This module contains the site geometry of ground-based interferometers, the
//! predefined LIGO and Virgo sites, and the interferometer aggregate that
//! carries a detector's noise curve and data.

pub mod geometry;
pub mod interferometer;

pub use geometry::{models, DetectorGeometry, SiteParameters};
pub use interferometer::{Interferometer, InterferometerState};
