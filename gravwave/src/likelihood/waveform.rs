//! Interface to frequency-domain waveform models.

use std::collections::BTreeMap;

use super::Parameters;
use crate::geometry::PolarizationMode;
use crate::series::FrequencySeries;

/// Frequency-domain strain per polarization mode, all on one axis.
pub type WaveformPolarizations = BTreeMap<PolarizationMode, FrequencySeries>;

/// A source model mapping parameters to polarization strains.
///
/// Implemented for any `Fn(&Parameters) -> Option<WaveformPolarizations>`.
pub trait WaveformGenerator: Send + Sync {
    /// Strain for `parameters`, or `None` if they are outside the model's support.
    fn frequency_domain_strain(&self, parameters: &Parameters) -> Option<WaveformPolarizations>;
}

impl<F> WaveformGenerator for F
where
    F: Fn(&Parameters) -> Option<WaveformPolarizations> + Send + Sync,
{
    fn frequency_domain_strain(&self, parameters: &Parameters) -> Option<WaveformPolarizations> {
        self(parameters)
    }
}
