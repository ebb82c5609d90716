//! Raw strain to frequency-domain analysis data.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algo::filter::band_limit;
use crate::algo::spectral::forward_transform;
use crate::algo::window::windowed_segment;
use crate::error::SpectralError;
use crate::series::FrequencySeries;

/// Settings for [`process_strain_data`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrainProcessingConfig {
    /// Tukey window shape parameter
    pub alpha: f64,
    /// Low-pass cutoff in Hz
    pub filter_frequency: f64,
    /// Seconds removed from each end after filtering
    pub crop_duration: f64,
}

impl Default for StrainProcessingConfig {
    fn default() -> Self {
        Self {
            alpha: 0.25,
            filter_frequency: 1024.0,
            crop_duration: 1.0,
        }
    }
}

/// Frequency-domain strain ready for `Interferometer::set_data`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedStrain {
    pub data: FrequencySeries,
    pub sampling_frequency: f64,
    /// Duration of the cropped segment, `n_samples / fs`
    pub time_duration: f64,
}

/// Low-pass, crop, window and transform a raw strain time series.
///
/// # Arguments
/// * `series` - Raw strain samples
/// * `sampling_frequency` - Sampling frequency in Hz
/// * `config` - Processing settings
///
/// # Errors
/// * `SpectralError::InvalidCutoff` - `filter_frequency` not below Nyquist
/// * `SpectralError::CropTooLong` - cropping would leave no samples
pub fn process_strain_data(
    series: &[f64],
    sampling_frequency: f64,
    config: &StrainProcessingConfig,
) -> Result<ProcessedStrain, SpectralError> {
    let filtered = band_limit(series, sampling_frequency, config.filter_frequency)?;

    let crop = (config.crop_duration.max(0.0) * sampling_frequency).round() as usize;
    if 2 * crop >= filtered.len() {
        return Err(SpectralError::CropTooLong {
            crop,
            len: filtered.len(),
        });
    }
    let cropped = &filtered[crop..filtered.len() - crop];

    let windowed = windowed_segment(cropped, config.alpha)?;
    let data = forward_transform(&windowed, sampling_frequency)?;
    let time_duration = cropped.len() as f64 / sampling_frequency;

    debug!(
        "Processed {} samples into {} s segment with {} bins",
        series.len(),
        time_duration,
        data.len()
    );

    Ok(ProcessedStrain {
        data,
        sampling_frequency,
        time_duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_default_config() {
        let config = StrainProcessingConfig::default();
        assert_relative_eq!(config.alpha, 0.25);
        assert_relative_eq!(config.filter_frequency, 1024.0);
        assert_relative_eq!(config.crop_duration, 1.0);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config: StrainProcessingConfig =
            serde_json::from_str(r#"{"filter_frequency": 256.0}"#).unwrap();
        assert_relative_eq!(config.filter_frequency, 256.0);
        assert_relative_eq!(config.alpha, 0.25);
        assert_relative_eq!(config.crop_duration, 1.0);
    }

    #[test]
    fn test_pipeline_shapes() {
        let fs = 1024.0;
        let series: Vec<f64> = (0..6 * 1024)
            .map(|i| (2.0 * PI * 30.0 * i as f64 / fs).sin())
            .collect();
        let config = StrainProcessingConfig {
            filter_frequency: 256.0,
            ..Default::default()
        };
        let processed = process_strain_data(&series, fs, &config).unwrap();

        // 1 s cropped from each end
        assert_relative_eq!(processed.time_duration, 4.0);
        assert_eq!(processed.data.len(), 2049);
        assert_relative_eq!(processed.data.axis().df(), 0.25);

        let peak = processed
            .data
            .values()
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
            .map(|(k, _)| processed.data.axis().frequency(k))
            .unwrap();
        assert_relative_eq!(peak, 30.0);
    }

    #[test]
    fn test_crop_too_long() {
        let config = StrainProcessingConfig {
            filter_frequency: 10.0,
            ..Default::default()
        };
        assert_eq!(
            process_strain_data(&[0.0; 128], 64.0, &config),
            Err(SpectralError::CropTooLong { crop: 64, len: 128 })
        );
    }

    #[test]
    fn test_default_cutoff_needs_high_sample_rate() {
        let result = process_strain_data(&[0.0; 4096], 1024.0, &StrainProcessingConfig::default());
        assert!(matches!(result, Err(SpectralError::InvalidCutoff { .. })));
    }
}
