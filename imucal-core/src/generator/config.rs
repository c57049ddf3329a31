//! Measurement generator configuration

use crate::{
    constants::{DEFAULT_MAX_DYNAMIC_SAMPLES, DEFAULT_MIN_STATIC_SAMPLES},
    detector::DetectorConfig,
    errors::{CalibrationError, CalibrationResult},
};

/// Interval-length policy plus the detector configuration it drives
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Interval detector parameters
    pub detector: DetectorConfig,

    /// Shortest static run accepted as a cycle reference (≥ window size)
    pub min_static_samples: usize,

    /// Longest dynamic run accepted inside a cycle (≥ window size)
    pub max_dynamic_samples: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            min_static_samples: DEFAULT_MIN_STATIC_SAMPLES,
            max_dynamic_samples: DEFAULT_MAX_DYNAMIC_SAMPLES,
        }
    }
}

impl GeneratorConfig {
    /// Check every parameter, including the detector's
    pub fn validate(&self) -> CalibrationResult<()> {
        self.detector.validate()?;

        if self.min_static_samples < self.detector.window_size {
            return Err(CalibrationError::invalid(
                "min_static_samples",
                "must be at least window_size",
            ));
        }
        if self.max_dynamic_samples < self.detector.window_size {
            return Err(CalibrationError::invalid(
                "max_dynamic_samples",
                "must be at least window_size",
            ));
        }
        Ok(())
    }

    /// Set the detector configuration
    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }

    /// Set the shortest accepted static run
    pub fn with_min_static_samples(mut self, samples: usize) -> Self {
        self.min_static_samples = samples;
        self
    }

    /// Set the longest accepted dynamic run
    pub fn with_max_dynamic_samples(mut self, samples: usize) -> Self {
        self.max_dynamic_samples = samples;
        self
    }
}
