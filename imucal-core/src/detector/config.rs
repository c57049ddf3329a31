//! Interval detector configuration

use crate::{
    constants::{
        DEFAULT_BASE_NOISE_LEVEL_ABSOLUTE_THRESHOLD, DEFAULT_INITIAL_STATIC_SAMPLES,
        DEFAULT_INSTANTANEOUS_NOISE_LEVEL_FACTOR, DEFAULT_THRESHOLD_FACTOR,
        DEFAULT_TIME_INTERVAL_SECONDS, DEFAULT_WINDOW_SIZE,
    },
    errors::{CalibrationError, CalibrationResult},
    noise::{validate_time_interval, validate_window_size},
};

/// Static/dynamic interval detector parameters
///
/// ```rust
/// use imucal_core::DetectorConfig;
///
/// let config = DetectorConfig::default()
///     .with_window_size(51)
///     .with_initial_static_samples(2500)
///     .with_threshold_factor(3.0);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorConfig {
    /// Samples in the noise window (≥ 3)
    pub window_size: usize,

    /// Leading samples assumed static, used to establish the base noise
    /// level (≥ `window_size`)
    pub initial_static_samples: usize,

    /// Multiplier from base noise level to static/dynamic threshold (> 0)
    pub threshold_factor: f64,

    /// Multiplier from accumulated noise level to the sudden-movement limit
    /// checked during initialization (> 0)
    pub instantaneous_noise_level_factor: f64,

    /// Largest acceptable base noise level, also the lower bound of the
    /// static/dynamic threshold (> 0)
    pub base_noise_level_absolute_threshold: f64,

    /// Seconds between samples (> 0)
    pub time_interval: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            initial_static_samples: DEFAULT_INITIAL_STATIC_SAMPLES,
            threshold_factor: DEFAULT_THRESHOLD_FACTOR,
            instantaneous_noise_level_factor: DEFAULT_INSTANTANEOUS_NOISE_LEVEL_FACTOR,
            base_noise_level_absolute_threshold: DEFAULT_BASE_NOISE_LEVEL_ABSOLUTE_THRESHOLD,
            time_interval: DEFAULT_TIME_INTERVAL_SECONDS,
        }
    }
}

impl DetectorConfig {
    /// Check every parameter against its domain
    pub fn validate(&self) -> CalibrationResult<()> {
        validate_window_size(self.window_size)?;

        if self.initial_static_samples < self.window_size {
            return Err(CalibrationError::invalid(
                "initial_static_samples",
                "must be at least window_size",
            ));
        }

        positive_finite(self.threshold_factor, "threshold_factor")?;
        positive_finite(
            self.instantaneous_noise_level_factor,
            "instantaneous_noise_level_factor",
        )?;
        positive_finite(
            self.base_noise_level_absolute_threshold,
            "base_noise_level_absolute_threshold",
        )?;

        validate_time_interval(self.time_interval)
    }

    /// Set the window size
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the number of initial static samples
    pub fn with_initial_static_samples(mut self, samples: usize) -> Self {
        self.initial_static_samples = samples;
        self
    }

    /// Set the threshold factor
    pub fn with_threshold_factor(mut self, factor: f64) -> Self {
        self.threshold_factor = factor;
        self
    }

    /// Set the instantaneous noise level factor
    pub fn with_instantaneous_noise_level_factor(mut self, factor: f64) -> Self {
        self.instantaneous_noise_level_factor = factor;
        self
    }

    /// Set the absolute threshold of the base noise level
    pub fn with_base_noise_level_absolute_threshold(mut self, threshold: f64) -> Self {
        self.base_noise_level_absolute_threshold = threshold;
        self
    }

    /// Set the sampling interval in seconds
    pub fn with_time_interval(mut self, time_interval: f64) -> Self {
        self.time_interval = time_interval;
        self
    }
}

fn positive_finite(value: f64, name: &'static str) -> CalibrationResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(CalibrationError::invalid(name, "must be positive and finite"));
    }
    Ok(())
}
