//! Accumulated (unbounded) noise estimator

use crate::{
    constants::DEFAULT_TIME_INTERVAL_SECONDS,
    errors::{CalibrationError, CalibrationResult},
    triad::Triad,
};

use super::{windowed::validate_time_interval, NoiseStatistics, RunningMoments};

/// Noise statistics over every triad added since the last reset
///
/// Constant memory regardless of how many triads are added. Used to
/// characterise the initialization run and to average static runs.
#[derive(Debug, Clone, Copy)]
pub struct AccumulatedNoiseEstimator {
    moments: RunningMoments,
    time_interval: f64,
}

impl AccumulatedNoiseEstimator {
    /// Create an empty estimator for the given sampling interval
    pub fn new(time_interval: f64) -> CalibrationResult<Self> {
        validate_time_interval(time_interval)?;
        Ok(Self {
            moments: RunningMoments::default(),
            time_interval,
        })
    }

    /// Seconds between consecutive samples
    pub fn time_interval(&self) -> f64 {
        self.time_interval
    }

    /// Change the sampling interval used for PSD values
    pub fn set_time_interval(&mut self, time_interval: f64) -> CalibrationResult<()> {
        validate_time_interval(time_interval)?;
        self.time_interval = time_interval;
        Ok(())
    }

    /// Add a triad
    pub fn add_sample(&mut self, triad: Triad) -> CalibrationResult<()> {
        if !triad.is_finite() {
            return Err(CalibrationError::InvalidSample);
        }
        self.moments.add(&triad);
        Ok(())
    }

    /// Statistics over every triad added so far
    pub fn statistics(&self) -> NoiseStatistics {
        self.moments.statistics(self.time_interval)
    }

    /// Mean triad
    pub fn average(&self) -> Triad {
        self.moments.mean()
    }

    /// Mean of the per-axis standard deviations
    pub fn average_standard_deviation(&self) -> f64 {
        self.statistics().average_standard_deviation()
    }

    /// Number of triads added since the last reset
    pub fn samples(&self) -> usize {
        self.moments.count()
    }

    /// Forget every triad
    pub fn reset(&mut self) {
        self.moments.clear();
    }
}

impl Default for AccumulatedNoiseEstimator {
    fn default() -> Self {
        Self {
            moments: RunningMoments::default(),
            time_interval: DEFAULT_TIME_INTERVAL_SECONDS,
        }
    }
}
