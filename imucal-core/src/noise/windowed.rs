//! Sliding-window noise estimator

use crate::{
    buffer::TriadWindow,
    constants::{DEFAULT_TIME_INTERVAL_SECONDS, DEFAULT_WINDOW_SIZE, MINIMUM_WINDOW_SIZE},
    errors::{CalibrationError, CalibrationResult},
    triad::Triad,
};

use super::{NoiseStatistics, RunningMoments};

/// Noise statistics over the most recent `window_size` triads
///
/// Memory is O(window size); each [`add_sample`](Self::add_sample) is O(1)
/// amortized (one Welford add, one Welford removal once the window is full,
/// and a full recomputation every `window_size` evictions).
#[derive(Debug, Clone)]
pub struct WindowedNoiseEstimator {
    window: TriadWindow,
    moments: RunningMoments,
    time_interval: f64,
    evictions_since_refresh: usize,
}

impl WindowedNoiseEstimator {
    /// Create an estimator with the given window size and sampling interval
    pub fn new(window_size: usize, time_interval: f64) -> CalibrationResult<Self> {
        validate_window_size(window_size)?;
        validate_time_interval(time_interval)?;

        Ok(Self {
            window: TriadWindow::with_capacity(window_size),
            moments: RunningMoments::default(),
            time_interval,
            evictions_since_refresh: 0,
        })
    }

    /// Number of triads the window holds when full
    pub fn window_size(&self) -> usize {
        self.window.capacity()
    }

    /// Change the window size, discarding every stored triad
    pub fn set_window_size(&mut self, window_size: usize) -> CalibrationResult<()> {
        validate_window_size(window_size)?;
        self.window.reset_capacity(window_size);
        self.moments.clear();
        self.evictions_since_refresh = 0;
        Ok(())
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

    /// Add a triad, evicting the oldest one when the window is full
    pub fn add_sample(&mut self, triad: Triad) -> CalibrationResult<()> {
        if !triad.is_finite() {
            return Err(CalibrationError::InvalidSample);
        }

        match self.window.push(triad) {
            Some(evicted) => {
                self.evictions_since_refresh += 1;
                if self.evictions_since_refresh >= self.window.capacity() {
                    self.refresh();
                } else {
                    self.moments.remove(&evicted);
                    self.moments.add(&triad);
                }
            }
            None => self.moments.add(&triad),
        }

        Ok(())
    }

    /// Statistics over the current window content
    pub fn statistics(&self) -> NoiseStatistics {
        self.moments.statistics(self.time_interval)
    }

    /// Mean triad of the window
    pub fn average(&self) -> Triad {
        self.moments.mean()
    }

    /// Per-axis standard deviation of the window
    pub fn standard_deviation(&self) -> Triad {
        self.statistics().standard_deviation()
    }

    /// Mean of the per-axis standard deviations of the window
    pub fn average_standard_deviation(&self) -> f64 {
        self.statistics().average_standard_deviation()
    }

    /// Number of triads currently in the window
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Check if no triad has been added since the last reset
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Check if the window holds `window_size` triads
    pub fn is_filled(&self) -> bool {
        self.window.is_full()
    }

    /// Most recently added triad
    pub fn last_sample(&self) -> Option<&Triad> {
        self.window.last()
    }

    /// Iterate over the window from oldest to newest
    pub fn samples(&self) -> impl Iterator<Item = &Triad> + '_ {
        self.window.iter()
    }

    /// Empty the window and zero the statistics
    pub fn reset(&mut self) {
        self.window.clear();
        self.moments.clear();
        self.evictions_since_refresh = 0;
    }

    /// Recompute the moments from the stored triads
    fn refresh(&mut self) {
        self.moments.clear();
        for triad in self.window.iter() {
            self.moments.add(triad);
        }
        self.evictions_since_refresh = 0;
    }
}

impl Default for WindowedNoiseEstimator {
    fn default() -> Self {
        Self {
            window: TriadWindow::with_capacity(DEFAULT_WINDOW_SIZE),
            moments: RunningMoments::default(),
            time_interval: DEFAULT_TIME_INTERVAL_SECONDS,
            evictions_since_refresh: 0,
        }
    }
}

pub(crate) fn validate_window_size(window_size: usize) -> CalibrationResult<()> {
    if window_size < MINIMUM_WINDOW_SIZE {
        return Err(CalibrationError::invalid("window_size", "must be at least 3"));
    }
    Ok(())
}

pub(crate) fn validate_time_interval(time_interval: f64) -> CalibrationResult<()> {
    if !(time_interval.is_finite() && time_interval > 0.0) {
        return Err(CalibrationError::invalid(
            "time_interval",
            "must be a positive finite number of seconds",
        ));
    }
    Ok(())
}
