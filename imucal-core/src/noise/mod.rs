//! Online Noise Characterisation for Triad Streams
//!
//! ## Overview
//!
//! Interval detection needs to know how noisy the sensor is *right now*
//! without any a priori knowledge of the device. This module provides two
//! estimators that answer that question online:
//!
//! - [`WindowedNoiseEstimator`]: statistics over the last `window_size` triads,
//!   used for the static/dynamic decision on every sample
//! - [`AccumulatedNoiseEstimator`]: statistics over every triad since the last
//!   reset, used during initialization and to average static runs
//!
//! Both expose their results as a [`NoiseStatistics`] snapshot.
//!
//! ## Statistics
//!
//! ```text
//! mean        μ  = Σx / n
//! variance    σ² = Σ(x - μ)² / (n - 1)      (0 when n ≤ 1)
//! PSD            = σ² · Δt                  (units²·s, Δt = time interval)
//! root PSD       = √PSD                     (units·√s)
//! noise level    = (σx + σy + σz) / 3       (average standard deviation)
//! ```
//!
//! ## Numerical Approach
//!
//! Moments are maintained with Welford's update, extended with the matching
//! removal step for the sliding window:
//!
//! ```text
//! add x:     n += 1;  d = x - μ;  μ += d / n;  M2 += d · (x - μ)
//! remove x:  n -= 1;  d = x - μ;  μ -= d / n;  M2 -= d · (x - μ)
//! ```
//!
//! Welford avoids the catastrophic cancellation of the naive `Σx² - nμ²`
//! form, which matters for accelerometers where the mean (≈ 9.81 m/s²) is
//! several orders of magnitude above the noise. The sliding window
//! additionally recomputes its moments from the stored triads once per
//! `window_size` evictions, which bounds accumulated rounding drift while
//! keeping the per-sample cost O(1) amortized.

mod accumulated;
mod statistics;
mod windowed;

pub use accumulated::AccumulatedNoiseEstimator;
pub use statistics::NoiseStatistics;
pub use windowed::WindowedNoiseEstimator;

pub(crate) use windowed::{validate_time_interval, validate_window_size};

use crate::triad::Triad;

/// Per-axis running mean and sum of squared deviations
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RunningMoments {
    count: usize,
    mean: [f64; 3],
    m2: [f64; 3],
}

impl RunningMoments {
    pub(crate) fn add(&mut self, triad: &Triad) {
        self.count += 1;
        let n = self.count as f64;
        let values = triad.to_array();

        for axis in 0..3 {
            let delta = values[axis] - self.mean[axis];
            self.mean[axis] += delta / n;
            self.m2[axis] += delta * (values[axis] - self.mean[axis]);
        }
    }

    pub(crate) fn remove(&mut self, triad: &Triad) {
        if self.count <= 1 {
            self.clear();
            return;
        }

        self.count -= 1;
        let n = self.count as f64;
        let values = triad.to_array();

        for axis in 0..3 {
            let delta = values[axis] - self.mean[axis];
            self.mean[axis] -= delta / n;
            // Rounding can push M2 marginally below zero for constant input
            self.m2[axis] = (self.m2[axis] - delta * (values[axis] - self.mean[axis])).max(0.0);
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn mean(&self) -> Triad {
        Triad::from_array(self.mean)
    }

    pub(crate) fn variance(&self) -> Triad {
        if self.count < 2 {
            return Triad::ZERO;
        }
        Triad::from_array(self.m2) / (self.count - 1) as f64
    }

    pub(crate) fn statistics(&self, time_interval: f64) -> NoiseStatistics {
        NoiseStatistics {
            samples: self.count,
            average: self.mean(),
            variance: self.variance(),
            time_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        libm::fabs(a - b) <= 1e-12 * (1.0 + libm::fabs(b))
    }

    #[test]
    fn add_then_remove_restores_moments() {
        let mut moments = RunningMoments::default();
        let samples = [
            Triad::new(1.0, 2.0, 3.0),
            Triad::new(1.5, 1.0, 2.0),
            Triad::new(0.5, 3.0, 4.5),
        ];

        moments.add(&samples[0]);
        moments.add(&samples[1]);
        let before = (moments.mean(), moments.variance());

        moments.add(&samples[2]);
        moments.remove(&samples[2]);

        assert_eq!(moments.count(), 2);
        assert!(close(moments.mean().x, before.0.x));
        assert!(close(moments.variance().y, before.1.y));
    }

    #[test]
    fn single_sample_has_zero_variance() {
        let mut moments = RunningMoments::default();
        moments.add(&Triad::new(4.0, 5.0, 6.0));

        assert_eq!(moments.mean(), Triad::new(4.0, 5.0, 6.0));
        assert_eq!(moments.variance(), Triad::ZERO);
    }

    #[test]
    fn removing_last_sample_clears() {
        let mut moments = RunningMoments::default();
        moments.add(&Triad::new(1.0, 1.0, 1.0));
        moments.remove(&Triad::new(1.0, 1.0, 1.0));

        assert_eq!(moments.count(), 0);
        assert_eq!(moments.mean(), Triad::ZERO);
    }
}
