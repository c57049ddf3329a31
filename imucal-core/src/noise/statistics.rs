//! Noise statistics snapshot

use crate::triad::Triad;

/// Per-axis noise statistics over a set of triads
///
/// Derived values (standard deviation, PSD, root PSD) are computed on demand
/// from the stored variance. Every field reads as zero before the first
/// sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseStatistics {
    /// Number of triads the statistics cover
    pub samples: usize,
    /// Per-axis mean
    pub average: Triad,
    /// Per-axis sample variance (divisor n - 1, zero for n ≤ 1)
    pub variance: Triad,
    /// Seconds between consecutive samples
    pub time_interval: f64,
}

impl NoiseStatistics {
    /// Norm of the average triad
    pub fn average_norm(&self) -> f64 {
        self.average.norm()
    }

    /// Per-axis standard deviation
    pub fn standard_deviation(&self) -> Triad {
        self.variance.map(libm::sqrt)
    }

    /// Norm of the per-axis standard deviation triad
    pub fn standard_deviation_norm(&self) -> f64 {
        self.standard_deviation().norm()
    }

    /// Mean of the three per-axis standard deviations
    ///
    /// This is the scalar noise level used for interval detection.
    pub fn average_standard_deviation(&self) -> f64 {
        self.standard_deviation().mean()
    }

    /// Per-axis noise power spectral density (variance × time interval)
    pub fn psd(&self) -> Triad {
        self.variance * self.time_interval
    }

    /// Per-axis noise root PSD
    pub fn root_psd(&self) -> Triad {
        self.psd().map(libm::sqrt)
    }

    /// Mean of the per-axis PSDs
    pub fn average_psd(&self) -> f64 {
        self.psd().mean()
    }

    /// Norm of the per-axis root PSD triad
    pub fn root_psd_norm(&self) -> f64 {
        self.root_psd().norm()
    }
}
