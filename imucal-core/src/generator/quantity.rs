//! Per-sensor specialisation points of the generator

use alloc::vec::Vec;

use crate::{errors::CalibrationResult, noise::AccumulatedNoiseEstimator, triad::Triad};

/// Running aggregate of the samples of one static run
pub trait RunAccumulator<S>: Clone {
    /// Empty accumulator for samples spaced `time_interval` seconds apart
    fn new(time_interval: f64) -> Self;

    /// Add one (finite) sample
    fn add(&mut self, sample: &S) -> CalibrationResult<()>;

    /// Samples added so far
    fn samples(&self) -> usize;
}

impl RunAccumulator<Triad> for AccumulatedNoiseEstimator {
    fn new(time_interval: f64) -> Self {
        // The interval was validated by the generator configuration
        AccumulatedNoiseEstimator::new(time_interval).unwrap_or_default()
    }

    fn add(&mut self, sample: &Triad) -> CalibrationResult<()> {
        self.add_sample(*sample)
    }

    fn samples(&self) -> usize {
        AccumulatedNoiseEstimator::samples(self)
    }
}

/// Everything a quantity needs to turn a static → dynamic → static cycle into
/// a measurement
#[derive(Debug)]
pub struct CompletedCycle<'a, Q: Quantity> {
    /// Aggregate of the accepted static run preceding the motion
    pub reference: &'a Q::Accumulator,

    /// Detector noise level at the last sample of that static run
    pub reference_noise_level: f64,

    /// Samples of the dynamic run, empty unless
    /// [`Quantity::RETAINS_DYNAMIC_SAMPLES`] is set
    pub dynamic_samples: &'a [Q::Sample],

    /// Detector window mean when the closing static run began
    pub closing_average: Triad,

    /// Seconds between samples
    pub time_interval: f64,
}

/// A sensor (or sensor combination) the generator can produce measurements for
///
/// Implementors are zero-sized markers; all behaviour lives in associated
/// items.
pub trait Quantity: Sized + 'static {
    /// One input sample
    type Sample: Clone + core::fmt::Debug;

    /// Output of a completed cycle
    type Measurement: Clone + core::fmt::Debug;

    /// Static-run aggregate
    type Accumulator: RunAccumulator<Self::Sample> + core::fmt::Debug;

    /// Keep the dynamic samples of each tracked cycle
    const RETAINS_DYNAMIC_SAMPLES: bool;

    /// Triad the interval detector runs on (specific force)
    fn detection_triad(sample: &Self::Sample) -> Triad;

    /// Check every component of a sample
    fn is_finite(sample: &Self::Sample) -> bool;

    /// Build the measurement of a completed cycle
    fn build(cycle: CompletedCycle<'_, Self>) -> Self::Measurement;
}

/// Dynamic-run sample storage that only allocates when the quantity needs it
#[derive(Debug, Clone)]
pub(crate) struct DynamicRun<S> {
    samples: Vec<S>,
    count: usize,
    skipped: bool,
}

impl<S: Clone> DynamicRun<S> {
    pub(crate) const fn new() -> Self {
        Self {
            samples: Vec::new(),
            count: 0,
            skipped: false,
        }
    }

    pub(crate) fn push(&mut self, sample: &S, retain: bool) {
        self.count += 1;
        if retain && !self.skipped {
            self.samples.push(sample.clone());
        }
    }

    pub(crate) fn skip(&mut self) {
        self.skipped = true;
        self.samples.clear();
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn is_skipped(&self) -> bool {
        self.skipped
    }

    pub(crate) fn samples(&self) -> &[S] {
        &self.samples
    }

    pub(crate) fn clear(&mut self) {
        self.samples.clear();
        self.count = 0;
        self.skipped = false;
    }
}
