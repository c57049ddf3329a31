//! Gyroscope calibration measurements

use alloc::vec::Vec;

use super::{CompletedCycle, MeasurementsGenerator, Quantity, RunAccumulator};
use crate::{
    errors::CalibrationResult, kinematics::BodyKinematics, noise::AccumulatedNoiseEstimator,
    triad::Triad,
};

/// Gyroscope quantity: samples are specific force plus angular rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gyroscope;

/// Generator producing [`GyroscopeMeasurement`]s
pub type GyroscopeMeasurementsGenerator = MeasurementsGenerator<Gyroscope>;

/// Static-run aggregate of [`BodyKinematics`] samples
#[derive(Debug, Clone, Copy, Default)]
pub struct KinematicsAccumulator {
    specific_force: AccumulatedNoiseEstimator,
    angular_rate: AccumulatedNoiseEstimator,
}

impl KinematicsAccumulator {
    /// Specific force statistics of the run
    pub fn specific_force(&self) -> &AccumulatedNoiseEstimator {
        &self.specific_force
    }

    /// Angular rate statistics of the run
    pub fn angular_rate(&self) -> &AccumulatedNoiseEstimator {
        &self.angular_rate
    }
}

impl RunAccumulator<BodyKinematics> for KinematicsAccumulator {
    fn new(time_interval: f64) -> Self {
        Self {
            specific_force: RunAccumulator::<Triad>::new(time_interval),
            angular_rate: RunAccumulator::<Triad>::new(time_interval),
        }
    }

    fn add(&mut self, sample: &BodyKinematics) -> CalibrationResult<()> {
        self.specific_force.add_sample(sample.specific_force)?;
        self.angular_rate.add_sample(sample.angular_rate)
    }

    fn samples(&self) -> usize {
        self.specific_force.samples()
    }
}

/// One rotation between two static poses
///
/// The specific force before and after the motion gives the gravity
/// direction at both ends; integrating `sequence` with a candidate
/// calibration must carry the first into the second.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GyroscopeMeasurement {
    /// Mean specific force of the static run before the motion
    pub start_specific_force: Triad,
    /// Mean angular rate of that run (the at-rest gyroscope output)
    pub start_angular_rate: Triad,
    /// Window-mean specific force when the closing static run began
    pub end_specific_force: Triad,
    /// Samples of the motion, oldest first
    pub sequence: Vec<BodyKinematics>,
    /// Detector noise level at the end of the opening static run
    pub specific_force_standard_deviation: f64,
    /// Angular rate noise level of the opening static run
    pub angular_rate_standard_deviation: f64,
    /// Seconds between samples
    pub time_interval: f64,
}

impl GyroscopeMeasurement {
    /// Length of the motion in seconds
    pub fn duration(&self) -> f64 {
        self.sequence.len() as f64 * self.time_interval
    }
}

/// Shared by every quantity aggregating [`BodyKinematics`] runs
pub(super) fn gyroscope_measurement(
    reference: &KinematicsAccumulator,
    reference_noise_level: f64,
    dynamic_samples: &[BodyKinematics],
    closing_average: Triad,
    time_interval: f64,
) -> GyroscopeMeasurement {
    GyroscopeMeasurement {
        start_specific_force: reference.specific_force.average(),
        start_angular_rate: reference.angular_rate.average(),
        end_specific_force: closing_average,
        sequence: dynamic_samples.to_vec(),
        specific_force_standard_deviation: reference_noise_level,
        angular_rate_standard_deviation: reference.angular_rate.average_standard_deviation(),
        time_interval,
    }
}

impl Quantity for Gyroscope {
    type Sample = BodyKinematics;
    type Measurement = GyroscopeMeasurement;
    type Accumulator = KinematicsAccumulator;

    const RETAINS_DYNAMIC_SAMPLES: bool = true;

    fn detection_triad(sample: &BodyKinematics) -> Triad {
        sample.specific_force
    }

    fn is_finite(sample: &BodyKinematics) -> bool {
        sample.is_finite()
    }

    fn build(cycle: CompletedCycle<'_, Self>) -> GyroscopeMeasurement {
        gyroscope_measurement(
            cycle.reference,
            cycle.reference_noise_level,
            cycle.dynamic_samples,
            cycle.closing_average,
            cycle.time_interval,
        )
    }
}
