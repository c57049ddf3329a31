//! Accelerometer calibration measurements

use super::{CompletedCycle, MeasurementsGenerator, Quantity};
use crate::{noise::AccumulatedNoiseEstimator, triad::Triad};

/// Accelerometer quantity: samples are specific force triads (m/s²)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accelerometer;

/// Generator producing [`AccelerometerMeasurement`]s
pub type AccelerometerMeasurementsGenerator = MeasurementsGenerator<Accelerometer>;

/// Average specific force of one accepted static run
///
/// An accelerometer at rest measures gravity only, so a set of these taken in
/// different orientations constrains bias, scale and misalignment.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccelerometerMeasurement {
    /// Mean specific force over the static run
    pub specific_force: Triad,
    /// Detector noise level at the end of the static run
    pub specific_force_standard_deviation: f64,
    /// Length of the static run
    pub static_samples: usize,
}

impl Quantity for Accelerometer {
    type Sample = Triad;
    type Measurement = AccelerometerMeasurement;
    type Accumulator = AccumulatedNoiseEstimator;

    const RETAINS_DYNAMIC_SAMPLES: bool = false;

    fn detection_triad(sample: &Triad) -> Triad {
        *sample
    }

    fn is_finite(sample: &Triad) -> bool {
        sample.is_finite()
    }

    fn build(cycle: CompletedCycle<'_, Self>) -> AccelerometerMeasurement {
        AccelerometerMeasurement {
            specific_force: cycle.reference.average(),
            specific_force_standard_deviation: cycle.reference_noise_level,
            static_samples: cycle.reference.samples(),
        }
    }
}
