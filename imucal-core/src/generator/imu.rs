//! Joint accelerometer and gyroscope measurements

use super::{
    gyroscope::gyroscope_measurement, AccelerometerMeasurement, CompletedCycle,
    GyroscopeMeasurement, KinematicsAccumulator, MeasurementsGenerator, Quantity,
};
use crate::{kinematics::BodyKinematics, triad::Triad};

/// Accelerometer and gyroscope calibrated from the same cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccelerometerAndGyroscope;

/// Generator producing [`ImuMeasurement`]s
pub type AccelerometerAndGyroscopeMeasurementsGenerator =
    MeasurementsGenerator<AccelerometerAndGyroscope>;

/// Both measurements of one cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImuMeasurement {
    /// Static pose before the motion
    pub accelerometer: AccelerometerMeasurement,
    /// The motion itself
    pub gyroscope: GyroscopeMeasurement,
}

impl Quantity for AccelerometerAndGyroscope {
    type Sample = BodyKinematics;
    type Measurement = ImuMeasurement;
    type Accumulator = KinematicsAccumulator;

    const RETAINS_DYNAMIC_SAMPLES: bool = true;

    fn detection_triad(sample: &BodyKinematics) -> Triad {
        sample.specific_force
    }

    fn is_finite(sample: &BodyKinematics) -> bool {
        sample.is_finite()
    }

    fn build(cycle: CompletedCycle<'_, Self>) -> ImuMeasurement {
        let specific_force = cycle.reference.specific_force();

        ImuMeasurement {
            accelerometer: AccelerometerMeasurement {
                specific_force: specific_force.average(),
                specific_force_standard_deviation: cycle.reference_noise_level,
                static_samples: specific_force.samples(),
            },
            gyroscope: gyroscope_measurement(
                cycle.reference,
                cycle.reference_noise_level,
                cycle.dynamic_samples,
                cycle.closing_average,
                cycle.time_interval,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::RunAccumulator;

    #[test]
    fn both_measurements_share_the_reference() {
        let mut reference = <KinematicsAccumulator as RunAccumulator<BodyKinematics>>::new(0.01);
        for _ in 0..4 {
            reference
                .add(&BodyKinematics::new(Triad::new(0.0, 9.81, 0.0), Triad::new(0.0, 0.0, 1e-3)))
                .unwrap();
        }
        let motion = [BodyKinematics::new(Triad::new(0.0, 9.0, 1.0), Triad::new(0.5, 0.0, 0.0))];

        let measurement = AccelerometerAndGyroscope::build(CompletedCycle {
            reference: &reference,
            reference_noise_level: 0.005,
            dynamic_samples: &motion,
            closing_average: Triad::new(0.0, 0.0, 9.81),
            time_interval: 0.01,
        });

        assert_eq!(measurement.accelerometer.specific_force, Triad::new(0.0, 9.81, 0.0));
        assert_eq!(measurement.accelerometer.static_samples, 4);
        assert_eq!(
            measurement.gyroscope.start_specific_force,
            measurement.accelerometer.specific_force
        );
        assert_eq!(measurement.gyroscope.start_angular_rate, Triad::new(0.0, 0.0, 1e-3));
        assert_eq!(measurement.gyroscope.sequence.len(), 1);
    }
}
