//! Magnetometer calibration measurements

use super::{CompletedCycle, MeasurementsGenerator, Quantity, RunAccumulator};
use crate::{
    errors::CalibrationResult, kinematics::KinematicsAndMagneticFluxDensity,
    noise::AccumulatedNoiseEstimator, triad::Triad,
};

/// Magnetometer quantity: samples carry kinematics and flux density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Magnetometer;

/// Generator producing [`MagnetometerMeasurement`]s
pub type MagnetometerMeasurementsGenerator = MeasurementsGenerator<Magnetometer>;

/// Static-run aggregate of specific force and magnetic flux density
#[derive(Debug, Clone, Copy, Default)]
pub struct MagneticAccumulator {
    specific_force: AccumulatedNoiseEstimator,
    magnetic_flux_density: AccumulatedNoiseEstimator,
}

impl MagneticAccumulator {
    /// Specific force statistics of the run
    pub fn specific_force(&self) -> &AccumulatedNoiseEstimator {
        &self.specific_force
    }

    /// Magnetic flux density statistics of the run
    pub fn magnetic_flux_density(&self) -> &AccumulatedNoiseEstimator {
        &self.magnetic_flux_density
    }
}

impl RunAccumulator<KinematicsAndMagneticFluxDensity> for MagneticAccumulator {
    fn new(time_interval: f64) -> Self {
        Self {
            specific_force: RunAccumulator::<Triad>::new(time_interval),
            magnetic_flux_density: RunAccumulator::<Triad>::new(time_interval),
        }
    }

    fn add(&mut self, sample: &KinematicsAndMagneticFluxDensity) -> CalibrationResult<()> {
        self.specific_force.add_sample(sample.kinematics.specific_force)?;
        self.magnetic_flux_density.add_sample(sample.magnetic_flux_density)
    }

    fn samples(&self) -> usize {
        self.specific_force.samples()
    }
}

/// Average specific force and flux density of one accepted static run
///
/// The specific force fixes the attitude (up to heading), so the flux density
/// of several poses constrains hard and soft iron errors.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MagnetometerMeasurement {
    /// Mean specific force over the static run
    pub specific_force: Triad,
    /// Mean magnetic flux density over the static run
    pub magnetic_flux_density: Triad,
    /// Detector noise level at the end of the static run
    pub specific_force_standard_deviation: f64,
    /// Flux density noise level of the static run
    pub magnetic_flux_density_standard_deviation: f64,
}

impl Quantity for Magnetometer {
    type Sample = KinematicsAndMagneticFluxDensity;
    type Measurement = MagnetometerMeasurement;
    type Accumulator = MagneticAccumulator;

    const RETAINS_DYNAMIC_SAMPLES: bool = false;

    fn detection_triad(sample: &KinematicsAndMagneticFluxDensity) -> Triad {
        sample.kinematics.specific_force
    }

    fn is_finite(sample: &KinematicsAndMagneticFluxDensity) -> bool {
        sample.is_finite()
    }

    fn build(cycle: CompletedCycle<'_, Self>) -> MagnetometerMeasurement {
        let reference = cycle.reference;
        MagnetometerMeasurement {
            specific_force: reference.specific_force.average(),
            magnetic_flux_density: reference.magnetic_flux_density.average(),
            specific_force_standard_deviation: cycle.reference_noise_level,
            magnetic_flux_density_standard_deviation: reference
                .magnetic_flux_density
                .average_standard_deviation(),
        }
    }
}
