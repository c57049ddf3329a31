//! Multi-sensor sample types
//!
//! Gyroscope and magnetometer calibration need more than one triad per
//! instant: interval detection always runs on specific force, while the
//! measurement is assembled from the quantity being calibrated.

use crate::triad::Triad;

/// Accelerometer and gyroscope readings taken at the same instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyKinematics {
    /// Specific force in m/s²
    pub specific_force: Triad,
    /// Angular rate in rad/s
    pub angular_rate: Triad,
}

impl BodyKinematics {
    /// Create from both triads
    pub const fn new(specific_force: Triad, angular_rate: Triad) -> Self {
        Self {
            specific_force,
            angular_rate,
        }
    }

    /// True when both triads are finite
    pub fn is_finite(&self) -> bool {
        self.specific_force.is_finite() && self.angular_rate.is_finite()
    }
}

/// Body kinematics plus the magnetometer reading at the same instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicsAndMagneticFluxDensity {
    /// Accelerometer and gyroscope readings
    pub kinematics: BodyKinematics,
    /// Magnetic flux density in T
    pub magnetic_flux_density: Triad,
}

impl KinematicsAndMagneticFluxDensity {
    /// Create from kinematics and flux density
    pub const fn new(kinematics: BodyKinematics, magnetic_flux_density: Triad) -> Self {
        Self {
            kinematics,
            magnetic_flux_density,
        }
    }

    /// True when every triad is finite
    pub fn is_finite(&self) -> bool {
        self.kinematics.is_finite() && self.magnetic_flux_density.is_finite()
    }
}
