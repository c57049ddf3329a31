//! Streaming IMU calibration front end
//!
//! Splits an inertial sensor stream into static and dynamic intervals and
//! turns each rest → motion → rest cycle into a calibration measurement.
//! Designed to run on the device, next to the sensor driver.
//!
//! Key constraints:
//! - O(window size) memory per generator, O(1) amortized work per sample
//! - No a priori knowledge of sensor noise
//! - `no_std` + `alloc` capable
//!
//! ```no_run
//! use imucal_core::{generator::AccelerometerMeasurementsGenerator, Triad};
//!
//! let mut generator = AccelerometerMeasurementsGenerator::new();
//!
//! // Feed specific force samples as they arrive
//! if !generator.process(&Triad::new(0.01, -0.02, 9.81)) {
//!     // Non-finite sample or failed detector: reset and start over
//!     generator.reset();
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod buffer;
pub mod constants;
pub mod detector;
pub mod errors;
pub mod generator;
pub mod kinematics;
pub mod noise;
pub mod triad;

// Public API
pub use detector::{DetectorConfig, DetectorEvent, DetectorStatus, ErrorReason, StaticIntervalDetector};
pub use errors::{CalibrationError, CalibrationResult};
pub use generator::{GeneratorConfig, MeasurementsGenerator, MeasurementsGeneratorListener, Quantity};
pub use kinematics::{BodyKinematics, KinematicsAndMagneticFluxDensity};
pub use noise::{AccumulatedNoiseEstimator, NoiseStatistics, WindowedNoiseEstimator};
pub use triad::Triad;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
