//! Generator lifecycle notifications

use super::{MeasurementsGenerator, Quantity};
use crate::detector::ErrorReason;

/// Receives generator lifecycle events
///
/// Every method has an empty default, so implementors only override what they
/// need. Callbacks run synchronously inside
/// [`MeasurementsGenerator::process`] and [`MeasurementsGenerator::reset`],
/// with a shared borrow of the generator: they can read any telemetry but
/// cannot reconfigure it.
///
/// When one sample triggers several events they arrive in this order:
/// initialization started, initialization completed, error, static interval
/// detected, dynamic interval detected, static interval skipped, dynamic
/// interval skipped, generated measurement.
#[allow(unused_variables)]
pub trait MeasurementsGeneratorListener<Q: Quantity> {
    /// First sample after construction or reset
    fn on_initialization_started(&mut self, generator: &MeasurementsGenerator<Q>) {}

    /// Base noise level established
    fn on_initialization_completed(
        &mut self,
        generator: &MeasurementsGenerator<Q>,
        base_noise_level: f64,
    ) {
    }

    /// Detector failed; the generator rejects samples until reset
    fn on_error(&mut self, generator: &MeasurementsGenerator<Q>, reason: ErrorReason) {}

    /// A static run long enough to serve as cycle reference just ended
    fn on_static_interval_detected(&mut self, generator: &MeasurementsGenerator<Q>) {}

    /// A dynamic run just ended
    fn on_dynamic_interval_detected(&mut self, generator: &MeasurementsGenerator<Q>) {}

    /// A static run shorter than the minimum just ended; its samples carry
    /// over into the next static run
    fn on_static_interval_skipped(&mut self, generator: &MeasurementsGenerator<Q>) {}

    /// A dynamic run exceeded the maximum length; its cycle and any
    /// carried-over static samples were discarded
    fn on_dynamic_interval_skipped(&mut self, generator: &MeasurementsGenerator<Q>) {}

    /// A cycle completed
    fn on_generated_measurement(
        &mut self,
        generator: &MeasurementsGenerator<Q>,
        measurement: Q::Measurement,
    ) {
    }

    /// The generator was reset
    fn on_reset(&mut self, generator: &MeasurementsGenerator<Q>) {}
}
