//! Calibration Measurement Generation
//!
//! ## Overview
//!
//! Calibration solvers need *measurements*: the average sensor output while
//! the device rested in one pose, and for gyroscopes the motion that took it
//! to the next pose. A [`MeasurementsGenerator`] drives a
//! [`StaticIntervalDetector`] over a sample stream, applies an interval-length
//! policy and emits one measurement per completed
//! static → dynamic → static cycle.
//!
//! ```text
//!  sample ──► Quantity::detection_triad ──► StaticIntervalDetector
//!     │                                            │ DetectorEvent
//!     ▼                                            ▼
//!  static run accumulator ◄── StaticInterval   ┌──────────────────────┐
//!  dynamic run samples    ◄── DynamicInterval  │ interval policy      │
//!                                              │  static  ≥ min       │
//!                                              │  dynamic ≤ max       │
//!                                              └──────────┬───────────┘
//!                                                         ▼
//!                                         Quantity::build ──► listener
//! ```
//!
//! ## Cycles
//!
//! 1. A static run ends (the detector reports motion). Runs shorter than
//!    `min_static_samples` are skipped but not forgotten: the next static run
//!    keeps accumulating on top of them until the total is long enough.
//!    Otherwise the run becomes the cycle *reference*.
//! 2. Every dynamic run is counted. Once longer than `max_dynamic_samples` it
//!    is skipped, and both the reference and any carried-over static samples
//!    are dropped.
//! 3. The next static run starts. If the reference survived, the quantity
//!    builds a measurement from it. The new static run is the candidate
//!    reference of the next cycle, so `S D S D S` yields two measurements.
//!
//! The samples consumed by detector initialization never belong to a run.
//!
//! ## Quantities
//!
//! What a sample is and what a measurement holds depends on the sensor; the
//! [`Quantity`] trait captures that:
//!
//! | Quantity | Sample | Measurement |
//! |---|---|---|
//! | [`Accelerometer`] | specific force [`Triad`](crate::triad::Triad) | [`AccelerometerMeasurement`] |
//! | [`Gyroscope`] | [`BodyKinematics`](crate::kinematics::BodyKinematics) | [`GyroscopeMeasurement`] |
//! | [`Magnetometer`] | [`KinematicsAndMagneticFluxDensity`](crate::kinematics::KinematicsAndMagneticFluxDensity) | [`MagnetometerMeasurement`] |
//! | [`AccelerometerAndGyroscope`] | [`BodyKinematics`](crate::kinematics::BodyKinematics) | [`ImuMeasurement`] |
//!
//! ## Listener
//!
//! Events are delivered synchronously to a [`MeasurementsGeneratorListener`]
//! with a shared borrow of the generator. Reconfiguring from a callback does
//! not compile:
//!
//! ```rust,compile_fail
//! use imucal_core::generator::{
//!     Accelerometer, AccelerometerMeasurementsGenerator, MeasurementsGeneratorListener,
//! };
//!
//! struct Retune;
//!
//! impl MeasurementsGeneratorListener<Accelerometer> for Retune {
//!     fn on_static_interval_detected(&mut self, generator: &AccelerometerMeasurementsGenerator) {
//!         generator.set_min_static_samples(500).unwrap();
//!     }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//! use imucal_core::{
//!     generator::{
//!         Accelerometer, AccelerometerMeasurement, AccelerometerMeasurementsGenerator,
//!         GeneratorConfig, MeasurementsGeneratorListener,
//!     },
//!     DetectorConfig, Triad,
//! };
//!
//! struct Collect(Rc<RefCell<Vec<AccelerometerMeasurement>>>);
//!
//! impl MeasurementsGeneratorListener<Accelerometer> for Collect {
//!     fn on_generated_measurement(
//!         &mut self,
//!         _generator: &AccelerometerMeasurementsGenerator,
//!         measurement: AccelerometerMeasurement,
//!     ) {
//!         self.0.borrow_mut().push(measurement);
//!     }
//! }
//!
//! let config = GeneratorConfig::default()
//!     .with_detector(DetectorConfig::default().with_initial_static_samples(500))
//!     .with_min_static_samples(100);
//!
//! let measurements = Rc::new(RefCell::new(Vec::new()));
//! let mut generator = AccelerometerMeasurementsGenerator::with_config(config)
//!     .unwrap()
//!     .with_listener(Collect(measurements.clone()));
//!
//! let wobble = |i: usize, a: f64| a * (1.3 * i as f64).sin();
//! let mut i = 0;
//! for (len, amplitude) in [(800, 0.01), (200, 3.0), (300, 0.01)] {
//!     for _ in 0..len {
//!         let sample = Triad::new(wobble(i, amplitude), 0.0, 9.81 + wobble(i + 7, amplitude));
//!         assert!(generator.process(&sample));
//!         i += 1;
//!     }
//! }
//!
//! assert_eq!(measurements.borrow().len(), 1);
//! ```

mod accelerometer;
mod config;
mod gyroscope;
mod imu;
mod listener;
mod magnetometer;
mod quantity;

pub use accelerometer::{Accelerometer, AccelerometerMeasurement, AccelerometerMeasurementsGenerator};
pub use config::GeneratorConfig;
pub use gyroscope::{
    Gyroscope, GyroscopeMeasurement, GyroscopeMeasurementsGenerator, KinematicsAccumulator,
};
pub use imu::{AccelerometerAndGyroscope, AccelerometerAndGyroscopeMeasurementsGenerator, ImuMeasurement};
pub use listener::MeasurementsGeneratorListener;
pub use magnetometer::{
    MagneticAccumulator, Magnetometer, MagnetometerMeasurement, MagnetometerMeasurementsGenerator,
};
pub use quantity::{CompletedCycle, Quantity, RunAccumulator};

use alloc::boxed::Box;
use core::fmt;

use crate::{
    detector::{DetectorConfig, DetectorEvent, DetectorStatus, StaticIntervalDetector},
    errors::CalibrationResult,
};

use quantity::DynamicRun;

/// Accepted static run frozen as the start of a cycle
#[derive(Debug, Clone)]
struct Reference<A> {
    accumulator: A,
    noise_level: f64,
}

/// Streaming calibration measurement generator for quantity `Q`
pub struct MeasurementsGenerator<Q: Quantity> {
    config: GeneratorConfig,
    detector: StaticIntervalDetector,
    listener: Option<Box<dyn MeasurementsGeneratorListener<Q>>>,
    notifying: bool,
    running: bool,
    static_run: Q::Accumulator,
    last_static_noise_level: f64,
    reference: Option<Reference<Q::Accumulator>>,
    dynamic_run: DynamicRun<Q::Sample>,
    generated_measurements: usize,
}

impl<Q: Quantity> MeasurementsGenerator<Q> {
    /// Create a generator with the default configuration and no listener
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator with a validated configuration
    pub fn with_config(config: GeneratorConfig) -> CalibrationResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            detector: StaticIntervalDetector::with_config(config.detector)?,
            listener: None,
            notifying: false,
            running: false,
            static_run: Q::Accumulator::new(config.detector.time_interval),
            last_static_noise_level: 0.0,
            reference: None,
            dynamic_run: DynamicRun::new(),
            generated_measurements: 0,
        })
    }

    /// Attach a listener, replacing any previous one
    pub fn with_listener<L>(mut self, listener: L) -> Self
    where
        L: MeasurementsGeneratorListener<Q> + 'static,
    {
        self.set_listener(listener);
        self
    }

    /// Attach a listener, replacing any previous one
    pub fn set_listener<L>(&mut self, listener: L)
    where
        L: MeasurementsGeneratorListener<Q> + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Detach and return the listener
    pub fn take_listener(&mut self) -> Option<Box<dyn MeasurementsGeneratorListener<Q>>> {
        self.listener.take()
    }

    /// Check if a listener is attached
    ///
    /// True inside callbacks as well, while the listener is lent out.
    pub fn has_listener(&self) -> bool {
        self.listener.is_some() || self.notifying
    }

    /// Feed one sample
    ///
    /// Returns `false` when the sample has a non-finite component (nothing
    /// changes) or when the detector has failed, now or earlier. Listener
    /// callbacks triggered by the sample run before this returns.
    pub fn process(&mut self, sample: &Q::Sample) -> bool {
        if !Q::is_finite(sample) {
            log_warn!("rejected sample with non-finite component");
            return false;
        }
        if self.detector.status() == DetectorStatus::Failed {
            return false;
        }

        self.running = true;
        let accepted = matches!(self.ingest(sample), Ok(true));
        self.running = false;
        accepted
    }

    fn ingest(&mut self, sample: &Q::Sample) -> CalibrationResult<bool> {
        match self.detector.process(&Q::detection_triad(sample))? {
            Some(DetectorEvent::InitializationStarted) => {
                self.notify(|l, g| l.on_initialization_started(g));
            }
            Some(DetectorEvent::InitializationCompleted { base_noise_level, .. }) => {
                self.notify(|l, g| l.on_initialization_completed(g, base_noise_level));
                return Ok(true);
            }
            Some(DetectorEvent::Error { reason }) => {
                self.notify(|l, g| l.on_error(g, reason));
                return Ok(false);
            }
            Some(DetectorEvent::DynamicIntervalStarted { .. }) => self.close_static_run(),
            Some(DetectorEvent::StaticIntervalStarted { .. }) => self.close_dynamic_run(),
            None => {}
        }

        match self.detector.status() {
            DetectorStatus::StaticInterval => {
                self.static_run.add(sample)?;
                self.last_static_noise_level = self.detector.instantaneous_noise_level();
            }
            DetectorStatus::DynamicInterval => self.track_dynamic(sample),
            _ => {}
        }
        Ok(true)
    }

    /// Short runs stay in `static_run` and the next static run adds to them
    fn close_static_run(&mut self) {
        let samples = self.static_run.samples();
        self.dynamic_run.clear();

        if samples < self.config.min_static_samples {
            log_debug!("static interval skipped after {} samples", samples);
            self.notify(|l, g| l.on_static_interval_skipped(g));
            return;
        }

        log_debug!("static interval detected after {} samples", samples);
        self.reference = Some(Reference {
            accumulator: self.static_run.clone(),
            noise_level: self.last_static_noise_level,
        });
        self.notify(|l, g| l.on_static_interval_detected(g));

        self.static_run = Q::Accumulator::new(self.config.detector.time_interval);
        self.last_static_noise_level = 0.0;
    }

    fn track_dynamic(&mut self, sample: &Q::Sample) {
        let retain = self.reference.is_some() && Q::RETAINS_DYNAMIC_SAMPLES;
        self.dynamic_run.push(sample, retain);

        if !self.dynamic_run.is_skipped()
            && self.dynamic_run.count() > self.config.max_dynamic_samples
        {
            log_debug!(
                "dynamic interval skipped after {} samples",
                self.dynamic_run.count()
            );
            self.reference = None;
            self.static_run = Q::Accumulator::new(self.config.detector.time_interval);
            self.last_static_noise_level = 0.0;
            self.dynamic_run.skip();
            self.notify(|l, g| l.on_dynamic_interval_skipped(g));
        }
    }

    fn close_dynamic_run(&mut self) {
        if !self.dynamic_run.is_skipped() {
            log_debug!(
                "dynamic interval detected after {} samples",
                self.dynamic_run.count()
            );
            self.notify(|l, g| l.on_dynamic_interval_detected(g));
        }

        if let Some(reference) = self.reference.take() {
            let measurement = Q::build(CompletedCycle {
                reference: &reference.accumulator,
                reference_noise_level: reference.noise_level,
                dynamic_samples: self.dynamic_run.samples(),
                closing_average: self.detector.instantaneous_average(),
                time_interval: self.config.detector.time_interval,
            });
            self.generated_measurements += 1;
            log_info!(
                "measurement {} generated from {} static and {} dynamic samples",
                self.generated_measurements,
                reference.accumulator.samples(),
                self.dynamic_run.count()
            );
            self.notify(|l, g| l.on_generated_measurement(g, measurement));
        }

        self.dynamic_run.clear();
    }

    /// Hand the listener a shared view of the generator
    fn notify<F>(&mut self, callback: F)
    where
        F: FnOnce(&mut (dyn MeasurementsGeneratorListener<Q> + 'static), &Self),
    {
        if let Some(mut listener) = self.listener.take() {
            self.notifying = true;
            callback(listener.as_mut(), self);
            self.notifying = false;
            self.listener = Some(listener);
        }
    }

    /// Return to the initial state and notify the listener
    ///
    /// Configuration and listener are kept. Resetting twice is the same as
    /// resetting once, apart from the second `on_reset`.
    pub fn reset(&mut self) {
        self.running = true;
        self.detector.reset();
        self.static_run = Q::Accumulator::new(self.config.detector.time_interval);
        self.last_static_noise_level = 0.0;
        self.reference = None;
        self.dynamic_run.clear();
        self.generated_measurements = 0;
        log_debug!("measurements generator reset");
        self.notify(|l, g| l.on_reset(g));
        self.running = false;
    }

    /// Current configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Replace the whole configuration; nothing changes if it is invalid
    pub fn set_config(&mut self, config: GeneratorConfig) -> CalibrationResult<()> {
        config.validate()?;
        self.detector.set_config(config.detector)?;
        self.config = config;
        Ok(())
    }

    fn update(&mut self, change: impl FnOnce(&mut GeneratorConfig)) -> CalibrationResult<()> {
        let mut candidate = self.config;
        change(&mut candidate);
        self.set_config(candidate)
    }

    fn update_detector(&mut self, change: impl FnOnce(&mut DetectorConfig)) -> CalibrationResult<()> {
        self.update(|config| change(&mut config.detector))
    }

    /// Samples in the detector window
    pub fn window_size(&self) -> usize {
        self.config.detector.window_size
    }

    /// Set the window size, discarding the current window
    pub fn set_window_size(&mut self, window_size: usize) -> CalibrationResult<()> {
        self.update_detector(|c| c.window_size = window_size)
    }

    /// Samples assumed static at start
    pub fn initial_static_samples(&self) -> usize {
        self.config.detector.initial_static_samples
    }

    /// Set the number of initial static samples
    pub fn set_initial_static_samples(&mut self, samples: usize) -> CalibrationResult<()> {
        self.update_detector(|c| c.initial_static_samples = samples)
    }

    /// Multiplier from base noise level to threshold
    pub fn threshold_factor(&self) -> f64 {
        self.config.detector.threshold_factor
    }

    /// Set the threshold factor
    pub fn set_threshold_factor(&mut self, factor: f64) -> CalibrationResult<()> {
        self.update_detector(|c| c.threshold_factor = factor)
    }

    /// Multiplier guarding against sudden movement during initialization
    pub fn instantaneous_noise_level_factor(&self) -> f64 {
        self.config.detector.instantaneous_noise_level_factor
    }

    /// Set the instantaneous noise level factor
    pub fn set_instantaneous_noise_level_factor(&mut self, factor: f64) -> CalibrationResult<()> {
        self.update_detector(|c| c.instantaneous_noise_level_factor = factor)
    }

    /// Largest acceptable base noise level and lower bound of the threshold
    pub fn base_noise_level_absolute_threshold(&self) -> f64 {
        self.config.detector.base_noise_level_absolute_threshold
    }

    /// Set the absolute threshold of the base noise level
    pub fn set_base_noise_level_absolute_threshold(&mut self, threshold: f64) -> CalibrationResult<()> {
        self.update_detector(|c| c.base_noise_level_absolute_threshold = threshold)
    }

    /// Seconds between samples
    pub fn time_interval(&self) -> f64 {
        self.config.detector.time_interval
    }

    /// Set the sampling interval in seconds
    pub fn set_time_interval(&mut self, time_interval: f64) -> CalibrationResult<()> {
        self.update_detector(|c| c.time_interval = time_interval)
    }

    /// Shortest accepted static run
    pub fn min_static_samples(&self) -> usize {
        self.config.min_static_samples
    }

    /// Set the shortest accepted static run
    pub fn set_min_static_samples(&mut self, samples: usize) -> CalibrationResult<()> {
        self.update(|c| c.min_static_samples = samples)
    }

    /// Longest accepted dynamic run
    pub fn max_dynamic_samples(&self) -> usize {
        self.config.max_dynamic_samples
    }

    /// Set the longest accepted dynamic run
    pub fn set_max_dynamic_samples(&mut self, samples: usize) -> CalibrationResult<()> {
        self.update(|c| c.max_dynamic_samples = samples)
    }

    /// Read-only view of the interval detector
    pub fn detector(&self) -> &StaticIntervalDetector {
        &self.detector
    }

    /// Detector state
    pub fn status(&self) -> DetectorStatus {
        self.detector.status()
    }

    /// True while `process` or `reset` is executing, i.e. inside callbacks
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Static/dynamic threshold (0 until initialized)
    pub fn threshold(&self) -> f64 {
        self.detector.threshold()
    }

    /// Threshold as a PSD
    pub fn threshold_psd(&self) -> f64 {
        self.detector.threshold_psd()
    }

    /// Threshold as a root PSD
    pub fn threshold_root_psd(&self) -> f64 {
        self.detector.threshold_root_psd()
    }

    /// Base noise level (0 until initialized)
    pub fn base_noise_level(&self) -> f64 {
        self.detector.base_noise_level()
    }

    /// Base noise level as a PSD
    pub fn base_noise_level_psd(&self) -> f64 {
        self.detector.base_noise_level_psd()
    }

    /// Base noise level as a root PSD
    pub fn base_noise_level_root_psd(&self) -> f64 {
        self.detector.base_noise_level_root_psd()
    }

    /// Samples processed by the detector since the last reset
    pub fn processed_samples(&self) -> usize {
        self.detector.processed_samples()
    }

    /// Samples currently in the detector window
    pub fn samples_in_window(&self) -> usize {
        self.detector.samples_in_window()
    }

    /// Check if the detector window is full
    pub fn is_window_filled(&self) -> bool {
        self.detector.is_window_filled()
    }

    /// Samples in the current static run, including skipped runs carried over
    pub fn processed_static_samples(&self) -> usize {
        self.static_run.samples()
    }

    /// Samples in the current dynamic run
    pub fn processed_dynamic_samples(&self) -> usize {
        self.dynamic_run.count()
    }

    /// Check if an accepted static run is waiting for its cycle to complete
    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Measurements generated since the last reset
    pub fn generated_measurements(&self) -> usize {
        self.generated_measurements
    }
}

impl<Q: Quantity> Default for MeasurementsGenerator<Q> {
    fn default() -> Self {
        let config = GeneratorConfig::default();
        Self {
            config,
            detector: StaticIntervalDetector::default(),
            listener: None,
            notifying: false,
            running: false,
            static_run: Q::Accumulator::new(config.detector.time_interval),
            last_static_noise_level: 0.0,
            reference: None,
            dynamic_run: DynamicRun::new(),
            generated_measurements: 0,
        }
    }
}

impl<Q: Quantity> fmt::Debug for MeasurementsGenerator<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasurementsGenerator")
            .field("config", &self.config)
            .field("status", &self.detector.status())
            .field("processed_samples", &self.detector.processed_samples())
            .field("processed_static_samples", &self.static_run.samples())
            .field("processed_dynamic_samples", &self.dynamic_run.count())
            .field("has_reference", &self.reference.is_some())
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}
