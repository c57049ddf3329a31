//! Static/Dynamic Interval Detection
//!
//! ## Overview
//!
//! Calibration of an IMU without a turntable relies on the device being put
//! down at rest, moved, put down again, and so on. The
//! [`StaticIntervalDetector`] splits a stream of triads (usually specific
//! force) into those static and dynamic runs without any a priori knowledge
//! of the sensor's noise.
//!
//! ## Algorithm
//!
//! ```text
//!                 ┌─────────────────────────┐
//!   triad ───────►│ WindowedNoiseEstimator  │──► noise level  (avg std of window)
//!                 └─────────────────────────┘          │
//!                 ┌─────────────────────────┐          │
//!   (init only) ─►│ AccumulatedNoiseEstimator│──► accumulated level
//!                 └─────────────────────────┘          │
//!                                                      ▼
//!   Initializing: window level > accumulated × instantaneous factor ─► Failed
//!                 after `initial_static_samples`:
//!                   base      = window level
//!                   base > absolute threshold ─► Failed
//!                   threshold = max(base × threshold factor, absolute threshold)
//!   Ready:        window level ≤ threshold ─► StaticInterval
//!                 window level > threshold ─► DynamicInterval
//! ```
//!
//! 1. The first `initial_static_samples` triads are assumed to be recorded at
//!    rest. Once the window is full, every window whose noise level is more
//!    than `instantaneous_noise_level_factor` times the noise of the whole
//!    initialization run so far is taken as a sudden movement and fails the
//!    detector.
//! 2. At the end of initialization the noise level of the last window becomes
//!    the *base noise level*. A base above `base_noise_level_absolute_threshold`
//!    means the device was moving throughout and fails the detector.
//! 3. Afterwards each triad is classified by comparing the window noise level
//!    with the threshold. The absolute threshold is also the threshold's
//!    lower bound, so a perfectly quiet (simulated or quantised) sensor does
//!    not produce a zero threshold.
//!
//! The detector starts in `StaticInterval` once initialized, since the
//! initialization run is itself static.
//!
//! ## Events
//!
//! [`StaticIntervalDetector::process`] returns at most one [`DetectorEvent`]
//! per triad, describing the state change that triad caused. A failed detector
//! ignores further triads until [`reset`](StaticIntervalDetector::reset).

mod config;
mod status;

pub use config::DetectorConfig;
pub use status::{DetectorEvent, DetectorStatus, ErrorReason};

use crate::{
    errors::{CalibrationError, CalibrationResult},
    noise::{AccumulatedNoiseEstimator, NoiseStatistics, WindowedNoiseEstimator},
    triad::Triad,
};

/// Online static/dynamic interval classifier for a triad stream
#[derive(Debug, Clone)]
pub struct StaticIntervalDetector {
    config: DetectorConfig,
    windowed: WindowedNoiseEstimator,
    accumulated: AccumulatedNoiseEstimator,
    status: DetectorStatus,
    base_noise_level: f64,
    threshold: f64,
    processed_samples: usize,
    error_reason: Option<ErrorReason>,
}

impl StaticIntervalDetector {
    /// Create a detector with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with a validated configuration
    pub fn with_config(config: DetectorConfig) -> CalibrationResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            windowed: WindowedNoiseEstimator::new(config.window_size, config.time_interval)?,
            accumulated: AccumulatedNoiseEstimator::new(config.time_interval)?,
            status: DetectorStatus::Idle,
            base_noise_level: 0.0,
            threshold: 0.0,
            processed_samples: 0,
            error_reason: None,
        })
    }

    /// Current configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Replace the configuration
    ///
    /// Nothing changes if `config` is invalid. A different window size
    /// discards the triads currently held in the window.
    pub fn set_config(&mut self, config: DetectorConfig) -> CalibrationResult<()> {
        config.validate()?;

        if config.window_size != self.config.window_size {
            self.windowed.set_window_size(config.window_size)?;
        }
        self.windowed.set_time_interval(config.time_interval)?;
        self.accumulated.set_time_interval(config.time_interval)?;
        self.config = config;
        Ok(())
    }

    /// Set the window size
    pub fn set_window_size(&mut self, window_size: usize) -> CalibrationResult<()> {
        self.set_config(DetectorConfig { window_size, ..self.config })
    }

    /// Set the number of initial static samples
    pub fn set_initial_static_samples(&mut self, samples: usize) -> CalibrationResult<()> {
        self.set_config(DetectorConfig { initial_static_samples: samples, ..self.config })
    }

    /// Set the threshold factor
    pub fn set_threshold_factor(&mut self, factor: f64) -> CalibrationResult<()> {
        self.set_config(DetectorConfig { threshold_factor: factor, ..self.config })
    }

    /// Set the instantaneous noise level factor
    pub fn set_instantaneous_noise_level_factor(&mut self, factor: f64) -> CalibrationResult<()> {
        self.set_config(DetectorConfig {
            instantaneous_noise_level_factor: factor,
            ..self.config
        })
    }

    /// Set the absolute threshold of the base noise level
    pub fn set_base_noise_level_absolute_threshold(&mut self, threshold: f64) -> CalibrationResult<()> {
        self.set_config(DetectorConfig {
            base_noise_level_absolute_threshold: threshold,
            ..self.config
        })
    }

    /// Set the sampling interval in seconds
    pub fn set_time_interval(&mut self, time_interval: f64) -> CalibrationResult<()> {
        self.set_config(DetectorConfig { time_interval, ..self.config })
    }

    /// Feed one triad
    ///
    /// Returns the state change caused by this triad, if any. A triad with a
    /// non-finite component is rejected with
    /// [`CalibrationError::InvalidSample`] and leaves the detector untouched.
    pub fn process(&mut self, triad: &Triad) -> CalibrationResult<Option<DetectorEvent>> {
        if !triad.is_finite() {
            return Err(CalibrationError::InvalidSample);
        }

        let started = match self.status {
            DetectorStatus::Failed => return Ok(None),
            DetectorStatus::Idle => {
                self.status = DetectorStatus::Initializing;
                log_debug!("interval detector initializing");
                Some(DetectorEvent::InitializationStarted)
            }
            _ => None,
        };

        self.windowed.add_sample(*triad)?;
        self.processed_samples += 1;

        if self.status == DetectorStatus::Initializing {
            self.accumulated.add_sample(*triad)?;
            return Ok(self.initialize().or(started));
        }

        Ok(self.classify())
    }

    fn initialize(&mut self) -> Option<DetectorEvent> {
        let noise_level = self.windowed.average_standard_deviation();

        if self.windowed.is_filled() {
            let limit = self.accumulated.average_standard_deviation()
                * self.config.instantaneous_noise_level_factor;
            if noise_level > limit {
                return Some(self.fail(ErrorReason::SuddenExcessiveMovement));
            }
        }

        if self.processed_samples < self.config.initial_static_samples {
            return None;
        }

        if !noise_level.is_finite() {
            return Some(self.fail(ErrorReason::NonFiniteNoiseLevel));
        }
        if noise_level > self.config.base_noise_level_absolute_threshold {
            return Some(self.fail(ErrorReason::OverallExcessiveMovement));
        }

        let threshold = (noise_level * self.config.threshold_factor)
            .max(self.config.base_noise_level_absolute_threshold);
        if !threshold.is_finite() {
            return Some(self.fail(ErrorReason::NonFiniteNoiseLevel));
        }

        self.base_noise_level = noise_level;
        self.threshold = threshold;
        self.status = DetectorStatus::StaticInterval;
        log_info!(
            "interval detector initialized: base noise level {}, threshold {}",
            noise_level,
            threshold
        );

        Some(DetectorEvent::InitializationCompleted {
            base_noise_level: noise_level,
            threshold,
        })
    }

    fn classify(&mut self) -> Option<DetectorEvent> {
        let noise_level = self.windowed.average_standard_deviation();
        if !noise_level.is_finite() {
            return Some(self.fail(ErrorReason::NonFiniteNoiseLevel));
        }

        let is_static = noise_level <= self.threshold;
        match (self.status, is_static) {
            (DetectorStatus::DynamicInterval, true) => {
                self.status = DetectorStatus::StaticInterval;
                Some(DetectorEvent::StaticIntervalStarted {
                    average: self.windowed.average(),
                    noise_level,
                })
            }
            (DetectorStatus::StaticInterval, false) => {
                self.status = DetectorStatus::DynamicInterval;
                Some(DetectorEvent::DynamicIntervalStarted {
                    average: self.windowed.average(),
                    noise_level,
                })
            }
            _ => None,
        }
    }

    fn fail(&mut self, reason: ErrorReason) -> DetectorEvent {
        self.status = DetectorStatus::Failed;
        self.error_reason = Some(reason);
        log_warn!("interval detector failed: {}", reason.description());
        DetectorEvent::Error { reason }
    }

    /// Return to `Idle`, forgetting every triad and derived level
    ///
    /// The configuration is kept.
    pub fn reset(&mut self) {
        self.windowed.reset();
        self.accumulated.reset();
        self.status = DetectorStatus::Idle;
        self.base_noise_level = 0.0;
        self.threshold = 0.0;
        self.processed_samples = 0;
        self.error_reason = None;
    }

    /// Current lifecycle state
    pub fn status(&self) -> DetectorStatus {
        self.status
    }

    /// Cause of the failure, while `Failed`
    pub fn error_reason(&self) -> Option<ErrorReason> {
        self.error_reason
    }

    /// Triads processed since the last reset (ignored triads excluded)
    pub fn processed_samples(&self) -> usize {
        self.processed_samples
    }

    /// Triads currently held in the window
    pub fn samples_in_window(&self) -> usize {
        self.windowed.len()
    }

    /// Check if the window holds `window_size` triads
    pub fn is_window_filled(&self) -> bool {
        self.windowed.is_filled()
    }

    /// Base noise level (0 until initialized)
    pub fn base_noise_level(&self) -> f64 {
        self.base_noise_level
    }

    /// Base noise level as a PSD (`base² · Δt`)
    pub fn base_noise_level_psd(&self) -> f64 {
        self.base_noise_level * self.base_noise_level * self.config.time_interval
    }

    /// Base noise level as a root PSD (`base · √Δt`)
    pub fn base_noise_level_root_psd(&self) -> f64 {
        self.base_noise_level * libm::sqrt(self.config.time_interval)
    }

    /// Static/dynamic threshold (0 until initialized)
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Threshold as a PSD
    pub fn threshold_psd(&self) -> f64 {
        self.threshold * self.threshold * self.config.time_interval
    }

    /// Threshold as a root PSD
    pub fn threshold_root_psd(&self) -> f64 {
        self.threshold * libm::sqrt(self.config.time_interval)
    }

    /// Noise level of the current window
    pub fn instantaneous_noise_level(&self) -> f64 {
        self.windowed.average_standard_deviation()
    }

    /// Mean triad of the current window
    pub fn instantaneous_average(&self) -> Triad {
        self.windowed.average()
    }

    /// Per-axis standard deviation of the current window
    pub fn instantaneous_standard_deviation(&self) -> Triad {
        self.windowed.standard_deviation()
    }

    /// Statistics of the current window
    pub fn window_statistics(&self) -> NoiseStatistics {
        self.windowed.statistics()
    }

    /// Statistics of the initialization run
    pub fn accumulated_statistics(&self) -> NoiseStatistics {
        self.accumulated.statistics()
    }

    /// Noise level of the initialization run
    pub fn accumulated_noise_level(&self) -> f64 {
        self.accumulated.average_standard_deviation()
    }
}

impl Default for StaticIntervalDetector {
    fn default() -> Self {
        let config = DetectorConfig::default();
        Self {
            config,
            windowed: WindowedNoiseEstimator::default(),
            accumulated: AccumulatedNoiseEstimator::default(),
            status: DetectorStatus::Idle,
            base_noise_level: 0.0,
            threshold: 0.0,
            processed_samples: 0,
            error_reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const GRAVITY: f64 = 9.81;

    /// Deterministic zero-mean jitter with per-axis std close to `amplitude / √2`
    fn jitter(i: usize, amplitude: f64) -> Triad {
        let t = i as f64;
        Triad::new(
            amplitude * libm::sin(1.3 * t),
            amplitude * libm::sin(2.1 * t + 0.5),
            amplitude * libm::sin(0.7 * t + 1.0),
        )
    }

    fn at_rest(i: usize) -> Triad {
        Triad::new(0.0, 0.0, GRAVITY) + jitter(i, 0.01)
    }

    fn moving(i: usize) -> Triad {
        Triad::new(0.0, 0.0, GRAVITY) + jitter(i, 2.0)
    }

    fn config() -> DetectorConfig {
        DetectorConfig::default()
            .with_window_size(50)
            .with_initial_static_samples(200)
            .with_base_noise_level_absolute_threshold(0.01)
    }

    fn feed(
        detector: &mut StaticIntervalDetector,
        range: core::ops::Range<usize>,
        f: fn(usize) -> Triad,
    ) -> Vec<DetectorEvent> {
        range
            .filter_map(|i| detector.process(&f(i)).unwrap())
            .collect()
    }

    #[test]
    fn initialization_lifecycle() {
        let mut detector = StaticIntervalDetector::with_config(config()).unwrap();
        assert_eq!(detector.status(), DetectorStatus::Idle);

        let first = detector.process(&at_rest(0)).unwrap();
        assert_eq!(first, Some(DetectorEvent::InitializationStarted));
        assert_eq!(detector.status(), DetectorStatus::Initializing);

        let events = feed(&mut detector, 1..200, at_rest);
        assert_eq!(events.len(), 1);
        match events[0] {
            DetectorEvent::InitializationCompleted { base_noise_level, threshold } => {
                assert!(base_noise_level > 0.005 && base_noise_level < 0.01);
                assert_eq!(threshold, base_noise_level * 2.0);
            }
            other => panic!("unexpected event {:?}", other),
        }

        assert_eq!(detector.status(), DetectorStatus::StaticInterval);
        assert_eq!(detector.processed_samples(), 200);
        assert_eq!(detector.accumulated_statistics().samples, 200);
    }

    #[test]
    fn detects_dynamic_then_static() {
        let mut detector = StaticIntervalDetector::with_config(config()).unwrap();
        feed(&mut detector, 0..300, at_rest);
        assert_eq!(detector.status(), DetectorStatus::StaticInterval);

        let events = feed(&mut detector, 300..400, moving);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], DetectorEvent::DynamicIntervalStarted { .. }));
        assert_eq!(detector.status(), DetectorStatus::DynamicInterval);

        let events = feed(&mut detector, 400..500, at_rest);
        assert_eq!(events.len(), 1);
        match events[0] {
            DetectorEvent::StaticIntervalStarted { average, noise_level } => {
                assert!(noise_level <= detector.threshold());
                assert!(libm::fabs(average.z - GRAVITY) < 0.01);
            }
            other => panic!("unexpected event {:?}", other),
        }

        // Accumulated statistics only cover initialization
        assert_eq!(detector.accumulated_statistics().samples, 200);
    }

    #[test]
    fn constant_input_uses_absolute_threshold() {
        let mut detector = StaticIntervalDetector::with_config(config()).unwrap();
        let still = Triad::new(0.0, 0.0, GRAVITY);
        for _ in 0..250 {
            detector.process(&still).unwrap();
        }

        assert_eq!(detector.base_noise_level(), 0.0);
        assert_eq!(detector.threshold(), config().base_noise_level_absolute_threshold);
        assert_eq!(detector.status(), DetectorStatus::StaticInterval);
    }

    #[test]
    fn sudden_movement_fails_initialization() {
        let config = config().with_initial_static_samples(2000);
        let mut detector = StaticIntervalDetector::with_config(config).unwrap();

        feed(&mut detector, 0..1000, at_rest);
        let events = feed(&mut detector, 1000..1100, moving);

        assert_eq!(
            events,
            [DetectorEvent::Error { reason: ErrorReason::SuddenExcessiveMovement }]
        );
        assert_eq!(detector.status(), DetectorStatus::Failed);
        assert_eq!(detector.error_reason(), Some(ErrorReason::SuddenExcessiveMovement));
    }

    #[test]
    fn noisy_base_fails_initialization() {
        let config = config().with_base_noise_level_absolute_threshold(1e-3);
        let mut detector = StaticIntervalDetector::with_config(config).unwrap();

        let events = feed(&mut detector, 0..200, at_rest);
        assert_eq!(
            events.last(),
            Some(&DetectorEvent::Error { reason: ErrorReason::OverallExcessiveMovement })
        );
        assert_eq!(detector.base_noise_level(), 0.0);
    }

    #[test]
    fn absolute_threshold_bounds_threshold_from_below() {
        let config = config().with_base_noise_level_absolute_threshold(0.05);
        let mut detector = StaticIntervalDetector::with_config(config).unwrap();
        feed(&mut detector, 0..200, at_rest);

        assert_eq!(detector.status(), DetectorStatus::StaticInterval);
        assert!(detector.base_noise_level() * 2.0 < 0.05);
        assert_eq!(detector.threshold(), 0.05);
    }

    #[test]
    fn failed_detector_ignores_samples() {
        let config = config().with_base_noise_level_absolute_threshold(1e-3);
        let mut detector = StaticIntervalDetector::with_config(config).unwrap();
        feed(&mut detector, 0..200, at_rest);

        assert!(feed(&mut detector, 200..300, moving).is_empty());
        assert_eq!(detector.processed_samples(), 200);
        assert_eq!(detector.status(), DetectorStatus::Failed);
    }

    #[test]
    fn non_finite_sample_is_rejected() {
        let mut detector = StaticIntervalDetector::with_config(config()).unwrap();
        detector.process(&at_rest(0)).unwrap();

        assert_eq!(
            detector.process(&Triad::new(f64::NAN, 0.0, 0.0)),
            Err(CalibrationError::InvalidSample)
        );
        assert_eq!(detector.processed_samples(), 1);
        assert_eq!(detector.samples_in_window(), 1);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut detector = StaticIntervalDetector::with_config(config()).unwrap();
        feed(&mut detector, 0..300, at_rest);
        detector.reset();

        assert_eq!(detector.status(), DetectorStatus::Idle);
        assert_eq!(detector.threshold(), 0.0);
        assert_eq!(detector.processed_samples(), 0);
        assert_eq!(detector.samples_in_window(), 0);
        assert_eq!(*detector.config(), config());
        assert_eq!(
            detector.process(&at_rest(0)).unwrap(),
            Some(DetectorEvent::InitializationStarted)
        );
    }

    #[test]
    fn invalid_setter_has_no_effect() {
        let mut detector = StaticIntervalDetector::with_config(config()).unwrap();

        assert!(detector.set_window_size(2).is_err());
        assert!(detector.set_initial_static_samples(10).is_err());
        assert!(detector.set_threshold_factor(f64::NAN).is_err());
        assert_eq!(*detector.config(), config());

        detector.set_threshold_factor(3.5).unwrap();
        assert_eq!(detector.config().threshold_factor, 3.5);
    }

    #[test]
    fn psd_telemetry() {
        let config = config().with_time_interval(0.04);
        let mut detector = StaticIntervalDetector::with_config(config).unwrap();
        feed(&mut detector, 0..200, at_rest);

        let base = detector.base_noise_level();
        assert!(libm::fabs(detector.base_noise_level_psd() - base * base * 0.04) < 1e-15);
        assert!(libm::fabs(detector.base_noise_level_root_psd() - base * 0.2) < 1e-15);
        assert!(detector.threshold_root_psd() > detector.base_noise_level_root_psd());
    }
}
