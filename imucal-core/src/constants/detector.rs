//! Interval Detector Constants
//!
//! Defaults for the static/dynamic interval detector. Values assume a
//! consumer-grade MEMS IMU sampled at 50 Hz.

// ===== WINDOW =====

/// Default number of samples in the noise window.
///
/// 31 samples at 50 Hz span ~0.6 s:
/// - Long enough for a stable standard deviation estimate (±13%)
/// - Short enough that the start of a motion is seen within a fraction
///   of a second
pub const DEFAULT_WINDOW_SIZE: usize = 31;

/// Smallest accepted window.
///
/// Fewer than 3 samples cannot yield a meaningful sample variance on
/// all axes once the window slides.
pub const MINIMUM_WINDOW_SIZE: usize = 3;

// ===== INITIALIZATION =====

/// Default number of leading samples assumed static.
///
/// 5000 samples at 50 Hz = 100 s of rest. Long initialization runs give a
/// base noise level that is representative of the sensor, not of a few
/// seconds of a particular environment.
pub const DEFAULT_INITIAL_STATIC_SAMPLES: usize = 5000;

// ===== THRESHOLDS =====

/// Default factor applied to the base noise level to obtain the
/// static/dynamic threshold.
///
/// A window whose noise level is more than twice the resting noise level
/// is considered to be moving.
pub const DEFAULT_THRESHOLD_FACTOR: f64 = 2.0;

/// Default factor applied to the accumulated noise level during
/// initialization to detect sudden movement.
///
/// The window noise estimate of a resting sensor fluctuates well within
/// ±50% of the accumulated estimate, so 3× only trips on genuine motion.
pub const DEFAULT_INSTANTANEOUS_NOISE_LEVEL_FACTOR: f64 = 3.0;

/// Default absolute threshold of the base noise level (m/s²).
///
/// A resting consumer MEMS accelerometer shows ~0.005-0.02 m/s² of noise
/// at 50 Hz. A start noisier than 0.05 m/s² (~5 mg) is not a resting
/// device, and initialization fails. The same value bounds the
/// static/dynamic threshold from below, so perfectly quiet (quantised or
/// simulated) input is not classified as motion on the slightest change.
pub const DEFAULT_BASE_NOISE_LEVEL_ABSOLUTE_THRESHOLD: f64 = 0.05;
