//! Measurement Generator Constants
//!
//! Interval-length policy defaults, in samples at the default 50 Hz rate.

/// Default minimum length of a static run accepted as a cycle reference.
///
/// 250 samples = 5 s of rest, enough to average the specific force down
/// to a fraction of the per-sample noise.
pub const DEFAULT_MIN_STATIC_SAMPLES: usize = 250;

/// Default maximum length of a dynamic run inside a cycle.
///
/// 5000 samples = 100 s. Longer motions are rejected: gyroscope
/// integration error grows with time and the pose change between the
/// bracketing static runs becomes unreliable.
pub const DEFAULT_MAX_DYNAMIC_SAMPLES: usize = 5000;
