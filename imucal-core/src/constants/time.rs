//! Time-Related Constants

/// Default time between samples, in seconds.
///
/// 50 Hz is the common output rate of phone and hobby IMUs and
/// the rate the other defaults are tuned for.
pub const DEFAULT_TIME_INTERVAL_SECONDS: f64 = 0.02;
