//! Constants for imucal Core
//!
//! Centralised defaults and limits for the interval detector and the
//! measurement generator. Every value here is a tunable default, not a
//! structural requirement: each can be overridden through
//! [`DetectorConfig`](crate::detector::DetectorConfig) or
//! [`GeneratorConfig`](crate::generator::GeneratorConfig).
//!
//! ## Organization
//!
//! - **Detector**: window size, initialization length, threshold factors
//! - **Generator**: interval-length policy
//! - **Time**: sampling interval
//!
//! ## Usage Guidelines
//!
//! 1. Use these constants instead of magic numbers
//! 2. Document the rationale next to any new constant
//! 3. Include units in the name where the value has one

/// Interval detector defaults and limits.
pub mod detector;

/// Measurement generator defaults and limits.
pub mod generator;

/// Sampling interval defaults.
pub mod time;

pub use detector::{
    DEFAULT_WINDOW_SIZE, MINIMUM_WINDOW_SIZE, DEFAULT_INITIAL_STATIC_SAMPLES,
    DEFAULT_THRESHOLD_FACTOR, DEFAULT_INSTANTANEOUS_NOISE_LEVEL_FACTOR,
    DEFAULT_BASE_NOISE_LEVEL_ABSOLUTE_THRESHOLD,
};

pub use generator::{DEFAULT_MIN_STATIC_SAMPLES, DEFAULT_MAX_DYNAMIC_SAMPLES};

pub use time::DEFAULT_TIME_INTERVAL_SECONDS;
