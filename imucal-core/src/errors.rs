//! Error Types for Calibration Pipeline Configuration and Input
//!
//! ## Design Philosophy
//!
//! The pipeline runs inside tight sampling loops, often on embedded targets, so
//! its error type follows the same rules as the rest of the crate:
//!
//! 1. **Small Size**: every variant carries at most two `&'static str` fields.
//!
//! 2. **No Heap Allocation**: messages are static strings, never `String`.
//!
//! 3. **Copy Semantics**: errors are `Copy` so setters can return them cheaply.
//!
//! ## What Is (And Is Not) An Error
//!
//! Only *usage* problems are reported through `Result`:
//! - `InvalidParameter`: a configuration value outside its documented domain
//!   (e.g. a window of 2 samples, a non-positive threshold factor). The setter
//!   that received it has no side effect.
//! - `InvalidSample`: a sample containing NaN or infinity.
//!
//! Streaming conditions are *not* errors in the control-flow sense:
//! - A detection failure (noise too large to derive a usable threshold) moves
//!   the detector into [`DetectorStatus::Failed`](crate::detector::DetectorStatus)
//!   and is reported through [`DetectorEvent::Error`](crate::detector::DetectorEvent)
//!   and the generator listener, while `process` returns `false`.
//! - Skipped static or dynamic intervals are policy decisions, reported as
//!   listener notifications only.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use imucal_core::{CalibrationError, DetectorConfig};
//!
//! let mut config = DetectorConfig::default();
//! config.window_size = 2;
//!
//! match config.validate() {
//!     Ok(()) => {}
//!     Err(CalibrationError::InvalidParameter { name, reason }) => {
//!         // Report to the operator and keep the previous configuration
//!         assert_eq!(name, "window_size");
//!         let _ = reason;
//!     }
//!     Err(CalibrationError::InvalidSample) => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for configuration and ingestion operations
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Calibration pipeline errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    /// Configuration value outside its valid domain
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Constraint the value violated
        reason: &'static str,
    },

    /// Sample has a NaN or infinite component
    #[error("Invalid sample: not a finite triad")]
    InvalidSample,
}

impl CalibrationError {
    pub(crate) const fn invalid(name: &'static str, reason: &'static str) -> Self {
        Self::InvalidParameter { name, reason }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalibrationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidParameter { name, reason } =>
                defmt::write!(fmt, "Invalid parameter {}: {}", name, reason),
            Self::InvalidSample =>
                defmt::write!(fmt, "Invalid sample"),
        }
    }
}
