//! Detector states, failure reasons and per-sample events

use crate::triad::Triad;

/// Lifecycle state of a [`StaticIntervalDetector`](super::StaticIntervalDetector)
///
/// ```text
///  Idle ──► Initializing ──► StaticInterval ◄──► DynamicInterval
///                │                  │                   │
///                └──────────────────┴─────► Failed ◄────┘
/// ```
///
/// `Failed` is absorbing: only a reset leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DetectorStatus {
    /// No sample processed since construction or reset
    #[default]
    Idle,
    /// Collecting the initial static samples
    Initializing,
    /// Window noise at or below the threshold
    StaticInterval,
    /// Window noise above the threshold
    DynamicInterval,
    /// Initialization or processing failed
    Failed,
}

impl DetectorStatus {
    /// Check if the detector is classifying samples
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::StaticInterval | Self::DynamicInterval)
    }

    /// Short human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Initializing => "initializing",
            Self::StaticInterval => "static",
            Self::DynamicInterval => "dynamic",
            Self::Failed => "failed",
        }
    }
}

/// Why the detector entered [`DetectorStatus::Failed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorReason {
    /// A window of the initialization run was far noisier than the run
    /// as a whole
    SuddenExcessiveMovement,
    /// The base noise level exceeded the absolute threshold
    OverallExcessiveMovement,
    /// The base noise level or threshold was not a finite number
    NonFiniteNoiseLevel,
}

impl ErrorReason {
    /// Human-readable description
    pub const fn description(self) -> &'static str {
        match self {
            Self::SuddenExcessiveMovement => "sudden excessive movement during initialization",
            Self::OverallExcessiveMovement => "overall excessive movement during initialization",
            Self::NonFiniteNoiseLevel => "noise level is not finite",
        }
    }
}

impl core::fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

/// State change reported by
/// [`StaticIntervalDetector::process`](super::StaticIntervalDetector::process)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DetectorEvent {
    /// First sample after construction or reset
    InitializationStarted,
    /// Base noise level established; classification begins
    InitializationCompleted {
        /// Average standard deviation of the last initialization window
        base_noise_level: f64,
        /// Static/dynamic threshold derived from it
        threshold: f64,
    },
    /// Detector entered [`DetectorStatus::Failed`]
    Error {
        /// Cause of the failure
        reason: ErrorReason,
    },
    /// Window noise dropped to or below the threshold
    StaticIntervalStarted {
        /// Window mean at the transition
        average: Triad,
        /// Window noise level at the transition
        noise_level: f64,
    },
    /// Window noise rose above the threshold
    DynamicIntervalStarted {
        /// Window mean at the transition
        average: Triad,
        /// Window noise level at the transition
        noise_level: f64,
    },
}
