//! Standard scripts and configurations shared by the integration tests

use imucal_core::{DetectorConfig, GeneratorConfig};

use super::generators::Segment::{self, Dynamic, Static};

/// Largest base noise level accepted by [`config`]; the generated streams
/// rest at 0.01 m/s²
pub const ABSOLUTE_THRESHOLD: f64 = 0.015;

/// Window 50, 500 initialization samples, runs between 300 static and
/// 300 dynamic samples
pub fn config() -> GeneratorConfig {
    GeneratorConfig::default()
        .with_detector(
            DetectorConfig::default()
                .with_window_size(50)
                .with_initial_static_samples(500)
                .with_base_noise_level_absolute_threshold(ABSOLUTE_THRESHOLD),
        )
        .with_min_static_samples(300)
        .with_max_dynamic_samples(300)
}

/// Initialization only
pub const CLEAN_START: &[Segment] = &[Static { samples: 500, pose: 0 }];

/// Static run too short to be a reference
pub const SHORT_STATIC_RUN: &[Segment] = &[
    Static { samples: 700, pose: 0 },
    Dynamic { samples: 100 },
    Static { samples: 200, pose: 1 },
];

/// Short static run, a brief disturbance, and more rest in the same pose
pub const INTERRUPTED_STATIC_RUN: &[Segment] = &[
    Static { samples: 700, pose: 0 },
    Dynamic { samples: 100 },
    Static { samples: 400, pose: 0 },
    Dynamic { samples: 100 },
    Static { samples: 200, pose: 1 },
];

/// Dynamic run over the limit, then one valid cycle
pub const LONG_DYNAMIC_RUN: &[Segment] = &[
    Static { samples: 900, pose: 0 },
    Dynamic { samples: 500 },
    Static { samples: 400, pose: 1 },
    Dynamic { samples: 100 },
    Static { samples: 200, pose: 2 },
];

/// Short static run followed by a motion over the limit
pub const LONG_DYNAMIC_RUN_AFTER_SHORT_STATIC_RUN: &[Segment] = &[
    Static { samples: 600, pose: 0 },
    Dynamic { samples: 100 },
    Static { samples: 150, pose: 1 },
    Dynamic { samples: 1000 },
    Static { samples: 400, pose: 2 },
    Dynamic { samples: 100 },
    Static { samples: 200, pose: 3 },
];

/// Exactly one clean cycle
pub const ONE_CYCLE: &[Segment] = &[
    Static { samples: 900, pose: 0 },
    Dynamic { samples: 150 },
    Static { samples: 300, pose: 1 },
];

/// Two chained cycles sharing the middle static run
pub const TWO_CYCLES: &[Segment] = &[
    Static { samples: 900, pose: 0 },
    Dynamic { samples: 150 },
    Static { samples: 400, pose: 1 },
    Dynamic { samples: 150 },
    Static { samples: 300, pose: 2 },
];

/// Device moved for the whole initialization
pub const NOISY_START: &[Segment] = &[Dynamic { samples: 600 }];

/// Motion during initialization
pub const MOVED_DURING_INITIALIZATION: &[Segment] = &[
    Static { samples: 1000, pose: 0 },
    Dynamic { samples: 100 },
];
