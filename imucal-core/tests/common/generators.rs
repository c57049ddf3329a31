//! Seeded sensor stream generators
//!
//! Streams are scripted as a list of [`Segment`]s: the device rests in one of
//! six poses, or is moved. Noise is Gaussian (Box-Muller over `StdRng`), so a
//! given seed always produces the same stream.

use imucal_core::{BodyKinematics, KinematicsAndMagneticFluxDensity, Triad};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Standard gravity (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Accelerometer noise at rest (m/s²)
pub const ACCELEROMETER_NOISE: f64 = 0.01;

/// Specific force spread while moving (m/s²)
pub const MOTION_NOISE: f64 = 0.5;

/// Gyroscope noise at rest (rad/s)
pub const GYROSCOPE_NOISE: f64 = 1e-3;

/// Magnetometer noise (T)
pub const MAGNETOMETER_NOISE: f64 = 1e-7;

/// Earth field magnitude used for every pose (T)
pub const EARTH_FIELD: f64 = 5e-5;

/// One part of a scripted stream
#[derive(Debug, Clone, Copy)]
pub enum Segment {
    /// Device at rest in pose `pose` (index into [`pose`])
    Static { samples: usize, pose: usize },
    /// Device being moved
    Dynamic { samples: usize },
}

/// Rest specific force of pose `index` (one face of the device down)
pub fn pose(index: usize) -> Triad {
    match index % 6 {
        0 => Triad::new(0.0, 0.0, GRAVITY),
        1 => Triad::new(0.0, 0.0, -GRAVITY),
        2 => Triad::new(GRAVITY, 0.0, 0.0),
        3 => Triad::new(-GRAVITY, 0.0, 0.0),
        4 => Triad::new(0.0, GRAVITY, 0.0),
        _ => Triad::new(0.0, -GRAVITY, 0.0),
    }
}

/// Magnetic flux density seen in pose `index`
pub fn magnetic_pose(index: usize) -> Triad {
    let g = pose(index) / GRAVITY;
    // Field tilted 60° from the vertical, rotating with the device
    Triad::new(g.z, g.x, g.y) * (EARTH_FIELD * 0.5) + g * (EARTH_FIELD * 0.866)
}

/// Deterministic sensor noise source
pub struct SensorNoise {
    rng: StdRng,
}

impl SensorNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Gaussian noise using the Box-Muller transform
    pub fn gaussian(&mut self, stddev: f64) -> f64 {
        if stddev == 0.0 {
            return 0.0;
        }
        let u1: f64 = self.rng.gen::<f64>().max(f64::EPSILON);
        let u2: f64 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        z * stddev
    }

    /// Independent Gaussian noise on each axis
    pub fn triad(&mut self, stddev: f64) -> Triad {
        Triad::new(
            self.gaussian(stddev),
            self.gaussian(stddev),
            self.gaussian(stddev),
        )
    }
}

/// Visit every sample of a script with the current pose and motion flag
fn walk(segments: &[Segment], mut visit: impl FnMut(usize, bool)) {
    let mut current = 0;
    for segment in segments {
        match *segment {
            Segment::Static { samples, pose } => {
                current = pose;
                (0..samples).for_each(|_| visit(current, false));
            }
            Segment::Dynamic { samples } => {
                (0..samples).for_each(|_| visit(current, true));
            }
        }
    }
}

/// Specific force stream
pub fn specific_force_stream(seed: u64, segments: &[Segment]) -> Vec<Triad> {
    let mut noise = SensorNoise::new(seed);
    let mut out = Vec::new();
    walk(segments, |p, moving| {
        let sigma = if moving { MOTION_NOISE } else { ACCELEROMETER_NOISE };
        out.push(pose(p) + noise.triad(sigma));
    });
    out
}

/// Specific force and angular rate stream; `bias` is the at-rest gyroscope output
pub fn kinematics_stream(seed: u64, segments: &[Segment], bias: Triad) -> Vec<BodyKinematics> {
    let mut noise = SensorNoise::new(seed);
    let mut out = Vec::new();
    walk(segments, |p, moving| {
        let sample = if moving {
            BodyKinematics::new(
                pose(p) + noise.triad(MOTION_NOISE),
                bias + Triad::new(0.0, 1.2, 0.3) + noise.triad(0.2),
            )
        } else {
            BodyKinematics::new(
                pose(p) + noise.triad(ACCELEROMETER_NOISE),
                bias + noise.triad(GYROSCOPE_NOISE),
            )
        };
        out.push(sample);
    });
    out
}

/// Kinematics plus magnetic flux density stream
pub fn magnetic_stream(seed: u64, segments: &[Segment]) -> Vec<KinematicsAndMagneticFluxDensity> {
    let mut noise = SensorNoise::new(seed);
    let mut out = Vec::new();
    walk(segments, |p, moving| {
        let sigma = if moving { MOTION_NOISE } else { ACCELEROMETER_NOISE };
        let kinematics = BodyKinematics::new(pose(p) + noise.triad(sigma), noise.triad(GYROSCOPE_NOISE));
        out.push(KinematicsAndMagneticFluxDensity::new(
            kinematics,
            magnetic_pose(p) + noise.triad(MAGNETOMETER_NOISE),
        ));
    });
    out
}
