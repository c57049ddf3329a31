//! Three-axis measurement value
//!
//! A [`Triad`] is one instant of a single physical quantity measured along the
//! sensor's x, y and z axes: specific force (m/s²), angular rate (rad/s) or
//! magnetic flux density (T). Units are carried by context, not by the type.

use core::ops::{Add, AddAssign, Div, Mul, Sub};

/// Immutable (x, y, z) sample of one physical quantity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triad {
    /// X-axis component
    pub x: f64,
    /// Y-axis component
    pub y: f64,
    /// Z-axis component
    pub z: f64,
}

impl Triad {
    /// All components zero
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create from components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create from an `[x, y, z]` array
    pub const fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    /// Components as an `[x, y, z]` array
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }

    /// Arithmetic mean of the three components
    pub fn mean(&self) -> f64 {
        (self.x + self.y + self.z) / 3.0
    }

    /// Apply `f` to every component
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Triad {
    fn from(values: [f64; 3]) -> Self {
        Self::from_array(values)
    }
}

impl Add for Triad {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Triad {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Triad {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Triad {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map(|v| v * rhs)
    }
}

impl Div<f64> for Triad {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.map(|v| v / rhs)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Triad {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "({}, {}, {})", self.x, self.y, self.z)
    }
}
