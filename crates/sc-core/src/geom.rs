//! Exact-arithmetic 3-component vectors and points.
//!
//! Every component is a [`Scalar`] (`rust_decimal::Decimal`: 96-bit mantissa,
//! 28 significant digits).  No operation rounds through binary floating
//! point, so the same inputs always produce bit-identical outputs.
//!
//! Overflow of the 96-bit mantissa panics, as `Decimal` arithmetic does.
//! Simulation coordinates stay many orders of magnitude below that bound.
//! Proximity tests ([`Point3::is_within`]) square their operands and so
//! overflow far sooner; they use checked arithmetic and never panic.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use rust_decimal::{Decimal, MathematicalOps};

/// The scalar type used for every coordinate, duration and timestamp.
pub type Scalar = Decimal;

// ── Vector3 ───────────────────────────────────────────────────────────────────

/// A displacement, velocity or acceleration in 3-D space.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3 {
    pub x: Scalar,
    pub y: Scalar,
    pub z: Scalar,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 {
        x: Decimal::ZERO,
        y: Decimal::ZERO,
        z: Decimal::ZERO,
    };

    #[inline]
    pub fn new(x: impl Into<Scalar>, y: impl Into<Scalar>, z: impl Into<Scalar>) -> Self {
        Self { x: x.into(), y: y.into(), z: z.into() }
    }

    /// Multiply every component by `s`.
    #[inline]
    pub fn scale(self, s: Scalar) -> Vector3 {
        Vector3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }

    /// Divide every component by `s`.
    ///
    /// Returns `None` when `s` is zero or any quotient overflows.
    pub fn checked_div(self, s: Scalar) -> Option<Vector3> {
        Some(Vector3 {
            x: self.x.checked_div(s)?,
            y: self.y.checked_div(s)?,
            z: self.z.checked_div(s)?,
        })
    }

    /// Sum of squared components.  Exact.
    #[inline]
    pub fn magnitude_squared(self) -> Scalar {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Sum of squared components, or `None` if it does not fit a `Scalar`.
    pub fn checked_magnitude_squared(self) -> Option<Scalar> {
        self.x
            .checked_mul(self.x)?
            .checked_add(self.y.checked_mul(self.y)?)?
            .checked_add(self.z.checked_mul(self.z)?)
    }

    /// Euclidean length.
    ///
    /// The square root is the only inexact step; it is still computed in
    /// decimal and is deterministic across runs.
    pub fn magnitude(self) -> Scalar {
        // A sum of squares is never negative, so `sqrt` always succeeds.
        self.magnitude_squared().sqrt().unwrap_or_default()
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    #[inline]
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    #[inline]
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    #[inline]
    fn neg(self) -> Vector3 {
        Vector3 { x: -self.x, y: -self.y, z: -self.z }
    }
}

impl Mul<Scalar> for Vector3 {
    type Output = Vector3;
    #[inline]
    fn mul(self, rhs: Scalar) -> Vector3 {
        self.scale(rhs)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.x, self.y, self.z)
    }
}

// ── Point3 ────────────────────────────────────────────────────────────────────

/// A location in 3-D space.
///
/// Points and vectors are kept distinct: `Point3 - Point3` is a `Vector3`,
/// `Point3 + Vector3` is a `Point3`, and two points cannot be added.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    pub x: Scalar,
    pub y: Scalar,
    pub z: Scalar,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 {
        x: Decimal::ZERO,
        y: Decimal::ZERO,
        z: Decimal::ZERO,
    };

    #[inline]
    pub fn new(x: impl Into<Scalar>, y: impl Into<Scalar>, z: impl Into<Scalar>) -> Self {
        Self { x: x.into(), y: y.into(), z: z.into() }
    }

    /// The displacement from the origin to this point.
    #[inline]
    pub fn to_vector(self) -> Vector3 {
        Vector3 { x: self.x, y: self.y, z: self.z }
    }

    /// Projection onto the x/y plane, as published in snapshots.
    #[inline]
    pub fn xy(self) -> [Scalar; 2] {
        [self.x, self.y]
    }

    #[inline]
    pub fn distance_squared(self, other: Point3) -> Scalar {
        (other - self).magnitude_squared()
    }

    #[inline]
    pub fn distance(self, other: Point3) -> Scalar {
        (other - self).magnitude()
    }

    /// Whether `other` is strictly closer than `radius` (non-negative).
    ///
    /// Squares are compared, so the test is exact whenever they fit a
    /// `Scalar`.  When neither fits, both sides are scaled down first.
    pub fn is_within(self, other: Point3, radius: Scalar) -> bool {
        let offset = other - self;
        match (offset.checked_magnitude_squared(), radius.checked_mul(radius)) {
            (Some(d2), Some(r2)) => d2 < r2,
            (None, Some(_)) => false,
            (Some(_), None) => true,
            (None, None) => {
                let offset = offset.scale(FAR_SCALE);
                let radius = radius * FAR_SCALE;
                match (offset.checked_magnitude_squared(), radius.checked_mul(radius)) {
                    (Some(d2), Some(r2)) => d2 < r2,
                    _ => false,
                }
            }
        }
    }
}

/// 1e-15: brings any representable component's square back into range.
const FAR_SCALE: Scalar = Decimal::from_parts(1, 0, 0, false, 15);

impl Sub for Point3 {
    type Output = Vector3;
    #[inline]
    fn sub(self, rhs: Point3) -> Vector3 {
        Vector3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;
    #[inline]
    fn add(self, rhs: Vector3) -> Point3 {
        Point3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl Sub<Vector3> for Point3 {
    type Output = Point3;
    #[inline]
    fn sub(self, rhs: Vector3) -> Point3 {
        Point3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
