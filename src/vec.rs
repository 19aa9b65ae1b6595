use super::error::{Result, TracerError};
use std::fmt;
use std::fmt::Display;
use std::ops::{
    Add, AddAssign, Deref, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

/// Values closer to zero than this are snapped to zero by [`align_zero`].
pub const EPSILON: f64 = 1e-10;

pub fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

/// Snap floating noise to exactly zero so that sign tests stay consistent.
pub fn align_zero(value: f64) -> f64 {
    if is_zero(value) {
        0.0
    } else {
        value
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    e: [f64; 3],
}

pub type Point3 = Vec3;
pub type Color = Vec3;

impl Vec3 {
    pub const fn new(e0: f64, e1: f64, e2: f64) -> Self {
        Self { e: [e0, e1, e2] }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn one() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value)
    }

    pub fn x(self) -> f64 {
        self[0]
    }

    pub fn y(self) -> f64 {
        self[1]
    }

    pub fn z(self) -> f64 {
        self[2]
    }

    pub fn dot(self, other: Self) -> f64 {
        self[0] * other[0] + self[1] * other[1] + self[2] * other[2]
    }

    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn cross(self, other: Self) -> Self {
        Self {
            e: [
                self[1] * other[2] - self[2] * other[1],
                self[2] * other[0] - self[0] * other[2],
                self[0] * other[1] - self[1] * other[0],
            ],
        }
    }

    /// Normalize, failing on a zero-length vector.
    pub fn unit(self) -> Result<Unit> {
        Unit::new(self)
    }

    /// Component-wise equality within [`EPSILON`].
    pub fn approx_eq(self, other: Self) -> bool {
        is_zero(self[0] - other[0]) && is_zero(self[1] - other[1]) && is_zero(self[2] - other[2])
    }

    /// True when every channel is strictly below `threshold`.
    pub fn all_below(self, threshold: f64) -> bool {
        self[0] < threshold && self[1] < threshold && self[2] < threshold
    }

    // Reflect across a unit normal vector n
    // Self is the incident vector
    pub fn reflect(self, n: Self) -> Self {
        self - 2.0 * self.dot(n) * n
    }

    /// One PPM pixel: each channel clamped to [0, 1] and mapped to a byte.
    pub fn format_color(self) -> String {
        let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("{} {} {}", to_byte(self[0]), to_byte(self[1]), to_byte(self[2]))
    }
}

/// A direction: never zero, always unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit(Vec3);

impl Unit {
    pub fn new(v: Vec3) -> Result<Self> {
        let length = v.length();
        if is_zero(length) {
            return Err(TracerError::ZeroVector);
        }
        Ok(Self(v / length))
    }

    pub fn get(self) -> Vec3 {
        self.0
    }
}

impl Deref for Unit {
    type Target = Vec3;

    fn deref(&self) -> &Vec3 {
        &self.0
    }
}

impl Neg for Unit {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// Two unit vectors completing `w` to a right-handed orthonormal frame.
pub fn orthonormal_basis(w: Unit) -> (Unit, Unit) {
    // Cross with whichever axis is least aligned to w
    let helper = if w.x().abs() > 0.9 {
        Vec3::new(0.0, 1.0, 0.0)
    } else {
        Vec3::new(1.0, 0.0, 0.0)
    };
    let u = w.cross(helper);
    let u = Unit(u / u.length());
    let v = Unit(w.cross(*u));
    (u, v)
}

impl Index<usize> for Vec3 {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.e[index]
    }
}

impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.e[index]
    }
}

impl Add<Vec3> for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            e: [self[0] + rhs[0], self[1] + rhs[1], self[2] + rhs[2]],
        }
    }
}

impl AddAssign<Vec3> for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            e: [self[0] - rhs[0], self[1] - rhs[1], self[2] - rhs[2]],
        }
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            e: [self[0] * rhs, self[1] * rhs, self[2] * rhs],
        }
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}

// Channel-wise product, used for colors and attenuation triples
impl Mul for Vec3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            e: [self[0] * rhs[0], self[1] * rhs[1], self[2] * rhs[2]],
        }
    }
}

impl MulAssign for Vec3 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            e: [self[0] / rhs, self[1] / rhs, self[2] / rhs],
        }
    }
}

impl DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        (-1.0) * self
    }
}

impl Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self[0], self[1], self[2])
    }
}
