//! Vector types used as axes, directions and matrix columns

use crate::scalar::Scalar;
use approx::{AbsDiffEq, RelativeEq};
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

pub type Vec3f = Vec3<f32>;
pub type Vec3d = Vec3<f64>;

impl<T: Scalar> Vec3<T> {
    pub const ZERO: Self = Self::new(T::ZERO, T::ZERO, T::ZERO);
    pub const ONE: Self = Self::new(T::ONE, T::ONE, T::ONE);
    pub const X: Self = Self::new(T::ONE, T::ZERO, T::ZERO);
    pub const Y: Self = Self::new(T::ZERO, T::ONE, T::ZERO);
    pub const Z: Self = Self::new(T::ZERO, T::ZERO, T::ONE);
    pub const NEG_X: Self = Self::new(T::NEG_ONE, T::ZERO, T::ZERO);
    pub const NEG_Y: Self = Self::new(T::ZERO, T::NEG_ONE, T::ZERO);
    pub const NEG_Z: Self = Self::new(T::ZERO, T::ZERO, T::NEG_ONE);

    #[inline]
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn splat(v: T) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub fn from_array(a: [T; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    #[inline]
    pub fn to_array(self) -> [T; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Divides by the length. A zero vector yields NaN components.
    #[inline]
    pub fn normalize(self) -> Self {
        self * (T::ONE / self.length())
    }

    #[inline]
    pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self) * t
    }

    #[inline]
    pub fn extend(self, w: T) -> Vec4<T> {
        Vec4::new(self.x, self.y, self.z, w)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// 4D vector
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Vec4<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

pub type Vec4f = Vec4<f32>;
pub type Vec4d = Vec4<f64>;

impl<T: Scalar> Vec4<T> {
    pub const ZERO: Self = Self::new(T::ZERO, T::ZERO, T::ZERO, T::ZERO);
    pub const W: Self = Self::new(T::ZERO, T::ZERO, T::ZERO, T::ONE);

    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub fn from_array(a: [T; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    #[inline]
    pub fn to_array(self) -> [T; 4] {
        [self.x, self.y, self.z, self.w]
    }

    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn splat(v: T) -> Self {
        Self::new(v, v, v, v)
    }

    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Divides by the length. A zero vector yields NaN components.
    #[inline]
    pub fn normalize(self) -> Self {
        self * (T::ONE / self.length())
    }

    #[inline]
    pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self) * t
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    #[inline]
    pub fn truncate(self) -> Vec3<T> {
        Vec3::new(self.x, self.y, self.z)
    }
}

// Operator implementations for Vec3
impl<T: Scalar> Add for Vec3<T> {
    type Output = Self;
    #[inline] fn add(self, rhs: Self) -> Self { Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z) }
}
impl<T: Scalar> Sub for Vec3<T> {
    type Output = Self;
    #[inline] fn sub(self, rhs: Self) -> Self { Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z) }
}
impl<T: Scalar> Mul<T> for Vec3<T> {
    type Output = Self;
    #[inline] fn mul(self, rhs: T) -> Self { Self::new(self.x * rhs, self.y * rhs, self.z * rhs) }
}
impl<T: Scalar> Div<T> for Vec3<T> {
    type Output = Self;
    #[inline] fn div(self, rhs: T) -> Self { Self::new(self.x / rhs, self.y / rhs, self.z / rhs) }
}
impl<T: Scalar> Neg for Vec3<T> {
    type Output = Self;
    #[inline] fn neg(self) -> Self { Self::new(-self.x, -self.y, -self.z) }
}
impl<T: Scalar> AddAssign for Vec3<T> {
    #[inline] fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
}
impl<T: Scalar> SubAssign for Vec3<T> {
    #[inline] fn sub_assign(&mut self, rhs: Self) { *self = *self - rhs; }
}
impl<T: Scalar> MulAssign<T> for Vec3<T> {
    #[inline] fn mul_assign(&mut self, rhs: T) { *self = *self * rhs; }
}

// Operator implementations for Vec4
impl<T: Scalar> Add for Vec4<T> {
    type Output = Self;
    #[inline] fn add(self, rhs: Self) -> Self { Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w) }
}
impl<T: Scalar> Sub for Vec4<T> {
    type Output = Self;
    #[inline] fn sub(self, rhs: Self) -> Self { Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w) }
}
impl<T: Scalar> Mul<T> for Vec4<T> {
    type Output = Self;
    #[inline] fn mul(self, rhs: T) -> Self { Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs) }
}
impl<T: Scalar> Div<T> for Vec4<T> {
    type Output = Self;
    #[inline] fn div(self, rhs: T) -> Self { Self::new(self.x / rhs, self.y / rhs, self.z / rhs, self.w / rhs) }
}
impl<T: Scalar> Neg for Vec4<T> {
    type Output = Self;
    #[inline] fn neg(self) -> Self { Self::new(-self.x, -self.y, -self.z, -self.w) }
}

macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {$(
        impl Mul<Vec3<$t>> for $t {
            type Output = Vec3<$t>;
            #[inline] fn mul(self, rhs: Vec3<$t>) -> Vec3<$t> { rhs * self }
        }
        impl Mul<Vec4<$t>> for $t {
            type Output = Vec4<$t>;
            #[inline] fn mul(self, rhs: Vec4<$t>) -> Vec4<$t> { rhs * self }
        }
    )*};
}

impl_scalar_lhs_mul!(f32, f64);

impl<T: Scalar> AbsDiffEq for Vec3<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl<T: Scalar> RelativeEq for Vec3<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl<T: Scalar> AbsDiffEq for Vec4<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
            && self.w.abs_diff_eq(&other.w, epsilon)
    }
}

impl<T: Scalar> RelativeEq for Vec4<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
            && self.w.relative_eq(&other.w, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3f::new(1.0, 2.0, 3.0);
        let b = Vec3f::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_vec3_cross() {
        let c = Vec3d::X.cross(Vec3d::Y);
        assert_eq!(c, Vec3d::Z);
        assert_eq!(Vec3d::Y.cross(Vec3d::X), Vec3d::NEG_Z);
    }

    #[test]
    fn test_vec3_normalize() {
        let v = Vec3f::new(3.0, 0.0, 4.0).normalize();
        assert_abs_diff_eq!(v.length(), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v, Vec3f::new(0.6, 0.0, 0.8), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_normalize_is_nan() {
        assert!(!Vec3d::ZERO.normalize().is_finite());
    }

    #[test]
    fn test_vec4_matches_vec3_helpers() {
        let v = Vec4d::new(2.0, 0.0, 0.0, 2.0);
        assert_eq!(v.length_squared(), 8.0);
        let h = 0.5_f64.sqrt();
        assert_abs_diff_eq!(v.normalize(), Vec4d::new(h, 0.0, 0.0, h), epsilon = 1e-12);
        assert_eq!(Vec4d::ZERO.lerp(Vec4d::splat(4.0), 0.25), Vec4d::splat(1.0));
        assert!(v.is_finite());
        assert!(!Vec4f::ZERO.normalize().is_finite());
        approx::assert_relative_eq!(Vec4f::splat(100.0), Vec4f::splat(100.001), max_relative = 1e-4);
    }

    #[test]
    fn test_scalar_on_left() {
        assert_eq!(2.0 * Vec3d::ONE, Vec3d::splat(2.0));
        assert_eq!(0.5_f32 * Vec4f::new(2.0, 4.0, 6.0, 8.0), Vec4f::new(1.0, 2.0, 3.0, 4.0));
    }
}
