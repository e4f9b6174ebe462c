//! Quaternion for 3D rotations
//!
//! A quaternion `(x, y, z, w)` represents a rotation when it has unit length.
//! That invariant is not enforced: conversions assume it and produce scaled or
//! meaningless results otherwise. Which operations renormalize their output:
//!
//! | operation | renormalizes |
//! |---|---|
//! | [`Quat::from_normalized`], [`Quat::from_unnormalized`] | no |
//! | [`Quat::slerp`] | no |
//! | [`Quat::nlerp`], [`Quat::nlerp_iterative`] | yes |
//! | [`Quat::from_rotation_to`] | yes |
//! | composition (`*`, `rotate_*`) | no |
//!
//! Call [`Quat::normalize`] after long chains when precision matters.

use crate::axis_angle::AxisAngle;
use crate::diagnostics;
use crate::interpolate;
use crate::matrix::{Mat3, Mat4, Mat4x3, RotationBlock};
use crate::scalar::Scalar;
use crate::vector::{Vec3, Vec4};
use approx::{AbsDiffEq, RelativeEq};
use core::ops::{Mul, MulAssign, Neg};

/// Quaternion representing a 3D rotation
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Quat<T> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

pub type Quatf = Quat<f32>;
pub type Quatd = Quat<f64>;

/// Shepperd's method over an orthonormal 3x3 block.
///
/// Uses the trace when it is non-negative, otherwise pivots on the largest
/// diagonal element (ties resolve towards `m00`, then `m11`).
pub(crate) fn shepperd<T: Scalar>(m: &Mat3<T>) -> Quat<T> {
    let [c0, c1, c2] = m.cols;
    let (m00, m01, m02) = (c0.x, c0.y, c0.z);
    let (m10, m11, m12) = (c1.x, c1.y, c1.z);
    let (m20, m21, m22) = (c2.x, c2.y, c2.z);
    let half = T::HALF;

    let tr = m00 + m11 + m22;
    if tr >= T::ZERO {
        let t = (tr + T::ONE).sqrt();
        let w = t * half;
        let t = half / t;
        Quat::new((m12 - m21) * t, (m20 - m02) * t, (m01 - m10) * t, w)
    } else if m00 >= m11 && m00 >= m22 {
        let t = (m00 - (m11 + m22) + T::ONE).sqrt();
        let x = t * half;
        let t = half / t;
        Quat::new(x, (m10 + m01) * t, (m02 + m20) * t, (m12 - m21) * t)
    } else if m11 > m22 {
        let t = (m11 - (m22 + m00) + T::ONE).sqrt();
        let y = t * half;
        let t = half / t;
        Quat::new((m01 + m10) * t, y, (m21 + m12) * t, (m20 - m02) * t)
    } else {
        let t = (m22 - (m00 + m11) + T::ONE).sqrt();
        let z = t * half;
        let t = half / t;
        Quat::new((m02 + m20) * t, (m21 + m12) * t, z, (m01 - m10) * t)
    }
}

impl<T: Scalar> Quat<T> {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self::new(T::ZERO, T::ZERO, T::ZERO, T::ONE);

    /// Create a new quaternion
    #[inline]
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// Create from a `Vec4` laid out as `(x, y, z, w)`
    #[inline]
    pub fn from_vec4(v: Vec4<T>) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// Components as a `Vec4`
    #[inline]
    pub fn to_vec4(self) -> Vec4<T> {
        Vec4::new(self.x, self.y, self.z, self.w)
    }

    /// Create from `[x, y, z, w]`
    #[inline]
    pub fn from_array(a: [T; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }

    /// Components in `(x, y, z, w)` order.
    #[inline]
    pub fn to_array(self) -> [T; 4] {
        [self.x, self.y, self.z, self.w]
    }

    #[inline]
    fn xyz(self) -> Vec3<T> {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Rotation of `angle` radians about `axis`. The axis is used as given.
    pub fn from_angle_axis(angle: T, axis: Vec3<T>) -> Self {
        let (sin, cos) = (angle * T::HALF).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    /// Quaternion of an axis-angle pair. The axis is used as given.
    #[inline]
    pub fn from_axis_angle(aa: AxisAngle<T>) -> Self {
        Self::from_angle_axis(aa.angle, aa.axis)
    }

    /// Rotation of `angle` radians about `axis`, normalizing the axis first.
    pub fn rotation_axis(angle: T, axis: Vec3<T>) -> Self {
        diagnostics::check_axis(axis, "Quat::rotation_axis");
        Self::from_angle_axis(angle, axis.normalize())
    }

    /// Rotation about the X axis
    #[inline]
    pub fn from_rotation_x(angle: T) -> Self {
        let (sin, cos) = (angle * T::HALF).sin_cos();
        Self::new(sin, T::ZERO, T::ZERO, cos)
    }

    /// Rotation about the Y axis
    #[inline]
    pub fn from_rotation_y(angle: T) -> Self {
        let (sin, cos) = (angle * T::HALF).sin_cos();
        Self::new(T::ZERO, sin, T::ZERO, cos)
    }

    /// Rotation about the Z axis
    #[inline]
    pub fn from_rotation_z(angle: T) -> Self {
        let (sin, cos) = (angle * T::HALF).sin_cos();
        Self::new(T::ZERO, T::ZERO, sin, cos)
    }

    /// Rotation about X, then Y, then Z in local space:
    /// `from_rotation_x(ax) * from_rotation_y(ay) * from_rotation_z(az)`.
    pub fn from_rotation_xyz(ax: T, ay: T, az: T) -> Self {
        let (sx, cx) = (ax * T::HALF).sin_cos();
        let (sy, cy) = (ay * T::HALF).sin_cos();
        let (sz, cz) = (az * T::HALF).sin_cos();

        let cycz = cy * cz;
        let sysz = sy * sz;
        let sycz = sy * cz;
        let cysz = cy * sz;
        Self::new(
            sx * cycz + cx * sysz,
            cx * sycz - sx * cysz,
            cx * cysz + sx * sycz,
            cx * cycz - sx * sysz,
        )
    }

    /// `from_rotation_z(az) * from_rotation_y(ay) * from_rotation_x(ax)`
    pub fn from_rotation_zyx(az: T, ay: T, ax: T) -> Self {
        let (sx, cx) = (ax * T::HALF).sin_cos();
        let (sy, cy) = (ay * T::HALF).sin_cos();
        let (sz, cz) = (az * T::HALF).sin_cos();

        let cysx = cy * sx;
        let sycx = sy * cx;
        let sysx = sy * sx;
        let cycx = cy * cx;
        Self::new(
            cz * cysx - sz * sycx,
            cz * sycx + sz * cysx,
            sz * cycx - cz * sysx,
            cz * cycx + sz * sysx,
        )
    }

    /// `from_rotation_y(ay) * from_rotation_x(ax) * from_rotation_z(az)`,
    /// the yaw-pitch-roll order used by cameras.
    pub fn from_rotation_yxz(ay: T, ax: T, az: T) -> Self {
        let (sx, cx) = (ax * T::HALF).sin_cos();
        let (sy, cy) = (ay * T::HALF).sin_cos();
        let (sz, cz) = (az * T::HALF).sin_cos();

        let x = cy * sx;
        let y = sy * cx;
        let z = sy * sx;
        let w = cy * cx;
        Self::new(x * cz + y * sz, y * cz - x * sz, w * sz - z * cz, w * cz + z * sz)
    }

    /// Rotation by the rotation vector `v`: `|v|` radians about `v`.
    ///
    /// Small angles use a Taylor expansion instead of dividing by `|v|`.
    pub fn from_scaled_axis(v: Vec3<T>) -> Self {
        let theta = v * T::HALF;
        let theta_mag_sq = theta.length_squared();
        let (s, w) = if theta_mag_sq * theta_mag_sq / T::from_f64_lossy(24.0)
            < T::from_f64_lossy(1e-8)
        {
            (
                T::ONE - theta_mag_sq / T::from_f64_lossy(6.0),
                T::ONE - theta_mag_sq / T::TWO,
            )
        } else {
            let theta_mag = theta_mag_sq.sqrt();
            let (sin, cos) = theta_mag.sin_cos();
            (sin / theta_mag, cos)
        };
        Self::new(theta.x * s, theta.y * s, theta.z * s, w)
    }

    /// Quaternion of a matrix whose rotation block is orthonormal.
    ///
    /// The result is not renormalized.
    pub fn from_normalized<M: RotationBlock<T>>(m: &M) -> Self {
        shepperd(&m.rotation_block())
    }

    /// Quaternion of a matrix whose rotation block columns carry scale.
    ///
    /// Each column is divided by its own length first. Shear is not removed,
    /// so the columns must already be close to orthogonal.
    pub fn from_unnormalized<M: RotationBlock<T>>(m: &M) -> Self {
        let mut block = m.rotation_block();
        for col in block.cols.iter_mut() {
            *col = *col * (T::ONE / col.length());
        }
        shepperd(&block)
    }

    /// Overwrites `self` with [`Quat::from_normalized`]
    #[inline]
    pub fn set_from_normalized<M: RotationBlock<T>>(&mut self, m: &M) {
        *self = Self::from_normalized(m);
    }

    /// Overwrites `self` with [`Quat::from_unnormalized`]
    #[inline]
    pub fn set_from_unnormalized<M: RotationBlock<T>>(&mut self, m: &M) {
        *self = Self::from_unnormalized(m);
    }

    /// Shortest rotation that turns `from` into the direction of `to`.
    ///
    /// Neither vector needs to be unit length. For opposite vectors the axis
    /// is chosen as `to x +Z`, or `to x +X` when that is zero as well.
    pub fn from_rotation_to(from: Vec3<T>, to: Vec3<T>) -> Self {
        let c = from.cross(to);
        let w = (from.length_squared() * to.length_squared()).sqrt() + from.dot(to);
        let mut q = Self::new(c.x, c.y, c.z, w);
        let mut inv_norm = T::ONE / q.length();
        if inv_norm.is_infinite() {
            q = Self::new(to.y, -to.x, T::ZERO, T::ZERO);
            inv_norm = T::ONE / (q.x * q.x + q.y * q.y).sqrt();
            if inv_norm.is_infinite() {
                q = Self::new(T::ZERO, to.z, -to.y, T::ZERO);
                inv_norm = T::ONE / (q.y * q.y + q.z * q.z).sqrt();
            }
        }
        q.scale_components(inv_norm)
    }

    /// Rotation that maps `dir` onto +Z, with `up` kept in the YZ half-plane.
    pub fn from_look_rotate(dir: Vec3<T>, up: Vec3<T>) -> Self {
        diagnostics::check_look_basis(dir, up, "Quat::from_look_rotate");
        shepperd(&Mat3::from_rotation_towards(dir, up).transpose())
    }

    /// View rotation that maps `dir` onto -Z, matching [`Mat3::from_look_along`].
    pub fn from_look_along(dir: Vec3<T>, up: Vec3<T>) -> Self {
        diagnostics::check_look_basis(dir, up, "Quat::from_look_along");
        shepperd(&Mat3::from_look_along(dir, up))
    }

    #[inline]
    fn scale_components(self, s: T) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s, self.w * s)
    }

    /// `self * r`: applies `r` first, then `self`.
    #[inline]
    pub fn mul_quat(self, r: Self) -> Self {
        Self::new(
            self.w * r.x + self.x * r.w + self.y * r.z - self.z * r.y,
            self.w * r.y - self.x * r.z + self.y * r.w + self.z * r.x,
            self.w * r.z + self.x * r.y - self.y * r.x + self.z * r.w,
            self.w * r.w - self.x * r.x - self.y * r.y - self.z * r.z,
        )
    }

    /// `q * self`
    #[inline]
    pub fn premul(self, q: Self) -> Self {
        q.mul_quat(self)
    }

    /// Applies a rotation about local X before `self`
    #[inline]
    pub fn rotate_x(self, angle: T) -> Self {
        self * Self::from_rotation_x(angle)
    }

    /// Applies a rotation about local Y before `self`
    #[inline]
    pub fn rotate_y(self, angle: T) -> Self {
        self * Self::from_rotation_y(angle)
    }

    /// Applies a rotation about local Z before `self`
    #[inline]
    pub fn rotate_z(self, angle: T) -> Self {
        self * Self::from_rotation_z(angle)
    }

    /// Applies a rotation about world X after `self`
    #[inline]
    pub fn rotate_local_x(self, angle: T) -> Self {
        Self::from_rotation_x(angle) * self
    }

    /// Applies a rotation about world Y after `self`
    #[inline]
    pub fn rotate_local_y(self, angle: T) -> Self {
        Self::from_rotation_y(angle) * self
    }

    /// Applies a rotation about world Z after `self`
    #[inline]
    pub fn rotate_local_z(self, angle: T) -> Self {
        Self::from_rotation_z(angle) * self
    }

    /// `self * from_rotation_xyz(ax, ay, az)`
    #[inline]
    pub fn rotate_xyz(self, ax: T, ay: T, az: T) -> Self {
        self * Self::from_rotation_xyz(ax, ay, az)
    }

    /// `self * from_rotation_zyx(az, ay, ax)`
    #[inline]
    pub fn rotate_zyx(self, az: T, ay: T, ax: T) -> Self {
        self * Self::from_rotation_zyx(az, ay, ax)
    }

    /// `self * from_rotation_yxz(ay, ax, az)`
    #[inline]
    pub fn rotate_yxz(self, ay: T, ax: T, az: T) -> Self {
        self * Self::from_rotation_yxz(ay, ax, az)
    }

    /// Applies a rotation about `axis` (normalized here) before `self`.
    #[inline]
    pub fn rotate_axis(self, angle: T, axis: Vec3<T>) -> Self {
        self * Self::rotation_axis(angle, axis)
    }

    /// `self * from_rotation_to(from, to)`
    #[inline]
    pub fn rotate_to(self, from: Vec3<T>, to: Vec3<T>) -> Self {
        self * Self::from_rotation_to(from, to)
    }

    /// `self * from_look_rotate(dir, up)`
    #[inline]
    pub fn look_rotate(self, dir: Vec3<T>, up: Vec3<T>) -> Self {
        self * Self::from_look_rotate(dir, up)
    }

    /// `self * from_look_along(dir, up)`
    #[inline]
    pub fn look_along(self, dir: Vec3<T>, up: Vec3<T>) -> Self {
        self * Self::from_look_along(dir, up)
    }

    /// Applies a rotation vector before `self`
    #[inline]
    pub fn rotate_scaled_axis(self, v: Vec3<T>) -> Self {
        self * Self::from_scaled_axis(v)
    }

    /// Applies a rotation vector after `self`
    #[inline]
    pub fn rotate_local_scaled_axis(self, v: Vec3<T>) -> Self {
        Self::from_scaled_axis(v) * self
    }

    /// Advances an orientation by `angular_velocity` (world space, rad/s)
    /// over `dt` seconds.
    #[inline]
    pub fn integrate(self, dt: T, angular_velocity: Vec3<T>) -> Self {
        self.rotate_local_scaled_axis(angular_velocity * dt)
    }

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Squared length
    #[inline]
    pub fn length_squared(self) -> T {
        self.dot(self)
    }

    /// Length (norm)
    #[inline]
    pub fn length(self) -> T {
        self.length_squared().sqrt()
    }

    /// Scale to unit length
    #[inline]
    pub fn normalize(self) -> Self {
        self.scale_components(T::ONE / self.length())
    }

    /// Normalize in place
    #[inline]
    pub fn normalize_mut(&mut self) {
        *self = self.normalize();
    }

    /// Conjugate (inverse for unit quaternions)
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse; equals the conjugate for unit quaternions.
    #[inline]
    pub fn inverse(self) -> Self {
        self.conjugate().scale_components(T::ONE / self.length_squared())
    }

    /// `self * b.inverse()`
    #[inline]
    pub fn div(self, b: Self) -> Self {
        self * b.inverse()
    }

    /// Rotation `d` such that `self * d == other`.
    #[inline]
    pub fn difference(self, other: Self) -> Self {
        self.inverse() * other
    }

    /// Multiplies every component by `sqrt(factor)`, scaling the matrix
    /// produced by [`Quat::to_mat3`] uniformly by `factor`.
    #[inline]
    pub fn scale(self, factor: T) -> Self {
        self.scale_components(factor.sqrt())
    }

    /// Rotation angle in `[0, PI]`.
    pub fn angle(self) -> T {
        let angle = T::TWO * crate::scalar::safe_acos(self.w);
        if angle <= T::PI() {
            angle
        } else {
            T::PI() + T::PI() - angle
        }
    }

    /// Check if all components are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Rotation matrix. Assumes unit length.
    pub fn to_mat3(self) -> Mat3<T> {
        diagnostics::check_unit_quat(self, "Quat::to_mat3");
        Mat3::from_quat_unchecked(self)
    }

    /// Rotation as a 4x4 matrix with zero translation
    #[inline]
    pub fn to_mat4(self) -> Mat4<T> {
        Mat4::from_quat(self)
    }

    /// Rotation as a 4x3 matrix with zero translation
    #[inline]
    pub fn to_mat4x3(self) -> Mat4x3<T> {
        Mat4x3::from_quat(self)
    }

    /// Axis-angle form, see [`AxisAngle::from_quat`]
    #[inline]
    pub fn to_axis_angle(self) -> AxisAngle<T> {
        AxisAngle::from_quat(self)
    }

    /// Euler angles for the XYZ order, inverting [`Quat::from_rotation_xyz`].
    ///
    /// Only valid for quaternions built in XYZ order. The pitch term is not
    /// clamped and becomes NaN if drift pushes it past `±1`.
    pub fn euler_angles_xyz(self) -> Vec3<T> {
        let Self { x, y, z, w } = self;
        let two = T::TWO;
        Vec3::new(
            (two * (x * w - y * z)).atan2(T::ONE - two * (x * x + y * y)),
            (two * (x * z + y * w)).asin(),
            (two * (z * w - x * y)).atan2(T::ONE - two * (y * y + z * z)),
        )
    }

    /// Rotates `v`. Assumes unit length.
    pub fn transform(self, v: Vec3<T>) -> Vec3<T> {
        diagnostics::check_unit_quat(self, "Quat::transform");
        self.transform_unchecked(v)
    }

    fn transform_unchecked(self, v: Vec3<T>) -> Vec3<T> {
        let u = self.xyz();
        let t = u.cross(v) * T::TWO;
        v + t * self.w + u.cross(t)
    }

    /// Rotates the xyz part of `v`, keeping `w`
    #[inline]
    pub fn transform_vec4(self, v: Vec4<T>) -> Vec4<T> {
        self.transform(v.truncate()).extend(v.w)
    }

    /// The vector that this rotation maps onto +X.
    #[inline]
    pub fn positive_x(self) -> Vec3<T> {
        self.inverse().transform_unchecked(Vec3::X)
    }

    /// The vector that this rotation maps onto +Y.
    #[inline]
    pub fn positive_y(self) -> Vec3<T> {
        self.inverse().transform_unchecked(Vec3::Y)
    }

    /// The vector that this rotation maps onto +Z.
    #[inline]
    pub fn positive_z(self) -> Vec3<T> {
        self.inverse().transform_unchecked(Vec3::Z)
    }

    /// [`Quat::positive_x`] for a unit quaternion, skipping the inversion.
    pub fn normalized_positive_x(self) -> Vec3<T> {
        let dy = self.y + self.y;
        let dz = self.z + self.z;
        Vec3::new(
            -self.y * dy - self.z * dz + T::ONE,
            self.x * dy - self.w * dz,
            self.x * dz + self.w * dy,
        )
    }

    /// [`Quat::positive_y`] for a unit quaternion, skipping the inversion.
    pub fn normalized_positive_y(self) -> Vec3<T> {
        let dx = self.x + self.x;
        let dy = self.y + self.y;
        let dz = self.z + self.z;
        Vec3::new(
            self.x * dy + self.w * dz,
            -self.x * dx - self.z * dz + T::ONE,
            self.y * dz - self.w * dx,
        )
    }

    /// [`Quat::positive_z`] for a unit quaternion, skipping the inversion.
    pub fn normalized_positive_z(self) -> Vec3<T> {
        let dx = self.x + self.x;
        let dy = self.y + self.y;
        let dz = self.z + self.z;
        Vec3::new(
            self.x * dz - self.w * dy,
            self.y * dz + self.w * dx,
            -self.x * dx - self.y * dy + T::ONE,
        )
    }

    /// See [`interpolate::slerp`].
    #[inline]
    pub fn slerp(self, target: Self, alpha: T) -> Self {
        interpolate::slerp(self, target, alpha)
    }

    /// See [`interpolate::nlerp`].
    #[inline]
    pub fn nlerp(self, target: Self, factor: T) -> Self {
        interpolate::nlerp(self, target, factor)
    }

    /// See [`interpolate::nlerp_iterative`].
    #[inline]
    pub fn nlerp_iterative(self, target: Self, alpha: T, dot_threshold: T) -> Self {
        interpolate::nlerp_iterative(self, target, alpha, dot_threshold)
    }
}

impl<T: Scalar> Default for Quat<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: Scalar> Mul for Quat<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_quat(rhs)
    }
}

impl<T: Scalar> MulAssign for Quat<T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> Mul<Vec3<T>> for Quat<T> {
    type Output = Vec3<T>;

    #[inline]
    fn mul(self, v: Vec3<T>) -> Vec3<T> {
        self.transform(v)
    }
}

impl<T: Scalar> Neg for Quat<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl<T: Scalar> From<AxisAngle<T>> for Quat<T> {
    fn from(aa: AxisAngle<T>) -> Self {
        Self::from_axis_angle(aa)
    }
}

impl<T: Scalar> AbsDiffEq for Quat<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.to_vec4().abs_diff_eq(&other.to_vec4(), epsilon)
    }
}

impl<T: Scalar> RelativeEq for Quat<T> {
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
