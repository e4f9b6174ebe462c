//! Axis-angle rotations

use crate::diagnostics;
use crate::matrix::Mat3;
use crate::quaternion::Quat;
use crate::scalar::{safe_acos, Scalar};
use crate::vector::Vec3;
use approx::{AbsDiffEq, RelativeEq};

/// Rotation of `angle` radians about `axis`.
///
/// The axis is expected to be unit length but this is not enforced;
/// [`AxisAngle::normalize`] fixes it up explicitly.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct AxisAngle<T> {
    pub axis: Vec3<T>,
    pub angle: T,
}

pub type AxisAnglef = AxisAngle<f32>;
pub type AxisAngled = AxisAngle<f64>;

/// Wraps `angle` into `[0, 2PI)`.
fn wrap_angle<T: Scalar>(angle: T) -> T {
    let tau = T::PI() + T::PI();
    let a = if angle < T::ZERO { tau + angle % tau } else { angle };
    a % tau
}

impl<T: Scalar> AxisAngle<T> {
    /// Zero rotation about +Z
    pub const IDENTITY: Self = Self {
        axis: Vec3::Z,
        angle: T::ZERO,
    };

    /// Create an axis-angle rotation, wrapping the angle into `[0, 2PI)`.
    pub fn new(angle: T, axis: Vec3<T>) -> Self {
        Self {
            axis,
            angle: wrap_angle(angle),
        }
    }

    /// Axis-angle form of a unit quaternion.
    ///
    /// A `w` above one (floating point drift near identity) is renormalized
    /// first. Below a half-angle sine of 0.001 the axis is undefined, and the
    /// raw vector part is returned instead of dividing by a near-zero value.
    pub fn from_quat(q: Quat<T>) -> Self {
        let q = if q.w > T::ONE { q.normalize() } else { q };
        let angle = T::TWO * safe_acos(q.w);
        let s = (T::ONE - q.w * q.w).sqrt();
        let v = Vec3::new(q.x, q.y, q.z);
        let axis = if s < T::AXIS_ANGLE_EPSILON { v } else { v / s };
        Self { axis, angle }
    }

    /// Axis-angle form of the rotation block of `m`.
    ///
    /// Columns are divided by their lengths first. Symmetric matrices are
    /// either the identity or half turns and are resolved without the
    /// antisymmetric part, which vanishes for both.
    pub fn from_mat3(m: &Mat3<T>) -> Self {
        let mut n = *m;
        for col in n.cols.iter_mut() {
            *col = *col * (T::ONE / col.length());
        }
        let [c0, c1, c2] = n.cols;
        let (m00, m01, m02) = (c0.x, c0.y, c0.z);
        let (m10, m11, m12) = (c1.x, c1.y, c1.z);
        let (m20, m21, m22) = (c2.x, c2.y, c2.z);

        let epsilon = T::from_f64_lossy(1e-4);
        let symmetric = (m10 - m01).abs() < epsilon
            && (m20 - m02).abs() < epsilon
            && (m21 - m12).abs() < epsilon;
        if symmetric {
            if m00 + m11 + m22 > T::ONE {
                return Self::IDENTITY;
            }
            let two = T::TWO;
            let four = two + two;
            let xx = (m00 + T::ONE) / two;
            let yy = (m11 + T::ONE) / two;
            let zz = (m22 + T::ONE) / two;
            let xy = (m10 + m01) / four;
            let xz = (m20 + m02) / four;
            let yz = (m21 + m12) / four;
            let axis = if xx > yy && xx > zz {
                let x = xx.sqrt();
                Vec3::new(x, xy / x, xz / x)
            } else if yy > zz {
                let y = yy.sqrt();
                Vec3::new(xy / y, y, yz / y)
            } else {
                let z = zz.sqrt();
                Vec3::new(xz / z, yz / z, z)
            };
            return Self { axis, angle: T::PI() };
        }

        let v = Vec3::new(m12 - m21, m20 - m02, m01 - m10);
        Self {
            axis: v / v.length(),
            angle: safe_acos((m00 + m11 + m22 - T::ONE) / T::TWO),
        }
    }

    /// Quaternion of this rotation, using the axis as stored.
    #[inline]
    pub fn to_quat(self) -> Quat<T> {
        Quat::from_axis_angle(self)
    }

    /// Rotation matrix of this rotation, normalizing the axis.
    #[inline]
    pub fn to_mat3(self) -> Mat3<T> {
        Mat3::from_axis_angle(self)
    }

    pub fn normalize(self) -> Self {
        diagnostics::check_axis(self.axis, "AxisAngle::normalize");
        Self {
            axis: self.axis.normalize(),
            angle: self.angle,
        }
    }

    /// Adds `delta` to the angle, wrapping into `[0, 2PI)`.
    pub fn rotate(self, delta: T) -> Self {
        Self::new(self.angle + delta, self.axis)
    }

    /// Rotates `v` with Rodrigues' formula. Assumes a unit axis.
    pub fn transform(self, v: Vec3<T>) -> Vec3<T> {
        let (sin, cos) = self.angle.sin_cos();
        let k = self.axis;
        v * cos + k.cross(v) * sin + k * (k.dot(v) * (T::ONE - cos))
    }
}

impl<T: Scalar> Default for AxisAngle<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: Scalar> From<Quat<T>> for AxisAngle<T> {
    fn from(q: Quat<T>) -> Self {
        Self::from_quat(q)
    }
}

impl<T: Scalar> AbsDiffEq for AxisAngle<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.angle.abs_diff_eq(&other.angle, epsilon) && self.axis.abs_diff_eq(&other.axis, epsilon)
    }
}

impl<T: Scalar> RelativeEq for AxisAngle<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.angle.relative_eq(&other.angle, epsilon, max_relative)
            && self.axis.relative_eq(&other.axis, epsilon, max_relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Mat3d;
    use crate::quaternion::{Quatd, Quatf};
    use crate::vector::Vec3d;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use core::f64::consts::PI;

    #[test]
    fn test_new_wraps_angle() {
        assert_abs_diff_eq!(AxisAngled::new(-PI * 0.5, Vec3d::Z).angle, PI * 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(AxisAngled::new(PI * 5.0, Vec3d::Z).angle, PI, epsilon = 1e-12);
        assert_eq!(AxisAngled::new(1.0, Vec3d::Z).angle, 1.0);
        assert_abs_diff_eq!(AxisAngled::new(1.0, Vec3d::Z).rotate(-2.0).angle, 2.0 * PI - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quat_round_trip() {
        let axis = Vec3d::new(1.0, 2.0, 3.0).normalize();
        let q = Quatd::from_angle_axis(1.2, axis);
        let aa = q.to_axis_angle();
        assert_abs_diff_eq!(aa.angle, 1.2, epsilon = 1e-10);
        assert_abs_diff_eq!(aa.axis, axis, epsilon = 1e-10);
        assert_abs_diff_eq!(aa.to_quat(), q, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_angle_has_no_nan() {
        let aa = AxisAngled::from_quat(Quatd::IDENTITY);
        assert_eq!(aa.angle, 0.0);
        assert!(aa.axis.is_finite());
        assert_eq!(aa.axis, Vec3d::ZERO);

        let aa = AxisAnglef::from(Quatf::new(0.0, 0.0, 1e-5, 1.0));
        assert!(aa.axis.is_finite() && aa.angle.is_finite());
        assert_eq!(aa.axis.z, 1e-5);
    }

    #[test]
    fn test_w_above_one_is_renormalized() {
        let aa = AxisAngled::from_quat(Quatd::new(0.0, 0.0, 0.0, 1.0 + 1e-7));
        assert_abs_diff_eq!(aa.angle, 0.0, epsilon = 1e-7);
        assert!(aa.axis.is_finite());
    }

    #[test]
    fn test_from_mat3() {
        let axis = Vec3d::new(-1.0, 0.5, 2.0).normalize();
        let m = Mat3d::rotation(2.1, axis);
        let aa = AxisAngled::from_mat3(&m);
        assert_abs_diff_eq!(aa.angle, 2.1, epsilon = 1e-10);
        assert_abs_diff_eq!(aa.axis, axis, epsilon = 1e-10);

        let mut scaled = m;
        scaled.cols[1] *= 4.0;
        assert_abs_diff_eq!(scaled.rotation_axis_angle(), aa, epsilon = 1e-10);
    }

    #[test]
    fn test_from_mat3_symmetric_cases() {
        let aa = AxisAngled::from_mat3(&Mat3d::rotation_y(PI));
        assert_eq!(aa.angle, PI);
        assert_abs_diff_eq!(aa.axis, Vec3d::Y, epsilon = 1e-12);

        let aa = AxisAngled::from_mat3(&Mat3d::IDENTITY);
        assert_eq!(aa, AxisAngled::IDENTITY);
    }

    #[test]
    fn test_relative_comparison() {
        let a = AxisAngled::new(300.0_f64.to_radians(), Vec3d::new(0.0, 40.0, 30.0));
        let b = AxisAngled { angle: a.angle * (1.0 + 1e-9), axis: a.axis * (1.0 - 1e-9) };
        assert_relative_eq!(a, b, max_relative = 1e-8);
        assert!(!a.relative_eq(&b, 0.0, 1e-12));
    }

    #[test]
    fn test_transform_matches_quaternion() {
        let aa = AxisAngled::new(0.8, Vec3d::new(0.0, 3.0, 4.0)).normalize();
        let v = Vec3d::new(1.0, -2.0, 0.5);
        assert_abs_diff_eq!(aa.transform(v), aa.to_quat() * v, epsilon = 1e-12);
        assert_abs_diff_eq!(aa.transform(v), aa.to_mat3() * v, epsilon = 1e-12);
    }
}
