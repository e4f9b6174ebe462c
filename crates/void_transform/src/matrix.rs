//! Column-major rotation matrices
//!
//! Element `mCR` is column `C`, row `R`. Flat arrays are ordered
//! `(m00, m01, m02, m10, m11, m12, m20, m21, m22)` for [`Mat3`], with a
//! fourth column (and row for [`Mat4`]) appended for the larger matrices.

use crate::axis_angle::AxisAngle;
use crate::diagnostics;
use crate::error::{Result, TransformError};
use crate::quaternion::Quat;
use crate::scalar::{exact_sin_cos, Scalar};
use crate::vector::{Vec3, Vec4};
use approx::{AbsDiffEq, RelativeEq};
use core::ops::{Mul, MulAssign};

/// Access to the upper-left 3x3 block of a matrix.
///
/// Quaternion extraction is generic over this trait so that [`Mat3`],
/// [`Mat4x3`] and [`Mat4`] share one conversion path.
pub trait RotationBlock<T: Scalar> {
    fn rotation_block(&self) -> Mat3<T>;
}

/// 3x3 matrix (column-major)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat3<T> {
    pub cols: [Vec3<T>; 3],
}

pub type Mat3f = Mat3<f32>;
pub type Mat3d = Mat3<f64>;

impl<T: Scalar> Mat3<T> {
    pub const IDENTITY: Self = Self::from_cols(Vec3::X, Vec3::Y, Vec3::Z);
    pub const ZERO: Self = Self::from_cols(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);

    #[inline]
    pub const fn from_cols(c0: Vec3<T>, c1: Vec3<T>, c2: Vec3<T>) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    pub fn from_cols_array(m: [T; 9]) -> Self {
        Self::from_cols(
            Vec3::new(m[0], m[1], m[2]),
            Vec3::new(m[3], m[4], m[5]),
            Vec3::new(m[6], m[7], m[8]),
        )
    }

    /// Reads nine column-major scalars.
    pub fn from_slice(m: &[T]) -> Result<Self> {
        let m: [T; 9] = m.try_into().map_err(|_| TransformError::LengthMismatch {
            expected: 9,
            found: m.len(),
        })?;
        Ok(Self::from_cols_array(m))
    }

    pub fn to_cols_array(&self) -> [T; 9] {
        let [c0, c1, c2] = self.cols;
        [c0.x, c0.y, c0.z, c1.x, c1.y, c1.z, c2.x, c2.y, c2.z]
    }

    /// Rotation matrix of a unit quaternion.
    ///
    /// No normalization is applied: a non-unit quaternion yields a scaled
    /// rotation rather than an orthonormal basis.
    pub fn from_quat(q: Quat<T>) -> Self {
        diagnostics::check_unit_quat(q, "Mat3::from_quat");
        Self::from_quat_unchecked(q)
    }

    pub(crate) fn from_quat_unchecked(q: Quat<T>) -> Self {
        let dx = q.x + q.x;
        let dy = q.y + q.y;
        let dz = q.z + q.z;
        let q00 = dx * q.x;
        let q11 = dy * q.y;
        let q22 = dz * q.z;
        let q01 = dx * q.y;
        let q02 = dx * q.z;
        let q03 = dx * q.w;
        let q12 = dy * q.z;
        let q13 = dy * q.w;
        let q23 = dz * q.w;
        let one = T::ONE;
        Self::from_cols(
            Vec3::new(one - q11 - q22, q01 + q23, q02 - q13),
            Vec3::new(q01 - q23, one - q22 - q00, q12 + q03),
            Vec3::new(q02 + q13, q12 - q03, one - q11 - q00),
        )
    }

    /// Overwrites `self` with the rotation matrix of `q`.
    #[inline]
    pub fn set_from_quat(&mut self, q: Quat<T>) {
        *self = Self::from_quat(q);
    }

    /// Rotation of `aa.angle` about `aa.axis`, normalizing the axis first.
    pub fn from_axis_angle(aa: AxisAngle<T>) -> Self {
        Self::rotation(aa.angle, aa.axis.normalize())
    }

    /// Rotation of `angle` radians about `axis`, which must be unit length.
    pub fn rotation(angle: T, axis: Vec3<T>) -> Self {
        let (sin, cos) = angle.sin_cos();
        let c = T::ONE - cos;
        let Vec3 { x, y, z } = axis;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        Self::from_cols(
            Vec3::new(cos + x * x * c, xy * c + z * sin, xz * c - y * sin),
            Vec3::new(xy * c - z * sin, cos + y * y * c, yz * c + x * sin),
            Vec3::new(xz * c + y * sin, yz * c - x * sin, cos + z * z * c),
        )
    }

    pub fn rotation_x(angle: T) -> Self {
        let (sin, cos) = exact_sin_cos(angle);
        Self::from_cols(
            Vec3::X,
            Vec3::new(T::ZERO, cos, sin),
            Vec3::new(T::ZERO, -sin, cos),
        )
    }

    pub fn rotation_y(angle: T) -> Self {
        let (sin, cos) = exact_sin_cos(angle);
        Self::from_cols(
            Vec3::new(cos, T::ZERO, -sin),
            Vec3::Y,
            Vec3::new(sin, T::ZERO, cos),
        )
    }

    pub fn rotation_z(angle: T) -> Self {
        let (sin, cos) = exact_sin_cos(angle);
        Self::from_cols(
            Vec3::new(cos, sin, T::ZERO),
            Vec3::new(-sin, cos, T::ZERO),
            Vec3::Z,
        )
    }

    /// `rotation_x(ax) * rotation_y(ay) * rotation_z(az)`
    pub fn rotation_xyz(ax: T, ay: T, az: T) -> Self {
        let (sx, cx) = ax.sin_cos();
        let (sy, cy) = ay.sin_cos();
        let (sz, cz) = az.sin_cos();
        Self::from_cols(
            Vec3::new(cy * cz, cx * sz + sx * sy * cz, sx * sz - cx * sy * cz),
            Vec3::new(-cy * sz, cx * cz - sx * sy * sz, sx * cz + cx * sy * sz),
            Vec3::new(sy, -sx * cy, cx * cy),
        )
    }

    /// `rotation_z(az) * rotation_y(ay) * rotation_x(ax)`
    pub fn rotation_zyx(az: T, ay: T, ax: T) -> Self {
        let (sx, cx) = ax.sin_cos();
        let (sy, cy) = ay.sin_cos();
        let (sz, cz) = az.sin_cos();
        Self::from_cols(
            Vec3::new(cz * cy, sz * cy, -sy),
            Vec3::new(cz * sy * sx - sz * cx, sz * sy * sx + cz * cx, cy * sx),
            Vec3::new(cz * sy * cx + sz * sx, sz * sy * cx - cz * sx, cy * cx),
        )
    }

    /// `rotation_y(ay) * rotation_x(ax) * rotation_z(az)`
    pub fn rotation_yxz(ay: T, ax: T, az: T) -> Self {
        let (sx, cx) = ax.sin_cos();
        let (sy, cy) = ay.sin_cos();
        let (sz, cz) = az.sin_cos();
        Self::from_cols(
            Vec3::new(cy * cz + sy * sx * sz, cx * sz, cy * sx * sz - sy * cz),
            Vec3::new(sy * sx * cz - cy * sz, cx * cz, sy * sz + cy * sx * cz),
            Vec3::new(sy * cx, -sx, cy * cx),
        )
    }

    /// View rotation that maps `dir` onto -Z with `up` in the YZ half-plane.
    ///
    /// `dir` parallel to `up` is not checked and produces NaN.
    pub fn from_look_along(dir: Vec3<T>, up: Vec3<T>) -> Self {
        let dir = dir.normalize();
        let right = dir.cross(up).normalize();
        let up = right.cross(dir);
        Self::from_cols(right, up, -dir).transpose()
    }

    /// Rotation that maps +Z onto `dir` and +Y towards `up`.
    pub fn from_rotation_towards(dir: Vec3<T>, up: Vec3<T>) -> Self {
        let dir = dir.normalize();
        let left = up.cross(dir).normalize();
        let up = dir.cross(left);
        Self::from_cols(left, up, dir)
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        let [c0, c1, c2] = self.cols;
        Self::from_cols(
            Vec3::new(c0.x, c1.x, c2.x),
            Vec3::new(c0.y, c1.y, c2.y),
            Vec3::new(c0.z, c1.z, c2.z),
        )
    }

    #[inline]
    pub fn determinant(&self) -> T {
        let [c0, c1, c2] = self.cols;
        c0.dot(c1.cross(c2))
    }

    /// Length of each column.
    pub fn scale(&self) -> Vec3<T> {
        let [c0, c1, c2] = self.cols;
        Vec3::new(c0.length(), c1.length(), c2.length())
    }

    /// Quaternion of an orthonormal rotation matrix.
    #[inline]
    pub fn normalized_rotation(&self) -> Quat<T> {
        Quat::from_normalized(self)
    }

    /// Quaternion of a matrix whose columns carry per-axis scale.
    #[inline]
    pub fn unnormalized_rotation(&self) -> Quat<T> {
        Quat::from_unnormalized(self)
    }

    #[inline]
    pub fn rotation_axis_angle(&self) -> AxisAngle<T> {
        AxisAngle::from_mat3(self)
    }

    /// Element at `column`, `row`.
    pub fn get(&self, column: usize, row: usize) -> Result<T> {
        let col = self.column(column)?;
        match row {
            0 => Ok(col.x),
            1 => Ok(col.y),
            2 => Ok(col.z),
            _ => Err(TransformError::RowOutOfRange { row }),
        }
    }

    pub fn set(&mut self, column: usize, row: usize, value: T) -> Result<()> {
        let col = self
            .cols
            .get_mut(column)
            .ok_or(TransformError::ColumnOutOfRange { column })?;
        match row {
            0 => col.x = value,
            1 => col.y = value,
            2 => col.z = value,
            _ => return Err(TransformError::RowOutOfRange { row }),
        }
        Ok(())
    }

    pub fn column(&self, column: usize) -> Result<Vec3<T>> {
        self.cols
            .get(column)
            .copied()
            .ok_or(TransformError::ColumnOutOfRange { column })
    }

    pub fn set_column(&mut self, column: usize, v: Vec3<T>) -> Result<()> {
        let col = self
            .cols
            .get_mut(column)
            .ok_or(TransformError::ColumnOutOfRange { column })?;
        *col = v;
        Ok(())
    }

    pub fn row(&self, row: usize) -> Result<Vec3<T>> {
        let [c0, c1, c2] = self.cols;
        match row {
            0 => Ok(Vec3::new(c0.x, c1.x, c2.x)),
            1 => Ok(Vec3::new(c0.y, c1.y, c2.y)),
            2 => Ok(Vec3::new(c0.z, c1.z, c2.z)),
            _ => Err(TransformError::RowOutOfRange { row }),
        }
    }

    pub fn set_row(&mut self, row: usize, v: Vec3<T>) -> Result<()> {
        if row > 2 {
            return Err(TransformError::RowOutOfRange { row });
        }
        for (col, value) in self.cols.iter_mut().zip(v.to_array()) {
            match row {
                0 => col.x = value,
                1 => col.y = value,
                _ => col.z = value,
            }
        }
        Ok(())
    }
}

impl<T: Scalar> Default for Mat3<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: Scalar> RotationBlock<T> for Mat3<T> {
    #[inline]
    fn rotation_block(&self) -> Mat3<T> {
        *self
    }
}

impl<T: Scalar> Mul<Vec3<T>> for Mat3<T> {
    type Output = Vec3<T>;

    #[inline]
    fn mul(self, v: Vec3<T>) -> Vec3<T> {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z
    }
}

impl<T: Scalar> Mul for Mat3<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_cols(self * rhs.cols[0], self * rhs.cols[1], self * rhs.cols[2])
    }
}

impl<T: Scalar> MulAssign for Mat3<T> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<T: Scalar> AbsDiffEq for Mat3<T> {
    type Epsilon = T;

    fn default_epsilon() -> T {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: Scalar> RelativeEq for Mat3<T> {
    fn default_max_relative() -> T {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: T, max_relative: T) -> bool {
        self.cols
            .iter()
            .zip(other.cols.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

/// 4x3 affine matrix: a rotation block plus a translation column
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat4x3<T> {
    pub cols: [Vec3<T>; 4],
}

pub type Mat4x3f = Mat4x3<f32>;
pub type Mat4x3d = Mat4x3<f64>;

impl<T: Scalar> Mat4x3<T> {
    pub const IDENTITY: Self = Self::from_cols(Vec3::X, Vec3::Y, Vec3::Z, Vec3::ZERO);

    #[inline]
    pub const fn from_cols(c0: Vec3<T>, c1: Vec3<T>, c2: Vec3<T>, c3: Vec3<T>) -> Self {
        Self { cols: [c0, c1, c2, c3] }
    }

    pub fn from_rotation_translation(rotation: Quat<T>, translation: Vec3<T>) -> Self {
        diagnostics::check_unit_quat(rotation, "Mat4x3::from_rotation_translation");
        let m = Mat3::from_quat_unchecked(rotation);
        Self::from_cols(m.cols[0], m.cols[1], m.cols[2], translation)
    }

    #[inline]
    pub fn from_quat(q: Quat<T>) -> Self {
        Self::from_rotation_translation(q, Vec3::ZERO)
    }

    #[inline]
    pub fn rotation_x(angle: T) -> Self {
        Self::IDENTITY.with_rotation_block(Mat3::rotation_x(angle))
    }

    #[inline]
    pub fn rotation_y(angle: T) -> Self {
        Self::IDENTITY.with_rotation_block(Mat3::rotation_y(angle))
    }

    #[inline]
    pub fn rotation_z(angle: T) -> Self {
        Self::IDENTITY.with_rotation_block(Mat3::rotation_z(angle))
    }

    #[inline]
    pub fn translation(&self) -> Vec3<T> {
        self.cols[3]
    }

    #[inline]
    pub fn set_translation(&mut self, t: Vec3<T>) {
        self.cols[3] = t;
    }

    /// Replaces the 3x3 block, keeping the translation.
    pub fn set_rotation_block(&mut self, m: Mat3<T>) {
        self.cols[..3].copy_from_slice(&m.cols);
    }

    #[inline]
    pub fn with_rotation_block(mut self, m: Mat3<T>) -> Self {
        self.set_rotation_block(m);
        self
    }

    #[inline]
    pub fn to_mat3(&self) -> Mat3<T> {
        Mat3::from_cols(self.cols[0], self.cols[1], self.cols[2])
    }

    #[inline]
    pub fn transform_point(&self, p: Vec3<T>) -> Vec3<T> {
        self.to_mat3() * p + self.cols[3]
    }

    #[inline]
    pub fn transform_vector(&self, v: Vec3<T>) -> Vec3<T> {
        self.to_mat3() * v
    }

    pub fn to_cols_array(&self) -> [T; 12] {
        let mut out = [T::ZERO; 12];
        for (chunk, col) in out.chunks_exact_mut(3).zip(self.cols.iter()) {
            chunk.copy_from_slice(&col.to_array());
        }
        out
    }
}

impl<T: Scalar> Default for Mat4x3<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: Scalar> RotationBlock<T> for Mat4x3<T> {
    #[inline]
    fn rotation_block(&self) -> Mat3<T> {
        self.to_mat3()
    }
}

/// 4x4 matrix (column-major)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Mat4<T> {
    pub cols: [Vec4<T>; 4],
}

pub type Mat4f = Mat4<f32>;
pub type Mat4d = Mat4<f64>;

impl<T: Scalar> Mat4<T> {
    pub const IDENTITY: Self = Self::from_cols(
        Vec4::new(T::ONE, T::ZERO, T::ZERO, T::ZERO),
        Vec4::new(T::ZERO, T::ONE, T::ZERO, T::ZERO),
        Vec4::new(T::ZERO, T::ZERO, T::ONE, T::ZERO),
        Vec4::W,
    );

    #[inline]
    pub const fn from_cols(c0: Vec4<T>, c1: Vec4<T>, c2: Vec4<T>, c3: Vec4<T>) -> Self {
        Self { cols: [c0, c1, c2, c3] }
    }

    /// Create a rotation-translation matrix
    pub fn from_rotation_translation(rotation: Quat<T>, translation: Vec3<T>) -> Self {
        diagnostics::check_unit_quat(rotation, "Mat4::from_rotation_translation");
        let m = Mat3::from_quat_unchecked(rotation);
        Self::from_cols(
            m.cols[0].extend(T::ZERO),
            m.cols[1].extend(T::ZERO),
            m.cols[2].extend(T::ZERO),
            translation.extend(T::ONE),
        )
    }

    #[inline]
    pub fn from_quat(q: Quat<T>) -> Self {
        Self::from_rotation_translation(q, Vec3::ZERO)
    }

    #[inline]
    pub fn rotation_x(angle: T) -> Self {
        Self::IDENTITY.with_rotation_block(Mat3::rotation_x(angle))
    }

    #[inline]
    pub fn rotation_y(angle: T) -> Self {
        Self::IDENTITY.with_rotation_block(Mat3::rotation_y(angle))
    }

    #[inline]
    pub fn rotation_z(angle: T) -> Self {
        Self::IDENTITY.with_rotation_block(Mat3::rotation_z(angle))
    }

    #[inline]
    pub fn translation(&self) -> Vec3<T> {
        self.cols[3].truncate()
    }

    #[inline]
    pub fn set_translation(&mut self, t: Vec3<T>) {
        self.cols[3] = t.extend(self.cols[3].w);
    }

    /// Replaces the upper-left 3x3 block, keeping the fourth row and column.
    pub fn set_rotation_block(&mut self, m: Mat3<T>) {
        for (dst, src) in self.cols.iter_mut().zip(m.cols) {
            *dst = src.extend(dst.w);
        }
    }

    #[inline]
    pub fn with_rotation_block(mut self, m: Mat3<T>) -> Self {
        self.set_rotation_block(m);
        self
    }

    #[inline]
    pub fn to_mat3(&self) -> Mat3<T> {
        Mat3::from_cols(
            self.cols[0].truncate(),
            self.cols[1].truncate(),
            self.cols[2].truncate(),
        )
    }

    pub fn transform_point(&self, p: Vec3<T>) -> Vec3<T> {
        (self.cols[0] * p.x + self.cols[1] * p.y + self.cols[2] * p.z + self.cols[3]).truncate()
    }

    #[inline]
    pub fn transform_vector(&self, v: Vec3<T>) -> Vec3<T> {
        self.to_mat3() * v
    }

    pub fn to_cols_array(&self) -> [T; 16] {
        let mut out = [T::ZERO; 16];
        for (chunk, col) in out.chunks_exact_mut(4).zip(self.cols.iter()) {
            chunk.copy_from_slice(&col.to_array());
        }
        out
    }
}

impl<T: Scalar> Default for Mat4<T> {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<T: Scalar> RotationBlock<T> for Mat4<T> {
    #[inline]
    fn rotation_block(&self) -> Mat3<T> {
        self.to_mat3()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quaternion::{Quatd, Quatf};
    use crate::vector::{Vec3d, Vec3f};
    use approx::assert_abs_diff_eq;
    use core::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rotation_x_exact_quarter_turn() {
        let m = Mat3f::rotation_x(core::f32::consts::PI * 0.5);
        assert_eq!(m.cols[1], Vec3f::new(0.0, 0.0, 1.0));
        assert_eq!(m.cols[2], Vec3f::new(0.0, -1.0, 0.0));

        let m = Mat3d::rotation_x(FRAC_PI_2);
        assert_eq!(m.get(1, 1), Ok(0.0));
        assert_eq!(m.get(1, 2), Ok(1.0));
    }

    #[test]
    fn test_rotation_yz_exact_half_turns() {
        let m = Mat3d::rotation_y(PI);
        assert_eq!(m.cols[0], Vec3d::new(-1.0, 0.0, 0.0));
        assert_eq!(m.cols[2], Vec3d::new(0.0, 0.0, -1.0));

        let m = Mat3d::rotation_z(-PI * 1.5);
        assert_eq!(m.cols[0], Vec3d::new(0.0, 1.0, 0.0));
        assert_eq!(m.cols[1], Vec3d::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_mat4_rotation_keeps_translation_column() {
        let m = Mat4d::rotation_z(FRAC_PI_2);
        assert_eq!(m.cols[0].to_array(), [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(m.cols[3], Vec4::W);

        let mut a = Mat4x3d::rotation_x(PI);
        a.set_translation(Vec3d::new(1.0, 2.0, 3.0));
        a.set_rotation_block(Mat3::IDENTITY);
        assert_eq!(a.translation(), Vec3d::new(1.0, 2.0, 3.0));
        assert_eq!(a.to_mat3(), Mat3::IDENTITY);
    }

    #[test]
    fn test_euler_matrices_match_axis_products() {
        let (ax, ay, az) = (0.12, 0.521, 0.951);
        let rx = Mat3d::rotation_x(ax);
        let ry = Mat3d::rotation_y(ay);
        let rz = Mat3d::rotation_z(az);
        assert_abs_diff_eq!(Mat3d::rotation_xyz(ax, ay, az), rx * ry * rz, epsilon = 1e-12);
        assert_abs_diff_eq!(Mat3d::rotation_zyx(az, ay, ax), rz * ry * rx, epsilon = 1e-12);
        assert_abs_diff_eq!(Mat3d::rotation_yxz(ay, ax, az), ry * rx * rz, epsilon = 1e-12);
    }

    #[test]
    fn test_euler_orders_are_not_interchangeable() {
        let xyz = Mat3d::rotation_xyz(0.3, 0.4, 0.5);
        let zyx = Mat3d::rotation_zyx(0.5, 0.4, 0.3);
        assert!(!xyz.abs_diff_eq(&zyx, 1e-6));
    }

    #[test]
    fn test_axis_angle_normalizes_but_rotation_does_not() {
        let aa = AxisAngle::new(FRAC_PI_2, Vec3d::new(0.0, 0.0, 2.0));
        let m = Mat3d::from_axis_angle(aa);
        assert_abs_diff_eq!(m, Mat3d::rotation_z(FRAC_PI_2), epsilon = 1e-12);

        let scaled = Mat3d::rotation(FRAC_PI_2, Vec3d::new(0.0, 0.0, 2.0));
        assert!(!scaled.abs_diff_eq(&Mat3d::rotation_z(FRAC_PI_2), 1e-3));
    }

    #[test]
    fn test_look_along_maps_dir_to_neg_z() {
        let dir = Vec3d::new(1.0, 2.0, -3.0);
        let m = Mat3d::from_look_along(dir, Vec3d::Y);
        assert_abs_diff_eq!(m * dir.normalize(), Vec3d::NEG_Z, epsilon = 1e-12);
        assert_abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_towards_maps_z_to_dir() {
        let dir = Vec3d::new(-2.0, 0.5, 1.0);
        let m = Mat3d::from_rotation_towards(dir, Vec3d::Y);
        assert_abs_diff_eq!(m * Vec3d::Z, dir.normalize(), epsilon = 1e-12);
    }

    #[test]
    fn test_quat_to_mat3_y_quarter_turn() {
        let s = core::f32::consts::FRAC_PI_4.sin();
        let c = core::f32::consts::FRAC_PI_4.cos();
        let m = Mat3f::from_quat(Quatf::new(0.0, s, 0.0, c));
        assert_abs_diff_eq!(m * Vec3f::X, Vec3f::NEG_Z, epsilon = 1e-6);
    }

    #[test]
    fn test_non_unit_quat_gives_scaled_matrix() {
        let m = Mat3d::from_quat(Quatd::new(0.0, 0.0, 0.0, 2.0));
        // Only the vector part enters the closed form, so w is ignored here.
        assert_eq!(m, Mat3d::IDENTITY);
        let m = Mat3d::from_quat(Quatd::new(2.0, 0.0, 0.0, 0.0));
        assert_eq!(m.cols[1].y, -7.0);
    }

    #[test]
    fn test_index_out_of_range() {
        let mut m = Mat3d::IDENTITY;
        assert_eq!(m.get(3, 0), Err(TransformError::ColumnOutOfRange { column: 3 }));
        assert_eq!(m.get(0, 5), Err(TransformError::RowOutOfRange { row: 5 }));
        assert_eq!(m.row(3), Err(TransformError::RowOutOfRange { row: 3 }));
        assert!(m.set_column(4, Vec3d::X).is_err());
        assert!(m.set_row(1, Vec3d::new(7.0, 8.0, 9.0)).is_ok());
        assert_eq!(m.row(1), Ok(Vec3d::new(7.0, 8.0, 9.0)));
        assert_eq!(m.column(2), Ok(Vec3d::new(0.0, 9.0, 1.0)));

        assert_eq!(m.set(2, 0, -4.0), Ok(()));
        assert_eq!(m.get(2, 0), Ok(-4.0));
        assert_eq!(m.cols[2], Vec3d::new(-4.0, 9.0, 1.0));
        assert_eq!(m.set(3, 0, 1.0), Err(TransformError::ColumnOutOfRange { column: 3 }));
        assert_eq!(m.set(0, 3, 1.0), Err(TransformError::RowOutOfRange { row: 3 }));
        assert_eq!(m.cols[0], Vec3d::new(1.0, 7.0, 0.0));
    }

    #[test]
    fn test_from_slice_length() {
        let flat: Vec<f32> = (0..9).map(|i| i as f32).collect();
        let m = Mat3f::from_slice(&flat).unwrap();
        assert_eq!(m.to_cols_array().to_vec(), flat);
        assert_eq!(m.get(1, 2), Ok(5.0));
        assert_eq!(
            Mat3f::from_slice(&flat[..4]),
            Err(TransformError::LengthMismatch { expected: 9, found: 4 })
        );
    }

    #[test]
    fn test_mat4_flat_layout() {
        let m = Mat4d::from_rotation_translation(Quatd::IDENTITY, Vec3d::new(4.0, 5.0, 6.0));
        let a = m.to_cols_array();
        assert_eq!(&a[12..], &[4.0, 5.0, 6.0, 1.0]);
        assert_eq!(m.transform_point(Vec3d::X), Vec3d::new(5.0, 5.0, 6.0));
        assert_eq!(m.transform_vector(Vec3d::X), Vec3d::X);

        let m = Mat4x3d::from_rotation_translation(Quatd::IDENTITY, Vec3d::new(4.0, 5.0, 6.0));
        assert_eq!(&m.to_cols_array()[9..], &[4.0, 5.0, 6.0]);
    }
}
