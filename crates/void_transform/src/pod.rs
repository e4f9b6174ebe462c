//! Zero-copy casts into flat scalar buffers
//!
//! Every concrete type is `repr(C)` over a single float type, so a slice of
//! matrices casts directly to the column-major scalar layout a GPU expects.

use crate::axis_angle::{AxisAngled, AxisAnglef};
use crate::matrix::{Mat3d, Mat3f, Mat4d, Mat4f, Mat4x3d, Mat4x3f};
use crate::quaternion::{Quatd, Quatf};
use crate::vector::{Vec3d, Vec3f, Vec4d, Vec4f};

macro_rules! impl_pod {
    ($($t:ty),* $(,)?) => {$(
        // SAFETY: repr(C), fields are all the same float type, so there is
        // no padding and every bit pattern is valid.
        unsafe impl bytemuck::Zeroable for $t {}
        unsafe impl bytemuck::Pod for $t {}
    )*};
}

impl_pod!(
    Vec3f, Vec3d, Vec4f, Vec4d,
    Mat3f, Mat3d, Mat4x3f, Mat4x3d, Mat4f, Mat4d,
    Quatf, Quatd,
    AxisAnglef, AxisAngled,
);
