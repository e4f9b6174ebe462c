//! # void_transform - Rotation Conversion and Interpolation
//!
//! Converts rotations between quaternion, 3x3 matrix, axis-angle and Euler
//! forms, builds rotations from look directions, and interpolates between
//! quaternions.
//!
//! Every type is generic over [`Scalar`] (`f32` or `f64`); use the concrete
//! aliases such as [`Quatf`] or [`Mat3d`] at API boundaries. Operations return
//! new values; `set_*` and `*_mut` variants write in place.
//!
//! The numerical core does not validate input. Non-unit quaternions, zero
//! axes and parallel look/up vectors yield NaN or meaningless rotations
//! rather than errors. Debug builds log a warning through the `log` facade
//! for the common cases.

pub mod axis_angle;
pub mod config;
mod diagnostics;
pub mod error;
pub mod interpolate;
pub mod matrix;
#[cfg(feature = "bytemuck")]
mod pod;
pub mod quaternion;
pub mod scalar;
pub mod vector;

pub use axis_angle::*;
pub use config::*;
pub use error::*;
pub use interpolate::{
    blend, nlerp, nlerp_iterative, nlerp_iterative_weighted, nlerp_weighted, slerp,
    slerp_weighted,
};
pub use matrix::*;
pub use quaternion::*;
pub use scalar::{exact_sin_cos, safe_acos, Scalar};
pub use vector::*;

/// Convert degrees to radians
#[inline]
pub fn radians<T: Scalar>(degrees: T) -> T {
    degrees * T::PI() / T::from_f64_lossy(180.0)
}

/// Convert radians to degrees
#[inline]
pub fn degrees<T: Scalar>(radians: T) -> T {
    radians * T::from_f64_lossy(180.0) / T::PI()
}

pub mod prelude {
    pub use crate::axis_angle::{AxisAngle, AxisAngled, AxisAnglef};
    pub use crate::config::{InterpolationConfig, InterpolationMethod};
    pub use crate::error::{Result, TransformError};
    pub use crate::interpolate::{nlerp, nlerp_iterative, slerp};
    pub use crate::matrix::{Mat3, Mat3d, Mat3f, Mat4, Mat4d, Mat4f, Mat4x3, Mat4x3d, Mat4x3f, RotationBlock};
    pub use crate::quaternion::{Quat, Quatd, Quatf};
    pub use crate::scalar::Scalar;
    pub use crate::vector::{Vec3, Vec3d, Vec3f, Vec4, Vec4d, Vec4f};
    pub use crate::{degrees, radians};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_units() {
        assert!((radians(180.0_f64) - core::f64::consts::PI).abs() < 1e-15);
        assert!((degrees(core::f32::consts::FRAC_PI_2) - 90.0).abs() < 1e-4);
    }
}
