//! Scalar element type shared by every rotation type.
//!
//! All vectors, matrices and quaternions are generic over [`Scalar`], which is
//! implemented for `f32` and `f64`. Callers pick the precision through the
//! concrete aliases (`Quatf`, `Quatd`, ...).

use approx::{AbsDiffEq, RelativeEq};
use core::fmt::Debug;
use num_traits::{Float, FloatConst};

/// Floating point element type for rotation math.
pub trait Scalar:
    Float
    + FloatConst
    + AbsDiffEq<Epsilon = Self>
    + RelativeEq
    + Debug
    + Default
    + Send
    + Sync
    + 'static
{
    const ZERO: Self;
    const ONE: Self;
    const NEG_ONE: Self;
    const TWO: Self;
    const HALF: Self;
    const THREE_HALVES: Self;

    /// Below this `1 - |cos(omega)|`, slerp falls back to a linear blend.
    const SLERP_EPSILON: Self;

    /// Below this `sin(angle / 2)`, axis extraction returns the raw vector part.
    const AXIS_ANGLE_EPSILON: Self;

    /// Comparison tolerance used by diagnostics.
    const DEFAULT_EPSILON: Self;

    /// Converts an `f64` constant, rounding when `Self` is narrower.
    fn from_f64_lossy(value: f64) -> Self;

    /// Widens to `f64` for logging and configuration.
    fn to_f64_lossy(self) -> f64;
}

macro_rules! impl_scalar {
    ($t:ty, $eps:expr) => {
        impl Scalar for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const NEG_ONE: Self = -1.0;
            const TWO: Self = 2.0;
            const HALF: Self = 0.5;
            const THREE_HALVES: Self = 1.5;
            const SLERP_EPSILON: Self = 1e-6;
            const AXIS_ANGLE_EPSILON: Self = 0.001;
            const DEFAULT_EPSILON: Self = $eps;

            #[inline]
            fn from_f64_lossy(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn to_f64_lossy(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_scalar!(f32, 1e-5);
impl_scalar!(f64, 1e-10);

/// Sine and cosine of `angle`, exact at the quarter turns.
///
/// `±PI`, `PI/2`, `-PI/2`, `3PI/2` and `-3PI/2` are matched by exact equality
/// against constants derived from `T::PI()`, so axis rotations built from those
/// angles contain exact `-1`, `0` and `1` entries.
#[inline]
pub fn exact_sin_cos<T: Scalar>(angle: T) -> (T, T) {
    let pi = T::PI();
    let half_pi = pi * T::HALF;
    let three_half_pi = pi * T::THREE_HALVES;
    if angle == pi || angle == -pi {
        (T::ZERO, -T::ONE)
    } else if angle == half_pi || angle == -three_half_pi {
        (T::ONE, T::ZERO)
    } else if angle == -half_pi || angle == three_half_pi {
        (-T::ONE, T::ZERO)
    } else {
        angle.sin_cos()
    }
}

/// `acos` with the argument clamped to `[-1, 1]`.
#[inline]
pub fn safe_acos<T: Scalar>(v: T) -> T {
    if v < -T::ONE {
        T::PI()
    } else if v > T::ONE {
        T::ZERO
    } else {
        v.acos()
    }
}

/// Approximate equality with a caller-chosen absolute tolerance.
#[inline]
pub fn approx_eq<T: Scalar>(a: T, b: T, epsilon: T) -> bool {
    (a - b).abs() <= epsilon
}
