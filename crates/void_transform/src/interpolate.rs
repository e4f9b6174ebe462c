//! Quaternion interpolation
//!
//! All three algorithms take the shortest arc: when the inputs lie in
//! opposite hemispheres the target is negated before blending.
//!
//! [`slerp`] does not renormalize its result. [`nlerp`] and
//! [`nlerp_iterative`] always return a unit quaternion.

use crate::config::{InterpolationConfig, InterpolationMethod};
use crate::error::{Result, TransformError};
use crate::quaternion::Quat;
use crate::scalar::Scalar;

/// Upper bound on bisection steps; only reached for thresholds above one.
const MAX_BISECTIONS: usize = 64;

/// Spherical linear interpolation from `q1` (`alpha = 0`) to `q2` (`alpha = 1`).
///
/// Nearly parallel inputs fall back to a linear blend to avoid dividing by
/// `sin(omega)` as it approaches zero.
pub fn slerp<T: Scalar>(q1: Quat<T>, q2: Quat<T>, alpha: T) -> Quat<T> {
    let cosom = q1.dot(q2);
    let abs_cosom = cosom.abs();
    let (scale0, scale1) = if T::ONE - abs_cosom > T::SLERP_EPSILON {
        let sin_sqr = T::ONE - abs_cosom * abs_cosom;
        let sinom = T::ONE / sin_sqr.sqrt();
        let omega = (sin_sqr * sinom).atan2(abs_cosom);
        (
            ((T::ONE - alpha) * omega).sin() * sinom,
            (alpha * omega).sin() * sinom,
        )
    } else {
        (T::ONE - alpha, alpha)
    };
    let scale1 = if cosom >= T::ZERO { scale1 } else { -scale1 };
    blend_pair(q1, scale0, q2, scale1)
}

/// Normalized linear interpolation.
pub fn nlerp<T: Scalar>(q1: Quat<T>, q2: Quat<T>, factor: T) -> Quat<T> {
    let cosom = q1.dot(q2);
    let scale0 = T::ONE - factor;
    let scale1 = if cosom >= T::ZERO { factor } else { -factor };
    blend_pair(q1, scale0, q2, scale1).normalize()
}

/// Approximates [`slerp`] by bisecting the arc with half-step nlerps until
/// the bracketing quaternions satisfy `|dot| >= dot_threshold`, then
/// finishing with one nlerp inside that bracket.
///
/// Nearly parallel inputs return `q1` unchanged.
pub fn nlerp_iterative<T: Scalar>(q1: Quat<T>, q2: Quat<T>, alpha: T, dot_threshold: T) -> Quat<T> {
    let mut dot = q1.dot(q2);
    let mut abs_dot = dot.abs();
    if T::ONE - T::SLERP_EPSILON < abs_dot {
        return q1;
    }

    let (mut lo, mut hi) = (q1, q2);
    let mut alpha_n = alpha;
    let half = T::HALF;
    let mut steps = 0;
    while abs_dot < dot_threshold && steps < MAX_BISECTIONS {
        steps += 1;
        let scale1 = if dot >= T::ZERO { half } else { -half };
        if alpha_n < half {
            hi = blend_pair(hi, half, lo, scale1).normalize();
            alpha_n = alpha_n + alpha_n;
        } else {
            lo = blend_pair(lo, half, hi, scale1).normalize();
            alpha_n = alpha_n + alpha_n - T::ONE;
        }
        dot = lo.dot(hi);
        abs_dot = dot.abs();
    }

    let scale0 = T::ONE - alpha_n;
    let scale1 = if dot >= T::ZERO { alpha_n } else { -alpha_n };
    blend_pair(lo, scale0, hi, scale1).normalize()
}

#[inline]
fn blend_pair<T: Scalar>(a: Quat<T>, sa: T, b: Quat<T>, sb: T) -> Quat<T> {
    Quat::new(
        sa * a.x + sb * b.x,
        sa * a.y + sb * b.y,
        sa * a.z + sb * b.z,
        sa * a.w + sb * b.w,
    )
}

/// Folds `qs` pairwise, blending each quaternion in with its weight relative
/// to the accumulated weight so far.
fn fold_weighted<T, F>(qs: &[Quat<T>], weights: &[T], mut step: F) -> Result<Quat<T>>
where
    T: Scalar,
    F: FnMut(Quat<T>, Quat<T>, T) -> Quat<T>,
{
    if qs.len() != weights.len() {
        return Err(TransformError::WeightCountMismatch {
            quaternions: qs.len(),
            weights: weights.len(),
        });
    }
    let (first, rest) = qs.split_first().ok_or(TransformError::EmptyInput)?;

    let mut acc = *first;
    let mut total = weights[0];
    for (q, &w) in rest.iter().zip(&weights[1..]) {
        let relative = w / (total + w);
        total = total + w;
        acc = step(acc, *q, relative);
    }
    Ok(acc)
}

/// Weighted [`slerp`] over any number of quaternions.
pub fn slerp_weighted<T: Scalar>(qs: &[Quat<T>], weights: &[T]) -> Result<Quat<T>> {
    fold_weighted(qs, weights, slerp)
}

/// Weighted [`nlerp`] over any number of quaternions.
pub fn nlerp_weighted<T: Scalar>(qs: &[Quat<T>], weights: &[T]) -> Result<Quat<T>> {
    fold_weighted(qs, weights, nlerp)
}

/// Weighted [`nlerp_iterative`] over any number of quaternions.
pub fn nlerp_iterative_weighted<T: Scalar>(
    qs: &[Quat<T>],
    weights: &[T],
    dot_threshold: T,
) -> Result<Quat<T>> {
    fold_weighted(qs, weights, |a, b, t| nlerp_iterative(a, b, t, dot_threshold))
}

/// Weighted blend using the algorithm selected by `config`.
pub fn blend<T: Scalar>(
    qs: &[Quat<T>],
    weights: &[T],
    config: &InterpolationConfig,
) -> Result<Quat<T>> {
    log::trace!(
        target: "void_transform",
        "Blending {} rotations with {:?}",
        qs.len(),
        config.method
    );
    match config.method {
        InterpolationMethod::Slerp => slerp_weighted(qs, weights),
        InterpolationMethod::Nlerp => nlerp_weighted(qs, weights),
        InterpolationMethod::NlerpIterative => {
            nlerp_iterative_weighted(qs, weights, T::from_f64_lossy(config.dot_threshold))
        }
    }
}
