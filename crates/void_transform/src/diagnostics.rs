//! Debug-build checks for suspicious inputs
//!
//! Conversions never validate their arguments. In debug builds these hooks
//! log a warning when an input is likely to produce NaN or a skewed result;
//! in release builds they compile to nothing. They never change a result.

use crate::quaternion::Quat;
use crate::scalar::Scalar;
use crate::vector::Vec3;

#[cfg(debug_assertions)]
use crate::scalar::approx_eq;

#[cfg(all(test, debug_assertions))]
thread_local! {
    static WARNINGS: core::cell::Cell<usize> = const { core::cell::Cell::new(0) };
}

/// Number of warnings emitted on the current thread.
#[cfg(all(test, debug_assertions))]
pub(crate) fn warning_count() -> usize {
    WARNINGS.with(|w| w.get())
}

#[cfg(debug_assertions)]
fn record() {
    #[cfg(test)]
    WARNINGS.with(|w| w.set(w.get() + 1));
}

/// Warns when `q` is not unit length.
#[cfg(debug_assertions)]
pub(crate) fn check_unit_quat<T: Scalar>(q: Quat<T>, op: &'static str) {
    let len_sq = q.length_squared();
    if !approx_eq(len_sq, T::ONE, T::DEFAULT_EPSILON) {
        record();
        log::warn!(
            target: "void_transform",
            "{}: quaternion is not unit length (|q|^2 = {})",
            op,
            len_sq.to_f64_lossy()
        );
    }
}

/// Warns when `axis` is too short to normalize.
#[cfg(debug_assertions)]
pub(crate) fn check_axis<T: Scalar>(axis: Vec3<T>, op: &'static str) {
    if !(axis.length_squared() > T::DEFAULT_EPSILON) {
        record();
        log::warn!(target: "void_transform", "{}: rotation axis has near-zero length", op);
    }
}

/// Warns when `dir` is degenerate or parallel to `up`.
#[cfg(debug_assertions)]
pub(crate) fn check_look_basis<T: Scalar>(dir: Vec3<T>, up: Vec3<T>, op: &'static str) {
    let side = dir.cross(up).length_squared();
    let scale = dir.length_squared() * up.length_squared();
    if !(side > scale * T::DEFAULT_EPSILON) {
        record();
        log::warn!(
            target: "void_transform",
            "{}: look direction is zero or parallel to up, result will be NaN",
            op
        );
    }
}

#[cfg(not(debug_assertions))]
#[inline(always)]
pub(crate) fn check_unit_quat<T: Scalar>(_q: Quat<T>, _op: &'static str) {}

#[cfg(not(debug_assertions))]
#[inline(always)]
pub(crate) fn check_axis<T: Scalar>(_axis: Vec3<T>, _op: &'static str) {}

#[cfg(not(debug_assertions))]
#[inline(always)]
pub(crate) fn check_look_basis<T: Scalar>(_dir: Vec3<T>, _up: Vec3<T>, _op: &'static str) {}
