//! Property tests for rotation conversions and interpolation
//!
//! Covers:
//! - Quaternion -> matrix -> quaternion round trips at both precisions
//! - Axis-angle and Euler round trips
//! - Slerp/nlerp endpoints and shortest-arc behaviour
//! - Rotate-to and look-along mappings

use approx::abs_diff_eq;
use proptest::prelude::*;
use void_transform::prelude::*;

use std::f64::consts::{FRAC_PI_2, PI, TAU};

prop_compose! {
    fn rotation_strategy()(
        roll in 0.0..TAU,
        pitch in -FRAC_PI_2..FRAC_PI_2,
        yaw in 0.0..TAU,
    ) -> Quatd {
        Quatd::from_rotation_xyz(roll, pitch, yaw)
    }
}

prop_compose! {
    fn direction_strategy()(
        x in -1.0..1.0f64,
        y in -1.0..1.0f64,
        z in -1.0..1.0f64,
    ) -> Vec3d {
        Vec3d::new(x, y, z)
    }
}

fn same_rotation(a: Quatd, b: Quatd, epsilon: f64) -> bool {
    abs_diff_eq!(a, b, epsilon = epsilon) || abs_diff_eq!(a, -b, epsilon = epsilon)
}

fn to_f32(q: Quatd) -> Quatf {
    Quatf::new(q.x as f32, q.y as f32, q.z as f32, q.w as f32)
}

proptest! {
    #[test]
    fn matrix_round_trip_recovers_rotation(q in rotation_strategy()) {
        let back = Quatd::from_normalized(&q.to_mat3());
        prop_assert!(same_rotation(back, q, 1e-10));
    }
}

proptest! {
    #[test]
    fn matrix_round_trip_single_precision(q in rotation_strategy()) {
        let q = to_f32(q);
        let back = Quatf::from_normalized(&q.to_mat3());
        prop_assert!(abs_diff_eq!(back, q, epsilon = 1e-5) || abs_diff_eq!(back, -q, epsilon = 1e-5));
    }
}

proptest! {
    #[test]
    fn rotation_matrices_are_orthonormal(q in rotation_strategy()) {
        let m = q.to_mat3();
        prop_assert!(abs_diff_eq!(m.determinant(), 1.0, epsilon = 1e-10));
        prop_assert!(abs_diff_eq!(m * m.transpose(), Mat3d::IDENTITY, epsilon = 1e-10));
    }
}

proptest! {
    #[test]
    fn axis_angle_round_trip(angle in 0.01..(PI - 0.01), dir in direction_strategy()) {
        prop_assume!(dir.length() > 0.1);
        let axis = dir.normalize();
        let aa = Quatd::from_angle_axis(angle, axis).to_axis_angle();
        prop_assert!(abs_diff_eq!(aa.angle, angle, epsilon = 1e-10));
        prop_assert!(abs_diff_eq!(aa.axis, axis, epsilon = 1e-10));
    }
}

proptest! {
    #[test]
    fn zero_angle_axis_angle_is_finite(dir in direction_strategy()) {
        let aa = Quatd::from_angle_axis(0.0, dir).to_axis_angle();
        prop_assert!(aa.angle.is_finite());
        prop_assert!(aa.axis.is_finite());
    }
}

proptest! {
    #[test]
    fn euler_xyz_round_trip(
        ax in (-PI + 0.01)..(PI - 0.01),
        ay in -1.5..1.5f64,
        az in (-PI + 0.01)..(PI - 0.01),
    ) {
        let angles = Quatd::from_rotation_xyz(ax, ay, az).euler_angles_xyz();
        prop_assert!(abs_diff_eq!(angles, Vec3d::new(ax, ay, az), epsilon = 1e-8));
    }
}

proptest! {
    #[test]
    fn slerp_hits_endpoints(q1 in rotation_strategy(), q2 in rotation_strategy()) {
        prop_assert!(abs_diff_eq!(slerp(q1, q2, 0.0), q1, epsilon = 1e-9));

        let end = if q1.dot(q2) >= 0.0 { q2 } else { -q2 };
        prop_assert!(abs_diff_eq!(slerp(q1, q2, 1.0), end, epsilon = 1e-9));
    }
}

proptest! {
    #[test]
    fn slerp_takes_shortest_arc(q1 in rotation_strategy(), q2 in rotation_strategy(), alpha in 0.0..1.0f64) {
        prop_assume!(q1.dot(q2).abs() > 1e-9);
        let a = slerp(q1, q2, alpha);
        let b = slerp(q1, -q2, alpha);
        prop_assert!(abs_diff_eq!(a, b, epsilon = 1e-9));
        prop_assert!(a.dot(q1) >= 0.0);
    }
}

proptest! {
    #[test]
    fn nlerp_hits_endpoints(q1 in rotation_strategy(), q2 in rotation_strategy()) {
        prop_assert!(abs_diff_eq!(nlerp(q1, q2, 0.0), q1, epsilon = 1e-10));
        prop_assert!(same_rotation(nlerp(q1, q2, 1.0), q2, 1e-10));
        prop_assert!(abs_diff_eq!(nlerp(q1, q2, 0.5).length(), 1.0, epsilon = 1e-10));
    }
}

proptest! {
    #[test]
    fn rotation_to_maps_from_onto_to(from in direction_strategy(), to in direction_strategy()) {
        prop_assume!(from.length() > 0.1 && to.length() > 0.1);
        let (from, to) = (from.normalize(), to.normalize());
        prop_assume!(from.dot(to) > -0.99);
        let q = Quatd::from_rotation_to(from, to);
        prop_assert!(abs_diff_eq!(q * from, to, epsilon = 1e-9));
    }
}

proptest! {
    #[test]
    fn look_along_maps_dir_onto_neg_z(dir in direction_strategy()) {
        prop_assume!(dir.cross(Vec3d::Y).length() > 0.1);
        let q = Quatd::from_look_along(dir, Vec3d::Y);
        prop_assert!(abs_diff_eq!(q * dir.normalize(), Vec3d::NEG_Z, epsilon = 1e-10));
        prop_assert!(abs_diff_eq!(q.to_mat3(), Mat3d::from_look_along(dir, Vec3d::Y), epsilon = 1e-10));
    }
}

#[test]
fn test_quarter_turn_about_y_maps_x_to_neg_z() {
    let h = std::f32::consts::FRAC_PI_4;
    let q = Quatf::new(0.0, h.sin(), 0.0, h.cos());
    let v = q.to_mat3() * Vec3f::X;
    assert!(abs_diff_eq!(v, Vec3f::new(0.0, 0.0, -1.0), epsilon = 1e-6));
}

#[test]
fn test_exact_quarter_turn_entries() {
    let m = Mat3d::rotation_x(PI / 2.0);
    assert_eq!(m.get(1, 1), Ok(0.0));
    assert_eq!(m.get(1, 2), Ok(1.0));
    assert_eq!(m.get(2, 1), Ok(-1.0));

    let m = Mat4f::rotation_y(-std::f32::consts::PI / 2.0);
    assert_eq!(m.cols[0].to_array(), [0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn test_half_turn_pivots_recover_axes() {
    for (m, axis) in [
        (Mat3d::rotation_x(PI), Vec3d::X),
        (Mat3d::rotation_y(PI), Vec3d::Y),
        (Mat3d::rotation_z(PI), Vec3d::Z),
    ] {
        assert_eq!(m.determinant(), 1.0);
        let q = Quatd::from_normalized(&m);
        assert!(q.is_finite());
        assert_eq!(Vec3d::new(q.x, q.y, q.z), axis);
        assert_eq!(q.w, 0.0);
    }
}

#[test]
fn test_blend_through_config() {
    let qs = [Quatd::IDENTITY, Quatd::from_rotation_z(1.0), Quatd::from_rotation_z(2.0)];
    let weights = [1.0, 1.0, 2.0];
    for config in [
        InterpolationConfig::precise(),
        InterpolationConfig::fast(),
        InterpolationConfig::iterative(0.99999),
    ] {
        let q = void_transform::blend(&qs, &weights, &config).unwrap();
        assert!(abs_diff_eq!(q.length(), 1.0, epsilon = 1e-9));
        assert!(abs_diff_eq!(q.x, 0.0) && abs_diff_eq!(q.y, 0.0));
    }
    let exact = void_transform::blend(&qs, &weights, &InterpolationConfig::precise()).unwrap();
    assert!(abs_diff_eq!(exact, Quatd::from_rotation_z(1.25), epsilon = 1e-12));
}
