use approx::{assert_abs_diff_eq, assert_relative_eq};
use std::panic;

use hikari::math::{Vec2, Vec3};

// Aim is to check everything the derive expansions are expected to implement
// actually is there and behaves, since wrong usage only shows up per type.

#[test]
fn new() {
    let v = Vec2::new(0.0, 1.0);
    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 1.0);

    let v = Vec3::new(0.0, 1.0, 2.0);
    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 1.0);
    assert_eq!(v.z, 2.0);
}

#[test]
fn zeros_ones() {
    assert_eq!(Vec2::zeros(), Vec2::new(0, 0));
    assert_eq!(Vec2::ones(), Vec2::new(1, 1));
    assert_eq!(Vec3::zeros(), Vec3::new(0, 0, 0));
    assert_eq!(Vec3::ones(), Vec3::new(1, 1, 1));
}

#[test]
fn splat() {
    assert_eq!(Vec3::from(2.0), Vec3::new(2.0, 2.0, 2.0));
}

#[test]
fn has_nans() {
    // The constructor should catch NaNs in debug
    let result = panic::catch_unwind(|| Vec3::new(f32::NAN, 0.0, 0.0));
    assert!(result.is_err());
}

#[test]
fn index() {
    let v = Vec3::new(0.0, 1.0, 2.0);
    assert_eq!(v[0], v.x);
    assert_eq!(v[1], v.y);
    assert_eq!(v[2], v.z);

    let mut v = v;
    v[1] = 3.0;
    assert_eq!(v.y, 3.0);
}

#[test]
fn ops() {
    assert_eq!(
        Vec3::new(1.0, 2.0, 3.0) + Vec3::new(4.0, 5.0, 6.0),
        Vec3::new(5.0, 7.0, 9.0)
    );
    assert_eq!(
        Vec3::new(4.0, 5.0, 6.0) - Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(3.0, 3.0, 3.0)
    );
    assert_eq!(-Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 2.0, -3.0));
    assert_eq!(Vec3::new(1.0, 2.0, 3.0) * 2.0, Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(Vec3::new(2.0, 4.0, 6.0) / 2.0, Vec3::new(1.0, 2.0, 3.0));

    let mut v = Vec3::new(1.0, 2.0, 3.0);
    v += Vec3::ones();
    assert_eq!(v, Vec3::new(2.0, 3.0, 4.0));
    v -= Vec3::ones();
    assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
    v *= 2.0;
    assert_eq!(v, Vec3::new(2.0, 4.0, 6.0));
    v /= 2.0;
    assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn dot() {
    assert_eq!(
        Vec3::new(1.0, 2.0, 3.0).dot(Vec3::new(4.0, 5.0, 6.0)),
        32.0
    );
    // Perpendicular
    assert_eq!(
        Vec3::new(1.0, 0.0, 0.0).dot(Vec3::new(0.0, 1.0, 0.0)),
        0.0
    );
}

#[test]
fn cross() {
    assert_eq!(
        Vec3::new(1.0, 0.0, 0.0).cross(Vec3::new(0.0, 1.0, 0.0)),
        Vec3::new(0.0, 0.0, 1.0)
    );
    assert_eq!(
        Vec3::new(0.0, 1.0, 0.0).cross(Vec3::new(1.0, 0.0, 0.0)),
        Vec3::new(0.0, 0.0, -1.0)
    );
}

#[test]
fn len() {
    assert_eq!(Vec3::new(2.0, 0.0, 0.0).len_sqr(), 4.0);
    assert_eq!(Vec3::new(2.0, 0.0, 0.0).len(), 2.0);
    assert_abs_diff_eq!(Vec3::new(1.0, 2.0, 2.0).len(), 3.0);
}

#[test]
fn normalized() {
    assert_abs_diff_eq!(
        Vec3::new(3.0, 0.0, 0.0).normalized(),
        Vec3::new(1.0, 0.0, 0.0)
    );
    assert_abs_diff_eq!(Vec3::new(1.0, 2.0, -2.0).normalized().len(), 1.0);
}

#[test]
fn min_max() {
    let a = Vec3::new(1.0, 5.0, 3.0);
    let b = Vec3::new(4.0, 2.0, 6.0);
    assert_eq!(a.min(b), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(a.max(b), Vec3::new(4.0, 5.0, 6.0));

    assert_eq!(a.min_comp(), 1.0);
    assert_eq!(a.max_comp(), 5.0);
    assert_eq!(a.max_dimension(), 1);
    assert_eq!(Vec3::new(1.0, 2.0, 3.0).max_dimension(), 2);
    assert_eq!(Vec3::new(3.0, 2.0, 1.0).max_dimension(), 0);
}

#[test]
fn reflected() {
    let n = Vec3::new(0.0, 1.0, 0.0);
    let v = Vec3::new(1.0, -1.0, 0.0);
    assert_abs_diff_eq!(v.reflected(n), Vec3::new(1.0, 1.0, 0.0));

    // Reflection is an involution
    let n = Vec3::new(0.36, 0.48, 0.8).normalized();
    let v = Vec3::new(0.4, -1.2, 2.1);
    assert_relative_eq!(v.reflected(n).reflected(n), v, max_relative = 1e-6);
}

#[test]
fn approx_eqs() {
    assert_abs_diff_eq!(Vec3::<f32>::zeros(), Vec3::<f32>::zeros());
    assert_abs_diff_eq!(
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(1.0 + 1e-8, 1.0, 1.0 - 1e-8)
    );
    assert_relative_eq!(
        Vec3::new(1000.0, 0.0, 0.0),
        Vec3::new(1000.001, 0.0, 0.0),
        max_relative = 1e-5
    );
}
