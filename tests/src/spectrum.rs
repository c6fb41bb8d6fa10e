use approx::assert_abs_diff_eq;

use hikari::math::Spectrum;

#[test]
fn ops() {
    let a = Spectrum::new(0.1, 0.2, 0.3);
    let b = Spectrum::new(0.4, 0.5, 0.6);
    assert_abs_diff_eq!(a + b, Spectrum::new(0.5, 0.7, 0.9));
    assert_abs_diff_eq!(a * b, Spectrum::new(0.04, 0.1, 0.18));
    assert_abs_diff_eq!(a * 2.0, Spectrum::new(0.2, 0.4, 0.6));

    let mut c = a;
    c += b;
    assert_abs_diff_eq!(c, a + b);
    c *= 2.0;
    assert_abs_diff_eq!(c, (a + b) * 2.0);
}

#[test]
fn splat() {
    assert_eq!(Spectrum::from(0.5), Spectrum::new(0.5, 0.5, 0.5));
}

#[test]
fn is_black() {
    assert!(Spectrum::<f32>::zeros().is_black());
    assert!(!Spectrum::new(0.0, 0.1, 0.0).is_black());
}

#[test]
fn max_to_one() {
    // Values within range pass through untouched
    let c = Spectrum::new(0.2, 0.4, 1.0);
    assert_eq!(c.max_to_one(), c);

    // Overbright values scale uniformly by the largest channel
    let c = Spectrum::new(0.5, 1.0, 2.0);
    assert_abs_diff_eq!(c.max_to_one(), Spectrum::new(0.25, 0.5, 1.0));
    assert_eq!(c.max_to_one().max_comp(), 1.0);
}

#[test]
fn lerp() {
    let a = Spectrum::new(0.0, 0.5, 1.0);
    let b = Spectrum::new(1.0, 0.5, 0.0);
    assert_eq!(Spectrum::lerp(a, b, 0.0), a);
    assert_eq!(Spectrum::lerp(a, b, 1.0), b);
    assert_abs_diff_eq!(Spectrum::lerp(a, b, 0.5), Spectrum::new(0.5, 0.5, 0.5));
}
