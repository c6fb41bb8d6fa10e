use approx::{assert_abs_diff_eq, assert_relative_eq};

use hikari::{
    math::{Ray, Vec3},
    shapes::{CullMode, Plane, Sphere, Triangle},
};

fn ray(o: Vec3<f32>, d: Vec3<f32>) -> Ray<f32> {
    Ray::new(o, d.normalized())
}

#[test]
fn sphere_hit() {
    let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 3);
    let hit = sphere
        .intersect(&ray(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0)))
        .unwrap();

    assert_abs_diff_eq!(hit.t, 4.0);
    assert_abs_diff_eq!(hit.origin, Vec3::new(0.0, 0.0, 4.0));
    assert_abs_diff_eq!(hit.normal, Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(hit.material_index, 3);
}

#[test]
fn sphere_miss() {
    let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 0);
    // Passes more than a radius away
    assert!(sphere
        .intersect(&ray(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)))
        .is_none());
    // Points away
    assert!(sphere
        .intersect(&ray(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0)))
        .is_none());
}

#[test]
fn sphere_respects_ray_range() {
    let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 0);
    let clipped = Ray::with_bounds(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0), 1e-4, 3.0);
    assert!(sphere.intersect(&clipped).is_none());
    assert!(!sphere.intersects(&clipped));
}

#[test]
fn plane_hit() {
    let plane = Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 1);
    let hit = plane
        .intersect(&ray(Vec3::zeros(), Vec3::new(0.0, -1.0, 0.0)))
        .unwrap();

    assert_abs_diff_eq!(hit.t, 1.0);
    assert_abs_diff_eq!(hit.origin, Vec3::new(0.0, -1.0, 0.0));
    assert_eq!(hit.normal, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn plane_back_face_misses() {
    // Approached from below, against the normal's side
    let plane = Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 0);
    let r = ray(Vec3::new(0.0, -2.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    assert!(plane.intersect(&r).is_none());
    assert!(!plane.intersects(&r));
}

#[test]
fn plane_parallel_misses() {
    let plane = Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 0);
    assert!(plane
        .intersect(&ray(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)))
        .is_none());
}

fn xy_triangle(cull_mode: CullMode) -> Triangle {
    // At z = 2, normal toward -z
    Triangle::new(
        Vec3::new(-1.0, -1.0, 2.0),
        Vec3::new(0.0, 1.0, 2.0),
        Vec3::new(1.0, -1.0, 2.0),
        cull_mode,
        0,
    )
}

#[test]
fn triangle_normal_from_winding() {
    let triangle = xy_triangle(CullMode::None);
    assert_abs_diff_eq!(triangle.normal, Vec3::new(0.0, 0.0, -1.0));
}

#[test]
fn triangle_hit() {
    let triangle = xy_triangle(CullMode::None);
    let hit = triangle
        .intersect(&ray(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0)))
        .unwrap();

    assert_abs_diff_eq!(hit.t, 2.0);
    assert_abs_diff_eq!(hit.origin, Vec3::new(0.0, 0.0, 2.0));
}

#[test]
fn triangle_barycentric_misses() {
    let triangle = xy_triangle(CullMode::None);
    // Off to the side
    assert!(triangle
        .intersect(&ray(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)))
        .is_none());
    // Above the apex
    assert!(triangle
        .intersect(&ray(Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, 0.0, 1.0)))
        .is_none());
    // Inside the corner cutoff
    assert!(triangle
        .intersect(&ray(Vec3::new(0.9, 0.9, 0.0), Vec3::new(0.0, 0.0, 1.0)))
        .is_none());
}

#[test]
fn triangle_cull_modes() {
    let toward = ray(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));
    let away = ray(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -1.0));

    // The normal points toward -z so `toward` sees the front face
    assert!(xy_triangle(CullMode::None).intersect(&toward).is_some());
    assert!(xy_triangle(CullMode::None).intersect(&away).is_some());

    assert!(xy_triangle(CullMode::BackFace).intersect(&toward).is_some());
    assert!(xy_triangle(CullMode::BackFace).intersect(&away).is_none());

    assert!(xy_triangle(CullMode::FrontFace).intersect(&toward).is_none());
    assert!(xy_triangle(CullMode::FrontFace).intersect(&away).is_some());
}

#[test]
fn any_hit_inverts_culling() {
    let toward = ray(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));
    let away = ray(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -1.0));

    // Primary rays block on the front face, any-hit queries on the back one
    let triangle = xy_triangle(CullMode::BackFace);
    assert!(triangle.intersect(&toward).is_some());
    assert!(!triangle.intersects(&toward));
    assert!(triangle.intersects(&away));

    // No culling blocks either way
    let triangle = xy_triangle(CullMode::None);
    assert!(triangle.intersects(&toward));
    assert!(triangle.intersects(&away));
}

#[test]
fn degenerate_triangle_misses() {
    // All three vertices on a line
    let triangle = Triangle::new(
        Vec3::new(-1.0, 0.0, 2.0),
        Vec3::new(0.0, 0.0, 2.0),
        Vec3::new(1.0, 0.0, 2.0),
        CullMode::None,
        0,
    );
    assert!(triangle
        .intersect(&ray(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0)))
        .is_none());
    assert!(!triangle.intersects(&ray(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0))));
}

/// Reference barycentric test: intersect the triangle's plane, then check
/// the point against all three edges.
fn geometric_hit_t(triangle: &Triangle, r: &Ray<f32>) -> Option<f32> {
    let n = triangle.normal;
    let denom = n.dot(r.d);
    if denom.abs() < 1e-8 {
        return None;
    }
    let t = (triangle.v0 - r.o).dot(n) / denom;
    if t < r.t_min || t > r.t_max {
        return None;
    }
    let p = r.point(t);

    let edges = [
        (triangle.v0, triangle.v1),
        (triangle.v1, triangle.v2),
        (triangle.v2, triangle.v0),
    ];
    for (a, b) in &edges {
        if n.dot((*b - *a).cross(p - *a)) < 0.0 {
            return None;
        }
    }
    Some(t)
}

#[test]
fn moller_trumbore_matches_geometric() {
    let triangle = Triangle::new(
        Vec3::new(-1.3, -0.4, 3.0),
        Vec3::new(0.2, 1.7, 4.1),
        Vec3::new(1.5, -0.9, 3.4),
        CullMode::None,
        0,
    );

    // Rays through barycentric samples, comfortably off the edges so float
    // error can't flip the verdict between the two methods
    let mut checked_hits = 0;
    for i in 1..=8 {
        for j in 1..=(8 - i) {
            let b1 = (i as f32) * 0.1;
            let b2 = (j as f32) * 0.1;
            let target =
                triangle.v0 * (1.0 - b1 - b2) + triangle.v1 * b1 + triangle.v2 * b2;
            let r = ray(Vec3::zeros(), target);

            let reference = geometric_hit_t(&triangle, &r).expect("interior sample missed");
            let hit = triangle.intersect(&r).expect("interior sample missed");
            assert_relative_eq!(reference, hit.t, max_relative = 1e-4);
            assert_relative_eq!(r.point(reference), hit.origin, max_relative = 1e-4);
            checked_hits += 1;
        }
    }
    assert!(checked_hits > 20);

    // Samples clearly outside miss in both
    for (b1, b2) in [(-0.5f32, 0.5f32), (0.5, -0.5), (1.2, 0.4), (0.4, 1.2)] {
        let target = triangle.v0 * (1.0 - b1 - b2) + triangle.v1 * b1 + triangle.v2 * b2;
        let r = ray(Vec3::zeros(), target);
        assert!(geometric_hit_t(&triangle, &r).is_none());
        assert!(triangle.intersect(&r).is_none());
    }
}
