mod support;

use meshcleave::{Plane, plane::active_planes};
use nalgebra::{Point3, Vector3};
use support::approx_eq;

#[test]
fn evaluate_is_signed_value() {
    let plane = Plane::new(0.0, 0.0, 1.0, -2.0);
    assert!(approx_eq(plane.evaluate(&Point3::new(5.0, -3.0, 3.0)), 1.0, 1e-6));
    assert!(approx_eq(plane.evaluate(&Point3::new(0.0, 0.0, 0.0)), -2.0, 1e-6));
}

#[test]
fn on_plane_points_are_not_positive() {
    let plane = Plane::new(1.0, 0.0, 0.0, 0.0);
    assert!(!plane.is_positive(&Point3::new(0.0, 4.0, 4.0)));
    assert!(plane.is_positive(&Point3::new(1e-6, 0.0, 0.0)));
    assert!(!plane.is_positive(&Point3::new(-1.0, 0.0, 0.0)));
}

#[test]
fn normalize_scales_all_coefficients() {
    let mut plane = Plane::new(0.0, 3.0, 4.0, 10.0);
    assert!(plane.normalize());
    assert!(approx_eq(plane.normal().norm(), 1.0, 1e-6));
    assert!(approx_eq(plane.b, 0.6, 1e-6));
    assert!(approx_eq(plane.c, 0.8, 1e-6));
    assert!(approx_eq(plane.d, 2.0, 1e-6));
    // a normalized plane evaluates to the signed distance
    assert!(approx_eq(plane.evaluate(&Point3::new(0.0, 0.0, 0.0)), 2.0, 1e-6));
}

#[test]
fn tiny_normal_is_left_alone() {
    let mut plane = Plane::new(1e-6, 0.0, 0.0, 1.0);
    let before = plane;
    assert!(!plane.normalize());
    assert_eq!(plane, before);
}

#[test]
fn from_normal_and_point_passes_through_point() {
    let point = Point3::new(1.0, 2.0, 3.0);
    let plane = Plane::from_normal_and_point(Vector3::new(0.0, 1.0, 0.0), &point);
    assert!(approx_eq(plane.evaluate(&point), 0.0, 1e-6));
    assert!(plane.is_positive(&Point3::new(0.0, 3.0, 0.0)));
}

#[test]
fn flip_swaps_sides() {
    let mut plane = Plane::new(1.0, 0.0, 0.0, -1.0);
    let p = Point3::new(2.0, 0.0, 0.0);
    assert!(plane.is_positive(&p));
    plane.flip();
    assert!(!plane.is_positive(&p));
}

#[test]
fn active_planes_skip_disabled_and_normalize() {
    let planes = [
        Plane::new(2.0, 0.0, 0.0, 0.0),
        Plane::disabled(0.0, 1.0, 0.0, 0.0),
        Plane::new(0.0, 0.0, 5.0, -5.0),
    ];
    let active = active_planes(&planes);
    assert_eq!(active.len(), 2);
    assert!(approx_eq(active[0].a, 1.0, 1e-6));
    assert!(approx_eq(active[1].c, 1.0, 1e-6));
    assert!(approx_eq(active[1].d, -1.0, 1e-6));
    assert!(active.iter().all(|p| p.enabled));
}
