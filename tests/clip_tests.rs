mod support;

use meshcleave::{
    Mesh, Plane, Segment, Vertex,
    clip::{calculate_intersection, clip_segment_against_plane},
    float_types::{EPSILON, Real},
    mesh::vertex::WHITE,
    segment::{TriangleLimits, VertexDedup},
};
use nalgebra::{Point3, Vector3};
use support::{approx_eq, area, colored, face_normal, total_area, vertex};

fn single(v0: Vertex, v1: Vertex, v2: Vertex) -> Segment {
    let mut segment = Segment::default();
    assert!(segment.add_triangle(v0, v1, v2));
    segment
}

#[test]
fn intersection_at_midpoint_interpolates_attributes() {
    let plane = Plane::new(1.0, 0.0, 0.0, 0.0);
    let a = colored(-1.0, 0.0, 0.0, [1.0, 0.0, 0.0]);
    let b = colored(1.0, 2.0, 0.0, [0.0, 0.0, 1.0]);
    let hit = calculate_intersection(&a, &b, &plane, EPSILON).unwrap();
    assert!(approx_eq(hit.t, 0.5, 1e-6));
    assert!((hit.vertex.pos - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
    assert!((hit.vertex.color - Vector3::new(0.5, 0.0, 0.5)).norm() < 1e-6);
}

#[test]
fn intersection_snaps_to_endpoints_on_the_plane() {
    let plane = Plane::new(1.0, 0.0, 0.0, 0.0);
    let on = vertex(5e-5, 3.0, 0.0);
    let off = vertex(1.0, 0.0, 0.0);

    let first = calculate_intersection(&on, &off, &plane, EPSILON).unwrap();
    assert_eq!(first.t, 0.0);
    assert_eq!(first.vertex, on);

    let second = calculate_intersection(&off, &on, &plane, EPSILON).unwrap();
    assert_eq!(second.t, 1.0);
    assert_eq!(second.vertex, on);
}

#[test]
fn no_intersection_on_one_side() {
    let plane = Plane::new(0.0, 0.0, 1.0, 0.0);
    let above = [vertex(0.0, 0.0, 1.0), vertex(1.0, 0.0, 2.0)];
    let below = [vertex(0.0, 0.0, -1.0), vertex(1.0, 0.0, -2.0)];
    assert!(calculate_intersection(&above[0], &above[1], &plane, EPSILON).is_none());
    assert!(calculate_intersection(&below[0], &below[1], &plane, EPSILON).is_none());
}

#[test]
fn untouched_triangles_are_copied() {
    let plane = Plane::new(0.0, 0.0, 1.0, 0.0);
    let above = single(vertex(0.0, 0.0, 1.0), vertex(1.0, 0.0, 1.0), vertex(0.0, 1.0, 1.0));
    let out = clip_segment_against_plane(&above, &plane, EPSILON);
    assert!(out.negative.is_none());
    let positive = out.positive.unwrap();
    assert_eq!(positive.triangle(0), above.triangle(0));
    assert_eq!(out.stats.kept_positive, 1);

    let below = single(vertex(0.0, 0.0, -1.0), vertex(1.0, 0.0, -1.0), vertex(0.0, 1.0, -1.0));
    let out = clip_segment_against_plane(&below, &plane, EPSILON);
    assert!(out.positive.is_none());
    assert_eq!(out.negative.unwrap().triangle_count(), 1);
    assert_eq!(out.stats.kept_negative, 1);
}

#[test]
fn triangle_in_the_plane_goes_negative() {
    let plane = Plane::new(0.0, 0.0, 1.0, 0.0);
    let flat = single(vertex(0.0, 0.0, 0.0), vertex(1.0, 0.0, 0.0), vertex(0.0, 1.0, 0.0));
    let out = clip_segment_against_plane(&flat, &plane, EPSILON);
    assert!(out.positive.is_none());
    assert_eq!(out.negative.unwrap().triangle_count(), 1);
}

#[test]
fn one_positive_corner_gives_one_plus_two() {
    let plane = Plane::new(1.0, 0.0, 0.0, 0.0);
    let tri = single(vertex(1.0, 0.0, 0.0), vertex(-1.0, 1.0, 0.0), vertex(-1.0, -1.0, 0.0));
    let out = clip_segment_against_plane(&tri, &plane, EPSILON);
    let positive = out.positive.unwrap();
    let negative = out.negative.unwrap();

    assert_eq!(positive.triangle_count(), 1);
    assert_eq!(negative.triangle_count(), 2);
    assert_eq!(out.stats.split, 1);
    assert!(positive.vertices().iter().all(|v| v.pos.x >= -EPSILON));
    assert!(negative.vertices().iter().all(|v| v.pos.x <= EPSILON));
    let whole = area(&tri.triangle(0));
    assert!(approx_eq(total_area(&[positive, negative]), whole, 1e-4));
}

#[test]
fn two_positive_corners_gives_two_plus_one() {
    let plane = Plane::new(0.0, 1.0, 0.0, 0.0);
    let tri = single(vertex(0.0, -1.0, 0.0), vertex(1.0, 1.0, 0.0), vertex(-1.0, 1.0, 0.0));
    let out = clip_segment_against_plane(&tri, &plane, EPSILON);
    assert_eq!(out.positive.unwrap().triangle_count(), 2);
    assert_eq!(out.negative.unwrap().triangle_count(), 1);
}

#[test]
fn corner_on_the_plane_produces_no_slivers() {
    let plane = Plane::new(1.0, 0.0, 0.0, 0.0);
    let tri = single(vertex(-1.0, 0.0, 0.0), vertex(1.0, 0.0, 0.0), vertex(0.0, 1.0, 0.0));
    let out = clip_segment_against_plane(&tri, &plane, EPSILON);
    let positive = out.positive.unwrap();
    let negative = out.negative.unwrap();

    assert_eq!(positive.triangle_count(), 1);
    assert_eq!(negative.triangle_count(), 1);
    assert!(approx_eq(total_area(&[positive, negative]), 1.0, 1e-5));
}

#[test]
fn winding_is_preserved() {
    let plane = Plane::new(1.0, 1.0, 0.0, -0.3).normalized();
    let tri = single(vertex(-1.0, -1.0, 0.5), vertex(2.0, -0.5, 0.0), vertex(0.0, 2.0, -0.5));
    let reference = face_normal(&tri.triangle(0));

    let out = clip_segment_against_plane(&tri, &plane, EPSILON);
    let pieces: Vec<Segment> = [out.positive, out.negative].into_iter().flatten().collect();
    assert_eq!(pieces.len(), 2);
    for triangle in pieces.iter().flat_map(|s| s.triangles()) {
        assert!(face_normal(&triangle).dot(&reference) > 0.0);
    }
}

#[test]
fn cube_across_its_middle() {
    let cube = Segment::from_mesh(&Mesh::cube(2.0), VertexDedup::None, TriangleLimits::default());
    let out = clip_segment_against_plane(&cube, &Plane::new(1.0, 0.0, 0.0, 0.0), EPSILON);
    let positive = out.positive.unwrap();
    let negative = out.negative.unwrap();

    // two untouched triangles per side, eight split triangles giving three pieces each
    assert_eq!(positive.triangle_count() + negative.triangle_count(), 28);
    assert_eq!(out.stats.kept_positive, 2);
    assert_eq!(out.stats.kept_negative, 2);
    assert_eq!(out.stats.split, 8);
    assert!(approx_eq(total_area(&[positive, negative]), 24.0, 1e-3));
}

#[test]
fn degenerate_input_is_skipped_and_counted() {
    let limits = TriangleLimits {
        min_edge_length: 0.0,
        min_triangle_area: 0.0,
    };
    let mut segment = Segment::new(VertexDedup::None, limits);
    assert!(segment.add_triangle(
        vertex(0.0, 0.0, 0.0),
        vertex(0.0, 0.0, 0.0),
        vertex(1.0, 1.0, 0.0)
    ));
    let out = clip_segment_against_plane(&segment, &Plane::new(1.0, 0.0, 0.0, -0.5), EPSILON);
    assert!(out.positive.is_none());
    assert!(out.negative.is_none());
    assert_eq!(out.stats.skipped_degenerate, 1);
}

#[test]
fn failed_intersection_keeps_triangle_on_majority_side() {
    // a non-finite corner next to the lone positive one leaves that edge without a crossing
    let broken = Vertex {
        pos: Point3::new(Real::NAN, 0.5, 0.0),
        normal: Vector3::z(),
        color: Vector3::from(WHITE),
    };
    let tri = single(vertex(1.0, 0.0, 0.0), broken, vertex(-1.0, -1.0, 0.0));
    let out = clip_segment_against_plane(&tri, &Plane::new(1.0, 0.0, 0.0, 0.0), EPSILON);

    assert_eq!(out.stats.fallback, 1);
    assert_eq!(out.stats.split, 0);
    assert!(out.positive.is_none());

    let negative = out.negative.unwrap();
    assert_eq!(negative.triangle_count(), 1);
    assert_eq!(negative.region_code().bits(), &[false]);
    let [s, a, b] = negative.triangle(0);
    assert_eq!(s.pos, Point3::new(1.0, 0.0, 0.0));
    assert!(a.pos.x.is_nan());
    assert_eq!(a.pos.y, 0.5);
    assert_eq!(b.pos, Point3::new(-1.0, -1.0, 0.0));
}

#[test]
fn children_carry_region_codes() {
    let tri = single(vertex(1.0, 0.0, 0.0), vertex(-1.0, 1.0, 0.0), vertex(-1.0, -1.0, 0.0));
    let out = clip_segment_against_plane(&tri, &Plane::new(1.0, 0.0, 0.0, 0.0), EPSILON);
    assert_eq!(out.positive.unwrap().region_code().bits(), &[true]);
    assert_eq!(out.negative.unwrap().region_code().bits(), &[false]);
}

