//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use meshcleave::{
    Plane, Segment, Slicer,
    float_types::Real,
    mesh::vertex::{Color, Vertex},
};
use nalgebra::{Point3, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

pub fn vertex(x: Real, y: Real, z: Real) -> Vertex {
    Vertex::new(Point3::new(x, y, z), Vector3::z())
}

pub fn colored(x: Real, y: Real, z: Real, color: [Real; 3]) -> Vertex {
    Vertex::with_color(Point3::new(x, y, z), Vector3::z(), Color::from(color))
}

/// Unnormalized face normal from the winding.
pub fn face_normal(tri: &[Vertex; 3]) -> Vector3<Real> {
    (tri[1].pos - tri[0].pos).cross(&(tri[2].pos - tri[0].pos))
}

pub fn area(tri: &[Vertex; 3]) -> Real {
    face_normal(tri).norm() * 0.5
}

pub fn total_area(segments: &[Segment]) -> Real {
    segments.iter().flat_map(|s| s.triangles()).map(|t| area(&t)).sum()
}

/// Every triangle corner of every segment, in storage order.
pub fn corner_positions(slicer: &Slicer) -> Vec<Point3<Real>> {
    slicer
        .segments()
        .iter()
        .flat_map(|s| s.triangles())
        .flat_map(|t| t.map(|v| v.pos))
        .collect()
}

/// `true` when every vertex of `segment` lies on the side of each plane its region code says,
/// allowing `eps` of slack for vertices on the plane.
pub fn respects_region_code(segment: &Segment, planes: &[Plane], eps: Real) -> bool {
    segment.vertices().iter().all(|v| {
        planes.iter().enumerate().all(|(i, plane)| {
            let d = plane.evaluate(&v.pos);
            match segment.region_code().get(i) {
                Some(true) => d >= -eps,
                Some(false) => d <= eps,
                None => false,
            }
        })
    })
}
