//! A trait for anything which can be presented as triangles.

use crate::mesh::{Mesh, vertex::Vertex};
use crate::segment::Segment;
use crate::slicer::Slicer;

/// A triangulated 3D surface.
///
/// Anything that can present itself as a bunch of triangles in 3D
/// can automatically use all the triangle-based IO backends.
pub trait Triangulated3D {
    /// Call `f` for each triangle, in storage order.
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut([Vertex; 3]);

    /// Number of triangles `visit_triangles` would report.
    fn count_triangles(&self) -> usize {
        let mut count = 0;
        self.visit_triangles(|_| count += 1);
        count
    }
}

impl Triangulated3D for Mesh {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for i in 0..self.triangle_count() {
            f(self.triangle(i));
        }
    }

    fn count_triangles(&self) -> usize {
        self.triangle_count()
    }
}

impl Triangulated3D for Segment {
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        self.triangles().for_each(f);
    }

    fn count_triangles(&self) -> usize {
        self.triangle_count()
    }
}

/// Every segment of the current partition, exploded positions included.
impl Triangulated3D for Slicer {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for segment in self.segments() {
            segment.triangles().for_each(&mut f);
        }
    }
}
