//! STL export of anything [`Triangulated3D`].

use crate::float_types::Real;
use crate::mesh::{Mesh, vertex::Vertex};
use crate::segment::Segment;
use crate::slicer::Slicer;
use crate::triangulated::Triangulated3D;
use nalgebra::Vector3;
use std::fmt::Write as _;
use std::io::Cursor;

/// Facet normal from the winding, or the first corner's normal when the triangle has no area.
fn facet_normal(tri: &[Vertex; 3]) -> Vector3<Real> {
    (tri[1].pos - tri[0].pos)
        .cross(&(tri[2].pos - tri[0].pos))
        .try_normalize(Real::EPSILON)
        .unwrap_or(tri[0].normal)
}

/// Convert `shape` to an **ASCII STL** string with the given solid `name`.
///
/// ```rust
/// # use meshcleave::{io::stl::to_stl_ascii, mesh::Mesh};
/// let stl = to_stl_ascii(&Mesh::cube(1.0), "cube");
/// assert!(stl.starts_with("solid cube"));
/// assert_eq!(stl.matches("facet normal").count(), 12);
/// ```
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "solid {name}");

    shape.visit_triangles(|tri| {
        let n = facet_normal(&tri);
        let _ = writeln!(out, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z);
        out.push_str("    outer loop\n");
        for v in &tri {
            let _ = writeln!(out, "      vertex {:.6} {:.6} {:.6}", v.pos.x, v.pos.y, v.pos.z);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Convert `shape` to a **binary STL** byte vector.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex as StlVertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();
    shape.visit_triangles(|tri| {
        let n = facet_normal(&tri);
        #[allow(clippy::unnecessary_cast)]
        {
            triangles.push(Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.map(|v| {
                    StlVertex::new([v.pos.x as f32, v.pos.y as f32, v.pos.z as f32])
                }),
            });
        }
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl Mesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }
    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }
}

impl Segment {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }
    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }
}

impl Slicer {
    /// All segments in their current (possibly exploded) positions as one solid.
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }
    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }
}
