//! Simple closed meshes, used as fixtures and as the command line default model.

use crate::float_types::Real;
use crate::mesh::{Mesh, vertex::Vertex};
use nalgebra::{Point3, Vector3};

impl Mesh {
    /// An axis-aligned box centered on the origin, built from six quads (twelve triangles).
    ///
    /// ```text
    /// Vertex Layout:
    ///     4-------5
    ///    /|      /|
    ///   0-------1 |
    ///   | |     | |
    ///   | 7-----|-6
    ///   |/      |/
    ///   3-------2
    /// ```
    ///
    /// Faces are wound counter-clockwise seen from outside.
    pub fn cuboid(width: Real, length: Real, height: Real) -> Mesh {
        let (hx, hy, hz) = (width * 0.5, length * 0.5, height * 0.5);
        let vertices = vec![
            Vertex::new(Point3::new(-hx, -hy, -hz), Vector3::zeros()), // 0
            Vertex::new(Point3::new(hx, -hy, -hz), Vector3::zeros()),  // 1
            Vertex::new(Point3::new(hx, hy, -hz), Vector3::zeros()),   // 2
            Vertex::new(Point3::new(-hx, hy, -hz), Vector3::zeros()),  // 3
            Vertex::new(Point3::new(-hx, -hy, hz), Vector3::zeros()),  // 4
            Vertex::new(Point3::new(hx, -hy, hz), Vector3::zeros()),   // 5
            Vertex::new(Point3::new(hx, hy, hz), Vector3::zeros()),    // 6
            Vertex::new(Point3::new(-hx, hy, hz), Vector3::zeros()),   // 7
        ];

        let faces = [
            vec![0, 3, 2, 1], // Bottom (-Z)
            vec![4, 5, 6, 7], // Top (+Z)
            vec![0, 1, 5, 4], // Front (-Y)
            vec![3, 7, 6, 2], // Back (+Y)
            vec![0, 4, 7, 3], // Left (-X)
            vec![1, 2, 6, 5], // Right (+X)
        ];

        Self::closed_fixture(vertices, &faces)
    }

    /// A cube with edge length `size`, centered on the origin.
    pub fn cube(size: Real) -> Mesh {
        Self::cuboid(size, size, size)
    }

    /// The corner tetrahedron `(0,0,0), (s,0,0), (0,s,0), (0,0,s)`.
    ///
    /// It only occupies the region `x + y + z <= s`, which makes it handy for checking that
    /// empty regions produce no segment.
    pub fn tetrahedron(size: Real) -> Mesh {
        let vertices = vec![
            Vertex::new(Point3::origin(), Vector3::zeros()),
            Vertex::new(Point3::new(size, 0.0, 0.0), Vector3::zeros()),
            Vertex::new(Point3::new(0.0, size, 0.0), Vector3::zeros()),
            Vertex::new(Point3::new(0.0, 0.0, size), Vector3::zeros()),
        ];
        let faces = [
            vec![0, 2, 1], // z = 0
            vec![0, 1, 3], // y = 0
            vec![0, 3, 2], // x = 0
            vec![1, 2, 3], // slanted
        ];

        Self::closed_fixture(vertices, &faces)
    }

    fn closed_fixture(vertices: Vec<Vertex>, faces: &[Vec<usize>]) -> Mesh {
        match Mesh::from_polygons(vertices, faces) {
            Ok(mut mesh) => {
                mesh.compute_vertex_normals();
                mesh
            },
            // the fixtures above only use in-range indices on non-empty vertex lists
            Err(err) => unreachable!("built-in shape failed validation: {err}"),
        }
    }
}
