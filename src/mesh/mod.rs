//! `Mesh` struct: the immutable, triangle-only input the slicer partitions.

use crate::errors::ValidationError;
use crate::float_types::{NORMAL_EPSILON, Real, parry3d::bounding_volume::Aabb};
use nalgebra::{Point3, Vector3};

pub mod shapes;
pub mod vertex;

use vertex::Vertex;

/// A closed polyhedral surface after triangulation.
///
/// Triangles index into `vertices`; the mesh owns both buffers, so nothing outside it ever
/// holds an address into them.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    triangles: Vec<[usize; 3]>,
    bounding_box: Aabb,
    extent: Real,
}

impl Mesh {
    /// Build a mesh from vertices and triangles, validating every index and coordinate.
    pub fn new(vertices: Vec<Vertex>, triangles: Vec<[usize; 3]>) -> Result<Self, ValidationError> {
        if vertices.is_empty() {
            return Err(ValidationError::EmptyMesh);
        }

        if let Some(bad) = vertices.iter().find(|v| !v.pos.coords.iter().all(|c| c.is_finite())) {
            return Err(ValidationError::InvalidCoordinate(bad.pos));
        }

        for (face, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i >= vertices.len()) {
                return Err(ValidationError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }

        let mut bounding_box = Aabb::new_invalid();
        for v in &vertices {
            bounding_box.take_point(v.pos);
        }
        let extents = bounding_box.extents();
        let extent = extents.x.max(extents.y).max(extents.z);

        Ok(Mesh {
            vertices,
            triangles,
            bounding_box,
            extent,
        })
    }

    /// Build a mesh from arbitrary convex polygons, fan-triangulating every face with more than
    /// three corners as `(v0, vj, vj+1)`.
    pub fn from_polygons(
        vertices: Vec<Vertex>,
        faces: &[Vec<usize>],
    ) -> Result<Self, ValidationError> {
        let mut triangles = Vec::with_capacity(faces.len());
        for (face, corners) in faces.iter().enumerate() {
            if corners.len() < 3 {
                return Err(ValidationError::TooFewVertices {
                    face,
                    count: corners.len(),
                });
            }
            if let Some(&index) = corners.iter().find(|&&i| i >= vertices.len()) {
                return Err(ValidationError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
            for j in 1..corners.len() - 1 {
                triangles.push([corners[0], corners[j], corners[j + 1]]);
            }
        }
        Self::new(vertices, triangles)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// The three vertices of triangle `index`.
    pub fn triangle(&self, index: usize) -> [Vertex; 3] {
        self.triangles[index].map(|i| self.vertices[i])
    }

    pub const fn bounding_box(&self) -> &Aabb {
        &self.bounding_box
    }

    /// The largest bounding-box dimension.
    pub const fn extent(&self) -> Real {
        self.extent
    }

    /// Replace every vertex normal with the normalized average of the face normals of the
    /// triangles that use it. Vertices no triangle references keep their normal.
    pub fn compute_vertex_normals(&mut self) {
        let mut sums = vec![Vector3::<Real>::zeros(); self.vertices.len()];
        let mut counts = vec![0usize; self.vertices.len()];

        for tri in &self.triangles {
            let [a, b, c] = tri.map(|i| self.vertices[i].pos);
            let face_normal = (b - a).cross(&(c - a));
            let face_normal = face_normal
                .try_normalize(Real::EPSILON)
                .unwrap_or_else(Vector3::zeros);
            for &i in tri {
                sums[i] += face_normal;
                counts[i] += 1;
            }
        }

        for ((vertex, sum), count) in self.vertices.iter_mut().zip(sums).zip(counts) {
            if count == 0 {
                continue;
            }
            let average = sum / count as Real;
            vertex.normal = if average.norm() > NORMAL_EPSILON {
                average.normalize()
            } else {
                average
            };
        }
    }

    /// Mean of all vertex positions.
    pub fn centroid(&self) -> Point3<Real> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords);
        Point3::from(sum / self.vertices.len() as Real)
    }
}
