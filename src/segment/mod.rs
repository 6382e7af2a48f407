//! Segments: the mutable partition state the slicer works on.
//!
//! A [`Segment`] owns its vertex and index buffers, the [`RegionCode`] recording which side
//! of every processed plane it lies on, a display color, and a *rest pose* (the vertex
//! positions saved when the segment was finalized) that explosion displacements are undone
//! against.

use crate::float_types::{MIN_EDGE_LENGTH, MIN_TRIANGLE_AREA, Real};
use crate::mesh::{
    Mesh,
    vertex::{Color, Vertex},
};
use log::{debug, warn};
use nalgebra::{Point3, Vector3};

mod dedup;
mod region_code;

use dedup::DedupMap;
pub use dedup::VertexDedup;
pub use region_code::RegionCode;

/// Display colors handed out to segments, cycled by output position.
pub const PALETTE: [[Real; 3]; 8] = [
    [1.0, 0.0, 0.0], // Red
    [0.0, 1.0, 0.0], // Green
    [0.0, 0.0, 1.0], // Blue
    [1.0, 1.0, 0.0], // Yellow
    [1.0, 0.0, 1.0], // Magenta
    [0.0, 1.0, 1.0], // Cyan
    [1.0, 0.5, 0.0], // Orange
    [0.5, 0.0, 1.0], // Purple
];

/// `PALETTE[index % 8]`
pub fn palette_color(index: usize) -> Color {
    Color::from(PALETTE[index % PALETTE.len()])
}

/// Thresholds below which [`Segment::add_triangle`] drops a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleLimits {
    pub min_edge_length: Real,
    pub min_triangle_area: Real,
}

impl Default for TriangleLimits {
    fn default() -> Self {
        TriangleLimits {
            min_edge_length: MIN_EDGE_LENGTH,
            min_triangle_area: MIN_TRIANGLE_AREA,
        }
    }
}

impl TriangleLimits {
    /// `true` when the triangle has an edge shorter than `min_edge_length` or an area
    /// below `min_triangle_area`.
    pub fn is_degenerate(&self, v0: &Point3<Real>, v1: &Point3<Real>, v2: &Point3<Real>) -> bool {
        let e1 = v1 - v0;
        let e2 = v2 - v1;
        let e3 = v0 - v2;
        if e1.norm() < self.min_edge_length
            || e2.norm() < self.min_edge_length
            || e3.norm() < self.min_edge_length
        {
            return true;
        }

        let area = e1.cross(&(-e3)).norm() * 0.5;
        area < self.min_triangle_area
    }
}

#[derive(Debug, Clone)]
pub struct Segment {
    vertices: Vec<Vertex>,
    /// Triangle list, stride 3, into `vertices`.
    indices: Vec<u32>,
    dedup: DedupMap,
    limits: TriangleLimits,
    region_code: RegionCode,
    color: Color,
    rest_pose: Vec<Point3<Real>>,
}

impl Default for Segment {
    fn default() -> Self {
        Segment::new(VertexDedup::default(), TriangleLimits::default())
    }
}

impl Segment {
    /// An empty segment with an empty region code, colored with the first palette entry.
    pub fn new(dedup: VertexDedup, limits: TriangleLimits) -> Self {
        Segment {
            vertices: Vec::new(),
            indices: Vec::new(),
            dedup: DedupMap::new(dedup),
            limits,
            region_code: RegionCode::new(),
            color: palette_color(0),
            rest_pose: Vec::new(),
        }
    }

    /// One segment holding every triangle of `mesh`, in mesh order. Degenerate triangles
    /// are dropped.
    pub fn from_mesh(mesh: &Mesh, dedup: VertexDedup, limits: TriangleLimits) -> Self {
        let mut segment = Segment::new(dedup, limits);
        for i in 0..mesh.triangle_count() {
            let [v0, v1, v2] = mesh.triangle(i);
            segment.add_triangle(v0, v1, v2);
        }
        segment
    }

    /// An empty segment with the same settings and color, whose region code is this one's
    /// extended by `positive`.
    pub fn child(&self, positive: bool) -> Self {
        Segment {
            region_code: self.region_code.pushed(positive),
            ..self.empty_like()
        }
    }

    /// An empty segment with the same settings, color and region code.
    pub fn empty_like(&self) -> Self {
        Segment {
            vertices: Vec::new(),
            indices: Vec::new(),
            dedup: DedupMap::new(self.dedup.mode()),
            limits: self.limits,
            region_code: self.region_code.clone(),
            color: self.color,
            rest_pose: Vec::new(),
        }
    }

    /// Append the triangle `(v0, v1, v2)`.
    ///
    /// Nothing is stored when the triangle is degenerate according to the segment's
    /// [`TriangleLimits`]; the check happens before any vertex is committed, so a rejected
    /// triangle leaves the buffers untouched. Returns whether the triangle was stored.
    pub fn add_triangle(&mut self, v0: Vertex, v1: Vertex, v2: Vertex) -> bool {
        if self.limits.is_degenerate(&v0.pos, &v1.pos, &v2.pos) {
            debug!(
                "skipped degenerate triangle ({}, {}, {})",
                v0.pos, v1.pos, v2.pos
            );
            return false;
        }

        for v in [v0, v1, v2] {
            let index = self.dedup.insert(&mut self.vertices, v);
            self.indices.push(index);
        }
        true
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub const fn region_code(&self) -> &RegionCode {
        &self.region_code
    }

    pub const fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub const fn dedup(&self) -> VertexDedup {
        self.dedup.mode()
    }

    pub const fn limits(&self) -> TriangleLimits {
        self.limits
    }

    pub fn rest_pose(&self) -> &[Point3<Real>] {
        &self.rest_pose
    }

    pub(crate) fn set_rest_pose(&mut self, rest_pose: Vec<Point3<Real>>) {
        self.rest_pose = rest_pose;
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Vertex indices of triangle `index`.
    pub fn triangle_indices(&self, index: usize) -> [usize; 3] {
        let base = index * 3;
        [
            self.indices[base] as usize,
            self.indices[base + 1] as usize,
            self.indices[base + 2] as usize,
        ]
    }

    /// The three vertices of triangle `index`.
    pub fn triangle(&self, index: usize) -> [Vertex; 3] {
        self.triangle_indices(index).map(|i| self.vertices[i])
    }

    /// All triangles, in insertion order.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        (0..self.triangle_count()).map(|i| self.triangle(i))
    }

    /// Save every vertex position as the rest pose, replacing any previous snapshot.
    pub fn snapshot_rest_pose(&mut self) {
        self.rest_pose.clear();
        self.rest_pose.extend(self.vertices.iter().map(|v| v.pos));
    }

    /// Move every vertex back to its rest-pose position. Normals and colors are untouched.
    ///
    /// When the snapshot does not have exactly one entry per vertex nothing is changed, a
    /// warning is logged and `false` is returned.
    pub fn restore_rest_pose(&mut self) -> bool {
        if self.rest_pose.len() != self.vertices.len() {
            warn!(
                "cannot reset segment [{}] positions: rest pose has {} entries for {} vertices",
                self.region_code,
                self.rest_pose.len(),
                self.vertices.len()
            );
            return false;
        }

        for (vertex, pos) in self.vertices.iter_mut().zip(&self.rest_pose) {
            vertex.pos = *pos;
        }
        true
    }

    /// Mean position of the segment's vertices, `None` when it has none.
    pub fn centroid(&self) -> Option<Point3<Real>> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.pos.coords);
        Some(Point3::from(sum / self.vertices.len() as Real))
    }
}
