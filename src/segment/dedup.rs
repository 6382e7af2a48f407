//! Optional sharing of vertices inside a segment.

use crate::float_types::{EPSILON, Real};
use crate::mesh::vertex::Vertex;
use hashbrown::HashMap;
use nalgebra::Vector3;

/// How [`Segment::add_triangle`](super::Segment::add_triangle) reuses vertices it has
/// already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VertexDedup {
    /// Every triangle gets three fresh vertices. Attributes are never shared, so each
    /// triangle keeps its own normals and colors.
    #[default]
    None,
    /// Vertices at the same position (to [`EPSILON`]) are shared, whatever their normal or
    /// color. Two co-located vertices of different color collapse into the first one stored.
    PositionOnly,
    /// Vertices are shared only when position, normal and color all match.
    FullAttributes,
}

/// Lookup key: every compared component snapped to a grid of [`EPSILON`] cells.
///
/// Points within `EPSILON` of each other but on different sides of a cell boundary get
/// different keys and are not merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct VertexKey {
    pos: [i64; 3],
    attributes: Option<[i64; 6]>,
}

impl VertexKey {
    fn new(vertex: &Vertex, mode: VertexDedup) -> Option<Self> {
        let attributes = match mode {
            VertexDedup::None => return None,
            VertexDedup::PositionOnly => None,
            VertexDedup::FullAttributes => {
                let n = quantize(&vertex.normal);
                let c = quantize(&vertex.color);
                Some([n[0], n[1], n[2], c[0], c[1], c[2]])
            },
        };
        Some(VertexKey {
            pos: quantize(&vertex.pos.coords),
            attributes,
        })
    }
}

fn quantize(v: &Vector3<Real>) -> [i64; 3] {
    [
        (v.x / EPSILON).round() as i64,
        (v.y / EPSILON).round() as i64,
        (v.z / EPSILON).round() as i64,
    ]
}

/// Per-segment index of stored vertices.
#[derive(Debug, Clone, Default)]
pub(crate) struct DedupMap {
    mode: VertexDedup,
    map: HashMap<VertexKey, u32>,
}

impl DedupMap {
    pub(crate) fn new(mode: VertexDedup) -> Self {
        DedupMap {
            mode,
            map: HashMap::new(),
        }
    }

    pub(crate) const fn mode(&self) -> VertexDedup {
        self.mode
    }

    /// Index of `vertex` in `vertices`, appending it when no equivalent is stored yet.
    pub(crate) fn insert(&mut self, vertices: &mut Vec<Vertex>, vertex: Vertex) -> u32 {
        let Some(key) = VertexKey::new(&vertex, self.mode) else {
            vertices.push(vertex);
            return (vertices.len() - 1) as u32;
        };

        *self.map.entry(key).or_insert_with(|| {
            vertices.push(vertex);
            (vertices.len() - 1) as u32
        })
    }
}
