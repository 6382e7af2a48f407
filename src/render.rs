//! CPU-side preparation of segment geometry for a single GPU upload.

use crate::segment::Segment;

/// One interleaved vertex, laid out for a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct RenderVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub normal: [f32; 3],
}

/// Where one segment's data lives inside [`RenderBuffers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRange {
    pub base_vertex: u32,
    pub first_index: usize,
    pub index_count: usize,
}

/// Every segment's vertices and indices concatenated, indices rebased on the fly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderBuffers {
    pub vertices: Vec<RenderVertex>,
    pub indices: Vec<u32>,
    pub ranges: Vec<SegmentRange>,
}

impl RenderBuffers {
    /// Concatenate `segments` in order. Each vertex takes its segment's display color in place
    /// of its own, and each segment's indices are offset by the number of vertices before it.
    #[allow(clippy::unnecessary_cast)]
    pub fn from_segments(segments: &[Segment]) -> Self {
        let vertex_count = segments.iter().map(Segment::vertex_count).sum();
        let index_count = segments.iter().map(|s| s.indices().len()).sum();
        let mut buffers = RenderBuffers {
            vertices: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(index_count),
            ranges: Vec::with_capacity(segments.len()),
        };

        for segment in segments {
            let base_vertex = buffers.vertices.len() as u32;
            let color = segment.color();
            buffers.vertices.extend(segment.vertices().iter().map(|v| RenderVertex {
                position: [v.pos.x as f32, v.pos.y as f32, v.pos.z as f32],
                color: [color.x as f32, color.y as f32, color.z as f32],
                normal: [v.normal.x as f32, v.normal.y as f32, v.normal.z as f32],
            }));

            buffers.ranges.push(SegmentRange {
                base_vertex,
                first_index: buffers.indices.len(),
                index_count: segment.indices().len(),
            });
            buffers
                .indices
                .extend(segment.indices().iter().map(|&i| i + base_vertex));
        }
        buffers
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl From<&crate::slicer::Slicer> for RenderBuffers {
    fn from(slicer: &crate::slicer::Slicer) -> Self {
        RenderBuffers::from_segments(slicer.segments())
    }
}
