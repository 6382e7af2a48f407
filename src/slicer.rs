//! The partition driver and the [`Slicer`] context that owns the mesh and its segments.
//!
//! ```
//! use meshcleave::{mesh::Mesh, plane::Plane, slicer::Slicer, explode::ExplosionMode};
//!
//! let mut slicer = Slicer::new(Mesh::cube(2.0));
//! let report = slicer.slice(&[Plane::new(1.0, 0.0, 0.0, 0.0)]).unwrap();
//! assert_eq!(report.segments.len(), 2);
//!
//! slicer.explode(1.0, ExplosionMode::Distributed).unwrap();
//! slicer.reset_to_rest_pose();
//! ```

use crate::clip::{ClipOutput, ClipStats, clip_segment_against_plane};
use crate::errors::SliceError;
use crate::explode::{self, ExplosionMode, MAX_FACTOR};
use crate::float_types::{MIN_EDGE_LENGTH, MIN_TRIANGLE_AREA, Real, tolerance};
use crate::mesh::{Mesh, vertex::Color};
use crate::plane::{Plane, active_planes};
use crate::segment::{PALETTE, RegionCode, Segment, TriangleLimits, VertexDedup};
use log::{info, warn};
use nalgebra::Point3;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Tunables of a [`Slicer`].
#[derive(Debug, Clone, PartialEq)]
pub struct SlicerConfig {
    /// On-plane snapping distance and coincident-corner threshold of the clipping engine.
    pub snap_epsilon: Real,
    pub min_edge_length: Real,
    pub min_triangle_area: Real,
    pub dedup: VertexDedup,
    pub palette: [Color; 8],
}

impl Default for SlicerConfig {
    fn default() -> Self {
        SlicerConfig {
            snap_epsilon: tolerance(),
            min_edge_length: MIN_EDGE_LENGTH,
            min_triangle_area: MIN_TRIANGLE_AREA,
            dedup: VertexDedup::default(),
            palette: PALETTE.map(Color::from),
        }
    }
}

impl SlicerConfig {
    pub const fn with_snap_epsilon(mut self, snap_epsilon: Real) -> Self {
        self.snap_epsilon = snap_epsilon;
        self
    }

    pub const fn with_triangle_limits(
        mut self,
        min_edge_length: Real,
        min_triangle_area: Real,
    ) -> Self {
        self.min_edge_length = min_edge_length;
        self.min_triangle_area = min_triangle_area;
        self
    }

    pub const fn with_dedup(mut self, dedup: VertexDedup) -> Self {
        self.dedup = dedup;
        self
    }

    pub const fn with_palette(mut self, palette: [Color; 8]) -> Self {
        self.palette = palette;
        self
    }

    pub const fn triangle_limits(&self) -> TriangleLimits {
        TriangleLimits {
            min_edge_length: self.min_edge_length,
            min_triangle_area: self.min_triangle_area,
        }
    }

    fn color(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }
}

/// One line of a [`SliceReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSummary {
    pub region_code: RegionCode,
    pub color: Color,
    pub vertex_count: usize,
    pub triangle_count: usize,
}

/// Human-readable outcome of a slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceReport {
    /// Number of planes actually applied (enabled ones).
    pub plane_count: usize,
    pub segments: Vec<SegmentSummary>,
    pub stats: ClipStats,
}

impl SliceReport {
    pub fn from_segments(segments: &[Segment], plane_count: usize, stats: ClipStats) -> Self {
        SliceReport {
            plane_count,
            segments: segments
                .iter()
                .map(|segment| SegmentSummary {
                    region_code: segment.region_code().clone(),
                    color: segment.color(),
                    vertex_count: segment.vertex_count(),
                    triangle_count: segment.triangle_count(),
                })
                .collect(),
            stats,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.segments.iter().map(|s| s.triangle_count).sum()
    }
}

impl fmt::Display for SliceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} segments with region codes:", self.segments.len())?;
        for (i, segment) in self.segments.iter().enumerate() {
            writeln!(
                f,
                "Segment {i}: Region code [{}], Color ({:.1}, {:.1}, {:.1}), \
                 Vertices: {}, Triangles: {}",
                segment.region_code,
                segment.color.x,
                segment.color.y,
                segment.color.z,
                segment.vertex_count,
                segment.triangle_count
            )?;
        }
        write!(
            f,
            "Clipped {} triangles ({} skipped as degenerate, {} fallbacks)",
            self.stats.split, self.stats.skipped_degenerate, self.stats.fallback
        )
    }
}

/// Run every plane, in order, over the segments of the previous pass, starting from a single
/// segment holding all of `mesh`.
///
/// Planes are used as given; [`Slicer::slice`] filters and normalizes them first. Children
/// are colored by their position in the growing output list of their pass. The returned
/// segments have their rest pose snapshotted.
pub fn partition(
    mesh: &Mesh,
    planes: &[Plane],
    config: &SlicerConfig,
) -> (Vec<Segment>, ClipStats) {
    let mut working = vec![Segment::from_mesh(mesh, config.dedup, config.triangle_limits())];
    working[0].set_color(config.color(0));
    let mut stats = ClipStats::default();

    for plane in planes {
        let outputs = clip_pass(&working, plane, config.snap_epsilon);

        let mut next = Vec::with_capacity(outputs.len() * 2);
        for output in outputs {
            stats.merge(&output.stats);
            for mut child in [output.positive, output.negative].into_iter().flatten() {
                child.set_color(config.color(next.len()));
                next.push(child);
            }
        }
        working = next;
    }

    for segment in &mut working {
        segment.snapshot_rest_pose();
    }
    (working, stats)
}

#[cfg(not(feature = "parallel"))]
fn clip_pass(segments: &[Segment], plane: &Plane, epsilon: Real) -> Vec<ClipOutput> {
    segments
        .iter()
        .map(|segment| clip_segment_against_plane(segment, plane, epsilon))
        .collect()
}

#[cfg(feature = "parallel")]
fn clip_pass(segments: &[Segment], plane: &Plane, epsilon: Real) -> Vec<ClipOutput> {
    segments
        .par_iter()
        .map(|segment| clip_segment_against_plane(segment, plane, epsilon))
        .collect()
}

/// Owns a mesh and the segments it is currently partitioned into.
///
/// Every operation replaces or edits the segment list as a whole before returning, so a
/// reader holding `segments()` between calls always sees a consistent state.
#[derive(Debug, Clone, Default)]
pub struct Slicer {
    mesh: Option<Mesh>,
    segments: Vec<Segment>,
    config: SlicerConfig,
    /// Active planes of the last slice, for [`Slicer::reslice`].
    planes: Vec<Plane>,
    fragmented: bool,
}

impl Slicer {
    /// A slicer bound to `mesh`, with no segments until the first [`Slicer::slice`].
    pub fn new(mesh: Mesh) -> Self {
        Self::with_config(mesh, SlicerConfig::default())
    }

    pub fn with_config(mesh: Mesh, config: SlicerConfig) -> Self {
        Slicer {
            mesh: Some(mesh),
            segments: Vec::new(),
            config,
            planes: Vec::new(),
            fragmented: false,
        }
    }

    /// Bind a new mesh, dropping all segments of the previous one.
    pub fn bind(&mut self, mesh: Mesh) {
        self.release();
        self.mesh = Some(mesh);
    }

    /// Drop the mesh and every segment buffer.
    pub fn release(&mut self) {
        self.mesh = None;
        self.segments = Vec::new();
        self.planes.clear();
        self.fragmented = false;
    }

    pub const fn is_initialized(&self) -> bool {
        self.mesh.is_some()
    }

    pub const fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub const fn config(&self) -> &SlicerConfig {
        &self.config
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Active planes used by the last slice.
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// `true` after an extreme explosion replaced the segments with per-triangle fragments.
    pub const fn is_fragmented(&self) -> bool {
        self.fragmented
    }

    /// Repartition the mesh from scratch with the enabled planes of `planes`, normalized.
    ///
    /// With no enabled plane the result is a single segment holding the whole mesh.
    pub fn slice(&mut self, planes: &[Plane]) -> Result<SliceReport, SliceError> {
        let Some(mesh) = self.mesh.as_ref() else {
            warn!("mesh slicer not initialized, ignoring slice request");
            return Err(SliceError::NotInitialized);
        };

        let active = active_planes(planes);
        let (segments, stats) = partition(mesh, &active, &self.config);
        self.segments = segments;
        self.planes = active;
        self.fragmented = false;

        let report = self.report(stats);
        info!("{report}");
        Ok(report)
    }

    /// Rerun the last slice, undoing any explosion including extreme fragmentation.
    pub fn reslice(&mut self) -> Result<SliceReport, SliceError> {
        let planes = std::mem::take(&mut self.planes);
        self.slice(&planes)
    }

    /// Summary of the current segments.
    pub fn report(&self, stats: ClipStats) -> SliceReport {
        SliceReport::from_segments(&self.segments, self.planes.len(), stats)
    }

    /// Push triangles away from the model centroid by `factor * extent / 10`.
    ///
    /// `factor` is clamped to `[0, 2]`. Every segment is first restored to its rest pose, so
    /// calls do not accumulate; a factor of zero is only that restore.
    pub fn explode(&mut self, factor: Real, mode: ExplosionMode) -> Result<(), SliceError> {
        let Some(mesh) = self.mesh.as_ref() else {
            warn!("mesh slicer not initialized, ignoring explode request");
            return Err(SliceError::NotInitialized);
        };
        if self.segments.is_empty() {
            return Ok(());
        }

        let clamped = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, MAX_FACTOR) };
        if clamped != factor {
            warn!("explosion factor {factor} outside [0, {MAX_FACTOR}], using {clamped}");
        }
        let extent = mesh.extent();

        explode::reset_to_rest_pose(&mut self.segments);
        if clamped == 0.0 {
            return Ok(());
        }

        match mode {
            ExplosionMode::Distributed => {
                explode::explode_distributed(&mut self.segments, clamped, extent);
            },
            ExplosionMode::Extreme => {
                self.segments = explode::explode_extreme(&self.segments, clamped, extent);
                self.fragmented = true;
            },
        }
        Ok(())
    }

    /// Move every segment back to its rest pose. Segments whose snapshot is out of sync are
    /// left alone. Returns the number of segments restored.
    pub fn reset_to_rest_pose(&mut self) -> usize {
        explode::reset_to_rest_pose(&mut self.segments)
    }

    /// Mean position of all current segment vertices.
    pub fn model_centroid(&self) -> Option<Point3<Real>> {
        explode::model_centroid(&self.segments)
    }
}
