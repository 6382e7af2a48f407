//! Exploded views: pushing triangles away from the model centroid, reversibly.

use crate::float_types::Real;
use crate::segment::Segment;
use log::info;
use nalgebra::{Point3, Vector3};

/// Largest accepted explosion factor.
pub const MAX_FACTOR: Real = 2.0;

/// How [`Slicer::explode`](crate::slicer::Slicer::explode) moves geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExplosionMode {
    /// Displace every triangle in place inside its segment. Undone by restoring rest poses.
    #[default]
    Distributed,
    /// Rebuild the segment list with one segment per triangle, then displace. Restoring rest
    /// poses brings the positions back but not the original segmentation; that takes a
    /// reslice.
    Extreme,
}

impl From<bool> for ExplosionMode {
    /// `true` selects [`ExplosionMode::Extreme`].
    fn from(extreme: bool) -> Self {
        if extreme {
            ExplosionMode::Extreme
        } else {
            ExplosionMode::Distributed
        }
    }
}

/// Mean position over every vertex of every segment, `None` when there are no vertices.
pub fn model_centroid(segments: &[Segment]) -> Option<Point3<Real>> {
    let (sum, count) = segments
        .iter()
        .flat_map(|segment| segment.vertices())
        .fold((Vector3::zeros(), 0usize), |(sum, count), v| {
            (sum + v.pos.coords, count + 1)
        });
    (count > 0).then(|| Point3::from(sum / count as Real))
}

/// Offset of length `distance` pointing from `center` towards `triangle_centroid`.
/// A triangle centered exactly on `center` does not move.
fn displacement(
    triangle_centroid: &Point3<Real>,
    center: &Point3<Real>,
    distance: Real,
) -> Vector3<Real> {
    (triangle_centroid - center)
        .try_normalize(Real::EPSILON)
        .map_or_else(Vector3::zeros, |direction| direction * distance)
}

/// Restore the rest pose of every segment; returns how many could be restored.
pub fn reset_to_rest_pose(segments: &mut [Segment]) -> usize {
    segments
        .iter_mut()
        .map(|segment| segment.restore_rest_pose())
        .filter(|&restored| restored)
        .count()
}

/// Displace each triangle by `factor * extent / 10` along the direction from the global
/// centroid to the triangle's centroid, on top of the current positions.
///
/// Callers restore the rest pose first; repeated calls accumulate.
pub fn explode_distributed(segments: &mut [Segment], factor: Real, extent: Real) {
    let Some(center) = model_centroid(segments) else {
        return;
    };
    let distance = factor * (extent / 10.0);
    info!("applying distributed explosion factor {factor:.2}");

    for segment in segments.iter_mut() {
        let current: Vec<Point3<Real>> = segment.vertices().iter().map(|v| v.pos).collect();
        for t in 0..segment.triangle_count() {
            let corners = segment.triangle_indices(t);
            let [p0, p1, p2] = corners.map(|i| current[i].coords);
            let centroid = Point3::from((p0 + p1 + p2) / 3.0);
            let offset = displacement(&centroid, &center, distance);

            let vertices = segment.vertices_mut();
            for i in corners {
                vertices[i].pos = current[i] + offset;
            }
        }
    }
}

/// One displaced segment per triangle of `segments`, each inheriting its parent's color and
/// region code. Each fragment's rest pose is its displaced positions minus the displacement,
/// i.e. where the triangle was before the explosion.
pub fn explode_extreme(segments: &[Segment], factor: Real, extent: Real) -> Vec<Segment> {
    let Some(center) = model_centroid(segments) else {
        return Vec::new();
    };
    let distance = factor * (extent / 10.0);
    info!("applying extreme triangle explosion factor {factor:.2}");

    let mut fragments = Vec::with_capacity(segments.iter().map(Segment::triangle_count).sum());
    for segment in segments {
        for [mut v0, mut v1, mut v2] in segment.triangles() {
            let centroid = Point3::from((v0.pos.coords + v1.pos.coords + v2.pos.coords) / 3.0);
            let offset = displacement(&centroid, &center, distance);
            v0.pos += offset;
            v1.pos += offset;
            v2.pos += offset;

            let mut fragment = segment.empty_like();
            if !fragment.add_triangle(v0, v1, v2) {
                continue;
            }
            let rest_pose = fragment.vertices().iter().map(|v| v.pos - offset).collect();
            fragment.set_rest_pose(rest_pose);
            fragments.push(fragment);
        }
    }

    info!("separated mesh into {} individual triangles", fragments.len());
    fragments
}
