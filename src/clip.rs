//! Clipping one segment against one plane.
//!
//! Every triangle of the input segment is classified by the sign of the plane at its three
//! corners. Triangles entirely on one side are copied as they are; a triangle with corners on
//! both sides is cut along the plane into one triangle on the side of the lone corner and a
//! quad, split in two, on the other side.
//!
//! ```text
//!            s                      s
//!           / \                    / \          singleton side: (s, i_sa, i_bs)
//!     i_bs +---+ i_sa  ======>  i_bs---i_sa
//!         /     \                 | \    \      majority side:  (a, b, i_bs)
//!        b-------a                b---\---a                     (a, i_bs, i_sa)
//! ```
//!
//! Every emitted triangle keeps the rotational order of its source triangle, so face
//! orientation is preserved.

use crate::float_types::Real;
use crate::mesh::vertex::Vertex;
use crate::plane::Plane;
use crate::segment::Segment;
use log::warn;

/// Where an edge meets the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeIntersection {
    /// The intersection vertex, with interpolated normal and color.
    pub vertex: Vertex,
    /// Parameter along the edge, `0` at its first endpoint and `1` at its second.
    pub t: Real,
}

/// Intersect the edge `v0 → v1` with `plane`.
///
/// * An endpoint within `epsilon` of the plane *is* the intersection and is returned
///   verbatim (`t = 0` or `t = 1`), the first endpoint winning when both qualify.
/// * Otherwise, endpoints on the same side (`d0 · d1 >= 0`) mean there is no intersection.
/// * Otherwise the vertex at `t = d0 / (d0 - d1)`, clamped to `[0, 1]`, is interpolated.
pub fn calculate_intersection(
    v0: &Vertex,
    v1: &Vertex,
    plane: &Plane,
    epsilon: Real,
) -> Option<EdgeIntersection> {
    let d0 = plane.evaluate(&v0.pos);
    let d1 = plane.evaluate(&v1.pos);

    if d0.abs() < epsilon {
        return Some(EdgeIntersection {
            vertex: *v0,
            t: 0.0,
        });
    }
    if d1.abs() < epsilon {
        return Some(EdgeIntersection {
            vertex: *v1,
            t: 1.0,
        });
    }
    let product = d0 * d1;
    if product.is_nan() || product >= 0.0 {
        return None;
    }

    let t = (d0 / (d0 - d1)).clamp(0.0, 1.0);
    Some(EdgeIntersection {
        vertex: v0.interpolate(v1, t),
        t,
    })
}

/// Counters describing one or more clip passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClipStats {
    /// Triangles copied unchanged to the positive side.
    pub kept_positive: usize,
    /// Triangles copied unchanged to the negative side.
    pub kept_negative: usize,
    /// Triangles cut along the plane.
    pub split: usize,
    /// Triangles with two coincident corners, dropped before classification.
    pub skipped_degenerate: usize,
    /// Spanning triangles whose edge intersections failed, moved whole to the majority side.
    pub fallback: usize,
}

impl ClipStats {
    pub fn merge(&mut self, other: &ClipStats) {
        self.kept_positive += other.kept_positive;
        self.kept_negative += other.kept_negative;
        self.split += other.split;
        self.skipped_degenerate += other.skipped_degenerate;
        self.fallback += other.fallback;
    }
}

/// Result of [`clip_segment_against_plane`]. A side that received no triangle is `None`.
#[derive(Debug, Clone)]
pub struct ClipOutput {
    pub positive: Option<Segment>,
    pub negative: Option<Segment>,
    pub stats: ClipStats,
}

/// Partition the triangles of `segment` between the positive and negative side of `plane`.
///
/// The children inherit the parent's settings and color; their region codes are the
/// parent's extended by `true` (positive) and `false` (negative). A corner counts as
/// positive only when `plane.evaluate` is strictly greater than zero, so corners lying on
/// the plane go with the negative side. `epsilon` is both the coincident-corner threshold
/// and the on-plane snapping distance of [`calculate_intersection`].
pub fn clip_segment_against_plane(segment: &Segment, plane: &Plane, epsilon: Real) -> ClipOutput {
    let mut positive = segment.child(true);
    let mut negative = segment.child(false);
    let mut stats = ClipStats::default();

    for triangle in segment.triangles() {
        let [v0, v1, v2] = &triangle;
        if v0.distance_to(v1) < epsilon
            || v1.distance_to(v2) < epsilon
            || v2.distance_to(v0) < epsilon
        {
            warn!("degenerate triangle detected, skipping");
            stats.skipped_degenerate += 1;
            continue;
        }

        let sides = triangle.map(|v| plane.is_positive(&v.pos));
        match sides.iter().filter(|&&side| side).count() {
            3 => {
                positive.add_triangle(*v0, *v1, *v2);
                stats.kept_positive += 1;
            },
            0 => {
                negative.add_triangle(*v0, *v1, *v2);
                stats.kept_negative += 1;
            },
            count => {
                // the corner alone on its side
                let lone_positive = count == 1;
                let k = sides.iter().position(|&side| side == lone_positive).unwrap_or(0);
                let (lone, majority) = if lone_positive {
                    (&mut positive, &mut negative)
                } else {
                    (&mut negative, &mut positive)
                };

                if split_triangle(&triangle, k, plane, epsilon, lone, majority) {
                    stats.split += 1;
                } else {
                    warn!("edge intersection calculation failed for split triangle");
                    majority.add_triangle(*v0, *v1, *v2);
                    stats.fallback += 1;
                }
            },
        }
    }

    ClipOutput {
        positive: (!positive.is_empty()).then_some(positive),
        negative: (!negative.is_empty()).then_some(negative),
        stats,
    }
}

/// Cut `triangle` whose corner `k` is alone on its side. Returns `false`, emitting nothing,
/// when either edge leaving the lone corner has no intersection.
fn split_triangle(
    triangle: &[Vertex; 3],
    k: usize,
    plane: &Plane,
    epsilon: Real,
    lone: &mut Segment,
    majority: &mut Segment,
) -> bool {
    let s = triangle[k];
    let a = triangle[(k + 1) % 3];
    let b = triangle[(k + 2) % 3];

    let (Some(i_sa), Some(i_bs)) = (
        calculate_intersection(&s, &a, plane, epsilon),
        calculate_intersection(&b, &s, plane, epsilon),
    ) else {
        return false;
    };
    let (i_sa, i_bs) = (i_sa.vertex, i_bs.vertex);

    lone.add_triangle(s, i_sa, i_bs);
    // an intersection snapped onto `a` or `b` makes one of these degenerate; add_triangle drops it
    majority.add_triangle(a, b, i_bs);
    majority.add_triangle(a, i_bs, i_sa);
    true
}
