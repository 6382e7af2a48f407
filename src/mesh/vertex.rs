//! Struct and functions for working with the `Vertex`s segments are built from.

use crate::float_types::{NORMAL_EPSILON, Real};
use nalgebra::{Point3, Vector3};

/// An RGB triple in `[0, 1]`.
pub type Color = Vector3<Real>;

/// The color vertices get when the source data carries none.
pub const WHITE: [Real; 3] = [1.0, 1.0, 1.0];

/// A drawable vertex, holding position, normal and color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    pub color: Color,
}

impl Vertex {
    /// Create a new white [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – (optionally non‑unit) normal; it is **copied verbatim**
    ///
    /// Non-finite components of either vector are replaced with `0.0`.
    #[inline]
    pub fn new(pos: Point3<Real>, normal: Vector3<Real>) -> Self {
        Self::with_color(pos, normal, Color::from(WHITE))
    }

    /// Create a new [`Vertex`] with an explicit color.
    pub fn with_color(mut pos: Point3<Real>, mut normal: Vector3<Real>, color: Color) -> Self {
        for c in pos.coords.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }
        for c in normal.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }

        Vertex { pos, normal, color }
    }

    /// Linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// Position and color are interpolated componentwise in model space. The normal is
    /// interpolated too and then renormalized, unless it collapsed to (almost) zero.
    pub fn interpolate(&self, other: &Vertex, t: Real) -> Vertex {
        // p(t) = p0 + t * (p1 - p0)
        let pos = self.pos + (other.pos - self.pos) * t;

        let mut normal = self.normal + (other.normal - self.normal) * t;
        let magnitude = normal.norm();
        if magnitude > NORMAL_EPSILON {
            normal /= magnitude;
        }

        let color = self.color + (other.color - self.color) * t;
        Vertex { pos, normal, color }
    }

    /// Euclidean distance between the two positions.
    pub fn distance_to(&self, other: &Vertex) -> Real {
        (self.pos - other.pos).norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_renormalizes_normal_and_blends_color() {
        let a = Vertex::with_color(Point3::origin(), Vector3::x(), Color::new(1.0, 0.0, 0.0));
        let b = Vertex::with_color(
            Point3::new(2.0, 0.0, 0.0),
            Vector3::y(),
            Color::new(0.0, 0.0, 1.0),
        );

        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid.pos, Point3::new(1.0, 0.0, 0.0));
        assert!((mid.normal.norm() - 1.0).abs() < 1e-5);
        assert!((mid.color - Color::new(0.5, 0.0, 0.5)).norm() < 1e-6);
    }

    #[test]
    fn opposite_normals_stay_zero() {
        let a = Vertex::new(Point3::origin(), Vector3::z());
        let b = Vertex::new(Point3::new(1.0, 0.0, 0.0), -Vector3::z());
        assert_eq!(a.interpolate(&b, 0.5).normal, Vector3::zeros());
    }

    #[test]
    fn non_finite_input_is_sanitised() {
        let v = Vertex::new(
            Point3::new(Real::NAN, 1.0, 2.0),
            Vector3::new(0.0, Real::INFINITY, 1.0),
        );
        assert_eq!(v.pos, Point3::new(0.0, 1.0, 2.0));
        assert_eq!(v.normal, Vector3::new(0.0, 0.0, 1.0));
    }
}
