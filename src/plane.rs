//! Half-space planes `a·x + b·y + c·z + d`.

use crate::float_types::{NORMAL_EPSILON, Real};
use log::debug;
use nalgebra::{Point3, Vector3};

/// A plane in 3D space given by the coefficients of `a·x + b·y + c·z + d = 0`.
///
/// The sign of [`Plane::evaluate`] decides the side of a point. Once normalized, the
/// value is the signed distance to the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub a: Real,
    pub b: Real,
    pub c: Real,
    pub d: Real,
    /// Disabled planes are skipped by the slicer.
    pub enabled: bool,
}

impl Plane {
    /// An enabled plane. The coefficients are stored as given; see [`Plane::normalize`].
    pub const fn new(a: Real, b: Real, c: Real, d: Real) -> Self {
        Plane {
            a,
            b,
            c,
            d,
            enabled: true,
        }
    }

    /// A plane with the same coefficients as [`Plane::new`] that the slicer will skip.
    pub const fn disabled(a: Real, b: Real, c: Real, d: Real) -> Self {
        Plane {
            a,
            b,
            c,
            d,
            enabled: false,
        }
    }

    /// Build the plane through `point` whose positive side is the one `normal` points to.
    pub fn from_normal_and_point(normal: Vector3<Real>, point: &Point3<Real>) -> Self {
        Plane::new(normal.x, normal.y, normal.z, -normal.dot(&point.coords))
    }

    /// The (not necessarily unit) normal `(a, b, c)`.
    pub fn normal(&self) -> Vector3<Real> {
        Vector3::new(self.a, self.b, self.c)
    }

    /// `a·x + b·y + c·z + d`
    #[inline]
    pub fn evaluate(&self, point: &Point3<Real>) -> Real {
        self.a * point.x + self.b * point.y + self.c * point.z + self.d
    }

    /// `true` when `point` is strictly on the positive side.
    #[inline]
    pub fn is_positive(&self, point: &Point3<Real>) -> bool {
        self.evaluate(point) > 0.0
    }

    /// Scale all four coefficients by `1 / |(a, b, c)|`.
    ///
    /// A plane whose normal is shorter than [`NORMAL_EPSILON`] is left unchanged and
    /// `false` is returned.
    pub fn normalize(&mut self) -> bool {
        let magnitude = self.normal().norm();
        if magnitude < NORMAL_EPSILON {
            debug!(
                "plane ({:.2}, {:.2}, {:.2}, {:.2}) magnitude too small ({magnitude:.6}), \
                 not normalizing",
                self.a, self.b, self.c, self.d
            );
            return false;
        }

        self.a /= magnitude;
        self.b /= magnitude;
        self.c /= magnitude;
        self.d /= magnitude;
        true
    }

    /// Normalized copy of this plane.
    pub fn normalized(&self) -> Self {
        let mut plane = *self;
        plane.normalize();
        plane
    }

    /// Reverse the plane in place, swapping its positive and negative sides.
    pub fn flip(&mut self) {
        self.a = -self.a;
        self.b = -self.b;
        self.c = -self.c;
        self.d = -self.d;
    }
}

/// The enabled planes of `planes`, in order, normalized.
pub fn active_planes(planes: &[Plane]) -> Vec<Plane> {
    planes
        .iter()
        .filter(|plane| plane.enabled)
        .map(|plane| {
            let active = plane.normalized();
            debug!(
                "active plane ({:.2}, {:.2}, {:.2}, {:.2})",
                active.a, active.b, active.c, active.d
            );
            active
        })
        .collect()
}
