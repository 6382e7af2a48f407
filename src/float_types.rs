// Re-export parry for the appropriate float size
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;

#[cfg(feature = "f32")]
pub use parry3d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Two positions closer than this (per component) are the same point, and a vertex whose
/// plane distance is below it lies *on* the plane.
pub const EPSILON: Real = 1e-4;

/// Shortest edge a stored triangle may have.
pub const MIN_EDGE_LENGTH: Real = 1e-5;

/// Smallest area a stored triangle may have.
pub const MIN_TRIANGLE_AREA: Real = 1e-5;

/// Vectors shorter than this are left as they are instead of being normalized.
pub const NORMAL_EPSILON: Real = 1e-4;

/// Lazily-initialized snapping tolerance used by the clipping engine.
/// Defaults to [`EPSILON`], but can be overridden:
///  1) **Build-time**: set env var `MESHCLEAVE_TOLERANCE`
///     (e.g. `MESHCLEAVE_TOLERANCE=1e-5 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before slicing anything
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

/// Returns the current snapping tolerance.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("MESHCLEAVE_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        EPSILON
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}
