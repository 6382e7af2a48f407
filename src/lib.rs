//! Partition a closed triangle mesh with an ordered list of cutting planes into convex-region
//! **segments**, each tagged with a region code recording which side of every plane it lies
//! on, and pull the pieces apart into reversible **exploded views**.
//!
//! ```
//! use meshcleave::{ExplosionMode, Mesh, Plane, Slicer};
//!
//! let mut slicer = Slicer::new(Mesh::cube(2.0));
//! slicer
//!     .slice(&[Plane::new(1.0, 0.0, 0.0, 0.0), Plane::new(0.0, 1.0, 0.0, 0.0)])
//!     .unwrap();
//! assert_eq!(slicer.segment_count(), 4);
//!
//! slicer.explode(1.5, ExplosionMode::Distributed).unwrap();
//! slicer.explode(0.0, ExplosionMode::Distributed).unwrap(); // back to rest
//! ```
//!
//! # Features
//! #### Default
//! - **f32**: use f32 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export
//!
//! #### Optional
//! - **f64**: use f64 as Real, this conflicts with f32
//! - **parallel**: use rayon to clip the segments of one plane pass concurrently

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod clip;
pub mod errors;
pub mod explode;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod plane;
pub mod render;
pub mod segment;
pub mod slicer;
pub mod triangulated;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use explode::ExplosionMode;
pub use mesh::{Mesh, vertex::Vertex};
pub use plane::Plane;
pub use segment::{RegionCode, Segment};
pub use slicer::{SliceReport, Slicer, SlicerConfig};
