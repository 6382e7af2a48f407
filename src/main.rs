//! meshcleave CLI - slice a mesh with planes and optionally explode and export the result.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use meshcleave::float_types::Real;
use meshcleave::segment::VertexDedup;
use meshcleave::{ExplosionMode, Mesh, Plane, Slicer, SlicerConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meshcleave")]
#[command(about = "Partition a mesh into convex regions with cutting planes", long_about = None)]
struct Cli {
    /// OFF file to slice (default: a 2x2x2 cube centered at the origin)
    input: Option<PathBuf>,

    /// Cutting plane `a,b,c,d` for `ax + by + cz + d = 0`, applied in the order given
    #[arg(short, long = "plane", value_parser = parse_plane, allow_hyphen_values = true)]
    planes: Vec<Plane>,

    /// Explosion factor in [0, 2]
    #[arg(short, long)]
    explode: Option<Real>,

    /// Explode every triangle separately instead of inside its segment
    #[arg(long, requires = "explode")]
    extreme: bool,

    /// Vertex sharing inside segments
    #[arg(long, value_enum, default_value_t = Dedup::None)]
    dedup: Dedup,

    /// Write the (possibly exploded) segments to this STL file
    #[arg(long)]
    stl: Option<PathBuf>,

    /// Write binary instead of ASCII STL
    #[arg(long, requires = "stl")]
    binary: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Dedup {
    None,
    Position,
    Full,
}

impl From<Dedup> for VertexDedup {
    fn from(dedup: Dedup) -> Self {
        match dedup {
            Dedup::None => VertexDedup::None,
            Dedup::Position => VertexDedup::PositionOnly,
            Dedup::Full => VertexDedup::FullAttributes,
        }
    }
}

fn parse_plane(text: &str) -> Result<Plane, String> {
    let coefficients = text
        .split(',')
        .map(|c| c.trim().parse::<Real>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid plane `{text}`: {e}"))?;
    match coefficients[..] {
        [a, b, c, d] => Ok(Plane::new(a, b, c, d)),
        _ => Err(format!("invalid plane `{text}`: expected four values a,b,c,d")),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mesh = match &cli.input {
        Some(path) => Mesh::from_off_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            info!("no input given, slicing the built-in cube");
            Mesh::cube(2.0)
        },
    };

    let config = SlicerConfig::default().with_dedup(cli.dedup.into());
    let mut slicer = Slicer::with_config(mesh, config);
    let report = slicer.slice(&cli.planes)?;
    println!("{report}");

    if let Some(factor) = cli.explode {
        slicer.explode(factor, ExplosionMode::from(cli.extreme))?;
        println!(
            "Exploded with factor {factor:.2}: {} segments",
            slicer.segment_count()
        );
    }

    if let Some(path) = &cli.stl {
        let bytes = if cli.binary {
            slicer.to_stl_binary()?
        } else {
            slicer.to_stl_ascii("meshcleave").into_bytes()
        };
        std::fs::write(path, bytes)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    Ok(())
}
