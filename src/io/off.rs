//! Reading meshes from Object File Format (`.off`) files.
//!
//! ```text
//! OFF
//! # comment
//! <vertex count> <face count> <edge count>
//! x y z                  (one line per vertex, extra columns ignored)
//! n i0 i1 ... i(n-1)     (one line per face, extra columns ignored)
//! ```
//!
//! Faces with more than three corners are fan-triangulated. Every vertex is white and its
//! normal is the average of the normals of the faces around it.

use super::IoError;
use crate::float_types::Real;
use crate::mesh::{Mesh, vertex::Vertex};
use log::info;
use nalgebra::{Point3, Vector3};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Upper bound on buffer pre-allocation from header counts, which are not trusted.
const MAX_PREALLOC: usize = 1 << 16;

/// Non-empty lines with `#` comments removed, numbered from 1.
fn content_lines(
    reader: impl BufRead,
) -> impl Iterator<Item = Result<(usize, String), std::io::Error>> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| {
            line.map(|mut line| {
                if let Some(start) = line.find('#') {
                    line.truncate(start);
                }
                (i + 1, line)
            })
        })
        .filter(|line| !matches!(line, Ok((_, text)) if text.trim().is_empty()))
}

fn next_line(
    lines: &mut impl Iterator<Item = Result<(usize, String), std::io::Error>>,
    what: &str,
) -> Result<(usize, String), IoError> {
    match lines.next() {
        Some(line) => Ok(line?),
        None => Err(IoError::MalformedInput(format!(
            "unexpected end of file, expected {what}"
        ))),
    }
}

fn parse_counts(tokens: &[&str], line: usize) -> Result<(usize, usize), IoError> {
    if tokens.len() < 2 {
        return Err(IoError::MalformedInput(format!(
            "line {line}: expected vertex and face counts"
        )));
    }
    Ok((tokens[0].parse()?, tokens[1].parse()?))
}

/// Read an OFF mesh from `reader`.
pub fn read_off<R: BufRead>(reader: R) -> Result<Mesh, IoError> {
    let mut lines = content_lines(reader);

    let (line_no, header) = next_line(&mut lines, "OFF header")?;
    let header = header.trim();
    let Some(rest) = header.strip_prefix("OFF") else {
        return Err(IoError::MalformedInput(format!(
            "line {line_no}: not an OFF file (header `{header}`)"
        )));
    };

    // counts may share the header line
    let rest: Vec<&str> = rest.split_whitespace().collect();
    let (vertex_count, face_count) = if rest.is_empty() {
        let (line_no, counts) = next_line(&mut lines, "vertex and face counts")?;
        let tokens: Vec<&str> = counts.split_whitespace().collect();
        parse_counts(&tokens, line_no)?
    } else {
        parse_counts(&rest, line_no)?
    };

    let mut vertices = Vec::with_capacity(vertex_count.min(MAX_PREALLOC));
    for _ in 0..vertex_count {
        let (line_no, text) = next_line(&mut lines, "vertex")?;
        let coords = text
            .split_whitespace()
            .take(3)
            .map(str::parse::<Real>)
            .collect::<Result<Vec<_>, _>>()?;
        let &[x, y, z] = coords.as_slice() else {
            return Err(IoError::MalformedInput(format!(
                "line {line_no}: vertex needs three coordinates"
            )));
        };
        vertices.push(Vertex::new(Point3::new(x, y, z), Vector3::zeros()));
    }

    let mut faces = Vec::with_capacity(face_count.min(MAX_PREALLOC));
    for _ in 0..face_count {
        let (line_no, text) = next_line(&mut lines, "face")?;
        let mut tokens = text.split_whitespace();
        let Some(corners) = tokens.next() else {
            return Err(IoError::MalformedInput(format!("line {line_no}: empty face")));
        };
        let corners: usize = corners.parse()?;
        let face = tokens
            .take(corners)
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()?;
        if face.len() != corners {
            return Err(IoError::MalformedInput(format!(
                "line {line_no}: face declares {corners} vertices but lists {}",
                face.len()
            )));
        }
        faces.push(face);
    }

    let mut mesh = Mesh::from_polygons(vertices, &faces)?;
    mesh.compute_vertex_normals();
    info!(
        "loaded OFF model: {vertex_count} vertices, {face_count} faces, {} triangles, \
         extent {:.3}",
        mesh.triangle_count(),
        mesh.extent()
    );
    Ok(mesh)
}

/// Parse an OFF mesh held in memory.
pub fn parse_off(text: &str) -> Result<Mesh, IoError> {
    read_off(text.as_bytes())
}

impl Mesh {
    /// Load an `.off` file.
    pub fn from_off_file(path: impl AsRef<Path>) -> Result<Mesh, IoError> {
        let file = File::open(path.as_ref())?;
        read_off(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE: &str = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";

    #[test]
    fn counts_on_header_line() {
        let mesh = parse_off("OFF 3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn normals_follow_winding() {
        let mesh = parse_off(TRIANGLE).unwrap();
        for v in mesh.vertices() {
            assert!((v.normal - Vector3::z()).norm() < 1e-6);
        }
    }

    #[test]
    fn truncated_file() {
        let err = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n").unwrap_err();
        assert!(matches!(err, IoError::MalformedInput(_)));
    }

    #[test]
    fn bad_number() {
        let err = parse_off("OFF\n3 1 0\n0 0 zero\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap_err();
        assert!(matches!(err, IoError::ParseFloat(_)));
    }
}
