/// Line-oriented mesh source reader (`v x y z` / `f a b c`)
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{char, digit1, space0, space1},
    combinator::{eof, map_res, opt, peek},
    multi::many1,
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::error::{Error, Result};
use crate::geometry::{Mesh, Triangle};
use crate::transform::{point, Vertex};

/// A mesh and, when parsing stopped early, the reason it stopped.
///
/// Faces read before the failure are kept.
#[derive(Debug)]
pub struct LoadedMesh {
    pub mesh: Mesh,
    pub failure: Option<Error>,
}

impl LoadedMesh {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Open and read a mesh file. Only failing to open the file is an error.
pub fn load_mesh_from_path(path: impl AsRef<Path>) -> Result<LoadedMesh> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let loaded = load_mesh_from_reader(BufReader::new(file));
    debug!(
        "loaded {} triangles from {}",
        loaded.mesh.len(),
        path.display()
    );
    Ok(loaded)
}

pub fn load_mesh_from_str(source: &str) -> LoadedMesh {
    load_mesh_from_reader(io::Cursor::new(source))
}

/// Read `v` and `f` lines until the stream ends or a line fails to parse
pub fn load_mesh_from_reader<R: BufRead>(reader: R) -> LoadedMesh {
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut mesh = Mesh::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let outcome = line
            .map_err(Error::from)
            .and_then(|line| parse_line(&line, line_no, &mut vertices, &mut mesh));

        if let Err(err) = outcome {
            warn!("mesh source parsing stopped: {}", err);
            return LoadedMesh {
                mesh,
                failure: Some(err),
            };
        }
    }

    LoadedMesh {
        mesh,
        failure: None,
    }
}

fn parse_line(line: &str, line_no: usize, vertices: &mut Vec<Vertex>, mesh: &mut Mesh) -> Result<()> {
    let line = line.trim();
    let malformed = |reason: String| Error::MalformedSource {
        line: line_no,
        reason,
    };

    match line.split_whitespace().next() {
        Some("v") => {
            let (_, (x, y, z)) =
                vertex_line(line).map_err(|e| malformed(format!("bad vertex: {}", e)))?;
            vertices.push(point(x, y, z));
        }
        Some("f") => {
            let (_, refs) =
                face_line(line).map_err(|e| malformed(format!("bad face: {}", e)))?;
            if refs.len() != 3 {
                return Err(malformed(format!(
                    "face has {} vertex references, only triangles are supported",
                    refs.len()
                )));
            }

            let mut corners = [Vertex::zeros(); 3];
            for (corner, &reference) in corners.iter_mut().zip(&refs) {
                *corner = reference
                    .checked_sub(1)
                    .and_then(|i| vertices.get(i))
                    .copied()
                    .ok_or_else(|| {
                        malformed(format!(
                            "vertex reference {} outside 1..={}",
                            reference,
                            vertices.len()
                        ))
                    })?;
            }
            let [a, b, c] = corners;
            mesh.add_triangle(Triangle::new(a, b, c));
        }
        // Comments, normals, texture coordinates, groups and blank lines
        _ => {}
    }

    Ok(())
}

/// A float that must end at whitespace or end of line
fn number(input: &str) -> IResult<&str, f32> {
    terminated(float, peek(alt_space_or_eof))(input)
}

fn alt_space_or_eof(input: &str) -> IResult<&str, &str> {
    alt((space1, eof))(input)
}

/// `v x y z`, trailing values (an optional w) ignored
fn vertex_line(input: &str) -> IResult<&str, (f32, f32, f32)> {
    preceded(
        tag("v"),
        tuple((
            preceded(space1, number),
            preceded(space1, number),
            preceded(space1, number),
        )),
    )(input)
}

/// Leading index of a `v/vt/vn` reference
fn face_ref(input: &str) -> IResult<&str, usize> {
    terminated(
        map_res(digit1, str::parse::<usize>),
        terminated(opt(preceded(char('/'), is_not(" \t"))), peek(alt_space_or_eof)),
    )(input)
}

/// `f a b c ...`, the whole line must be references
fn face_line(input: &str) -> IResult<&str, Vec<usize>> {
    terminated(
        preceded(tag("f"), many1(preceded(space1, face_ref))),
        terminated(space0, eof),
    )(input)
}
