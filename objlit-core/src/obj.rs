/// Wavefront OBJ parser for positions, texture coordinates, normals and faces
use std::fs;
use std::path::Path;

use log::info;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, i64 as index, space0, space1},
    combinator::{all_consuming, map},
    multi::{count, many1},
    number::complete::float,
    sequence::{preceded, separated_pair, terminated, tuple},
    IResult,
};

use crate::algebra::{Vec2, Vec3};
use crate::error::{LoadError, ParseError, ParseErrorKind, Pool};
use crate::geometry::{FaceVertexRef, FlatMesh, Mesh};

/// A face corner as written in the file: 1-based, possibly negative indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawCorner {
    position: i64,
    tex_coord: Option<i64>,
    normal: Option<i64>,
}

/// Read and parse an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = parse_obj(&text)?;
    info!(
        "loaded {}: {} positions, {} texture coordinates, {} normals, {} faces",
        path.display(),
        mesh.positions.len(),
        mesh.tex_coords.len(),
        mesh.normals.len(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Read, parse and flatten an OBJ file in one step
pub fn load_flat_mesh(path: impl AsRef<Path>) -> Result<FlatMesh, LoadError> {
    Ok(load_obj(path)?.flatten()?)
}

/// Parse OBJ text. Any malformed `v`, `vt`, `vn` or `f` record fails the
/// whole parse; every other line is ignored.
pub fn parse_obj(input: &str) -> Result<Mesh, ParseError> {
    let mut mesh = Mesh::new();

    for (number, line) in input.lines().enumerate() {
        let line = line.trim();
        let (keyword, rest) = line
            .split_once(|c: char| c.is_ascii_whitespace())
            .unwrap_or((line, ""));
        let fail = |kind| ParseError {
            line: number + 1,
            kind,
        };

        match keyword {
            "v" => {
                let [x, y, z] = parse_fields::<3>("v", rest).map_err(fail)?;
                mesh.positions.push(Vec3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_fields::<2>("vt", rest).map_err(fail)?;
                mesh.tex_coords.push(Vec2::new(u, v));
            }
            "vn" => {
                let [x, y, z] = parse_fields::<3>("vn", rest).map_err(fail)?;
                mesh.normals.push(Vec3::new(x, y, z));
            }
            "f" => {
                let corners = parse_face(rest)
                    .and_then(|raw| resolve_face(&mesh, &raw))
                    .map_err(fail)?;
                mesh.add_face(corners);
            }
            _ => {}
        }
    }

    Ok(mesh)
}

fn vector<const N: usize>(input: &str) -> IResult<&str, Vec<f32>> {
    all_consuming(terminated(count(preceded(space1, float), N), space0))(input)
}

fn parse_fields<const N: usize>(keyword: &'static str, rest: &str) -> Result<[f32; N], ParseErrorKind> {
    // Re-prefix a separator so the first field parses like the others
    let input = format!(" {}", rest.trim());
    let fields = vector::<N>(&input).map(|(_, fields)| fields).ok();

    match fields.and_then(|fields| <[f32; N]>::try_from(fields).ok()) {
        Some(fields) => Ok(fields),
        None => {
            let found = rest.split_whitespace().count();
            if found == N {
                Err(ParseErrorKind::InvalidNumber {
                    keyword,
                    text: rest.trim().to_string(),
                })
            } else {
                Err(ParseErrorKind::FieldCount {
                    keyword,
                    expected: N,
                    found,
                })
            }
        }
    }
}

/// `v//n`, `v/t/n`, `v/t` or `v`
fn corner(input: &str) -> IResult<&str, RawCorner> {
    alt((
        map(separated_pair(index, tag("//"), index), |(position, normal)| RawCorner {
            position,
            tex_coord: None,
            normal: Some(normal),
        }),
        map(
            tuple((index, char('/'), index, char('/'), index)),
            |(position, _, tex_coord, _, normal)| RawCorner {
                position,
                tex_coord: Some(tex_coord),
                normal: Some(normal),
            },
        ),
        map(separated_pair(index, char('/'), index), |(position, tex_coord)| RawCorner {
            position,
            tex_coord: Some(tex_coord),
            normal: None,
        }),
        map(index, |position| RawCorner {
            position,
            tex_coord: None,
            normal: None,
        }),
    ))(input)
}

fn corners(input: &str) -> IResult<&str, Vec<RawCorner>> {
    all_consuming(terminated(many1(preceded(space1, corner)), space0))(input)
}

fn parse_face(rest: &str) -> Result<Vec<RawCorner>, ParseErrorKind> {
    let input = format!(" {}", rest.trim());
    let (_, raw) = corners(&input).map_err(|_| ParseErrorKind::InvalidFace {
        text: rest.trim().to_string(),
    })?;
    if raw.len() < 3 {
        return Err(ParseErrorKind::DegenerateFace { count: raw.len() });
    }
    Ok(raw)
}

fn resolve_face(mesh: &Mesh, raw: &[RawCorner]) -> Result<Vec<FaceVertexRef>, ParseErrorKind> {
    raw.iter()
        .map(|c| -> Result<FaceVertexRef, ParseErrorKind> {
            Ok(FaceVertexRef {
                position: resolve_index(c.position, Pool::Position, mesh.positions.len())?,
                tex_coord: c
                    .tex_coord
                    .map(|i| resolve_index(i, Pool::TexCoord, mesh.tex_coords.len()))
                    .transpose()?,
                normal: c
                    .normal
                    .map(|i| resolve_index(i, Pool::Normal, mesh.normals.len()))
                    .transpose()?,
            })
        })
        .collect()
}

/// Convert a 1-based file index to a 0-based pool index. Negative indices
/// count back from the end of the pool as it stands at this line.
fn resolve_index(index: i64, pool: Pool, len: usize) -> Result<usize, ParseErrorKind> {
    match index {
        0 => Err(ParseErrorKind::ZeroIndex),
        i if i > 0 => usize::try_from(i - 1).map_err(|_| ParseErrorKind::ZeroIndex),
        i => {
            let back = usize::try_from(i.unsigned_abs()).unwrap_or(usize::MAX);
            len.checked_sub(back)
                .ok_or(ParseErrorKind::RelativeIndexUnderflow { pool, index: i, len })
        }
    }
}
