/// Mesh data: attribute pools, face references and the flattened draw stream
use std::ops::Range;

use log::debug;

use crate::algebra::{unit, Vec2, Vec3};
use crate::error::{IndexError, Pool};

/// One corner of a face, as 0-based indices into the attribute pools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertexRef {
    pub position: usize,
    pub tex_coord: Option<usize>,
    pub normal: Option<usize>,
}

impl FaceVertexRef {
    pub fn new(position: usize, tex_coord: Option<usize>, normal: Option<usize>) -> Self {
        Self {
            position,
            tex_coord,
            normal,
        }
    }
}

/// A mesh as declared in a geometry file: three independently indexed
/// attribute pools and the face-vertex references into them.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub tex_coords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    references: Vec<FaceVertexRef>,
    faces: Vec<Range<usize>>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a face; its corners are kept in the given order
    pub fn add_face(&mut self, corners: impl IntoIterator<Item = FaceVertexRef>) {
        let start = self.references.len();
        self.references.extend(corners);
        self.faces.push(start..self.references.len());
    }

    /// Texture coordinates are flattened only when the file declared any
    pub fn has_tex_coords(&self) -> bool {
        !self.tex_coords.is_empty()
    }

    /// Every face-vertex reference, in file order
    pub fn references(&self) -> &[FaceVertexRef] {
        &self.references
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn faces(&self) -> impl Iterator<Item = &[FaceVertexRef]> + '_ {
        self.faces.iter().map(|range| &self.references[range.clone()])
    }

    /// Resolve every reference against its pool, producing a non-indexed
    /// triangle stream in draw order.
    ///
    /// Faces with more than three corners are fan triangulated around their
    /// first corner. Corners without a normal get the normal of the triangle
    /// they are emitted in; corners without texture coordinates get `(0, 0)`
    /// when the mesh has texture coordinates at all.
    pub fn flatten(self) -> Result<FlatMesh, IndexError> {
        let corner_count = self
            .faces
            .iter()
            .map(|face| face.len().saturating_sub(2) * 3)
            .sum();
        let mut flat = FlatMesh::with_capacity(corner_count, self.has_tex_coords());

        for face in &self.faces {
            for i in 1..face.len().saturating_sub(1) {
                let first = face.start;
                self.emit_triangle([first, first + i, first + i + 1], &mut flat)?;
            }
        }

        debug!(
            "flattened {} references in {} faces into {} vertices",
            self.references.len(),
            self.faces.len(),
            flat.vertex_count()
        );
        Ok(flat)
    }

    fn emit_triangle(&self, corners: [usize; 3], flat: &mut FlatMesh) -> Result<(), IndexError> {
        let mut positions = [Vec3::zeros(); 3];
        for (slot, &reference) in positions.iter_mut().zip(&corners) {
            let index = self.references[reference].position;
            *slot = lookup(&self.positions, reference, Pool::Position, index)?;
        }
        let generated = face_normal(&positions).unwrap_or_else(Vec3::zeros);

        for (&reference, position) in corners.iter().zip(positions) {
            let corner = self.references[reference];
            let normal = match corner.normal {
                Some(index) => lookup(&self.normals, reference, Pool::Normal, index)?,
                None => generated,
            };
            flat.positions.push(position);
            flat.normals.push(normal);

            if let Some(tex_coords) = flat.tex_coords.as_mut() {
                let uv = match corner.tex_coord {
                    Some(index) => lookup(&self.tex_coords, reference, Pool::TexCoord, index)?,
                    None => Vec2::zeros(),
                };
                tex_coords.push(uv);
            }
        }
        Ok(())
    }
}

/// Unit normal of the triangle `[a, b, c]` wound counter-clockwise, `None`
/// when the corners are collinear
pub fn face_normal([a, b, c]: &[Vec3; 3]) -> Option<Vec3> {
    unit(&(b - a).cross(&(c - a)))
}

fn lookup<T: Copy>(items: &[T], reference: usize, pool: Pool, index: usize) -> Result<T, IndexError> {
    items.get(index).copied().ok_or(IndexError {
        reference,
        pool,
        index,
        len: items.len(),
    })
}

/// A fully resolved vertex of the flattened stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coord: Option<Vec2>,
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Option<Vec3> {
        face_normal(&self.vertices.map(|v| v.position))
    }
}

/// Parallel attribute arrays, one entry per emitted corner, in draw order.
/// Every three consecutive entries form a triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tex_coords: Option<Vec<Vec2>>,
}

impl FlatMesh {
    /// Floats per vertex in [`FlatMesh::interleaved`]: position, normal, uv
    pub const STRIDE: usize = 8;

    pub fn with_capacity(vertices: usize, with_tex_coords: bool) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            tex_coords: with_tex_coords.then(|| Vec::with_capacity(vertices)),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn has_tex_coords(&self) -> bool {
        self.tex_coords.is_some()
    }

    pub fn vertex(&self, i: usize) -> Option<Vertex> {
        Some(Vertex {
            position: *self.positions.get(i)?,
            normal: *self.normals.get(i)?,
            tex_coord: match &self.tex_coords {
                Some(uvs) => Some(*uvs.get(i)?),
                None => None,
            },
        })
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).filter_map(move |t| {
            Some(Triangle {
                vertices: [
                    self.vertex(t * 3)?,
                    self.vertex(t * 3 + 1)?,
                    self.vertex(t * 3 + 2)?,
                ],
            })
        })
    }

    /// Interleave the attributes into one buffer of [`FlatMesh::STRIDE`]
    /// floats per vertex. Missing texture coordinates are written as zeros.
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count() * Self::STRIDE);
        for i in 0..self.vertex_count() {
            let uv = self
                .tex_coords
                .as_ref()
                .and_then(|uvs| uvs.get(i).copied())
                .unwrap_or_else(Vec2::zeros);
            out.extend_from_slice(self.positions[i].as_slice());
            out.extend_from_slice(self.normals[i].as_slice());
            out.extend_from_slice(uv.as_slice());
        }
        out
    }

    /// Axis-aligned bounds of all positions
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.inf(p), hi.sup(p))),
        )
    }
}
