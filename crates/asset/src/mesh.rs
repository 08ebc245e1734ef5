//! CPU-side mesh representation produced by loaders.

use crate::error::{MeshError, MeshResult};

/// Three indices into the vertex sequences of a [`Mesh`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub indices: [u32; 3],
}

impl Triangle {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { indices: [a, b, c] }
    }
}

/// Indexed triangle mesh with one normal per position.
///
/// Fields are private: a mesh is validated once in [`Mesh::new`] and stays
/// read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Assemble a mesh, checking that normals match positions one-to-one and
    /// that every triangle index is in range.
    pub fn new(
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        triangles: Vec<Triangle>,
    ) -> MeshResult<Self> {
        if normals.len() != positions.len() {
            return Err(MeshError::InvalidMesh(format!(
                "normal count ({}) != position count ({})",
                normals.len(),
                positions.len()
            )));
        }
        if u32::try_from(positions.len()).is_err() {
            return Err(MeshError::TooManyVertices(positions.len()));
        }

        let count = positions.len();
        for (t, tri) in triangles.iter().enumerate() {
            if let Some(&idx) = tri.indices.iter().find(|&&i| i as usize >= count) {
                return Err(MeshError::InvalidMesh(format!(
                    "triangle {t} references vertex {idx} (vertex count: {count})"
                )));
            }
        }

        Ok(Self {
            positions,
            normals,
            triangles,
        })
    }

    /// Mesh with no vertices and no triangles.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    #[inline]
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.triangles.is_empty()
    }

    /// Axis-aligned bounds `(min, max)` of all positions, `None` when empty.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.positions.first()?;
        Some(
            self.positions
                .iter()
                .fold((first, first), |(mut lo, mut hi), p| {
                    for k in 0..3 {
                        lo[k] = lo[k].min(p[k]);
                        hi[k] = hi[k].max(p[k]);
                    }
                    (lo, hi)
                }),
        )
    }
}
