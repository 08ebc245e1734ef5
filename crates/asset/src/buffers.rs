//! Flat, upload-ready buffers derived from a [`Mesh`].

use crate::mesh::Mesh;

/// Three contiguous arrays laid out for GPU upload:
/// positions `[x0, y0, z0, x1, ...]`, normals in the same shape and
/// indices `[t0a, t0b, t0c, t1a, ...]` in triangle order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlatBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl FlatBuffers {
    pub fn build(mesh: &Mesh) -> Self {
        let positions: Vec<f32> = mesh.positions().iter().flatten().copied().collect();
        let normals: Vec<f32> = mesh.normals().iter().flatten().copied().collect();
        let indices: Vec<u32> = mesh
            .triangles()
            .iter()
            .flat_map(|t| t.indices)
            .collect();

        log::debug!(
            "Flattened mesh: {} position floats, {} normal floats, {} indices",
            positions.len(),
            normals.len(),
            indices.len()
        );

        Self {
            positions,
            normals,
            indices,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() && self.indices.is_empty()
    }

    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>, Vec<u32>) {
        (self.positions, self.normals, self.indices)
    }
}

/// Flatten `mesh` into [`FlatBuffers`]. Total and deterministic.
pub fn build(mesh: &Mesh) -> FlatBuffers {
    FlatBuffers::build(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;

    fn two_triangles() -> Mesh {
        Mesh::new(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            vec![[0.0, 0.0, 1.0]; 4],
            vec![Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)],
        )
        .unwrap()
    }

    #[test]
    fn layout_is_interleaved_per_component() {
        let flat = build(&two_triangles());
        assert_eq!(
            flat.positions,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(flat.normals.chunks(3).count(), 4);
        assert!(flat.normals.chunks(3).all(|n| n == [0.0, 0.0, 1.0]));
        assert_eq!(flat.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn lengths_follow_counts() {
        let mesh = two_triangles();
        let flat = build(&mesh);
        assert_eq!(flat.positions.len(), 3 * mesh.vertex_count());
        assert_eq!(flat.normals.len(), 3 * mesh.vertex_count());
        assert_eq!(flat.indices.len(), 3 * mesh.triangle_count());
        assert_eq!(flat.vertex_count(), 4);
        assert_eq!(flat.triangle_count(), 2);
        assert_eq!(flat.index_count(), 6);
    }

    #[test]
    fn empty_mesh_gives_empty_buffers() {
        let flat = build(&Mesh::empty());
        assert!(flat.is_empty());
        assert!(flat.positions.is_empty());
        assert!(flat.normals.is_empty());
        assert!(flat.indices.is_empty());
    }

    #[test]
    fn build_is_deterministic() {
        let mesh = two_triangles();
        let bits = |f: &FlatBuffers| -> (Vec<u32>, Vec<u32>, Vec<u32>) {
            (
                f.positions.iter().map(|v| v.to_bits()).collect(),
                f.normals.iter().map(|v| v.to_bits()).collect(),
                f.indices.clone(),
            )
        };
        assert_eq!(bits(&build(&mesh)), bits(&build(&mesh)));
    }

    #[test]
    fn into_parts_keeps_order() {
        let (p, n, i) = build(&two_triangles()).into_parts();
        assert_eq!(p.len(), 12);
        assert_eq!(n.len(), 12);
        assert_eq!(i, vec![0, 1, 2, 0, 2, 3]);
    }
}
