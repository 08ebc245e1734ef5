//! Vertex normals from triangle geometry.

use crate::mesh::Triangle;

/// Normal assigned to vertices that touch no (non-degenerate) triangle.
pub const FALLBACK_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Area-weighted vertex normals.
///
/// Each face normal (cross product of two edges, so its length is twice the
/// triangle area) is accumulated at its three corners, then normalized.
/// Accumulation runs in `f64` so neither huge nor tiny but valid `f32`
/// coordinates overflow or vanish. Triangles must index into `positions`.
pub fn compute_vertex_normals(positions: &[[f32; 3]], triangles: &[Triangle]) -> Vec<[f32; 3]> {
    let mut sums = vec![[0.0_f64; 3]; positions.len()];
    let wide = |p: [f32; 3]| p.map(f64::from);

    for tri in triangles {
        let [a, b, c] = tri.indices.map(|i| i as usize);
        let (pa, pb, pc) = (wide(positions[a]), wide(positions[b]), wide(positions[c]));

        let e1 = [pb[0] - pa[0], pb[1] - pa[1], pb[2] - pa[2]];
        let e2 = [pc[0] - pa[0], pc[1] - pa[1], pc[2] - pa[2]];
        let n = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];

        for v in [a, b, c] {
            for k in 0..3 {
                sums[v][k] += n[k];
            }
        }
    }

    sums.iter()
        .map(|n| {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            if len > 0.0 && len.is_finite() {
                [(n[0] / len) as f32, (n[1] / len) as f32, (n[2] / len) as f32]
            } else {
                FALLBACK_NORMAL
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-6)
    }

    #[test]
    fn flat_ccw_triangle_faces_plus_z() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let normals = compute_vertex_normals(&positions, &[Triangle::new(0, 1, 2)]);
        assert!(normals.iter().all(|&n| approx(n, [0.0, 0.0, 1.0])));
    }

    #[test]
    fn shared_edge_averages_faces() {
        // Two faces folded at 90 degrees along the X axis.
        let positions = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, -1.0],
        ];
        let tris = [Triangle::new(0, 1, 2), Triangle::new(0, 1, 3)];
        let normals = compute_vertex_normals(&positions, &tris);

        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert!(approx(normals[0], [0.0, s, s]));
        assert!(approx(normals[2], [0.0, 0.0, 1.0]));
        assert!(approx(normals[3], [0.0, 1.0, 0.0]));
    }

    #[test]
    fn huge_coordinates_stay_finite() {
        let positions = [[0.0, 0.0, 0.0], [1e20, 0.0, 0.0], [0.0, 1e20, 0.0]];
        let normals = compute_vertex_normals(&positions, &[Triangle::new(0, 1, 2)]);
        assert!(normals.iter().all(|&n| approx(n, [0.0, 0.0, 1.0])));
    }

    #[test]
    fn tiny_triangle_keeps_its_orientation() {
        // XZ-plane triangle with 5e-6 edges, wound to face +Y.
        let positions = [[0.0, 0.0, 0.0], [0.0, 0.0, 5e-6], [5e-6, 0.0, 0.0]];
        let normals = compute_vertex_normals(&positions, &[Triangle::new(0, 1, 2)]);
        assert!(normals.iter().all(|&n| approx(n, [0.0, 1.0, 0.0])));
    }

    #[test]
    fn isolated_and_degenerate_vertices_use_fallback() {
        let positions = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [5.0; 3]];
        let normals = compute_vertex_normals(&positions, &[Triangle::new(0, 1, 2)]);
        assert!(normals.iter().all(|&n| n == FALLBACK_NORMAL));
    }
}
