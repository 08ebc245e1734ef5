//! Wavefront OBJ parser supporting positions, normals and polygonal faces.
//!
//! Texture coordinates and grouping/material directives are skipped. The
//! first malformed record aborts the whole load.

use std::{
    io::{self, BufRead},
    path::Path,
};

use crate::{
    error::{MeshError, MeshResult},
    format::MeshFormat,
    mesh::{Mesh, Triangle},
    normals::compute_vertex_normals,
};

/// Load an OBJ mesh from a file path, whatever its extension.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> MeshResult<Mesh> {
    MeshFormat::Obj.load_from_path(path)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> MeshResult<Mesh> {
    parse_obj(reader)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> MeshResult<Mesh> {
    parse_obj(io::Cursor::new(contents))
}

fn parse_obj<R: BufRead>(reader: R) -> MeshResult<Mesh> {
    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut declared_normals: Vec<[f32; 3]> = Vec::new();
    let mut triangles: Vec<Triangle> = Vec::new();
    // Normal index a face attached to each position; first reference wins.
    let mut referenced: Vec<Option<usize>> = Vec::new();
    let mut ignored = 0_usize;

    for (line_idx, line) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };
        let fields: Vec<&str> = parts.collect();
        let ctx = LineCtx {
            line: line_no,
            content: trimmed,
        };

        match tag {
            "v" => {
                if !(3..=4).contains(&fields.len()) {
                    return Err(ctx.malformed(format!(
                        "vertex expects 3 or 4 coordinates, found {}",
                        fields.len()
                    )));
                }
                let position = parse_vec3(&fields[..3], &ctx)?;
                if let Some(w) = fields.get(3) {
                    parse_f32(w, &ctx)?;
                }
                positions.push(position);
                referenced.push(None);
            }
            "vn" => {
                if fields.len() != 3 {
                    return Err(ctx.malformed(format!(
                        "normal expects 3 components, found {}",
                        fields.len()
                    )));
                }
                declared_normals.push(parse_vec3(&fields, &ctx)?);
            }
            "f" => {
                if fields.len() < 3 {
                    return Err(ctx.malformed(format!(
                        "face needs at least 3 vertices, found {}",
                        fields.len()
                    )));
                }

                let mut corners: Vec<u32> = Vec::with_capacity(fields.len());
                for token in &fields {
                    let (vi, ni) =
                        parse_face_vertex(token, positions.len(), declared_normals.len(), &ctx)?;
                    if ni.is_some() && referenced[vi].is_none() {
                        referenced[vi] = ni;
                    }
                    let index =
                        u32::try_from(vi).map_err(|_| MeshError::TooManyVertices(positions.len()))?;
                    corners.push(index);
                }

                // Triangulate fan
                for i in 1..(corners.len() - 1) {
                    triangles.push(Triangle::new(corners[0], corners[i], corners[i + 1]));
                }
            }
            _ => {
                // vt, o, g, s, usemtl, mtllib, ...
                ignored += 1;
            }
        }
    }

    if ignored > 0 {
        log::debug!("Ignored {} unsupported OBJ records", ignored);
    }

    let normals = resolve_normals(&positions, declared_normals, &referenced, &triangles);
    let mesh = Mesh::new(positions, normals, triangles)?;
    log::info!(
        "Parsed OBJ: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// One normal per position: face-referenced normals first, then declared
/// normals matched by position index, then computed ones.
fn resolve_normals(
    positions: &[[f32; 3]],
    declared: Vec<[f32; 3]>,
    referenced: &[Option<usize>],
    triangles: &[Triangle],
) -> Vec<[f32; 3]> {
    if referenced.iter().all(Option::is_none) {
        if declared.len() == positions.len() {
            return declared;
        }
        if !declared.is_empty() {
            log::warn!(
                "OBJ declares {} normals for {} vertices; computing normals from faces",
                declared.len(),
                positions.len()
            );
        }
        return compute_vertex_normals(positions, triangles);
    }

    let positional = declared.len() == positions.len();
    let mut computed: Option<Vec<[f32; 3]>> = None;
    referenced
        .iter()
        .enumerate()
        .map(|(i, slot)| match slot {
            Some(n) => declared[*n],
            None if positional => declared[i],
            None => computed.get_or_insert_with(|| compute_vertex_normals(positions, triangles))[i],
        })
        .collect()
}

struct LineCtx<'a> {
    line: usize,
    content: &'a str,
}

impl LineCtx<'_> {
    fn malformed(&self, reason: impl Into<String>) -> MeshError {
        MeshError::malformed(self.line, self.content, reason)
    }
}

fn parse_vec3(fields: &[&str], ctx: &LineCtx<'_>) -> MeshResult<[f32; 3]> {
    Ok([
        parse_f32(fields[0], ctx)?,
        parse_f32(fields[1], ctx)?,
        parse_f32(fields[2], ctx)?,
    ])
}

fn parse_f32(token: &str, ctx: &LineCtx<'_>) -> MeshResult<f32> {
    let value = token
        .parse::<f32>()
        .map_err(|_| ctx.malformed(format!("'{token}' is not a number")))?;
    if !value.is_finite() {
        return Err(ctx.malformed(format!("'{token}' is not finite")));
    }
    Ok(value)
}

/// Resolve `v`, `v/t`, `v//n` or `v/t/n` into a 0-based position index and
/// an optional 0-based normal index.
fn parse_face_vertex(
    token: &str,
    pos_count: usize,
    norm_count: usize,
    ctx: &LineCtx<'_>,
) -> MeshResult<(usize, Option<usize>)> {
    let parts: Vec<&str> = token.split('/').collect();
    if parts.len() > 3 || parts[0].is_empty() {
        return Err(ctx.malformed(format!("bad face element '{token}'")));
    }

    let pos_idx = resolve_index(parts[0], pos_count, ctx)?;

    if let Some(tex) = parts.get(1).filter(|t| !t.is_empty()) {
        parse_raw_index(tex, ctx)?;
    }

    let norm_idx = match parts.get(2) {
        Some(value) if !value.is_empty() => Some(resolve_index(value, norm_count, ctx)?),
        _ => None,
    };

    Ok((pos_idx, norm_idx))
}

fn parse_raw_index(token: &str, ctx: &LineCtx<'_>) -> MeshResult<i64> {
    let raw = token
        .parse::<i64>()
        .map_err(|_| ctx.malformed(format!("invalid index '{token}'")))?;
    if raw == 0 {
        return Err(ctx.malformed("OBJ indices are 1-based; found 0"));
    }
    Ok(raw)
}

fn resolve_index(token: &str, len: usize, ctx: &LineCtx<'_>) -> MeshResult<usize> {
    let raw = parse_raw_index(token, ctx)?;
    let idx = if raw > 0 { raw - 1 } else { len as i64 + raw };

    if idx < 0 || idx as usize >= len {
        return Err(MeshError::IndexOutOfRange {
            line: ctx.line,
            index: raw,
            count: len,
        });
    }

    Ok(idx as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_triangle() {
        let src = r#"
            v 0.0 0.0 0.0
            v 1.0 0.0 0.0
            v 0.0 1.0 0.0
            f 1 2 3
        "#;
        let mesh = load_obj_from_str(src).expect("parse triangle");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.normals().len(), 3);
        assert_eq!(mesh.triangles(), &[Triangle::new(0, 1, 2)]);
    }

    #[test]
    fn single_vertex_with_declared_normal() {
        let mesh = load_obj_from_str("v 0 0 0\nvn 0 0 1\n").unwrap();
        assert_eq!(mesh.positions(), &[[0.0, 0.0, 0.0]]);
        assert_eq!(mesh.normals(), &[[0.0, 0.0, 1.0]]);
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn empty_input_is_empty_mesh() {
        let mesh = load_obj_from_str("# nothing here\n\n").unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn vertex_with_two_fields_is_malformed() {
        let err = load_obj_from_str("v 1.0 2.0\n").unwrap_err();
        assert!(matches!(err, MeshError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn non_numeric_coordinate_is_malformed() {
        let err = load_obj_from_str("v 0 0 0\nv 1 zero 0\n").unwrap_err();
        match err {
            MeshError::MalformedLine { line, content, .. } => {
                assert_eq!(line, 2);
                assert_eq!(content, "v 1 zero 0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_coordinate_is_malformed() {
        let err = load_obj_from_str("v 0 NaN 0\n").unwrap_err();
        assert!(matches!(err, MeshError::MalformedLine { .. }));
    }

    #[test]
    fn normal_with_four_fields_is_malformed() {
        let err = load_obj_from_str("vn 0 0 1 0\n").unwrap_err();
        assert!(matches!(err, MeshError::MalformedLine { .. }));
    }

    #[test]
    fn homogeneous_w_is_accepted() {
        let mesh = load_obj_from_str("v 1 2 3 1.0\n").unwrap();
        assert_eq!(mesh.positions(), &[[1.0, 2.0, 3.0]]);
    }

    #[test]
    fn zero_index_is_malformed() {
        let err = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::MalformedLine { line: 4, .. }));
    }

    #[test]
    fn face_with_two_vertices_is_malformed() {
        let err = load_obj_from_str("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::MalformedLine { line: 3, .. }));
    }

    #[test]
    fn face_beyond_vertex_count_is_out_of_range() {
        let err = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                line: 4,
                index: 4,
                count: 3
            }
        ));
    }

    #[test]
    fn negative_indices_are_relative() {
        let mesh = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
        assert_eq!(mesh.triangles(), &[Triangle::new(0, 1, 2)]);
    }

    #[test]
    fn quad_is_fan_triangulated() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(
            mesh.triangles(),
            &[Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)]
        );
    }

    #[test]
    fn face_referenced_normals_follow_positions() {
        let src = r#"
            v 0 0 0
            v 1 0 0
            v 0 1 0
            vn 1 0 0
            vn 0 1 0
            vt 0 0
            f 1/1/2 2//1 3//2
        "#;
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(
            mesh.normals(),
            &[[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn unreferenced_vertices_get_computed_normals() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 9 9 9\nvn 1 0 0\nf 1//1 2 3\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.normals()[0], [1.0, 0.0, 0.0]);
        assert_eq!(mesh.normals()[1], [0.0, 0.0, 1.0]);
        assert_eq!(mesh.normals()[3], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn mixed_references_keep_positional_normals() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0 0\nvn 0 1 0\nvn 0 0 -1\nf 1//1 2 3\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(
            mesh.normals(),
            &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]]
        );
    }

    #[test]
    fn face_reference_overrides_positional_normal() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0 0\nvn 0 1 0\nvn 0 0 1\nf 1//3 2 3\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.normals()[0], [0.0, 0.0, 1.0]);
        assert_eq!(mesh.normals()[1], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn normal_reference_out_of_range() {
        let err = load_obj_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//2 2//1 3//1\n")
            .unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { count: 1, .. }));
    }

    #[test]
    fn mismatched_normal_count_falls_back_to_computed() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0 0\nf 1 2 3\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert!(mesh.normals().iter().all(|&n| n == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn unsupported_records_are_skipped() {
        let src = "mtllib a.mtl\no bunny\ng body\ns 1\nusemtl skin\nv 0 0 0\nvn 0 0 1\n";
        let mesh = load_obj_from_str(src).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
    }
}
