//! Mesh file formats behind a single `load` entry point.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    error::{MeshError, MeshResult},
    mesh::Mesh,
    obj,
};

/// Supported mesh description formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Wavefront OBJ text.
    Obj,
}

impl MeshFormat {
    pub const ALL: &'static [MeshFormat] = &[MeshFormat::Obj];

    /// File extensions (lowercase, without dot) handled by this format.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            MeshFormat::Obj => &["obj"],
        }
    }

    /// Case-insensitive lookup by extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.extensions().contains(&ext.as_str()))
    }

    pub fn from_path(path: impl AsRef<Path>) -> MeshResult<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| MeshError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    pub fn load_from_reader<R: BufRead>(self, reader: R) -> MeshResult<Mesh> {
        match self {
            MeshFormat::Obj => obj::load_obj_from_reader(reader),
        }
    }

    /// Open `path` and parse it as this format, ignoring its extension.
    pub fn load_from_path(self, path: impl AsRef<Path>) -> MeshResult<Mesh> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| MeshError::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loading {:?} mesh from {}", self, path.display());
        self.load_from_reader(BufReader::new(file))
    }
}

/// Load a mesh, picking the parser from the file extension.
pub fn load(path: impl AsRef<Path>) -> MeshResult<Mesh> {
    let path = path.as_ref();
    MeshFormat::from_path(path)?.load_from_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_lookup_ignores_case() {
        assert_eq!(MeshFormat::from_extension("obj"), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_extension("OBJ"), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_extension("ply"), None);
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = MeshFormat::from_path("models/bunny.stl").unwrap_err();
        assert!(matches!(err, MeshError::UnsupportedFormat { .. }));
        assert!(MeshFormat::from_path("bunny").is_err());
    }

    #[test]
    fn reader_dispatch() {
        let mesh = MeshFormat::Obj
            .load_from_reader("v 0 0 0\nvn 0 0 1\n".as_bytes())
            .unwrap();
        assert_eq!(mesh.vertex_count(), 1);
    }
}
