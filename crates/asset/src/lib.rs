//! Asset loading: triangle meshes and their GPU-ready flat layout.
//! Mesh files are parsed once at start-up into an immutable [`Mesh`],
//! then flattened by [`build`] into the buffers the renderer uploads.

pub mod buffers;
pub mod error;
pub mod format;
pub mod mesh;
pub mod normals;
pub mod obj;

pub use buffers::{FlatBuffers, build};
pub use error::{MeshError, MeshResult};
pub use format::{MeshFormat, load};
pub use mesh::{Mesh, Triangle};
