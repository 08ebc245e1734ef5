//! Core types: math re-exports, model transform, projection, lighting,
//! frame statistics.

pub use glam::{EulerRot, Mat4, Quat, Vec3, Vec4, vec3};

pub mod error;
pub mod frame_stats;
pub mod lighting;
pub mod projection;
pub mod transform;

pub use error::{CoreError, CoreResult};
pub use frame_stats::FrameStats;
pub use lighting::{DirectionalLight, Lighting, Material};
pub use projection::Frustum;
pub use transform::Transform;
