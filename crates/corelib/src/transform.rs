use crate::{EulerRot, Mat4, Quat, Vec3};

/// Model transform with non-uniform scale (Euler XYZ rotation).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians (XYZ order).
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Translate, then scale uniformly about the origin.
    #[inline]
    pub fn from_translation_scale(translation: Vec3, scale: f32) -> Self {
        Self {
            translation,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::splat(scale),
        }
    }

    /// Placement the viewer uses for its mesh: unit-sized models land in
    /// front of a camera sitting at the origin.
    pub fn viewer_default() -> Self {
        Self::from_translation_scale(Vec3::new(0.1, -1.0, -1.5), 10.0)
    }

    /// Build matrix = T * R * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_euler.x,
            self.rotation_euler.y,
            self.rotation_euler.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.translation)
    }

    /// Inverse-transpose of [`Transform::matrix`], for transforming normals.
    /// Falls back to identity when the scale is degenerate.
    pub fn normal_matrix(&self) -> Mat4 {
        let m = self.matrix();
        if m.determinant().abs() < f32::EPSILON {
            return Mat4::IDENTITY;
        }
        m.inverse().transpose()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
