use crate::{
    Mat4, Vec4,
    error::{CoreError, CoreResult},
};

/// Off-centre perspective volume given by its near-plane rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }

    /// Square 90 degree volume used by the viewer.
    pub const fn viewer_default() -> Self {
        Self::new(-0.1, 0.1, -0.1, 0.1, 0.1, 1000.0)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.near > 0.0) {
            return Err(CoreError::InvalidFrustum(format!(
                "near plane must be positive (got {})",
                self.near
            )));
        }
        if !(self.far > self.near) {
            return Err(CoreError::InvalidFrustum(format!(
                "far plane ({}) must lie beyond near plane ({})",
                self.far, self.near
            )));
        }
        if self.right == self.left || self.top == self.bottom {
            return Err(CoreError::InvalidFrustum("zero-sized near plane".into()));
        }
        Ok(())
    }

    /// Keep the vertical extent, rescale the horizontal one around its
    /// centre so that width / height == `aspect`.
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        let aspect = aspect.max(1e-6);
        let cx = 0.5 * (self.left + self.right);
        let half_w = 0.5 * (self.top - self.bottom) * aspect;
        self.left = cx - half_w;
        self.right = cx + half_w;
        self
    }

    /// Right-handed projection mapping the near plane to depth 0 and the far
    /// plane to depth 1 (wgpu clip space).
    pub fn matrix(&self) -> Mat4 {
        let Self {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = *self;
        Mat4::from_cols(
            Vec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
            Vec4::new((r + l) / (r - l), (t + b) / (t - b), -f / (f - n), -1.0),
            Vec4::new(0.0, 0.0, -f * n / (f - n), 0.0),
        )
    }
}

impl Default for Frustum {
    fn default() -> Self {
        Self::viewer_default()
    }
}
