//! Fixed-function style lighting parameters: one directional light, one
//! material, a global ambient term.

use crate::{Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing towards the light, in eye space.
    pub direction: Vec3,
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
}

impl DirectionalLight {
    /// White diffuse light shining from `towards`; zero-length input yields +Z.
    pub fn towards(towards: Vec3) -> Self {
        let direction = towards.try_normalize().unwrap_or(Vec3::Z);
        Self {
            direction,
            ambient: Vec4::new(0.0, 0.0, 0.0, 1.0),
            diffuse: Vec4::ONE,
            specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec4::ONE,
            diffuse: Vec4::ONE,
            specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
            shininess: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    pub global_ambient: Vec4,
    pub light: DirectionalLight,
    pub material: Material,
}

impl Lighting {
    /// Per-vertex colour for an eye-space normal, viewer at infinity along +Z.
    /// Mirrors the shader; used to check lighting without a GPU.
    pub fn shade(&self, normal: Vec3) -> Vec3 {
        let n = normal.try_normalize().unwrap_or(Vec3::Z);
        let l = self.light.direction;
        let m = &self.material;

        let n_dot_l = n.dot(l).max(0.0);
        let mut color = self.global_ambient.truncate() * m.ambient.truncate()
            + self.light.ambient.truncate() * m.ambient.truncate()
            + self.light.diffuse.truncate() * m.diffuse.truncate() * n_dot_l;

        if n_dot_l > 0.0 {
            let h = (l + Vec3::Z).normalize_or_zero();
            let spec = n.dot(h).max(1e-6).powf(m.shininess);
            color += self.light.specular.truncate() * m.specular.truncate() * spec;
        }

        color.clamp(Vec3::ZERO, Vec3::ONE)
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            global_ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            light: DirectionalLight::towards(Vec3::ONE),
            material: Material::default(),
        }
    }
}
