//! Scene parameters and their GPU uniform layout.

use bytemuck::{Pod, Zeroable};
use corelib::{Frustum, Lighting, Transform};

/// Everything the renderer needs besides the mesh itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneSettings {
    pub transform: Transform,
    pub frustum: Frustum,
    pub lighting: Lighting,
    pub clear_color: wgpu::Color,
    /// Widen the frustum to the surface aspect ratio instead of stretching.
    pub keep_aspect: bool,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            transform: Transform::viewer_default(),
            frustum: Frustum::viewer_default(),
            lighting: Lighting::default(),
            clear_color: wgpu::Color::BLACK,
            keep_aspect: true,
        }
    }
}

/// Scene UBO; every member is a vec4/mat4 so the layout matches WGSL.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniform {
    pub mvp: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub light_dir: [f32; 4],
    pub global_ambient: [f32; 4],
    pub light_ambient: [f32; 4],
    pub light_diffuse: [f32; 4],
    pub light_specular: [f32; 4],
    pub material_ambient: [f32; 4],
    pub material_diffuse: [f32; 4],
    pub material_specular: [f32; 4],
    pub params: [f32; 4],
}

impl SceneUniform {
    pub fn new(settings: &SceneSettings, aspect: f32) -> Self {
        let frustum = if settings.keep_aspect {
            settings.frustum.with_aspect(aspect)
        } else {
            settings.frustum
        };
        // The camera sits at the origin, so eye space is world space.
        let mvp = frustum.matrix() * settings.transform.matrix();
        let lighting = &settings.lighting;
        let material = &lighting.material;

        Self {
            mvp: mvp.to_cols_array_2d(),
            normal_matrix: settings.transform.normal_matrix().to_cols_array_2d(),
            light_dir: lighting.light.direction.extend(0.0).to_array(),
            global_ambient: lighting.global_ambient.to_array(),
            light_ambient: lighting.light.ambient.to_array(),
            light_diffuse: lighting.light.diffuse.to_array(),
            light_specular: lighting.light.specular.to_array(),
            material_ambient: material.ambient.to_array(),
            material_diffuse: material.diffuse.to_array(),
            material_specular: material.specular.to_array(),
            params: [material.shininess, 0.0, 0.0, 0.0],
        }
    }
}
