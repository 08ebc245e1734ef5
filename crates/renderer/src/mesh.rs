//! GPU copies of the flat mesh buffers.

use asset::FlatBuffers;
use wgpu::{Buffer, BufferUsages, Device, VertexBufferLayout, VertexStepMode, util::DeviceExt};

/// Positions in vertex slot 0, shader location 0.
pub const POSITION_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: 3 * std::mem::size_of::<f32>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![0 => Float32x3],
};

/// Normals in vertex slot 1, shader location 1.
pub const NORMAL_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: 3 * std::mem::size_of::<f32>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &wgpu::vertex_attr_array![1 => Float32x3],
};

pub struct MeshBuffers {
    pub positions: Buffer,
    pub normals: Buffer,
    pub indices: Buffer,
    pub vertex_count: u32,
    pub index_count: u32,
}

impl MeshBuffers {
    /// Upload the three flat buffers once; they are never rewritten.
    pub fn upload(device: &Device, flat: &FlatBuffers) -> anyhow::Result<Self> {
        let vertex_count = u32::try_from(flat.vertex_count())?;
        let index_count = u32::try_from(flat.index_count())?;

        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Positions"),
            contents: bytemuck::cast_slice(&flat.positions),
            usage: BufferUsages::VERTEX,
        });
        let normals = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Normals"),
            contents: bytemuck::cast_slice(&flat.normals),
            usage: BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Indices"),
            contents: bytemuck::cast_slice(&flat.indices),
            usage: BufferUsages::INDEX,
        });

        log::info!(
            "Uploaded mesh: {} vertices, {} indices ({} bytes)",
            vertex_count,
            index_count,
            (flat.positions.len() + flat.normals.len()) * 4 + flat.indices.len() * 4
        );

        Ok(Self {
            positions,
            normals,
            indices,
            vertex_count,
            index_count,
        })
    }

    pub fn is_drawable(&self) -> bool {
        self.index_count > 0 && self.vertex_count > 0
    }
}
