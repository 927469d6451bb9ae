use std::fmt;

use anyhow::{bail, Context};
use bytemuck::{Pod, Zeroable};

use crate::device::{BufferUpload, CommandList, Device, VertexBufferView};

/// Drawable geometry owned by the scene.
pub trait Mesh: fmt::Debug {
    /// Records topology, vertex buffers and the draw.
    fn render(&self, cmd: &mut dyn CommandList);

    /// Frees staging memory once the initial upload has executed.
    fn release_upload_buffers(&mut self);
}

/// Builds meshes for shader variants.
pub trait MeshFactory {
    /// Axis-aligned rectangle, flat along whichever extent is zero.
    fn create_textured_rect(
        &self,
        cmd: &mut dyn CommandList,
        width: f32,
        height: f32,
        depth: f32,
    ) -> anyhow::Result<Box<dyn Mesh>>;
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Triangle-list mesh in a device-local vertex buffer.
#[derive(Debug)]
pub struct VertexBufferMesh {
    upload: BufferUpload,
    view: VertexBufferView,
    vertex_count: u32,
    topology: wgpu::PrimitiveTopology,
}

impl VertexBufferMesh {
    pub fn new<V: Pod>(
        device: &Device,
        cmd: &mut dyn CommandList,
        label: &'static str,
        vertices: &[V],
        topology: wgpu::PrimitiveTopology,
    ) -> anyhow::Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let upload = device
            .create_buffer_with_data(cmd, label, bytes)
            .with_context(|| format!("uploading `{label}` vertices"))?;
        let view = VertexBufferView {
            buffer_location: upload.buffer.gpu_address(),
            size_in_bytes: bytes.len() as u32,
            stride_in_bytes: size_of::<V>() as u32,
        };
        Ok(Self {
            upload,
            view,
            vertex_count: vertices.len() as u32,
            topology,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[inline]
    pub fn view(&self) -> VertexBufferView {
        self.view
    }

    #[inline]
    pub fn has_staging(&self) -> bool {
        self.upload.staging.is_some()
    }
}

impl Mesh for VertexBufferMesh {
    fn render(&self, cmd: &mut dyn CommandList) {
        cmd.set_primitive_topology(self.topology);
        cmd.set_vertex_buffers(0, &[self.view]);
        cmd.draw_instanced(self.vertex_count, 1, 0, 0);
    }

    fn release_upload_buffers(&mut self) {
        self.upload.release_staging();
    }
}

/// Mesh factory backed by a [`Device`].
#[derive(Debug, Clone)]
pub struct DeviceMeshFactory {
    device: Device,
}

impl DeviceMeshFactory {
    pub fn new(device: Device) -> Self {
        Self { device }
    }
}

impl MeshFactory for DeviceMeshFactory {
    fn create_textured_rect(
        &self,
        cmd: &mut dyn CommandList,
        width: f32,
        height: f32,
        depth: f32,
    ) -> anyhow::Result<Box<dyn Mesh>> {
        let vertices = textured_rect_vertices(width, height, depth)?;
        let mesh = VertexBufferMesh::new(
            &self.device,
            cmd,
            "textured rect",
            &vertices,
            wgpu::PrimitiveTopology::TriangleList,
        )?;
        Ok(Box::new(mesh))
    }
}

/// Two clockwise triangles covering the rectangle, centred on the origin.
pub fn textured_rect_vertices(
    width: f32,
    height: f32,
    depth: f32,
) -> anyhow::Result<[TexturedVertex; 6]> {
    let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
    // Corners in order: top-left, top-right, bottom-right, bottom-left.
    let corners: [[f32; 3]; 4] = if depth == 0.0 {
        [[-hx, hy, 0.0], [hx, hy, 0.0], [hx, -hy, 0.0], [-hx, -hy, 0.0]]
    } else if width == 0.0 {
        [[0.0, hy, -hz], [0.0, hy, hz], [0.0, -hy, hz], [0.0, -hy, -hz]]
    } else if height == 0.0 {
        [[-hx, 0.0, hz], [hx, 0.0, hz], [hx, 0.0, -hz], [-hx, 0.0, -hz]]
    } else {
        bail!("textured rect {width}x{height}x{depth} is not flat along any axis");
    };
    let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
    let v = |i: usize| TexturedVertex {
        position: corners[i],
        uv: uvs[i],
    };
    Ok([v(0), v(1), v(2), v(0), v(2), v(3)])
}
