use anyhow::Context;
use bytemuck::{Pod, Zeroable};

use crate::config::RendererConfig;
use crate::descriptor::{DescriptorRegion, DescriptorTableAllocator};
use crate::device::{BufferUpload, CommandList, Device, PipelineState, VertexBufferView};
use crate::render::{RenderError, RenderPass};
use crate::resources::{TextureKind, TextureSet};
use crate::scene::FoliageGrid;

use super::{BuildContext, VariantError};

const NAME: &str = "geometry billboard";

/// One foliage point, expanded to a quad by the geometry shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct BillboardVertex {
    pub position: [f32; 3],
    pub size: [f32; 2],
}

/// Scatter position `(x, z)` of point `index`.
///
/// Points wrap into a band starting at x = 1000, ten points per row step
/// along z.
pub fn scattered_position(index: u32, pitch: f32) -> (f32, f32) {
    let x = 1000 + (index as f32 * pitch / 2.0) as i32 % 1000;
    let z = ((index / 10) as f32 * pitch) as i32 % 2100;
    (x as f32, z as f32)
}

/// Point-list foliage in a device-local vertex buffer.
#[derive(Debug)]
pub struct GeometryBillboardSet {
    descriptors: DescriptorTableAllocator,
    texture: TextureSet,
    /// `None` when the terrain holds no points.
    vertices: Option<BufferUpload>,
    view: VertexBufferView,
    vertex_count: u32,
}

impl GeometryBillboardSet {
    pub fn build(
        device: &Device,
        cmd: &mut dyn CommandList,
        ctx: &BuildContext<'_>,
        config: &RendererConfig,
    ) -> anyhow::Result<Self> {
        let terrain = VariantError::require(ctx.terrain, NAME, "terrain")?;
        let loader = VariantError::require(ctx.textures, NAME, "texture loader")?;

        let mut texture = TextureSet::load(
            loader,
            cmd,
            TextureKind::Texture2DArray,
            &[config.asset_path(&config.foliage.tree_array)],
        )?;
        let mut descriptors = DescriptorTableAllocator::allocate(device, 0, texture.len() as u32)
            .context("geometry billboard: descriptor heap")?;
        descriptors.bind_shader_resource_views(&mut texture, config.root_parameters.tree_array, true)?;
        descriptors.finish()?;

        let grid = FoliageGrid::over(terrain, config.foliage.pitch);
        let foliage = &config.foliage;
        let count = grid.count().context("geometry billboard: foliage placement")?;
        let points: Vec<BillboardVertex> = (0..count)
            .map(|i| {
                let (x, z) = scattered_position(i, grid.pitch());
                BillboardVertex {
                    position: [x, terrain.height_at(x, z) + foliage.array_height_offset, z],
                    size: foliage.size,
                }
            })
            .collect();

        let vertices = if points.is_empty() {
            None
        } else {
            Some(device.create_buffer_with_data(
                cmd,
                "geometry billboard vertices",
                bytemuck::cast_slice(&points),
            )?)
        };
        let view = VertexBufferView {
            buffer_location: vertices.as_ref().map_or(0, |v| v.buffer.gpu_address()),
            size_in_bytes: (points.len() * size_of::<BillboardVertex>()) as u32,
            stride_in_bytes: size_of::<BillboardVertex>() as u32,
        };
        log::info!("{NAME}: {} points", points.len());

        Ok(Self {
            descriptors,
            texture,
            vertices,
            view,
            vertex_count: points.len() as u32,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    #[inline]
    pub fn region(&self) -> &DescriptorRegion {
        self.descriptors.region()
    }

    #[inline]
    pub fn view(&self) -> VertexBufferView {
        self.view
    }

    pub fn release_upload_buffers(&mut self) {
        if let Some(vertices) = &mut self.vertices {
            vertices.release_staging();
        }
    }

    pub fn render(
        &self,
        pass: &mut RenderPass<'_>,
        pipeline: &PipelineState,
    ) -> Result<(), RenderError> {
        pass.set_pipeline(pipeline);
        pass.set_descriptor_heap(self.descriptors.heap())?;
        self.texture.bind(pass)?;
        if self.vertices.is_none() {
            return Ok(());
        }
        pass.set_topology(wgpu::PrimitiveTopology::PointList)?;
        pass.set_vertex_buffers(0, &[self.view])?;
        pass.draw(self.vertex_count, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_wraps_x_and_steps_z_every_ten_points() {
        assert_eq!(scattered_position(0, 200.0), (1000.0, 0.0));
        assert_eq!(scattered_position(3, 200.0), (1300.0, 0.0));
        assert_eq!(scattered_position(10, 200.0), (1000.0, 200.0));
        assert_eq!(scattered_position(12, 200.0), (1200.0, 200.0));
        assert_eq!(scattered_position(110, 200.0), (1000.0, 100.0));
    }

    #[test]
    fn vertex_is_twenty_bytes() {
        assert_eq!(size_of::<BillboardVertex>(), 20);
    }
}
