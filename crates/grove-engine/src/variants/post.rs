use anyhow::Context;

use crate::config::RendererConfig;
use crate::descriptor::{DescriptorRegion, DescriptorTableAllocator};
use crate::device::{Device, PipelineState};
use crate::render::{RenderError, RenderPass};
use crate::resources::TextureSet;
use crate::scene::Camera;

use super::{BuildContext, VariantError};

/// Full-screen pass sampling the scene's render targets.
#[derive(Debug)]
pub struct PostProcessPass {
    descriptors: DescriptorTableAllocator,
    targets: TextureSet,
}

impl PostProcessPass {
    pub fn build(
        device: &Device,
        ctx: &BuildContext<'_>,
        config: &RendererConfig,
    ) -> anyhow::Result<Self> {
        let mut targets =
            VariantError::require(ctx.render_texture, "post-processing", "render texture")?.clone();
        let mut descriptors = DescriptorTableAllocator::allocate(device, 0, targets.len() as u32)
            .context("post-processing: descriptor heap")?;
        descriptors.bind_shader_resource_views(
            &mut targets,
            config.root_parameters.render_targets,
            false,
        )?;
        descriptors.finish()?;
        Ok(Self {
            descriptors,
            targets,
        })
    }

    #[inline]
    pub fn region(&self) -> &DescriptorRegion {
        self.descriptors.region()
    }

    /// Two triangles generated in the vertex shader; no vertex buffer.
    pub fn render(
        &self,
        pass: &mut RenderPass<'_>,
        pipeline: &PipelineState,
        camera: &dyn Camera,
    ) -> Result<(), RenderError> {
        camera.set_viewports_and_scissor_rects(pass.command_list());
        pass.set_pipeline(pipeline);
        pass.set_descriptor_heap(self.descriptors.heap())?;
        self.targets.bind(pass)?;
        pass.set_topology(wgpu::PrimitiveTopology::TriangleList)?;
        pass.draw(6, 1)?;
        Ok(())
    }
}
