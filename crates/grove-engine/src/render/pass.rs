use crate::device::{
    CommandList, DescriptorHeap, GpuDescriptorHandle, PipelineState, VertexBufferView,
};
use crate::scene::Mesh;

use super::DispatchError;

/// Command recording scope that keeps draw setup in order.
///
/// A draw is preceded by: pipeline, descriptor heap, root tables, then
/// topology and vertex buffers. Root tables may be set again after a draw,
/// so per-instance loops can rebind between draws.
pub struct RenderPass<'c> {
    cmd: &'c mut dyn CommandList,
    pipeline_set: bool,
    heap_set: bool,
    input_assembled: bool,
    draws: u32,
}

impl<'c> RenderPass<'c> {
    pub fn new(cmd: &'c mut dyn CommandList) -> Self {
        Self {
            cmd,
            pipeline_set: false,
            heap_set: false,
            input_assembled: false,
            draws: 0,
        }
    }

    /// Raw list for collaborators that record their own state (cameras).
    #[inline]
    pub fn command_list(&mut self) -> &mut dyn CommandList {
        &mut *self.cmd
    }

    #[inline]
    pub fn draw_count(&self) -> u32 {
        self.draws
    }

    pub fn set_pipeline(&mut self, pipeline: &PipelineState) {
        self.cmd.set_pipeline_state(pipeline.id());
        self.pipeline_set = true;
        self.input_assembled = false;
    }

    pub fn set_descriptor_heap(&mut self, heap: &DescriptorHeap) -> Result<(), DispatchError> {
        if !self.pipeline_set {
            return Err(DispatchError::NoPipeline {
                command: "set_descriptor_heap",
            });
        }
        self.cmd.set_descriptor_heap(heap.id());
        self.heap_set = true;
        Ok(())
    }

    pub fn set_root_table(
        &mut self,
        root_parameter: u32,
        base: GpuDescriptorHandle,
    ) -> Result<(), DispatchError> {
        if !self.heap_set {
            return Err(DispatchError::NoDescriptorHeap { root_parameter });
        }
        if self.input_assembled {
            return Err(DispatchError::TableAfterInputAssembly { root_parameter });
        }
        self.cmd
            .set_graphics_root_descriptor_table(root_parameter, base);
        Ok(())
    }

    pub fn set_topology(&mut self, topology: wgpu::PrimitiveTopology) -> Result<(), DispatchError> {
        self.require_pipeline("set_primitive_topology")?;
        self.cmd.set_primitive_topology(topology);
        self.input_assembled = true;
        Ok(())
    }

    pub fn set_vertex_buffers(
        &mut self,
        start_slot: u32,
        views: &[VertexBufferView],
    ) -> Result<(), DispatchError> {
        self.require_pipeline("set_vertex_buffers")?;
        self.cmd.set_vertex_buffers(start_slot, views);
        self.input_assembled = true;
        Ok(())
    }

    pub fn draw(&mut self, vertex_count: u32, instance_count: u32) -> Result<(), DispatchError> {
        self.require_pipeline("draw_instanced")?;
        self.cmd.draw_instanced(vertex_count, instance_count, 0, 0);
        self.finish_draw();
        Ok(())
    }

    /// Lets `mesh` record its input assembly and draw.
    pub fn draw_mesh(&mut self, mesh: &dyn Mesh) -> Result<(), DispatchError> {
        self.require_pipeline("draw_mesh")?;
        mesh.render(&mut *self.cmd);
        self.finish_draw();
        Ok(())
    }

    fn require_pipeline(&self, command: &'static str) -> Result<(), DispatchError> {
        if self.pipeline_set {
            Ok(())
        } else {
            Err(DispatchError::NoPipeline { command })
        }
    }

    fn finish_draw(&mut self) {
        self.draws += 1;
        self.input_assembled = false;
    }
}
