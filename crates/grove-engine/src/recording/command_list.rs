use crate::coords::{ScissorRect, Viewport};
use crate::device::{CommandList, GpuDescriptorHandle, ObjectId, VertexBufferView};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetPipelineState(ObjectId),
    SetDescriptorHeap(ObjectId),
    SetRootDescriptorTable {
        root_parameter: u32,
        base: GpuDescriptorHandle,
    },
    SetPrimitiveTopology(wgpu::PrimitiveTopology),
    SetVertexBuffers {
        start_slot: u32,
        views: Vec<VertexBufferView>,
    },
    SetViewport(Viewport),
    SetScissorRect(ScissorRect),
    CopyBuffer {
        dst: ObjectId,
        src: ObjectId,
        size: u64,
    },
    DrawInstanced {
        vertex_count: u32,
        instance_count: u32,
        start_vertex: u32,
        start_instance: u32,
    },
}

/// Command list that stores what was recorded.
#[derive(Debug, Default)]
pub struct RecordingCommandList {
    commands: Vec<Command>,
}

impl RecordingCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::DrawInstanced { .. }))
            .count()
    }

    /// Root descriptor tables in recording order.
    pub fn root_tables(&self) -> Vec<(u32, GpuDescriptorHandle)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::SetRootDescriptorTable { root_parameter, base } => {
                    Some((*root_parameter, *base))
                }
                _ => None,
            })
            .collect()
    }
}

impl CommandList for RecordingCommandList {
    fn set_pipeline_state(&mut self, pipeline: ObjectId) {
        self.commands.push(Command::SetPipelineState(pipeline));
    }

    fn set_descriptor_heap(&mut self, heap: ObjectId) {
        self.commands.push(Command::SetDescriptorHeap(heap));
    }

    fn set_graphics_root_descriptor_table(&mut self, root_parameter: u32, base: GpuDescriptorHandle) {
        self.commands
            .push(Command::SetRootDescriptorTable { root_parameter, base });
    }

    fn set_primitive_topology(&mut self, topology: wgpu::PrimitiveTopology) {
        self.commands.push(Command::SetPrimitiveTopology(topology));
    }

    fn set_vertex_buffers(&mut self, start_slot: u32, views: &[VertexBufferView]) {
        self.commands.push(Command::SetVertexBuffers {
            start_slot,
            views: views.to_vec(),
        });
    }

    fn set_viewport(&mut self, viewport: &Viewport) {
        self.commands.push(Command::SetViewport(*viewport));
    }

    fn set_scissor_rect(&mut self, rect: &ScissorRect) {
        self.commands.push(Command::SetScissorRect(*rect));
    }

    fn copy_buffer(&mut self, dst: ObjectId, src: ObjectId, size: u64) {
        self.commands.push(Command::CopyBuffer { dst, src, size });
    }

    fn draw_instanced(
        &mut self,
        vertex_count: u32,
        instance_count: u32,
        start_vertex: u32,
        start_instance: u32,
    ) {
        self.commands.push(Command::DrawInstanced {
            vertex_count,
            instance_count,
            start_vertex,
            start_instance,
        });
    }
}
