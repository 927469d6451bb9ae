use crate::coords::{ScissorRect, Viewport};
use crate::pipeline::PipelineStateDesc;

use super::error::DeviceError;
use super::handles::{
    BufferDesc, ConstantBufferViewDesc, CpuDescriptorHandle, DescriptorHeapDesc,
    GpuDescriptorHandle, ObjectId, RawBuffer, RawDescriptorHeap, ResourceId, VertexBufferView,
};
use super::views::ShaderResourceViewDesc;

/// Backend contract for the native graphics device.
///
/// Methods take `&self`; backends use interior mutability. Objects are
/// identified by [`ObjectId`] and freed through [`GraphicsDevice::release`],
/// which the owned wrappers in [`super::Device`] call on drop.
pub trait GraphicsDevice {
    /// Byte distance between two consecutive CBV/SRV descriptors.
    fn descriptor_increment_size(&self) -> u32;

    fn create_descriptor_heap(
        &self,
        desc: &DescriptorHeapDesc,
    ) -> Result<RawDescriptorHeap, DeviceError>;

    fn create_pipeline_state(&self, desc: &PipelineStateDesc<'_>) -> Result<ObjectId, DeviceError>;

    fn create_buffer(&self, desc: &BufferDesc) -> Result<RawBuffer, DeviceError>;

    /// Writes into host-visible buffer memory.
    fn write_buffer(&self, buffer: ObjectId, offset: u64, data: &[u8]) -> Result<(), DeviceError>;

    fn create_constant_buffer_view(&self, desc: &ConstantBufferViewDesc, dest: CpuDescriptorHandle);

    fn create_shader_resource_view(
        &self,
        resource: ResourceId,
        desc: &ShaderResourceViewDesc,
        dest: CpuDescriptorHandle,
    );

    fn release(&self, object: ObjectId);
}

/// Command recording contract. One thread records sequentially.
pub trait CommandList {
    fn set_pipeline_state(&mut self, pipeline: ObjectId);

    fn set_descriptor_heap(&mut self, heap: ObjectId);

    fn set_graphics_root_descriptor_table(&mut self, root_parameter: u32, base: GpuDescriptorHandle);

    fn set_primitive_topology(&mut self, topology: wgpu::PrimitiveTopology);

    fn set_vertex_buffers(&mut self, start_slot: u32, views: &[VertexBufferView]);

    fn set_viewport(&mut self, viewport: &Viewport);

    fn set_scissor_rect(&mut self, rect: &ScissorRect);

    fn copy_buffer(&mut self, dst: ObjectId, src: ObjectId, size: u64);

    fn draw_instanced(
        &mut self,
        vertex_count: u32,
        instance_count: u32,
        start_vertex: u32,
        start_instance: u32,
    );
}
