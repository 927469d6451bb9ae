//! Graphics device abstraction.
//!
//! The native device and command list are external collaborators described by
//! the [`GraphicsDevice`] and [`CommandList`] traits. [`Device`] wraps a backend
//! and hands out owned objects (heaps, pipelines, buffers) that release
//! themselves on drop.

mod backend;
mod error;
mod handles;
mod objects;
mod views;

pub use backend::{CommandList, GraphicsDevice};
pub use error::DeviceError;
pub use handles::{
    BufferDesc, ConstantBufferViewDesc, CpuDescriptorHandle, DescriptorHeapDesc,
    GpuDescriptorHandle, HeapType, ObjectId, RawBuffer, RawDescriptorHeap, ResourceId,
    ResourceState, VertexBufferView,
};
pub use objects::{Buffer, BufferUpload, DescriptorHeap, Device, DeviceObject, PipelineState};
pub use views::{ShaderResourceViewDesc, ViewDimension};
