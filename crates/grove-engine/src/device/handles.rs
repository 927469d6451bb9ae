//! Plain-data vocabulary shared between the device front end and backends.

/// Opaque id of a device object (heap, pipeline, buffer) issued by a backend.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ObjectId(pub u64);

/// Opaque id of an externally-loaded texture resource.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ResourceId(pub u64);

/// CPU-visible descriptor address inside a descriptor heap.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct CpuDescriptorHandle(pub u64);

/// GPU-visible descriptor address inside a shader-visible descriptor heap.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GpuDescriptorHandle(pub u64);

impl CpuDescriptorHandle {
    /// Handle `slots` descriptors past `self`.
    #[inline]
    pub const fn offset(self, slots: u32, increment_size: u32) -> Self {
        Self(self.0 + slots as u64 * increment_size as u64)
    }
}

impl GpuDescriptorHandle {
    /// Handle `slots` descriptors past `self`.
    #[inline]
    pub const fn offset(self, slots: u32, increment_size: u32) -> Self {
        Self(self.0 + slots as u64 * increment_size as u64)
    }
}

/// Shader-visible CBV/SRV heap request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DescriptorHeapDesc {
    pub descriptors: u32,
    pub shader_visible: bool,
}

/// Heap returned by a backend before it is wrapped into an owned object.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RawDescriptorHeap {
    pub id: ObjectId,
    pub cpu_start: CpuDescriptorHandle,
    pub gpu_start: GpuDescriptorHandle,
}

/// Memory heap a buffer lives in.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HeapType {
    /// Device-local memory; filled through a staging copy.
    Default,
    /// Host-visible memory, written directly by the CPU.
    Upload,
}

/// State a buffer is created in.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResourceState {
    CopyDest,
    GenericRead,
    VertexAndConstantBuffer,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BufferDesc {
    pub label: &'static str,
    pub size: u64,
    pub heap: HeapType,
    pub initial_state: ResourceState,
}

/// Buffer returned by a backend before it is wrapped into an owned object.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RawBuffer {
    pub id: ObjectId,
    pub gpu_address: u64,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ConstantBufferViewDesc {
    pub buffer_location: u64,
    pub size_in_bytes: u32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexBufferView {
    pub buffer_location: u64,
    pub size_in_bytes: u32,
    pub stride_in_bytes: u32,
}
