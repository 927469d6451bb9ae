use std::fmt;
use std::rc::Rc;

use crate::pipeline::{PipelineConfiguration, PipelineStateDesc};
use crate::shader::ShaderError;

use super::backend::GraphicsDevice;
use super::error::DeviceError;
use super::handles::{
    BufferDesc, CpuDescriptorHandle, DescriptorHeapDesc, GpuDescriptorHandle, HeapType, ObjectId,
    ResourceState,
};

/// Cloneable front end over a graphics backend.
///
/// Everything created through it is returned as an owned object that releases
/// its device object when dropped.
#[derive(Clone)]
pub struct Device {
    raw: Rc<dyn GraphicsDevice>,
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device").finish_non_exhaustive()
    }
}

impl Device {
    pub fn new(raw: Rc<dyn GraphicsDevice>) -> Self {
        Self { raw }
    }

    /// Returns the backend.
    pub fn raw(&self) -> &dyn GraphicsDevice {
        &*self.raw
    }

    #[inline]
    pub fn descriptor_increment_size(&self) -> u32 {
        self.raw.descriptor_increment_size()
    }

    pub fn create_descriptor_heap(&self, descriptors: u32) -> Result<DescriptorHeap, DeviceError> {
        let raw = self.raw.create_descriptor_heap(&DescriptorHeapDesc {
            descriptors,
            shader_visible: true,
        })?;
        log::debug!("descriptor heap {:?}: {descriptors} descriptors", raw.id);
        Ok(DescriptorHeap {
            object: self.adopt(raw.id),
            cpu_start: raw.cpu_start,
            gpu_start: raw.gpu_start,
            capacity: descriptors,
        })
    }

    /// Creates a pipeline object.
    ///
    /// Empty vertex or pixel bytecode is rejected before the backend is called;
    /// the configuration is validated first as well.
    pub fn create_pipeline_state(
        &self,
        label: &str,
        desc: &PipelineStateDesc<'_>,
    ) -> anyhow::Result<PipelineState> {
        desc.config.validate()?;
        if desc.vertex.is_empty() {
            return Err(ShaderError::EmptyBytecode { stage: "vertex" }.into());
        }
        if desc.pixel.is_empty() {
            return Err(ShaderError::EmptyBytecode { stage: "pixel" }.into());
        }
        if desc.geometry.is_some_and(|gs| gs.is_empty()) {
            return Err(ShaderError::EmptyBytecode { stage: "geometry" }.into());
        }

        let id = self.raw.create_pipeline_state(desc)?;
        log::debug!("pipeline `{label}` created as {id:?}");
        Ok(PipelineState {
            object: self.adopt(id),
            config: desc.config.clone(),
        })
    }

    pub fn create_buffer(&self, desc: &BufferDesc) -> Result<Buffer, DeviceError> {
        let raw = self.raw.create_buffer(desc)?;
        Ok(Buffer {
            object: self.adopt(raw.id),
            gpu_address: raw.gpu_address,
            size: desc.size,
        })
    }

    /// Creates a device-local buffer filled with `data`.
    ///
    /// `data` goes into an upload-heap staging buffer and a copy is recorded on
    /// `cmd`; the backend moves the destination to its read state after the
    /// copy. The staging buffer must outlive the GPU copy, so it is handed
    /// back inside the [`BufferUpload`] instead of being dropped here.
    pub fn create_buffer_with_data(
        &self,
        cmd: &mut dyn super::CommandList,
        label: &'static str,
        data: &[u8],
    ) -> Result<BufferUpload, DeviceError> {
        let size = data.len() as u64;
        let buffer = self.create_buffer(&BufferDesc {
            label,
            size,
            heap: HeapType::Default,
            initial_state: ResourceState::CopyDest,
        })?;
        let staging = self.create_buffer(&BufferDesc {
            label,
            size,
            heap: HeapType::Upload,
            initial_state: ResourceState::GenericRead,
        })?;
        staging.write(0, data)?;
        cmd.copy_buffer(buffer.id(), staging.id(), size);
        log::debug!("{label}: {size} bytes staged");

        Ok(BufferUpload {
            buffer,
            staging: Some(staging),
        })
    }

    fn adopt(&self, id: ObjectId) -> DeviceObject {
        DeviceObject {
            id,
            device: Rc::clone(&self.raw),
        }
    }
}

/// A device object released on drop.
pub struct DeviceObject {
    id: ObjectId,
    device: Rc<dyn GraphicsDevice>,
}

impl DeviceObject {
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }
}

impl fmt::Debug for DeviceObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DeviceObject").field(&self.id).finish()
    }
}

impl Drop for DeviceObject {
    fn drop(&mut self) {
        self.device.release(self.id);
    }
}

/// Shader-visible CBV/SRV descriptor heap.
#[derive(Debug)]
pub struct DescriptorHeap {
    object: DeviceObject,
    cpu_start: CpuDescriptorHandle,
    gpu_start: GpuDescriptorHandle,
    capacity: u32,
}

impl DescriptorHeap {
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.object.id()
    }

    #[inline]
    pub fn cpu_start(&self) -> CpuDescriptorHandle {
        self.cpu_start
    }

    #[inline]
    pub fn gpu_start(&self) -> GpuDescriptorHandle {
        self.gpu_start
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

/// Pipeline object together with the configuration it was built from.
#[derive(Debug)]
pub struct PipelineState {
    object: DeviceObject,
    config: PipelineConfiguration,
}

impl PipelineState {
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.object.id()
    }

    #[inline]
    pub fn config(&self) -> &PipelineConfiguration {
        &self.config
    }
}

#[derive(Debug)]
pub struct Buffer {
    object: DeviceObject,
    gpu_address: u64,
    size: u64,
}

impl Buffer {
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.object.id()
    }

    #[inline]
    pub fn gpu_address(&self) -> u64 {
        self.gpu_address
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Writes host-visible memory. Only meaningful for upload-heap buffers.
    pub fn write(&self, offset: u64, data: &[u8]) -> Result<(), DeviceError> {
        let len = data.len() as u64;
        if offset.checked_add(len).is_none_or(|end| end > self.size) {
            return Err(DeviceError::WriteOutOfBounds {
                offset,
                len,
                size: self.size,
            });
        }
        self.object.device.write_buffer(self.id(), offset, data)
    }
}

/// Device-local buffer plus the staging buffer feeding it.
#[derive(Debug)]
pub struct BufferUpload {
    pub buffer: Buffer,
    pub staging: Option<Buffer>,
}

impl BufferUpload {
    /// Drops the staging buffer. Call once the recorded copy has executed.
    pub fn release_staging(&mut self) {
        if let Some(staging) = self.staging.take() {
            log::debug!("released staging buffer {:?}", staging.id());
        }
    }
}
