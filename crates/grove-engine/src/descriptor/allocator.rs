use crate::device::{
    Buffer, ConstantBufferViewDesc, CpuDescriptorHandle, DescriptorHeap, Device,
    GpuDescriptorHandle,
};
use crate::resources::{RootArgument, TextureResource, TextureSet};

use super::region::{DescriptorRange, DescriptorRegion};
use super::srv::shader_resource_view_desc;
use super::DescriptorError;

/// Owns one shader-visible heap and hands out its CBV and SRV slots.
///
/// CBVs occupy the first `cbv_count` slots. SRVs are handed out from a cursor
/// that starts right after them and only moves forward.
#[derive(Debug)]
pub struct DescriptorTableAllocator {
    device: Device,
    heap: DescriptorHeap,
    region: DescriptorRegion,
    srv_cursor: u32,
}

impl DescriptorTableAllocator {
    /// Creates a heap with room for `cbv_count + srv_count` descriptors.
    pub fn allocate(
        device: &Device,
        cbv_count: u32,
        srv_count: u32,
    ) -> Result<Self, DescriptorError> {
        let total = cbv_count
            .checked_add(srv_count)
            .ok_or(DescriptorError::RegionTooLarge { cbv_count, srv_count })?;
        if total == 0 {
            return Err(DescriptorError::EmptyRegion);
        }

        let heap = device.create_descriptor_heap(total)?;
        let region = DescriptorRegion {
            cpu_start: heap.cpu_start(),
            gpu_start: heap.gpu_start(),
            cbv_count,
            srv_count,
            increment_size: device.descriptor_increment_size(),
        };
        log::debug!(
            "descriptor region {:?}: {cbv_count} CBVs + {srv_count} SRVs, increment {}",
            heap.id(),
            region.increment_size
        );

        Ok(Self {
            device: device.clone(),
            heap,
            region,
            srv_cursor: 0,
        })
    }

    #[inline]
    pub fn heap(&self) -> &DescriptorHeap {
        &self.heap
    }

    #[inline]
    pub fn region(&self) -> &DescriptorRegion {
        &self.region
    }

    /// Next SRV handles to be handed out.
    pub fn srv_cursor(&self) -> (CpuDescriptorHandle, GpuDescriptorHandle) {
        let inc = self.region.increment_size;
        (
            self.region.srv_cpu_start().offset(self.srv_cursor, inc),
            self.region.srv_gpu_start().offset(self.srv_cursor, inc),
        )
    }

    /// Writes `count` constant buffer views over `buffer`, slot `i` viewing
    /// `stride` bytes at `gpu_address + i * stride`.
    pub fn bind_constant_buffer_views(
        &self,
        count: u32,
        buffer: &Buffer,
        stride: u64,
    ) -> Result<(), DescriptorError> {
        if count > self.region.cbv_count {
            return Err(DescriptorError::ConstantBufferOverflow {
                requested: count,
                capacity: self.region.cbv_count,
            });
        }
        let size_in_bytes =
            u32::try_from(stride).map_err(|_| DescriptorError::ConstantBufferTooLarge(stride))?;

        let raw = self.device.raw();
        for slot in 0..count {
            let desc = ConstantBufferViewDesc {
                buffer_location: buffer.gpu_address() + slot as u64 * stride,
                size_in_bytes,
            };
            raw.create_constant_buffer_view(&desc, self.region.cbv_cpu(slot));
        }
        Ok(())
    }

    /// Writes one SRV per texture at the cursor and records where each one is
    /// bound on `textures`.
    ///
    /// With `auto_increment` texture `i` gets its own table at root parameter
    /// `root_start + i`. Otherwise every texture shares the table at
    /// `root_start`, texture `i` sitting at table offset `i`.
    pub fn bind_shader_resource_views(
        &mut self,
        textures: &mut TextureSet,
        root_start: u32,
        auto_increment: bool,
    ) -> Result<DescriptorRange, DescriptorError> {
        let (cpu_start, gpu_start) = self.srv_cursor();
        let count = textures.len() as u32;
        let remaining = self.unbound_shader_resource_views();
        if count > remaining {
            return Err(DescriptorError::ShaderResourceOverflow {
                requested: count,
                remaining,
            });
        }

        let range = DescriptorRange {
            cpu_start,
            gpu_start,
            count,
            increment_size: self.region.increment_size,
        };
        let raw = self.device.raw();
        let resources: Vec<TextureResource> = textures.resources().to_vec();
        for (i, resource) in (0u32..).zip(resources) {
            let desc = shader_resource_view_desc(textures.kind(), &resource.desc);
            raw.create_shader_resource_view(resource.id, &desc, range.cpu(i));

            let argument = if auto_increment {
                RootArgument {
                    root_parameter: root_start + i,
                    gpu_handle: range.gpu(i),
                    table_offset: 0,
                }
            } else {
                RootArgument {
                    root_parameter: root_start,
                    gpu_handle: range.gpu(i),
                    table_offset: i,
                }
            };
            textures.set_root_argument(i as usize, argument);
        }
        self.srv_cursor += count;
        Ok(range)
    }

    /// SRV slots not yet handed out.
    #[inline]
    pub fn unbound_shader_resource_views(&self) -> u32 {
        self.region.srv_count - self.srv_cursor
    }

    /// Fails if any SRV slot of the region was left unbound.
    pub fn finish(&self) -> Result<(), DescriptorError> {
        match self.unbound_shader_resource_views() {
            0 => Ok(()),
            unbound => Err(DescriptorError::UnboundShaderResources {
                unbound,
                total: self.region.srv_count,
            }),
        }
    }
}
