//! Descriptor-table allocation over a shader-visible CBV/SRV heap.

mod allocator;
mod region;
mod srv;

pub use allocator::DescriptorTableAllocator;
pub use region::{DescriptorRange, DescriptorRegion};
pub use srv::shader_resource_view_desc;

use crate::device::DeviceError;

#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("descriptor region must hold at least one descriptor")]
    EmptyRegion,
    #[error("{cbv_count} CBVs + {srv_count} SRVs exceed the descriptor index range")]
    RegionTooLarge { cbv_count: u32, srv_count: u32 },
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error("{requested} constant buffer views requested, region holds {capacity}")]
    ConstantBufferOverflow { requested: u32, capacity: u32 },
    #[error("constant buffer view of {0} bytes does not fit a descriptor")]
    ConstantBufferTooLarge(u64),
    #[error("{requested} shader resource views requested, {remaining} slots left")]
    ShaderResourceOverflow { requested: u32, remaining: u32 },
    #[error("{unbound} of {total} shader resource slots were never bound")]
    UnboundShaderResources { unbound: u32, total: u32 },
}
