/// Dimension-specific part of a shader resource view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewDimension {
    /// `mip_levels: None` exposes every mip of the resource.
    Texture2D { most_detailed_mip: u32, mip_levels: Option<u32> },
    Texture2DArray {
        most_detailed_mip: u32,
        mip_levels: Option<u32>,
        first_array_slice: u32,
        array_size: u32,
    },
    TextureCube { most_detailed_mip: u32, mip_levels: Option<u32> },
    Buffer { first_element: u64, num_elements: u32, structure_byte_stride: u32 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShaderResourceViewDesc {
    /// `None` for structured/raw buffers.
    pub format: Option<wgpu::TextureFormat>,
    pub dimension: ViewDimension,
}
