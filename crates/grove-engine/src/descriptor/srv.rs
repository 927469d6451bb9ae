use crate::device::{ShaderResourceViewDesc, ViewDimension};
use crate::resources::{ResourceDesc, TextureKind};

/// View description for one resource of a texture set of `kind`.
///
/// Texture views expose every mip level. Buffer views are created with zero
/// elements, matching how texture sets carry buffers today.
pub fn shader_resource_view_desc(kind: TextureKind, desc: &ResourceDesc) -> ShaderResourceViewDesc {
    let dimension = match kind {
        TextureKind::Texture2D | TextureKind::Texture2DLayers => ViewDimension::Texture2D {
            most_detailed_mip: 0,
            mip_levels: None,
        },
        TextureKind::Texture2DArray => ViewDimension::Texture2DArray {
            most_detailed_mip: 0,
            mip_levels: None,
            first_array_slice: 0,
            array_size: desc.array_size,
        },
        TextureKind::TextureCube => ViewDimension::TextureCube {
            most_detailed_mip: 0,
            mip_levels: None,
        },
        TextureKind::Buffer => ViewDimension::Buffer {
            first_element: 0,
            num_elements: 0,
            structure_byte_stride: 0,
        },
    };
    ShaderResourceViewDesc {
        format: desc.format,
        dimension,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARRAY: ResourceDesc = ResourceDesc {
        format: Some(wgpu::TextureFormat::Bc3RgbaUnorm),
        array_size: 5,
        mip_levels: 9,
    };

    #[test]
    fn layers_view_as_plain_2d() {
        let desc = shader_resource_view_desc(TextureKind::Texture2DLayers, &ARRAY);
        assert_eq!(desc.dimension, ViewDimension::Texture2D {
            most_detailed_mip: 0,
            mip_levels: None,
        });
        assert_eq!(desc.format, ARRAY.format);
    }

    #[test]
    fn array_view_takes_resource_array_size() {
        let desc = shader_resource_view_desc(TextureKind::Texture2DArray, &ARRAY);
        assert!(matches!(
            desc.dimension,
            ViewDimension::Texture2DArray { array_size: 5, first_array_slice: 0, .. }
        ));
    }

    #[test]
    fn buffer_view_has_no_elements() {
        let desc = shader_resource_view_desc(TextureKind::Buffer, &ResourceDesc {
            format: None,
            array_size: 1,
            mip_levels: 1,
        });
        assert!(matches!(desc.dimension, ViewDimension::Buffer { num_elements: 0, .. }));
        assert_eq!(desc.format, None);
    }

    #[test]
    fn cube_view() {
        let desc = shader_resource_view_desc(TextureKind::TextureCube, &ARRAY);
        assert!(matches!(desc.dimension, ViewDimension::TextureCube { .. }));
    }
}
