use thiserror::Error;

use crate::shader::ShaderBytecode;

use super::input_layout::InputLayout;
use super::state::{BlendState, DepthStencilState, RasterizerState};

/// Upper bound on simultaneously bound colour targets.
pub const MAX_RENDER_TARGETS: usize = 8;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("pipeline has no colour render target")]
    NoRenderTargets,

    #[error("pipeline binds {0} colour targets, at most 8 are supported")]
    TooManyRenderTargets(usize),

    #[error("input elements {first} and {second} overlap in slot {slot}")]
    OverlappingInputElements {
        first: String,
        second: String,
        slot: u32,
    },

    #[error("sample count must be at least 1")]
    ZeroSampleCount,
}

/// Everything fixed-function about one pipeline object.
///
/// Built once per shader variant and owned by the pipeline object created
/// from it.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfiguration {
    pub rasterizer: RasterizerState,
    pub blend: BlendState,
    pub depth_stencil: DepthStencilState,
    pub input_layout: InputLayout,
    pub topology: wgpu::PrimitiveTopology,
    pub color_formats: Vec<wgpu::TextureFormat>,
    pub depth_format: Option<wgpu::TextureFormat>,
    pub sample_count: u32,
    pub sample_mask: u32,
}

impl Default for PipelineConfiguration {
    /// Opaque triangle list into one RGBA8 target with a 24/8 depth buffer.
    fn default() -> Self {
        Self {
            rasterizer: super::rasterizer_state(),
            blend: super::blend_state(),
            depth_stencil: super::depth_stencil_state(),
            input_layout: InputLayout::empty(),
            topology: wgpu::PrimitiveTopology::TriangleList,
            color_formats: vec![wgpu::TextureFormat::Rgba8Unorm],
            depth_format: Some(wgpu::TextureFormat::Depth24PlusStencil8),
            sample_count: 1,
            sample_mask: u32::MAX,
        }
    }
}

impl PipelineConfiguration {
    pub fn validate(&self) -> Result<(), PipelineError> {
        match self.color_formats.len() {
            0 => return Err(PipelineError::NoRenderTargets),
            n if n > MAX_RENDER_TARGETS => return Err(PipelineError::TooManyRenderTargets(n)),
            _ => {}
        }
        if self.sample_count == 0 {
            return Err(PipelineError::ZeroSampleCount);
        }
        if let Some((a, b)) = self.input_layout.find_overlap() {
            return Err(PipelineError::OverlappingInputElements {
                first: format!("{}{}", a.semantic, a.semantic_index),
                second: format!("{}{}", b.semantic, b.semantic_index),
                slot: a.input_slot,
            });
        }
        Ok(())
    }
}

/// Pipeline creation request: configuration plus compiled stages.
#[derive(Debug, Clone, Copy)]
pub struct PipelineStateDesc<'a> {
    pub config: &'a PipelineConfiguration,
    pub vertex: &'a ShaderBytecode,
    pub pixel: &'a ShaderBytecode,
    pub geometry: Option<&'a ShaderBytecode>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{InputElement, InputRate};

    fn config() -> PipelineConfiguration {
        PipelineConfiguration::default()
    }

    #[test]
    fn default_config_is_valid() {
        assert_eq!(config().validate(), Ok(()));
    }

    #[test]
    fn render_target_count_is_bounded() {
        let mut c = config();
        c.color_formats.clear();
        assert_eq!(c.validate(), Err(PipelineError::NoRenderTargets));

        c.color_formats = vec![wgpu::TextureFormat::Rgba8Unorm; MAX_RENDER_TARGETS + 1];
        assert_eq!(c.validate(), Err(PipelineError::TooManyRenderTargets(9)));
    }

    #[test]
    fn overlapping_elements_are_rejected() {
        let pos = InputElement {
            semantic: "POSITION",
            semantic_index: 0,
            format: wgpu::VertexFormat::Float32x3,
            input_slot: 0,
            offset: 0,
            rate: InputRate::PerVertex,
        };
        let mut c = config();
        c.input_layout = InputLayout::from_elements(vec![pos, InputElement { offset: 4, ..pos }]);
        assert!(matches!(
            c.validate(),
            Err(PipelineError::OverlappingInputElements { slot: 0, .. })
        ));
    }
}
