//! Pipeline state description.
//!
//! Pure builders for the fixed-function fragments (rasterizer, blend,
//! depth-stencil, input layout) and the [`PipelineConfiguration`] they are
//! assembled into.

mod config;
mod input_layout;
mod state;

pub use config::{MAX_RENDER_TARGETS, PipelineConfiguration, PipelineError, PipelineStateDesc};
pub use input_layout::{InputElement, InputLayout, InputLayoutBuilder, InputRate};
pub use state::{
    alpha_blended_coverage_state, alpha_to_coverage_blend_state, blend_state,
    depth_stencil_state, no_depth_state, rasterizer_state, BlendState, DepthStencilState,
    RasterizerState, RenderTargetBlend,
};
