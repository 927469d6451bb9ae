//! Fixed-function state fragments.
//!
//! Every builder here is a pure function returning a complete fragment.
//! Shader variants start from the defaults and replace whole fragments.

use wgpu::{
    BlendComponent, BlendFactor, BlendOperation, ColorWrites, CompareFunction, DepthBiasState,
    Face, FrontFace, PolygonMode, StencilFaceState, StencilOperation, StencilState,
};

// ── rasterizer ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct RasterizerState {
    pub fill_mode: PolygonMode,
    pub cull_mode: Option<Face>,
    pub front_face: FrontFace,
    pub depth_bias: DepthBiasState,
    pub depth_clip: bool,
    pub multisample: bool,
    pub antialiased_lines: bool,
    pub forced_sample_count: u32,
    pub conservative: bool,
}

/// Solid fill, back-face culling, clockwise front faces, depth clipping on.
pub fn rasterizer_state() -> RasterizerState {
    RasterizerState {
        fill_mode: PolygonMode::Fill,
        cull_mode: Some(Face::Back),
        front_face: FrontFace::Cw,
        depth_bias: DepthBiasState {
            constant: 0,
            slope_scale: 0.0,
            clamp: 0.0,
        },
        depth_clip: true,
        multisample: false,
        antialiased_lines: false,
        forced_sample_count: 0,
        conservative: false,
    }
}

// ── blend ─────────────────────────────────────────────────────────────────

/// Blend configuration of one render target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderTargetBlend {
    pub enabled: bool,
    pub blend: wgpu::BlendState,
    pub write_mask: ColorWrites,
}

impl RenderTargetBlend {
    /// Blending off, One/Zero/Add factors, all channels written.
    pub const OPAQUE: Self = Self {
        enabled: false,
        blend: wgpu::BlendState::REPLACE,
        write_mask: ColorWrites::ALL,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlendState {
    pub alpha_to_coverage: bool,
    /// When false, `render_target` applies to every bound target.
    pub independent_blend: bool,
    pub render_target: RenderTargetBlend,
}

/// Opaque output, no alpha-to-coverage.
pub fn blend_state() -> BlendState {
    BlendState {
        alpha_to_coverage: false,
        independent_blend: false,
        render_target: RenderTargetBlend::OPAQUE,
    }
}

/// Opaque output with alpha-to-coverage, used by instanced foliage.
pub fn alpha_to_coverage_blend_state() -> BlendState {
    BlendState {
        alpha_to_coverage: true,
        ..blend_state()
    }
}

/// Alpha-to-coverage with SrcAlpha / InvSrcAlpha colour factors.
///
/// Blending stays disabled; the factors only take effect if a caller flips
/// `enabled`.
pub fn alpha_blended_coverage_state() -> BlendState {
    BlendState {
        alpha_to_coverage: true,
        independent_blend: false,
        render_target: RenderTargetBlend {
            enabled: false,
            blend: wgpu::BlendState {
                color: BlendComponent {
                    src_factor: BlendFactor::SrcAlpha,
                    dst_factor: BlendFactor::OneMinusSrcAlpha,
                    operation: BlendOperation::Add,
                },
                alpha: BlendComponent {
                    src_factor: BlendFactor::One,
                    dst_factor: BlendFactor::Zero,
                    operation: BlendOperation::Add,
                },
            },
            write_mask: ColorWrites::ALL,
        },
    }
}

// ── depth / stencil ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct DepthStencilState {
    pub depth_enabled: bool,
    pub depth_write: bool,
    pub depth_compare: CompareFunction,
    pub stencil_enabled: bool,
    pub stencil: StencilState,
}

const KEEP_NEVER: StencilFaceState = StencilFaceState {
    compare: CompareFunction::Never,
    fail_op: StencilOperation::Keep,
    depth_fail_op: StencilOperation::Keep,
    pass_op: StencilOperation::Keep,
};

fn disabled_stencil() -> StencilState {
    StencilState {
        front: KEEP_NEVER,
        back: KEEP_NEVER,
        read_mask: 0x00,
        write_mask: 0x00,
    }
}

/// Depth test with `Less`, depth writes on, stencil off.
pub fn depth_stencil_state() -> DepthStencilState {
    DepthStencilState {
        depth_enabled: true,
        depth_write: true,
        depth_compare: CompareFunction::Less,
        stencil_enabled: false,
        stencil: disabled_stencil(),
    }
}

/// Depth test off (`Always`), used by full-screen passes.
pub fn no_depth_state() -> DepthStencilState {
    DepthStencilState {
        depth_enabled: false,
        depth_compare: CompareFunction::Always,
        ..depth_stencil_state()
    }
}
