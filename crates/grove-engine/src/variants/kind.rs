use std::fmt;

use wgpu::{PrimitiveTopology, VertexFormat};

use crate::config::RendererConfig;
use crate::pipeline::{
    alpha_blended_coverage_state, alpha_to_coverage_blend_state, blend_state, depth_stencil_state,
    no_depth_state, rasterizer_state, BlendState, DepthStencilState, InputLayout,
    PipelineConfiguration, RasterizerState,
};
use crate::shader::EntryPoint;

/// Every shader variant the renderer knows how to build.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderKind {
    /// Identity defaults; stages supplied by the caller.
    Base,
    Player,
    Textured,
    Terrain,
    /// Instanced foliage quads over five independent layer textures.
    BillboardTrees,
    /// Instanced foliage quads sampling one texture array.
    BillboardTreeArray,
    /// Foliage points expanded to quads by a geometry shader.
    GeometryBillboard,
    /// Full-screen pass over the scene's render targets.
    PostProcessing,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 8] = [
        ShaderKind::Base,
        ShaderKind::Player,
        ShaderKind::Textured,
        ShaderKind::Terrain,
        ShaderKind::BillboardTrees,
        ShaderKind::BillboardTreeArray,
        ShaderKind::GeometryBillboard,
        ShaderKind::PostProcessing,
    ];

    pub fn capabilities(self) -> &'static ShaderCapabilities {
        match self {
            ShaderKind::Base => &BASE,
            ShaderKind::Player => &PLAYER,
            ShaderKind::Textured => &TEXTURED,
            ShaderKind::Terrain => &TERRAIN,
            ShaderKind::BillboardTrees => &BILLBOARD_TREES,
            ShaderKind::BillboardTreeArray => &BILLBOARD_TREE_ARRAY,
            ShaderKind::GeometryBillboard => &GEOMETRY_BILLBOARD,
            ShaderKind::PostProcessing => &POST_PROCESSING,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.capabilities().name
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Entry point name and profile, resolved against the configured source file.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StageEntry {
    pub name: &'static str,
    pub profile: &'static str,
}

impl StageEntry {
    pub const fn new(name: &'static str, profile: &'static str) -> Self {
        Self { name, profile }
    }

    pub fn in_file(self, source: &'static str) -> EntryPoint {
        EntryPoint::new(source, self.name, self.profile)
    }
}

/// Which colour targets a variant writes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TargetSet {
    /// The scene's render targets (one or more).
    Scene,
    /// The single output target.
    Output,
}

/// What one variant contributes to its pipeline.
#[derive(Debug)]
pub struct ShaderCapabilities {
    pub name: &'static str,
    pub vertex: Option<StageEntry>,
    pub pixel: Option<StageEntry>,
    pub geometry: Option<StageEntry>,
    pub input_layout: fn() -> InputLayout,
    pub rasterizer: fn() -> RasterizerState,
    pub blend: fn() -> BlendState,
    pub depth_stencil: fn() -> DepthStencilState,
    pub topology: PrimitiveTopology,
    pub targets: TargetSet,
}

impl ShaderCapabilities {
    pub fn pipeline_configuration(&self, config: &RendererConfig) -> PipelineConfiguration {
        let color_formats = match self.targets {
            TargetSet::Scene => config.color_formats.clone(),
            TargetSet::Output => vec![config.output_format],
        };
        PipelineConfiguration {
            rasterizer: (self.rasterizer)(),
            blend: (self.blend)(),
            depth_stencil: (self.depth_stencil)(),
            input_layout: (self.input_layout)(),
            topology: self.topology,
            color_formats,
            depth_format: config.depth_format,
            sample_count: config.sample_count,
            sample_mask: u32::MAX,
        }
    }
}

const VS: &str = "vs_5_1";
const PS: &str = "ps_5_1";
const GS: &str = "gs_5_1";

pub fn colored_layout() -> InputLayout {
    InputLayout::builder()
        .element("POSITION", 0, VertexFormat::Float32x3)
        .element("COLOR", 0, VertexFormat::Float32x4)
        .build()
}

pub fn textured_layout() -> InputLayout {
    InputLayout::builder()
        .element("POSITION", 0, VertexFormat::Float32x3)
        .element("TEXCOORD", 0, VertexFormat::Float32x2)
        .build()
}

pub fn terrain_layout() -> InputLayout {
    InputLayout::builder()
        .element("POSITION", 0, VertexFormat::Float32x3)
        .element("COLOR", 0, VertexFormat::Float32x4)
        .element("TEXCOORD", 0, VertexFormat::Float32x2)
        .element("TEXCOORD", 1, VertexFormat::Float32x2)
        .build()
}

pub fn billboard_point_layout() -> InputLayout {
    InputLayout::builder()
        .element("POSITION", 0, VertexFormat::Float32x3)
        .element("SIZE", 0, VertexFormat::Float32x2)
        .build()
}

const BASE: ShaderCapabilities = ShaderCapabilities {
    name: "base",
    vertex: None,
    pixel: None,
    geometry: None,
    input_layout: InputLayout::empty,
    rasterizer: rasterizer_state,
    blend: blend_state,
    depth_stencil: depth_stencil_state,
    topology: PrimitiveTopology::TriangleList,
    targets: TargetSet::Scene,
};

const PLAYER: ShaderCapabilities = ShaderCapabilities {
    name: "player",
    vertex: Some(StageEntry::new("VSPlayer", VS)),
    pixel: Some(StageEntry::new("PSPlayer", PS)),
    input_layout: colored_layout,
    ..BASE
};

const TEXTURED: ShaderCapabilities = ShaderCapabilities {
    name: "textured",
    vertex: Some(StageEntry::new("VSTextured", VS)),
    pixel: Some(StageEntry::new("PSTextured", PS)),
    input_layout: textured_layout,
    ..BASE
};

const TERRAIN: ShaderCapabilities = ShaderCapabilities {
    name: "terrain",
    vertex: Some(StageEntry::new("VSTerrain", VS)),
    pixel: Some(StageEntry::new("PSTerrain", PS)),
    input_layout: terrain_layout,
    ..BASE
};

const BILLBOARD_TREES: ShaderCapabilities = ShaderCapabilities {
    name: "billboard trees",
    vertex: Some(StageEntry::new("VSTree", VS)),
    pixel: Some(StageEntry::new("PSTree", PS)),
    input_layout: textured_layout,
    blend: alpha_to_coverage_blend_state,
    ..BASE
};

const BILLBOARD_TREE_ARRAY: ShaderCapabilities = ShaderCapabilities {
    name: "billboard tree array",
    vertex: Some(StageEntry::new("VSTreeArray", VS)),
    pixel: Some(StageEntry::new("PSTreeArray", PS)),
    ..BILLBOARD_TREES
};

const GEOMETRY_BILLBOARD: ShaderCapabilities = ShaderCapabilities {
    name: "geometry billboard",
    vertex: Some(StageEntry::new("VS_Geometry", VS)),
    pixel: Some(StageEntry::new("PS_Geometry", PS)),
    geometry: Some(StageEntry::new("GS", GS)),
    input_layout: billboard_point_layout,
    blend: alpha_blended_coverage_state,
    topology: PrimitiveTopology::PointList,
    ..BASE
};

const POST_PROCESSING: ShaderCapabilities = ShaderCapabilities {
    name: "post-processing",
    vertex: Some(StageEntry::new("VSPostProcessing", VS)),
    pixel: Some(StageEntry::new("PSPostProcessing", PS)),
    depth_stencil: no_depth_state,
    targets: TargetSet::Output,
    ..BASE
};
