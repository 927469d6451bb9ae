use std::path::PathBuf;

/// Root-signature slots the variants bind their descriptor tables to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RootParameters {
    /// Per-object constant buffer table.
    pub object_constants: u32,
    /// Shared table holding every billboard tree layer.
    pub tree_layers: u32,
    /// First table of the texture-array foliage variants.
    pub tree_array: u32,
    /// Shared table of the render targets read by post-processing.
    pub render_targets: u32,
}

impl Default for RootParameters {
    fn default() -> Self {
        Self {
            object_constants: 2,
            tree_layers: 6,
            tree_array: 7,
            render_targets: 8,
        }
    }
}

/// Placement and size of generated foliage.
#[derive(Debug, Clone, PartialEq)]
pub struct FoliageConfig {
    /// Grid spacing in world units; columns use half of it.
    pub pitch: u32,
    /// Billboard quad width and height.
    pub size: [f32; 2],
    /// Lift above the terrain for instanced trees.
    pub tree_height_offset: f32,
    /// Lift above the terrain for texture-array and geometry billboards.
    pub array_height_offset: f32,
    /// Layer files of the instanced tree set, relative to the asset directory.
    pub tree_layers: Vec<PathBuf>,
    /// Texture-array file, relative to the asset directory.
    pub tree_array: PathBuf,
}

impl Default for FoliageConfig {
    fn default() -> Self {
        Self {
            pitch: 200,
            size: [50.0, 70.0],
            tree_height_offset: 35.0,
            array_height_offset: 30.0,
            tree_layers: (1..=5).map(|i| PathBuf::from(format!("tree{i}.dds"))).collect(),
            tree_array: PathBuf::from("treearray.dds"),
        }
    }
}

/// Parameters shared by every shader variant.
///
/// Keep defaults matching the scene's render targets; variants read formats
/// from here rather than hardcoding them.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Directory the shader sources are resolved against.
    pub shader_dir: PathBuf,

    /// Source file holding every entry point.
    pub shader_file: &'static str,

    /// Directory textures are loaded from.
    pub asset_dir: PathBuf,

    /// Colour targets scene variants write to. More than one enables
    /// multiple render targets.
    pub color_formats: Vec<wgpu::TextureFormat>,

    /// Format of the single target post-processing writes to.
    pub output_format: wgpu::TextureFormat,

    pub depth_format: Option<wgpu::TextureFormat>,

    pub sample_count: u32,

    pub root_parameters: RootParameters,

    pub foliage: FoliageConfig,

    /// Compile shaders with debug info and without optimization.
    pub debug_shaders: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            shader_dir: PathBuf::from("."),
            shader_file: "Shaders.hlsl",
            asset_dir: PathBuf::from("Image"),
            color_formats: vec![wgpu::TextureFormat::Rgba8Unorm],
            output_format: wgpu::TextureFormat::Rgba8Unorm,
            depth_format: Some(wgpu::TextureFormat::Depth24PlusStencil8),
            sample_count: 1,
            root_parameters: RootParameters::default(),
            foliage: FoliageConfig::default(),
            debug_shaders: cfg!(debug_assertions),
        }
    }
}

impl RendererConfig {
    /// Scene variants write to `count` targets of the default colour format.
    pub fn with_render_targets(mut self, count: usize) -> Self {
        self.color_formats = vec![wgpu::TextureFormat::Rgba8Unorm; count];
        self
    }

    pub fn asset_path(&self, file: &std::path::Path) -> PathBuf {
        self.asset_dir.join(file)
    }
}
