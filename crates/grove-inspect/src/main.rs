use anyhow::Context;
use glam::Vec3;

use grove_engine::config::RendererConfig;
use grove_engine::device::ResourceId;
use grove_engine::logging::{init_logging, LoggingConfig};
use grove_engine::recording::{
    RecordingCommandList, RecordingCompiler, RecordingDevice, RecordingTextureLoader,
    DEFAULT_INCREMENT_SIZE,
};
use grove_engine::resources::{ResourceDesc, TextureKind, TextureResource, TextureSet};
use grove_engine::scene::{DeviceMeshFactory, FixedCamera, HeightMap};
use grove_engine::shader::{CompileFlags, ShaderProgramSource};
use grove_engine::variants::{BuildContext, ShaderKind, ShaderVariant, StageEntry};

/// Gentle procedural hills, enough to give foliage varying heights.
struct RollingHills {
    width: u32,
    length: u32,
}

impl HeightMap for RollingHills {
    fn width(&self) -> u32 {
        self.width
    }

    fn length(&self) -> u32 {
        self.length
    }

    fn height_at(&self, x: f32, z: f32) -> f32 {
        40.0 + 25.0 * (x * 0.004).sin() * (z * 0.003).cos()
    }
}

fn parse_extent(arg: Option<String>, default: u32) -> anyhow::Result<u32> {
    match arg {
        Some(s) => s
            .parse()
            .with_context(|| format!("terrain extent `{s}` is not a whole number")),
        None => Ok(default),
    }
}

/// Stand-ins for the scene's colour targets, sampled by post-processing.
fn scene_targets(config: &RendererConfig) -> TextureSet {
    let resources = config
        .color_formats
        .iter()
        .zip(0x8000u64..)
        .map(|(&format, id)| TextureResource {
            id: ResourceId(id),
            desc: ResourceDesc {
                format: Some(format),
                array_size: 1,
                mip_levels: 1,
            },
        })
        .collect();
    TextureSet::from_resources(TextureKind::Texture2DLayers, resources)
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default().without_timestamps());

    let mut args = std::env::args().skip(1);
    let terrain = RollingHills {
        width: parse_extent(args.next(), 1000)?,
        length: parse_extent(args.next(), 1000)?,
    };

    let config = RendererConfig::default().with_render_targets(2);
    let (recorder, device) = RecordingDevice::shared(DEFAULT_INCREMENT_SIZE);
    let flags = CompileFlags {
        debug: config.debug_shaders,
        skip_optimization: config.debug_shaders,
    };
    let shaders = ShaderProgramSource::new(RecordingCompiler::new(), config.shader_dir.clone(), flags);
    let loader = RecordingTextureLoader::default();
    let meshes = DeviceMeshFactory::new(device.clone());
    let targets = scene_targets(&config);
    let camera = FixedCamera::new(Vec3::new(500.0, 150.0, -400.0), 1280, 720);

    let ctx = BuildContext::new()
        .with_terrain(&terrain)
        .with_textures(&loader)
        .with_meshes(&meshes)
        .with_render_texture(&targets);

    log::info!(
        "terrain {}x{}, {} render targets",
        terrain.width,
        terrain.length,
        config.color_formats.len()
    );

    for kind in ShaderKind::ALL {
        let mut variant = match kind {
            ShaderKind::Base => ShaderVariant::base(
                StageEntry::new("VSPostProcessing", "vs_5_1"),
                StageEntry::new("PSPostProcessing", "ps_5_1"),
            ),
            kind => ShaderVariant::new(kind),
        };

        let mut cmd = RecordingCommandList::new();
        variant
            .build(&device, &shaders, &config, &mut cmd, &ctx)
            .with_context(|| format!("building {kind}"))?;
        let uploads = cmd.commands().len();
        variant.release_upload_buffers();

        cmd.clear();
        variant
            .render(&mut cmd, &camera)
            .with_context(|| format!("rendering {kind}"))?;

        if let Some(pipeline) = variant.pipeline() {
            let c = pipeline.config();
            log::info!(
                "{kind}: {:?}, {} targets, stride {}, alpha-to-coverage {}, depth {}",
                c.topology,
                c.color_formats.len(),
                c.input_layout.stride(0),
                c.blend.alpha_to_coverage,
                c.depth_stencil.depth_enabled,
            );
        }
        if let Some(region) = variant.objects().descriptor_region() {
            log::info!(
                "{kind}: {} CBVs + {} SRVs, SRVs from {:#x}",
                region.cbv_count,
                region.srv_count,
                region.srv_gpu_start().0
            );
        }
        log::info!(
            "{kind}: {} instances, {uploads} upload commands, {} commands ({} draws), {} live objects",
            variant.objects().instance_count(),
            cmd.commands().len(),
            cmd.draw_count(),
            recorder.live_objects()
        );

        variant.release();
    }

    log::info!("{} device objects leaked", recorder.live_objects());
    Ok(())
}
