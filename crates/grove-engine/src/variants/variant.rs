use anyhow::Context;

use crate::config::RendererConfig;
use crate::descriptor::DescriptorRegion;
use crate::device::{CommandList, Device, PipelineState};
use crate::pipeline::PipelineStateDesc;
use crate::render::{RenderError, RenderPass};
use crate::scene::Camera;
use crate::shader::{ShaderCompiler, ShaderProgramSource, ShaderStage};

use super::billboard::{BillboardPreset, BillboardSet};
use super::geometry::GeometryBillboardSet;
use super::kind::{ShaderKind, StageEntry};
use super::post::PostProcessPass;
use super::{BuildContext, VariantError, VariantState};

/// Renderable objects owned by a variant.
#[derive(Debug, Default)]
pub enum ShaderObjects {
    #[default]
    None,
    Billboards(BillboardSet),
    GeometryBillboards(GeometryBillboardSet),
    PostProcess(PostProcessPass),
}

impl ShaderObjects {
    pub fn descriptor_region(&self) -> Option<&DescriptorRegion> {
        match self {
            ShaderObjects::None => None,
            ShaderObjects::Billboards(set) => Some(set.region()),
            ShaderObjects::GeometryBillboards(set) => Some(set.region()),
            ShaderObjects::PostProcess(pass) => Some(pass.region()),
        }
    }

    /// Billboard instances or geometry points.
    pub fn instance_count(&self) -> usize {
        match self {
            ShaderObjects::Billboards(set) => set.instances().len(),
            ShaderObjects::GeometryBillboards(set) => set.vertex_count() as usize,
            _ => 0,
        }
    }

    fn release_upload_buffers(&mut self) {
        match self {
            ShaderObjects::Billboards(set) => set.release_upload_buffers(),
            ShaderObjects::GeometryBillboards(set) => set.release_upload_buffers(),
            ShaderObjects::None | ShaderObjects::PostProcess(_) => {}
        }
    }
}

/// One pipeline plus the objects rendered with it.
///
/// Lifecycle: `Unbuilt → Configured → Populated → Renderable → Released`.
/// `release_objects` steps back to `Configured`; `create_shader` re-enters
/// from `Released`.
#[derive(Debug)]
pub struct ShaderVariant {
    kind: ShaderKind,
    stages: Option<(StageEntry, StageEntry)>,
    state: VariantState,
    config: Option<RendererConfig>,
    pipeline: Option<PipelineState>,
    objects: ShaderObjects,
}

impl ShaderVariant {
    pub fn new(kind: ShaderKind) -> Self {
        Self {
            kind,
            stages: None,
            state: VariantState::Unbuilt,
            config: None,
            pipeline: None,
            objects: ShaderObjects::None,
        }
    }

    /// Base variant over caller-chosen vertex and pixel entry points.
    pub fn base(vertex: StageEntry, pixel: StageEntry) -> Self {
        Self {
            stages: Some((vertex, pixel)),
            ..Self::new(ShaderKind::Base)
        }
    }

    #[inline]
    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    #[inline]
    pub fn state(&self) -> VariantState {
        self.state
    }

    #[inline]
    pub fn pipeline(&self) -> Option<&PipelineState> {
        self.pipeline.as_ref()
    }

    #[inline]
    pub fn objects(&self) -> &ShaderObjects {
        &self.objects
    }

    /// Compiles the stages and creates the pipeline object.
    pub fn create_shader<C: ShaderCompiler>(
        &mut self,
        device: &Device,
        shaders: &ShaderProgramSource<C>,
        config: &RendererConfig,
    ) -> anyhow::Result<()> {
        self.expect_state(&[VariantState::Unbuilt, VariantState::Released], "create_shader")?;

        let caps = self.kind.capabilities();
        let name = caps.name;
        let (vertex, pixel) = match self.stages {
            Some((vs, ps)) => (Some(vs), Some(ps)),
            None => (caps.vertex, caps.pixel),
        };
        let file = config.shader_file;
        let vs = shaders
            .compile_optional(vertex.map(|e| e.in_file(file)).as_ref(), ShaderStage::Vertex)
            .with_context(|| format!("{name}: vertex shader"))?;
        let ps = shaders
            .compile_optional(pixel.map(|e| e.in_file(file)).as_ref(), ShaderStage::Pixel)
            .with_context(|| format!("{name}: pixel shader"))?;
        let gs = match caps.geometry {
            Some(entry) => Some(
                shaders
                    .compile(&entry.in_file(file), ShaderStage::Geometry)
                    .with_context(|| format!("{name}: geometry shader"))?,
            ),
            None => None,
        };

        let pipeline_config = caps.pipeline_configuration(config);
        let pipeline = device
            .create_pipeline_state(name, &PipelineStateDesc {
                config: &pipeline_config,
                vertex: &vs,
                pixel: &ps,
                geometry: gs.as_ref(),
            })
            .with_context(|| format!("{name}: pipeline state"))?;

        self.pipeline = Some(pipeline);
        self.config = Some(config.clone());
        self.state = VariantState::Configured;
        Ok(())
    }

    /// Builds the variant's renderable objects.
    pub fn build_objects(
        &mut self,
        device: &Device,
        cmd: &mut dyn CommandList,
        ctx: &BuildContext<'_>,
    ) -> anyhow::Result<()> {
        self.expect_state(&[VariantState::Configured], "build_objects")?;
        let Some(config) = &self.config else {
            return Err(self.transition_error("build_objects").into());
        };

        self.objects = match self.kind {
            ShaderKind::BillboardTrees => ShaderObjects::Billboards(BillboardSet::build(
                device,
                cmd,
                ctx,
                &BillboardPreset::trees(config),
                config,
            )?),
            ShaderKind::BillboardTreeArray => ShaderObjects::Billboards(BillboardSet::build(
                device,
                cmd,
                ctx,
                &BillboardPreset::tree_array(config),
                config,
            )?),
            ShaderKind::GeometryBillboard => ShaderObjects::GeometryBillboards(
                GeometryBillboardSet::build(device, cmd, ctx, config)?,
            ),
            ShaderKind::PostProcessing => {
                ShaderObjects::PostProcess(PostProcessPass::build(device, ctx, config)?)
            }
            ShaderKind::Base | ShaderKind::Player | ShaderKind::Textured | ShaderKind::Terrain => {
                ShaderObjects::None
            }
        };
        self.state = VariantState::Populated;
        Ok(())
    }

    /// `create_shader` followed by `build_objects`.
    pub fn build<C: ShaderCompiler>(
        &mut self,
        device: &Device,
        shaders: &ShaderProgramSource<C>,
        config: &RendererConfig,
        cmd: &mut dyn CommandList,
        ctx: &BuildContext<'_>,
    ) -> anyhow::Result<()> {
        self.create_shader(device, shaders, config)?;
        self.build_objects(device, cmd, ctx)
    }

    /// Drops staging buffers once the upload copies have executed.
    pub fn release_upload_buffers(&mut self) {
        match self.state {
            VariantState::Populated => {
                self.objects.release_upload_buffers();
                self.state = VariantState::Renderable;
                log::debug!("{}: upload buffers released", self.kind);
            }
            VariantState::Renderable => {}
            state => log::warn!(
                "{}: release_upload_buffers ignored while {state:?}",
                self.kind
            ),
        }
    }

    pub fn render(
        &mut self,
        cmd: &mut dyn CommandList,
        camera: &dyn Camera,
    ) -> Result<(), RenderError> {
        let not_ready = RenderError::NotReady {
            variant: self.kind.name(),
            state: self.state,
        };
        if !matches!(self.state, VariantState::Populated | VariantState::Renderable) {
            return Err(not_ready);
        }
        let Some(pipeline) = &self.pipeline else {
            return Err(not_ready);
        };

        let mut pass = RenderPass::new(cmd);
        match &mut self.objects {
            ShaderObjects::None => pass.set_pipeline(pipeline),
            ShaderObjects::Billboards(set) => set.render(&mut pass, pipeline, camera)?,
            ShaderObjects::GeometryBillboards(set) => set.render(&mut pass, pipeline)?,
            ShaderObjects::PostProcess(post) => post.render(&mut pass, pipeline, camera)?,
        }
        Ok(())
    }

    /// Frees the renderable objects, keeping the pipeline.
    pub fn release_objects(&mut self) {
        match self.state {
            VariantState::Populated | VariantState::Renderable => {
                self.objects = ShaderObjects::None;
                self.state = VariantState::Configured;
            }
            state => log::warn!("{}: release_objects ignored while {state:?}", self.kind),
        }
    }

    /// Frees every device object the variant owns.
    pub fn release(&mut self) {
        self.objects = ShaderObjects::None;
        self.pipeline = None;
        self.config = None;
        self.state = VariantState::Released;
    }

    fn expect_state(
        &self,
        allowed: &[VariantState],
        operation: &'static str,
    ) -> Result<(), VariantError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            let err = self.transition_error(operation);
            log::warn!("{err}");
            Err(err)
        }
    }

    fn transition_error(&self, operation: &'static str) -> VariantError {
        VariantError::InvalidTransition {
            variant: self.kind.name(),
            operation,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::rc::Rc;

    use glam::Vec3;

    use super::*;
    use crate::device::{HeapType, ResourceId};
    use crate::recording::{
        Command, DeviceCall, FailPoint, ObjectKind, RecordingCommandList, RecordingCompiler,
        RecordingDevice, RecordingTextureLoader,
    };
    use crate::resources::{ResourceDesc, TextureKind, TextureResource, TextureSet};
    use crate::scene::{DeviceMeshFactory, FixedCamera, FlatHeightMap, GridOverflow};
    use crate::shader::{CompileFlags, ShaderError};

    struct Rig {
        rec: Rc<RecordingDevice>,
        device: Device,
        shaders: ShaderProgramSource<RecordingCompiler>,
        config: RendererConfig,
        terrain: FlatHeightMap,
        loader: RecordingTextureLoader,
        meshes: DeviceMeshFactory,
        camera: FixedCamera,
        cmd: RecordingCommandList,
    }

    fn rig() -> Rig {
        let (rec, device) = RecordingDevice::shared(32);
        Rig {
            rec,
            meshes: DeviceMeshFactory::new(device.clone()),
            device,
            shaders: ShaderProgramSource::new(
                RecordingCompiler::new(),
                "shaders",
                CompileFlags::default(),
            ),
            config: RendererConfig::default(),
            terrain: FlatHeightMap {
                width: 1000,
                length: 1000,
                height: 0.0,
            },
            loader: RecordingTextureLoader::default(),
            camera: FixedCamera::new(Vec3::new(500.0, 100.0, -300.0), 1280, 720),
            cmd: RecordingCommandList::new(),
        }
    }

    impl Rig {
        fn build(&mut self, variant: &mut ShaderVariant) -> anyhow::Result<()> {
            let ctx = BuildContext::new()
                .with_terrain(&self.terrain)
                .with_textures(&self.loader)
                .with_meshes(&self.meshes);
            variant.build(&self.device, &self.shaders, &self.config, &mut self.cmd, &ctx)
        }

        fn rebuild_objects(&mut self, variant: &mut ShaderVariant) -> anyhow::Result<()> {
            let ctx = BuildContext::new()
                .with_terrain(&self.terrain)
                .with_textures(&self.loader)
                .with_meshes(&self.meshes);
            variant.build_objects(&self.device, &mut self.cmd, &ctx)
        }

        fn render(&mut self, variant: &mut ShaderVariant) -> Result<(), RenderError> {
            self.cmd.clear();
            variant.render(&mut self.cmd, &self.camera)
        }
    }

    fn billboards(variant: &ShaderVariant) -> &BillboardSet {
        match variant.objects() {
            ShaderObjects::Billboards(set) => set,
            other => panic!("expected billboards, got {other:?}"),
        }
    }

    // ── lifecycle ──────────────────────────────────────────────────────────

    #[test]
    fn render_before_population_is_not_ready() {
        let mut r = rig();
        let mut variant = ShaderVariant::new(ShaderKind::Textured);
        assert!(matches!(
            r.render(&mut variant),
            Err(RenderError::NotReady { state: VariantState::Unbuilt, .. })
        ));

        variant.create_shader(&r.device, &r.shaders, &r.config).unwrap();
        assert!(matches!(
            r.render(&mut variant),
            Err(RenderError::NotReady { state: VariantState::Configured, .. })
        ));
        assert!(r.cmd.commands().is_empty());
    }

    #[test]
    fn simple_variant_renders_its_pipeline_only() {
        let mut r = rig();
        let mut variant = ShaderVariant::new(ShaderKind::Player);
        r.build(&mut variant).unwrap();
        assert_eq!(variant.state(), VariantState::Populated);
        assert!(variant.objects().descriptor_region().is_none());

        r.render(&mut variant).unwrap();
        let id = variant.pipeline().unwrap().id();
        assert_eq!(r.cmd.commands(), &[Command::SetPipelineState(id)]);
    }

    #[test]
    fn release_then_rebuild_recreates_instances_without_leaks() {
        let mut r = rig();
        let mut trees = ShaderVariant::new(ShaderKind::BillboardTrees);
        r.build(&mut trees).unwrap();
        assert_eq!(trees.objects().instance_count(), 25);
        // pipeline, heap, constants, vertex buffer, staging buffer
        assert_eq!(r.rec.live_objects(), 5);

        trees.release_upload_buffers();
        assert_eq!(trees.state(), VariantState::Renderable);
        assert_eq!(r.rec.live_objects_of(ObjectKind::Buffer(HeapType::Upload)), 1);

        trees.release_objects();
        assert_eq!(trees.state(), VariantState::Configured);
        assert_eq!(r.rec.live_objects(), 1);

        r.rebuild_objects(&mut trees).unwrap();
        assert_eq!(trees.objects().instance_count(), 25);
        assert_eq!(r.rec.live_objects(), 5);

        trees.release();
        assert_eq!(trees.state(), VariantState::Released);
        assert_eq!(r.rec.live_objects(), 0);
    }

    #[test]
    fn released_variant_can_be_recreated() {
        let mut r = rig();
        let mut variant = ShaderVariant::new(ShaderKind::Terrain);
        r.build(&mut variant).unwrap();
        variant.release();
        assert!(matches!(
            r.render(&mut variant),
            Err(RenderError::NotReady { state: VariantState::Released, .. })
        ));
        r.build(&mut variant).unwrap();
        assert_eq!(variant.state(), VariantState::Populated);
        assert_eq!(r.rec.live_objects(), 1);
    }

    #[test]
    fn release_upload_buffers_is_one_way_and_idempotent() {
        let mut r = rig();
        let mut variant = ShaderVariant::new(ShaderKind::Textured);
        variant.release_upload_buffers();
        assert_eq!(variant.state(), VariantState::Unbuilt);

        r.build(&mut variant).unwrap();
        variant.release_upload_buffers();
        variant.release_upload_buffers();
        assert_eq!(variant.state(), VariantState::Renderable);
        r.render(&mut variant).unwrap();
    }

    #[test]
    fn out_of_order_transitions_are_rejected() {
        let mut r = rig();
        let mut variant = ShaderVariant::new(ShaderKind::Textured);
        assert!(r.rebuild_objects(&mut variant).is_err());

        variant.create_shader(&r.device, &r.shaders, &r.config).unwrap();
        let err = variant
            .create_shader(&r.device, &r.shaders, &r.config)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<VariantError>(),
            Some(&VariantError::InvalidTransition {
                variant: "textured",
                operation: "create_shader",
                state: VariantState::Configured,
            })
        );
    }

    // ── errors ─────────────────────────────────────────────────────────────

    #[test]
    fn compile_errors_are_surfaced() {
        let mut r = rig();
        r.shaders.compiler().fail_entry("PSTree", "X3000: syntax error");
        let mut trees = ShaderVariant::new(ShaderKind::BillboardTrees);

        let err = r.build(&mut trees).unwrap_err();
        assert!(format!("{err:#}").contains("X3000: syntax error"));
        assert_eq!(trees.state(), VariantState::Unbuilt);
        assert_eq!(r.rec.live_objects(), 0);
    }

    #[test]
    fn pipeline_failure_is_fatal_to_the_variant() {
        let mut r = rig();
        r.rec.fail_next(FailPoint::PipelineState);
        let mut variant = ShaderVariant::new(ShaderKind::Player);
        assert!(r.build(&mut variant).is_err());
        assert_eq!(variant.state(), VariantState::Unbuilt);
    }

    #[test]
    fn base_without_stages_is_rejected_before_the_device() {
        let r = rig();
        let mut base = ShaderVariant::new(ShaderKind::Base);
        let err = base
            .create_shader(&r.device, &r.shaders, &r.config)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ShaderError>(),
            Some(ShaderError::EmptyBytecode { stage: "vertex" })
        ));
        assert!(r.rec.calls().is_empty());
    }

    #[test]
    fn base_with_stages_builds_one_pipeline() {
        let mut r = rig();
        let mut base = ShaderVariant::base(
            StageEntry::new("VSDiffused", "vs_5_1"),
            StageEntry::new("PSDiffused", "ps_5_1"),
        );
        r.build(&mut base).unwrap();
        assert_eq!(r.rec.live_objects_of(ObjectKind::PipelineState), 1);
        assert_eq!(r.shaders.compiler().calls()[0].path, PathBuf::from("shaders/Shaders.hlsl"));
    }

    #[test]
    fn missing_terrain_is_an_error() {
        let mut r = rig();
        let mut trees = ShaderVariant::new(ShaderKind::BillboardTrees);
        trees.create_shader(&r.device, &r.shaders, &r.config).unwrap();

        let ctx = BuildContext::new().with_textures(&r.loader).with_meshes(&r.meshes);
        let err = trees.build_objects(&r.device, &mut r.cmd, &ctx).unwrap_err();
        assert_eq!(
            err.downcast_ref::<VariantError>(),
            Some(&VariantError::MissingContext {
                variant: "billboard trees",
                what: "terrain",
            })
        );
        assert_eq!(trees.state(), VariantState::Configured);
    }

    #[test]
    fn missing_texture_file_fails_the_build() {
        let mut r = rig();
        r.loader.mark_missing("Image/tree3.dds");
        let mut trees = ShaderVariant::new(ShaderKind::BillboardTrees);
        let err = r.build(&mut trees).unwrap_err();
        assert!(format!("{err:#}").contains("tree3.dds"));
        assert_eq!(r.rec.live_objects_of(ObjectKind::DescriptorHeap), 0);
    }

    // ── billboard trees ────────────────────────────────────────────────────

    #[test]
    fn trees_layout_descriptors_per_instance() {
        let mut r = rig();
        let mut trees = ShaderVariant::new(ShaderKind::BillboardTrees);
        r.build(&mut trees).unwrap();

        let set = billboards(&trees);
        let region = set.region();
        assert_eq!((region.cbv_count, region.srv_count), (25, 5));
        assert_eq!(region.srv_gpu_start(), region.gpu_start.offset(25, 32));
        assert_eq!(r.loader.loaded().len(), 5);
        assert_eq!(r.loader.loaded()[0], PathBuf::from("Image/tree1.dds"));

        let last = &set.instances()[24];
        assert_eq!(last.slot, 24);
        assert_eq!(last.cbv_gpu, region.cbv_gpu(24));
        assert_eq!(last.constants_offset, 24 * 256);
        assert_eq!(last.position(), Vec3::new(400.0, 35.0, 800.0));
    }

    #[test]
    fn small_terrain_builds_no_instances() {
        let mut r = rig();
        r.terrain.width = 150;
        let mut trees = ShaderVariant::new(ShaderKind::BillboardTrees);
        r.build(&mut trees).unwrap();
        assert_eq!(trees.objects().instance_count(), 0);
        assert!(billboards(&trees).constants().is_none());

        r.render(&mut trees).unwrap();
        assert_eq!(r.cmd.draw_count(), 0);
    }

    #[test]
    fn oversized_foliage_grid_fails_the_build() {
        let mut r = rig();
        r.config.foliage.pitch = 1;
        r.terrain.width = 200_000;
        r.terrain.length = 200_000;

        for kind in [ShaderKind::BillboardTrees, ShaderKind::GeometryBillboard] {
            let mut variant = ShaderVariant::new(kind);
            let err = r.build(&mut variant).unwrap_err();
            assert!(err.downcast_ref::<GridOverflow>().is_some(), "{kind}: {err:#}");
            assert_eq!(variant.state(), VariantState::Configured);
        }
        assert_eq!(r.rec.live_objects_of(ObjectKind::DescriptorHeap), 0);
    }

    #[test]
    fn trees_render_binds_layers_then_each_instance() {
        let mut r = rig();
        let mut trees = ShaderVariant::new(ShaderKind::BillboardTrees);
        r.build(&mut trees).unwrap();
        trees.release_upload_buffers();
        r.render(&mut trees).unwrap();

        let region = *billboards(&trees).region();
        let commands = r.cmd.commands();
        assert!(matches!(commands[0], Command::SetPipelineState(_)));
        assert!(matches!(commands[1], Command::SetDescriptorHeap(_)));

        let tables = r.cmd.root_tables();
        assert_eq!(tables.len(), 26);
        assert_eq!(tables[0], (6, region.srv_gpu_start()));
        assert_eq!(tables[1], (2, region.cbv_gpu(0)));
        assert_eq!(tables[25], (2, region.cbv_gpu(24)));
        assert_eq!(r.cmd.draw_count(), 25);
    }

    #[test]
    fn constants_are_written_after_reorientation() {
        let mut r = rig();
        let mut trees = ShaderVariant::new(ShaderKind::BillboardTrees);
        r.build(&mut trees).unwrap();
        r.render(&mut trees).unwrap();

        let set = billboards(&trees);
        let block = set.constants().unwrap();
        let bytes = r.rec.buffer_contents(block.buffer().id()).unwrap();
        for i in [0u32, 7, 24] {
            let range = block.slot_range(i);
            let written: &[u8] = &bytes[range.start as usize..range.end as usize];
            let instance = &set.instances()[i as usize];
            assert_eq!(written, bytemuck::bytes_of(&instance.constants()));

            let look = instance.world.z_axis.truncate();
            assert!(look.y.abs() < 1e-6);
            let to_eye = (r.camera.position - instance.position()).with_y(0.0).normalize();
            assert!((look - to_eye).length() < 1e-5);
        }
    }

    // ── billboard tree array ───────────────────────────────────────────────

    #[test]
    fn tree_array_sits_beside_the_layered_trees() {
        let mut r = rig();
        let mut array = ShaderVariant::new(ShaderKind::BillboardTreeArray);
        r.build(&mut array).unwrap();

        let set = billboards(&array);
        assert_eq!(set.instances().len(), 25);
        assert_eq!(set.instances()[0].position(), Vec3::new(500.0, 30.0, 0.0));
        assert_eq!(set.region().srv_count, 1);
        assert_eq!(r.loader.loaded(), vec![PathBuf::from("Image/treearray.dds")]);
        let srv = set.region().srv_gpu_start();

        r.render(&mut array).unwrap();
        assert_eq!(r.cmd.root_tables()[0], (7, srv));
    }

    // ── geometry billboards ────────────────────────────────────────────────

    #[test]
    fn geometry_billboard_draws_points_in_one_call() {
        let mut r = rig();
        let mut points = ShaderVariant::new(ShaderKind::GeometryBillboard);
        r.build(&mut points).unwrap();

        assert!(r.rec.calls().iter().any(|c| matches!(
            c,
            DeviceCall::CreatePipelineState {
                topology: wgpu::PrimitiveTopology::PointList,
                has_geometry_stage: true,
                ..
            }
        )));
        assert!(
            r.shaders
                .compiler()
                .calls()
                .iter()
                .any(|c| c.entry == "GS" && c.profile.to_string() == "gs_5_1")
        );
        assert_eq!(points.objects().instance_count(), 25);

        points.release_upload_buffers();
        assert_eq!(r.rec.live_objects_of(ObjectKind::Buffer(HeapType::Upload)), 0);

        r.render(&mut points).unwrap();
        let commands = r.cmd.commands();
        assert!(commands.contains(&Command::SetPrimitiveTopology(
            wgpu::PrimitiveTopology::PointList
        )));
        assert_eq!(commands.last(), Some(&Command::DrawInstanced {
            vertex_count: 25,
            instance_count: 1,
            start_vertex: 0,
            start_instance: 0,
        }));
        let region = points.objects().descriptor_region().copied().unwrap();
        assert_eq!((region.cbv_count, region.srv_count), (0, 1));
        assert_eq!(r.cmd.root_tables(), vec![(7, region.srv_gpu_start())]);
    }

    // ── post-processing ────────────────────────────────────────────────────

    fn render_targets(n: u64) -> TextureSet {
        let resources = (0..n)
            .map(|i| TextureResource {
                id: ResourceId(0x500 + i),
                desc: ResourceDesc {
                    format: Some(wgpu::TextureFormat::Rgba8Unorm),
                    array_size: 1,
                    mip_levels: 1,
                },
            })
            .collect();
        TextureSet::from_resources(TextureKind::Texture2DLayers, resources)
    }

    #[test]
    fn post_processing_draws_a_full_screen_pair_of_triangles() {
        let mut r = rig();
        r.config = RendererConfig::default().with_render_targets(3);
        let targets = render_targets(3);
        let mut post = ShaderVariant::new(ShaderKind::PostProcessing);
        post.create_shader(&r.device, &r.shaders, &r.config).unwrap();
        let ctx = BuildContext::new().with_render_texture(&targets);
        post.build_objects(&r.device, &mut r.cmd, &ctx).unwrap();

        r.render(&mut post).unwrap();
        let commands = r.cmd.commands();
        assert!(matches!(commands[0], Command::SetViewport(_)));
        assert!(matches!(commands[1], Command::SetScissorRect(_)));
        assert!(matches!(commands[2], Command::SetPipelineState(_)));
        assert_eq!(commands.last(), Some(&Command::DrawInstanced {
            vertex_count: 6,
            instance_count: 1,
            start_vertex: 0,
            start_instance: 0,
        }));

        let region = post.objects().descriptor_region().copied().unwrap();
        assert_eq!((region.cbv_count, region.srv_count), (0, 3));
        assert_eq!(r.cmd.root_tables(), vec![(8, region.srv_gpu_start())]);
    }

    #[test]
    fn post_processing_needs_render_targets() {
        let mut r = rig();
        let mut post = ShaderVariant::new(ShaderKind::PostProcessing);
        let empty = render_targets(0);
        post.create_shader(&r.device, &r.shaders, &r.config).unwrap();
        let ctx = BuildContext::new().with_render_texture(&empty);
        assert!(post.build_objects(&r.device, &mut r.cmd, &ctx).is_err());
        assert!(r.build(&mut ShaderVariant::new(ShaderKind::PostProcessing)).is_err());
    }

    // ── render targets ─────────────────────────────────────────────────────

    #[test]
    fn scene_variants_write_every_render_target() {
        let mut r = rig();
        r.config = RendererConfig::default().with_render_targets(3);
        let mut terrain = ShaderVariant::new(ShaderKind::Terrain);
        let mut post = ShaderVariant::new(ShaderKind::PostProcessing);
        terrain.create_shader(&r.device, &r.shaders, &r.config).unwrap();
        post.create_shader(&r.device, &r.shaders, &r.config).unwrap();

        let targets: Vec<usize> = r
            .rec
            .calls()
            .iter()
            .filter_map(|c| match c {
                DeviceCall::CreatePipelineState { render_targets, .. } => Some(*render_targets),
                _ => None,
            })
            .collect();
        assert_eq!(targets, vec![3, 1]);
        assert_eq!(terrain.pipeline().unwrap().config().color_formats.len(), 3);
    }
}
