use std::path::PathBuf;

use anyhow::Context;
use glam::{Mat4, Vec3};

use crate::config::RendererConfig;
use crate::descriptor::{DescriptorRegion, DescriptorTableAllocator};
use crate::device::{CommandList, Device, PipelineState};
use crate::render::{RenderError, RenderPass};
use crate::resources::{Arena, ConstantBufferBlock, Material, TextureKind, TextureSet};
use crate::scene::{BillboardInstance, Camera, FoliageGrid, Mesh, ObjectConstants};

use super::{BuildContext, VariantError};

/// Texture and placement choices of one instanced foliage variant.
#[derive(Debug, Clone, PartialEq)]
pub struct BillboardPreset {
    pub name: &'static str,
    pub texture_kind: TextureKind,
    pub texture_files: Vec<PathBuf>,
    pub texture_root: u32,
    pub auto_increment: bool,
    /// Place the grid one grid-width further along x.
    pub shift_columns: bool,
    pub height_offset: f32,
}

impl BillboardPreset {
    /// Five layer textures sharing one table.
    pub fn trees(config: &RendererConfig) -> Self {
        Self {
            name: "billboard trees",
            texture_kind: TextureKind::Texture2DLayers,
            texture_files: config.foliage.tree_layers.clone(),
            texture_root: config.root_parameters.tree_layers,
            auto_increment: false,
            shift_columns: false,
            height_offset: config.foliage.tree_height_offset,
        }
    }

    /// One texture array, placed beside the layered trees.
    pub fn tree_array(config: &RendererConfig) -> Self {
        Self {
            name: "billboard tree array",
            texture_kind: TextureKind::Texture2DArray,
            texture_files: vec![config.foliage.tree_array.clone()],
            texture_root: config.root_parameters.tree_array,
            auto_increment: true,
            shift_columns: true,
            height_offset: config.foliage.array_height_offset,
        }
    }
}

/// Instanced camera-facing quads with one constant slot per instance.
#[derive(Debug)]
pub struct BillboardSet {
    descriptors: DescriptorTableAllocator,
    /// `None` when the terrain is too small to hold a single instance.
    constants: Option<ConstantBufferBlock<ObjectConstants>>,
    constants_root: u32,
    meshes: Arena<Box<dyn Mesh>>,
    textures: Arena<TextureSet>,
    materials: Arena<Material>,
    instances: Vec<BillboardInstance>,
}

impl BillboardSet {
    pub fn build(
        device: &Device,
        cmd: &mut dyn CommandList,
        ctx: &BuildContext<'_>,
        preset: &BillboardPreset,
        config: &RendererConfig,
    ) -> anyhow::Result<Self> {
        let terrain = VariantError::require(ctx.terrain, preset.name, "terrain")?;
        let loader = VariantError::require(ctx.textures, preset.name, "texture loader")?;
        let factory = VariantError::require(ctx.meshes, preset.name, "mesh factory")?;

        let grid = FoliageGrid::over(terrain, config.foliage.pitch);
        let grid = if preset.shift_columns {
            grid.starting_at_column(grid.columns())
        } else {
            grid
        };
        let count = grid
            .count()
            .with_context(|| format!("{}: foliage placement", preset.name))?;

        let paths: Vec<PathBuf> = preset
            .texture_files
            .iter()
            .map(|f| config.asset_path(f))
            .collect();
        let mut texture = TextureSet::load(loader, cmd, preset.texture_kind, &paths)?;

        let mut descriptors =
            DescriptorTableAllocator::allocate(device, count, texture.len() as u32)
                .with_context(|| format!("{}: descriptor heap", preset.name))?;

        let constants = match count {
            0 => None,
            n => {
                let block = ConstantBufferBlock::<ObjectConstants>::new(device, "billboard constants", n)?;
                descriptors.bind_constant_buffer_views(n, block.buffer(), block.stride())?;
                Some(block)
            }
        };
        descriptors.bind_shader_resource_views(
            &mut texture,
            preset.texture_root,
            preset.auto_increment,
        )?;
        descriptors.finish()?;

        let [width, height] = config.foliage.size;
        let rect = factory
            .create_textured_rect(cmd, width, height, 0.0)
            .with_context(|| format!("{}: quad mesh", preset.name))?;

        let mut meshes = Arena::new();
        let mut textures = Arena::new();
        let mut materials = Arena::new();
        let mesh = meshes.insert(rect);
        let material = materials.insert(Material {
            texture: textures.insert(texture),
        });

        let stride = constants.as_ref().map_or(0, |c| c.stride());
        let region = *descriptors.region();
        let instances = grid
            .cells()
            .map(|cell| {
                let y = terrain.height_at(cell.x, cell.z) + preset.height_offset;
                BillboardInstance {
                    world: Mat4::from_translation(Vec3::new(cell.x, y, cell.z)),
                    slot: cell.index,
                    constants_offset: cell.index as u64 * stride,
                    cbv_gpu: region.cbv_gpu(cell.index),
                    mesh,
                    material,
                }
            })
            .collect::<Vec<_>>();

        log::info!("{}: {} instances", preset.name, instances.len());

        Ok(Self {
            descriptors,
            constants,
            constants_root: config.root_parameters.object_constants,
            meshes,
            textures,
            materials,
            instances,
        })
    }

    #[inline]
    pub fn instances(&self) -> &[BillboardInstance] {
        &self.instances
    }

    #[inline]
    pub fn region(&self) -> &DescriptorRegion {
        self.descriptors.region()
    }

    #[inline]
    pub fn constants(&self) -> Option<&ConstantBufferBlock<ObjectConstants>> {
        self.constants.as_ref()
    }

    pub fn release_upload_buffers(&mut self) {
        for mesh in self.meshes.iter_mut() {
            mesh.release_upload_buffers();
        }
    }

    /// Faces every instance toward the camera, writes its constants, then
    /// draws the instances one by one.
    pub fn render(
        &mut self,
        pass: &mut RenderPass<'_>,
        pipeline: &PipelineState,
        camera: &dyn Camera,
    ) -> Result<(), RenderError> {
        let eye = camera.position();
        for instance in &mut self.instances {
            instance.set_look_at(eye, Vec3::Y);
        }
        if let Some(block) = &self.constants {
            for instance in &self.instances {
                block.write(instance.slot, &instance.constants())?;
            }
        }

        pass.set_pipeline(pipeline);
        pass.set_descriptor_heap(self.descriptors.heap())?;

        let mut bound = None;
        for instance in &self.instances {
            if bound != Some(instance.material) {
                let texture = self
                    .materials
                    .get(instance.material)
                    .and_then(|m| self.textures.get(m.texture));
                if let Some(texture) = texture {
                    texture.bind(pass)?;
                }
                bound = Some(instance.material);
            }
            pass.set_root_table(self.constants_root, instance.cbv_gpu)?;
            if let Some(mesh) = self.meshes.get(instance.mesh) {
                pass.draw_mesh(&**mesh)?;
            }
        }
        Ok(())
    }
}
