use std::path::Path;

use anyhow::Context;

use crate::device::{CommandList, GpuDescriptorHandle, ResourceId};
use crate::render::{DispatchError, RenderPass};

/// How the resources of a texture set are viewed by shaders.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureKind {
    Texture2D,
    /// Several independent 2D textures bound as consecutive table entries.
    Texture2DLayers,
    /// One resource with several array slices.
    Texture2DArray,
    TextureCube,
    Buffer,
}

/// Dimensional description of a loaded resource.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ResourceDesc {
    pub format: Option<wgpu::TextureFormat>,
    pub array_size: u32,
    pub mip_levels: u32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TextureResource {
    pub id: ResourceId,
    pub desc: ResourceDesc,
}

/// External texture loading (DDS files in practice).
pub trait TextureLoader {
    fn load(&self, cmd: &mut dyn CommandList, path: &Path) -> anyhow::Result<TextureResource>;
}

/// Where one texture of a set is bound in the root signature.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RootArgument {
    pub root_parameter: u32,
    pub gpu_handle: GpuDescriptorHandle,
    /// Position of this texture inside the root parameter's table.
    pub table_offset: u32,
}

/// One descriptor table as set on the command list.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RootTable {
    pub root_parameter: u32,
    pub base: GpuDescriptorHandle,
    pub descriptor_count: u32,
}

/// Textures sharing one kind, plus the root arguments recorded for them.
#[derive(Debug, Clone)]
pub struct TextureSet {
    kind: TextureKind,
    resources: Vec<TextureResource>,
    root_arguments: Vec<Option<RootArgument>>,
}

impl TextureSet {
    pub fn from_resources(kind: TextureKind, resources: Vec<TextureResource>) -> Self {
        let root_arguments = vec![None; resources.len()];
        Self {
            kind,
            resources,
            root_arguments,
        }
    }

    /// Loads every path, in order, through `loader`.
    pub fn load<P: AsRef<Path>>(
        loader: &dyn TextureLoader,
        cmd: &mut dyn CommandList,
        kind: TextureKind,
        paths: &[P],
    ) -> anyhow::Result<Self> {
        let resources = paths
            .iter()
            .map(|p| {
                let p = p.as_ref();
                loader
                    .load(cmd, p)
                    .with_context(|| format!("loading texture {}", p.display()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self::from_resources(kind, resources))
    }

    #[inline]
    pub fn kind(&self) -> TextureKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    #[inline]
    pub fn resource(&self, index: usize) -> Option<&TextureResource> {
        self.resources.get(index)
    }

    #[inline]
    pub fn resources(&self) -> &[TextureResource] {
        &self.resources
    }

    pub fn set_root_argument(&mut self, index: usize, argument: RootArgument) {
        if let Some(slot) = self.root_arguments.get_mut(index) {
            *slot = Some(argument);
        }
    }

    #[inline]
    pub fn root_argument(&self, index: usize) -> Option<RootArgument> {
        self.root_arguments.get(index).copied().flatten()
    }

    /// Collapses root arguments into one table per root parameter.
    ///
    /// A table starts at its `table_offset == 0` entry and spans every texture
    /// bound to the same parameter.
    pub fn root_tables(&self) -> Vec<RootTable> {
        let mut tables: Vec<RootTable> = Vec::new();
        for arg in self.root_arguments.iter().flatten() {
            match tables
                .iter_mut()
                .find(|t| t.root_parameter == arg.root_parameter)
            {
                Some(table) => {
                    table.descriptor_count += 1;
                    if arg.table_offset == 0 {
                        table.base = arg.gpu_handle;
                    }
                }
                None => tables.push(RootTable {
                    root_parameter: arg.root_parameter,
                    base: arg.gpu_handle,
                    descriptor_count: 1,
                }),
            }
        }
        tables
    }

    /// Sets every root table of this set on `pass`.
    pub fn bind(&self, pass: &mut RenderPass<'_>) -> Result<(), DispatchError> {
        for table in self.root_tables() {
            pass.set_root_table(table.root_parameter, table.base)?;
        }
        Ok(())
    }
}
