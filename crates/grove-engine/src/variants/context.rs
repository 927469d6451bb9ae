use crate::resources::{TextureLoader, TextureSet};
use crate::scene::{HeightMap, MeshFactory};

/// Collaborators a variant may need while building its objects.
///
/// Each variant takes only what it uses; asking for a missing piece is an
/// error rather than a silent skip.
#[derive(Default, Clone, Copy)]
pub struct BuildContext<'a> {
    pub terrain: Option<&'a dyn HeightMap>,
    pub textures: Option<&'a dyn TextureLoader>,
    pub meshes: Option<&'a dyn MeshFactory>,
    /// Pre-rendered targets sampled by post-processing.
    pub render_texture: Option<&'a TextureSet>,
}

impl<'a> BuildContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_terrain(mut self, terrain: &'a dyn HeightMap) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub fn with_textures(mut self, loader: &'a dyn TextureLoader) -> Self {
        self.textures = Some(loader);
        self
    }

    pub fn with_meshes(mut self, factory: &'a dyn MeshFactory) -> Self {
        self.meshes = Some(factory);
        self
    }

    pub fn with_render_texture(mut self, textures: &'a TextureSet) -> Self {
        self.render_texture = Some(textures);
        self
    }
}
