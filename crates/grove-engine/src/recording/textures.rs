use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use anyhow::bail;

use crate::device::{CommandList, ResourceId};
use crate::resources::{ResourceDesc, TextureLoader, TextureResource};

/// Texture loader that hands out fresh resource ids without reading files.
///
/// File names containing `array` load as 2D arrays of `array_layers` slices;
/// everything else loads as a single 2D texture.
#[derive(Debug)]
pub struct RecordingTextureLoader {
    next_id: Cell<u64>,
    array_layers: u32,
    loaded: RefCell<Vec<PathBuf>>,
    missing: RefCell<Vec<PathBuf>>,
}

impl Default for RecordingTextureLoader {
    fn default() -> Self {
        Self::new(5)
    }
}

impl RecordingTextureLoader {
    pub fn new(array_layers: u32) -> Self {
        Self {
            next_id: Cell::new(0x1000),
            array_layers,
            loaded: RefCell::new(Vec::new()),
            missing: RefCell::new(Vec::new()),
        }
    }

    /// Makes loading `path` fail.
    pub fn mark_missing(&self, path: impl Into<PathBuf>) {
        self.missing.borrow_mut().push(path.into());
    }

    pub fn loaded(&self) -> Vec<PathBuf> {
        self.loaded.borrow().clone()
    }
}

impl TextureLoader for RecordingTextureLoader {
    fn load(&self, _cmd: &mut dyn CommandList, path: &Path) -> anyhow::Result<TextureResource> {
        if self.missing.borrow().iter().any(|p| p == path) {
            bail!("{}: file not found", path.display());
        }
        let is_array = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.contains("array"));

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.loaded.borrow_mut().push(path.to_owned());

        Ok(TextureResource {
            id: ResourceId(id),
            desc: ResourceDesc {
                format: Some(wgpu::TextureFormat::Bc3RgbaUnorm),
                array_size: if is_array { self.array_layers } else { 1 },
                mip_levels: 1,
            },
        })
    }
}
