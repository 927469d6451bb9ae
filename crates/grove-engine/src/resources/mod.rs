//! Shared GPU-side resources: constant blocks, texture sets and the arenas
//! that pool them.

mod arena;
mod constant_buffer;
mod texture;

pub use arena::{Arena, Handle};
pub use constant_buffer::{aligned_stride, ConstantBufferBlock, CONSTANT_BUFFER_ALIGNMENT};
pub use texture::{
    ResourceDesc, RootArgument, RootTable, TextureKind, TextureLoader, TextureResource, TextureSet,
};

/// Surface description shared by billboard instances.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Material {
    pub texture: Handle<TextureSet>,
}
