//! Scene collaborators consumed by shader variants.
//!
//! Responsibilities:
//! - terrain sampling and foliage placement
//! - camera viewport/scissor setup
//! - mesh construction and drawing
//! - billboard instances and their per-object constants

mod billboard;
mod camera;
mod mesh;
mod terrain;

pub use billboard::{BillboardInstance, ObjectConstants};
pub use camera::{Camera, FixedCamera};
pub use mesh::{
    textured_rect_vertices, DeviceMeshFactory, Mesh, MeshFactory, TexturedVertex, VertexBufferMesh,
};
pub use terrain::{FlatHeightMap, FoliageGrid, GridCell, GridOverflow, HeightMap};
