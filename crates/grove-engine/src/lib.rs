//! Grove engine crate.
//!
//! Pipeline-state and descriptor-table bookkeeping for a small set of shader
//! variants (terrain, textured objects, billboard foliage, post-processing)
//! on top of an abstract explicit graphics device.

pub mod config;
pub mod coords;
pub mod descriptor;
pub mod device;
pub mod logging;
pub mod pipeline;
pub mod recording;
pub mod render;
pub mod resources;
pub mod scene;
pub mod shader;
pub mod variants;
