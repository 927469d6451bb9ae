//! Screen-space rectangles handed to the rasterizer stage.

mod viewport;

pub use viewport::{ScissorRect, Viewport};
