use glam::Vec3;

use crate::coords::{ScissorRect, Viewport};
use crate::device::CommandList;

/// Viewer the scene is rendered for.
pub trait Camera {
    fn position(&self) -> Vec3;

    fn set_viewports_and_scissor_rects(&self, cmd: &mut dyn CommandList);
}

/// Camera that never moves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedCamera {
    pub position: Vec3,
    pub viewport: Viewport,
    pub scissor: ScissorRect,
}

impl FixedCamera {
    pub fn new(position: Vec3, width: u32, height: u32) -> Self {
        let viewport = Viewport::new(width as f32, height as f32);
        Self {
            position,
            viewport,
            scissor: viewport.scissor(),
        }
    }
}

impl Camera for FixedCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_viewports_and_scissor_rects(&self, cmd: &mut dyn CommandList) {
        cmd.set_viewport(&self.viewport);
        cmd.set_scissor_rect(&self.scissor);
    }
}
