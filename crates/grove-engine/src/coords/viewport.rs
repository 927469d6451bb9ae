/// Rasterizer viewport in render-target pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Full-depth viewport anchored at the origin.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Scissor rect covering exactly this viewport.
    pub fn scissor(self) -> ScissorRect {
        let left = self.x.max(0.0) as i32;
        let top = self.y.max(0.0) as i32;
        ScissorRect {
            left,
            top,
            right: (self.x + self.width).max(0.0) as i32,
            bottom: (self.y + self.height).max(0.0) as i32,
        }
    }
}

/// Scissor rectangle, half-open `[left, right) x [top, bottom)`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ScissorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScissorRect {
    #[inline]
    pub fn is_empty(self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }
}
