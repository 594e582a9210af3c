/// Fixed-function state set per pass: viewport, clears, depth, blending, culling

use bitflags::bitflags;

bitflags! {
    /// Buffers cleared at the start of a pass
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
    }
}

/// Viewport in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport covering `width` x `height` from the origin
    pub fn sized(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Disabled,
    /// ONE, ONE with additive equation
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    None,
    Back,
    Front,
}

/// Depth, blend and cull state for a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub depth_test: bool,
    pub blend: BlendMode,
    pub cull: CullMode,
}

impl RenderState {
    /// Depth-tested scene geometry
    pub const OPAQUE: RenderState = RenderState {
        depth_test: true,
        blend: BlendMode::Disabled,
        cull: CullMode::None,
    };

    /// Full-screen passes and overlays
    pub const FULL_SCREEN: RenderState = RenderState {
        depth_test: false,
        blend: BlendMode::Disabled,
        cull: CullMode::None,
    };

    /// Light volumes accumulated on top of the ambient term
    pub const LIGHT_VOLUME: RenderState = RenderState {
        depth_test: false,
        blend: BlendMode::Additive,
        cull: CullMode::Back,
    };
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState::OPAQUE
    }
}
