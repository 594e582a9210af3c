/// Debug overlay quads showing intermediate buffers
///
/// Up to three buffers are drawn on top of the final image, each on a
/// scaled copy of the full-screen quad at a fixed position.

use glam::{Mat4, Vec2, Vec3};
use crate::device::{GraphicsDevice, RenderState, TextureId};
use crate::error::Result;
use super::drawable::Drawable;
use super::gpu_program::{GpuProgram, ProgramUsage};
use super::texture_units::DebugSlot;

/// Quad centers in normalized device coordinates
pub const DEBUG_QUAD_POSITIONS: [Vec2; 3] = [
    Vec2::new(0.65, 0.65),
    Vec2::new(0.65, -0.25),
    Vec2::new(-0.65, -0.25),
];

/// Scale applied to the full-screen quad
pub const DEBUG_QUAD_SCALE: f32 = 0.3;

/// `T(x, y, 0.5) * S(0.3)`
pub fn debug_matrix(position: Vec2) -> Mat4 {
    Mat4::from_translation(position.extend(0.5)) * Mat4::from_scale(Vec3::splat(DEBUG_QUAD_SCALE))
}

/// Draw `buffers` in layout order on the current framebuffer
///
/// Buffers past the third slot are not shown.
pub fn draw_debug_quads(
    device: &mut dyn GraphicsDevice,
    program: &GpuProgram,
    quad: &Drawable,
    buffers: &[TextureId],
) -> Result<ProgramUsage> {
    if buffers.len() > DEBUG_QUAD_POSITIONS.len() {
        crate::engine_debug!("lightlab::DebugOverlay",
            "{} buffers requested, showing the first {}", buffers.len(), DEBUG_QUAD_POSITIONS.len());
    }
    device.set_render_state(RenderState::FULL_SCREEN);

    let mut active = program.activate(device)?;
    for (position, texture) in DEBUG_QUAD_POSITIONS.iter().zip(buffers) {
        active.set_uniform("DebugMatrix", debug_matrix(*position));
        active.bind_texture(DebugSlot::Buffer, *texture);
        active.draw(quad);
    }
    Ok(active.finish())
}

#[cfg(test)]
#[path = "debug_overlay_tests.rs"]
mod tests;
