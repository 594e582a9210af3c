/// Forward rendering with an exponential shadow map
///
/// The shadow pass stores `exp(C * depth)` in a single-channel float map.
/// Two compute passes blur it (horizontal into `blur.temp`, vertical into
/// `blur.final`), then the lighting pass samples both the raw and the
/// blurred map.

use glam::IVec2;
use crate::device::{ClearFlags, GraphicsDevice, ImageAccess, RenderState, TextureId};
use crate::error::Result;
use crate::render::gpu_program::ShadingStage;
use crate::render::render_target::RenderTarget;
use crate::render::texture_units::{BlurImageSlot, SoftShadowSlot};
use crate::render_graph::{FrameReport, PassTarget};
use crate::orchestrator::scene_draw::{draw_scene, LIGHTING_ORDER, SHADOW_ORDER};
use super::{attachment, checkpoint, PassContext};

const LIGHTING_CLEAR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

pub fn run(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    shadow_pass(device, ctx, report)?;
    let shadow_map = attachment(ctx.targets.shadow(), "map")?;
    blur_pass(device, ctx, report, ShadingStage::Blur, IVec2::new(1, 0), shadow_map, ctx.targets.blur_temp())?;
    blur_pass(
        device,
        ctx,
        report,
        ShadingStage::BlurVertical,
        IVec2::new(0, 1),
        ctx.targets.blur_temp(),
        ctx.targets.blur_final(),
    )?;
    lighting_pass(device, ctx, report, shadow_map)
}

fn shadow_pass(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    let stage = ShadingStage::Shadow;
    let target = ctx.targets.shadow();
    target.bind_and_clear(device);
    device.set_render_state(RenderState::OPAQUE);

    let mut active = ctx.programs.get(stage).activate(device)?;
    active.set_uniform("LightViewMatrix", ctx.frame.light_view);
    active.set_uniform("LightProjectionMatrix", ctx.frame.light_projection);
    active.set_uniform("C", ctx.scene.esm.c);
    active.set_uniform("groundRadius", ctx.config.ground_radius);
    active.set_uniform("lightDistance", ctx.scene.light.distance);
    draw_scene(&mut active, ctx, &SHADOW_ORDER, true);
    let usage = active.finish();

    report.record(
        ctx.registry,
        stage.name(),
        PassTarget::Offscreen(target.name().to_string()),
        &usage,
        &target.attachments(),
    )?;
    checkpoint(device, stage.name())
}

/// One direction of the separable Gaussian blur
fn blur_pass(
    device: &mut dyn GraphicsDevice,
    ctx: &PassContext<'_>,
    report: &mut FrameReport,
    stage: ShadingStage,
    direction: IVec2,
    source: TextureId,
    destination: TextureId,
) -> Result<()> {
    let mut active = ctx.programs.get(stage).activate(device)?;
    active.set_uniform("Direction", direction);
    active.set_uniform("BlurHalfWidth", ctx.kernels.blur_half_width() as i32);
    active.set_uniform("BlurWidth", ctx.kernels.blur_width() as i32);
    active.upload_uniform_block("Kernel", 0, &ctx.kernels.blur_block())?;
    active.bind_image(BlurImageSlot::Source, source, ImageAccess::ReadOnly);
    active.bind_image(BlurImageSlot::Destination, destination, ImageAccess::WriteOnly);
    active.dispatch(ctx.config.blur_groups());
    let usage = active.finish();

    report.record(ctx.registry, stage.name(), PassTarget::Images, &usage, &[])?;
    checkpoint(device, stage.name())
}

fn lighting_pass(
    device: &mut dyn GraphicsDevice,
    ctx: &PassContext<'_>,
    report: &mut FrameReport,
    shadow_map: TextureId,
) -> Result<()> {
    let stage = ShadingStage::LightingSoftShadow;
    RenderTarget::unbind(device, ctx.frame.viewport);
    device.clear(ClearFlags::COLOR | ClearFlags::DEPTH, LIGHTING_CLEAR);
    device.set_render_state(RenderState::OPAQUE);

    let frame = ctx.frame;
    let mut active = ctx.programs.get(stage).activate(device)?;
    active.set_uniform("WIDTH", frame.width());
    active.set_uniform("HEIGHT", frame.height());
    active.set_uniform("ProjectionMatrix", frame.projection);
    active.set_uniform("ViewMatrix", frame.view);
    active.set_uniform("ViewInverse", frame.view_inverse);
    active.set_uniform("ShadowMatrix", frame.shadow_matrix);
    active.set_uniform("groundRadius", ctx.config.ground_radius);
    active.set_uniform("lightDistance", ctx.scene.light.distance);
    active.set_uniform("shadowDebug", ctx.scene.esm.debug.as_uniform());
    active.set_uniform("C", ctx.scene.esm.c);
    active.set_uniform("lightPos", frame.light_position);
    active.set_uniform("mode", ctx.scene.mode);
    active.bind_texture(SoftShadowSlot::ShadowMap, shadow_map);
    active.bind_texture(SoftShadowSlot::BlurredShadowMap, ctx.targets.blur_final());
    draw_scene(&mut active, ctx, &LIGHTING_ORDER, true);
    let usage = active.finish();

    report.record(ctx.registry, stage.name(), PassTarget::Screen, &usage, &[])?;
    checkpoint(device, stage.name())
}

/// Raw, fully blurred and horizontally blurred shadow maps
pub fn debug_buffers(ctx: &PassContext<'_>) -> Result<Vec<TextureId>> {
    Ok(vec![
        attachment(ctx.targets.shadow(), "map")?,
        ctx.targets.blur_final(),
        ctx.targets.blur_temp(),
    ])
}
