/// Deferred shading: G-buffer, ambient full-screen pass, one proxy sphere per light

use crate::device::{ClearFlags, GraphicsDevice, RenderState, TextureId};
use crate::error::Result;
use crate::render::gpu_program::{ActiveProgram, ShadingStage};
use crate::render::render_target::RenderTarget;
use crate::render::texture_units::GBufferSlot;
use crate::render_graph::{FrameReport, PassTarget};
use super::{attachment, checkpoint, PassContext};
use crate::orchestrator::scene_draw::{draw_scene, GEOMETRY_ORDER};

const GBUFFER_CLEAR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

pub fn run(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    geometry_pass(device, ctx, report)?;
    ambient_pass(device, ctx, report)?;
    local_lights_pass(device, ctx, report)
}

fn geometry_pass(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    let stage = ShadingStage::DeferredGBuffer;
    let target = ctx.targets.gbuffer();
    target.bind(device);
    device.clear(ClearFlags::COLOR | ClearFlags::DEPTH, GBUFFER_CLEAR);
    device.set_render_state(RenderState::OPAQUE);

    let mut active = ctx.programs.get(stage).activate(device)?;
    active.set_uniform("ProjectionMatrix", ctx.frame.projection);
    active.set_uniform("ViewMatrix", ctx.frame.view);
    draw_scene(&mut active, ctx, &GEOMETRY_ORDER, true);
    let usage = active.finish();

    let target_name = PassTarget::Offscreen(target.name().to_string());
    report.record(ctx.registry, stage.name(), target_name, &usage, &target.attachments())?;
    checkpoint(device, stage.name())
}

fn bind_gbuffer(active: &mut ActiveProgram<'_>, target: &RenderTarget) -> Result<()> {
    active.bind_texture(GBufferSlot::Position, attachment(target, "position")?);
    active.bind_texture(GBufferSlot::Normal, attachment(target, "normal")?);
    active.bind_texture(GBufferSlot::Specular, attachment(target, "specular")?);
    active.bind_texture(GBufferSlot::DiffuseSpecular, attachment(target, "diffuse")?);
    Ok(())
}

fn ambient_pass(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    let stage = ShadingStage::DeferredAmbient;
    RenderTarget::unbind(device, ctx.frame.viewport);
    device.clear(ClearFlags::COLOR | ClearFlags::DEPTH, [0.0, 0.0, 0.0, 1.0]);
    device.set_render_state(RenderState::FULL_SCREEN);

    let mut active = ctx.programs.get(stage).activate(device)?;
    bind_gbuffer(&mut active, ctx.targets.gbuffer())?;
    active.set_uniform("gBufDebug", ctx.scene.gbuffer_debug.as_uniform());
    active.set_uniform("ambientLight", ctx.scene.ambient);
    active.draw(&ctx.geometry.quad);
    let usage = active.finish();

    report.record(ctx.registry, stage.name(), PassTarget::Screen, &usage, &[])?;
    checkpoint(device, stage.name())
}

/// Additive pass over the ambient image, back faces culled, no depth test
fn local_lights_pass(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    let stage = ShadingStage::DeferredLocalLights;
    device.set_render_state(RenderState::LIGHT_VOLUME);

    let mut active = ctx.programs.get(stage).activate(device)?;
    bind_gbuffer(&mut active, ctx.targets.gbuffer())?;
    active.set_uniform("gBufDebug", ctx.scene.gbuffer_debug.as_uniform());
    active.set_uniform("AmbientLight", ctx.scene.ambient);
    active.set_uniform("Width", ctx.frame.width());
    active.set_uniform("Height", ctx.frame.height());
    active.set_uniform("ProjectionMatrix", ctx.frame.projection);
    active.set_uniform("ViewMatrix", ctx.frame.view);
    active.set_uniform("ViewInverse", ctx.frame.view_inverse);

    for light in ctx.lights.iter() {
        active.set_uniform("LightPosition", light.position);
        active.set_uniform("LightRange", light.radius());
        active.set_uniform("LightColor", light.color);
        active.set_uniform("Attenuation", light.attenuation().as_vec2());
        active.set_uniform("ModelMatrix", light.model_matrix());
        active.draw(&ctx.geometry.light_sphere);
    }
    let usage = active.finish();

    report.record(ctx.registry, stage.name(), PassTarget::Screen, &usage, &[])?;
    checkpoint(device, stage.name())
}

/// Position, normal and diffuse channels of the G-buffer
pub fn debug_buffers(ctx: &PassContext<'_>) -> Result<Vec<TextureId>> {
    let target = ctx.targets.gbuffer();
    Ok(vec![
        attachment(target, "position")?,
        attachment(target, "normal")?,
        attachment(target, "diffuse")?,
    ])
}
