/// Forward rendering with screen-space ambient occlusion
///
/// Geometry pass into its own G-buffer, occlusion from the hemisphere
/// kernel and the tiled noise, optional blur of the occlusion, then a
/// full-screen lighting pass with a single positional light.

use crate::device::{ClearFlags, GraphicsDevice, RenderState, TextureId};
use crate::error::Result;
use crate::render::gpu_program::ShadingStage;
use crate::render::render_target::RenderTarget;
use crate::render::texture_units::{OcclusionBlurSlot, OcclusionSlot, SsaoLightingSlot};
use crate::render_graph::{FrameReport, PassTarget};
use crate::orchestrator::scene_draw::{draw_scene, GEOMETRY_ORDER};
use super::{attachment, checkpoint, PassContext};

/// Falloff of the positional light
const LINEAR: f32 = 0.09;
const QUADRATIC: f32 = 0.032;

const LIGHTING_CLEAR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

pub fn run(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    geometry_pass(device, ctx, report)?;
    occlusion_pass(device, ctx, report)?;
    if ctx.scene.ssao.blurred {
        blur_pass(device, ctx, report)?;
    }
    lighting_pass(device, ctx, report)
}

fn offscreen(target: &RenderTarget) -> PassTarget {
    PassTarget::Offscreen(target.name().to_string())
}

fn geometry_pass(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    let stage = ShadingStage::GBufferSsao;
    let target = ctx.targets.ssao_gbuffer();
    target.bind_and_clear(device);
    device.set_render_state(RenderState::OPAQUE);

    let mut active = ctx.programs.get(stage).activate(device)?;
    active.set_uniform("ViewMatrix", ctx.frame.view);
    active.set_uniform("ProjectionMatrix", ctx.frame.projection);
    draw_scene(&mut active, ctx, &GEOMETRY_ORDER, true);
    let usage = active.finish();

    report.record(ctx.registry, stage.name(), offscreen(target), &usage, &target.attachments())?;
    checkpoint(device, stage.name())
}

fn occlusion_pass(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    let stage = ShadingStage::SsaoOcclusion;
    let gbuffer = ctx.targets.ssao_gbuffer();
    let target = ctx.targets.ssao_occlusion();
    target.bind_and_clear(device);
    device.set_render_state(RenderState::FULL_SCREEN);

    let kernel = ctx.kernels.ssao_kernel();
    let mut active = ctx.programs.get(stage).activate(device)?;
    active.bind_texture(OcclusionSlot::PositionDepth, attachment(gbuffer, "position_depth")?);
    active.bind_texture(OcclusionSlot::Normal, attachment(gbuffer, "normal")?);
    active.bind_texture(OcclusionSlot::Noise, ctx.statics.noise());
    active.set_uniform("gBufDebug", ctx.scene.gbuffer_debug.as_uniform());
    for (i, sample) in kernel.iter().enumerate() {
        active.set_uniform(&format!("SampleArray[{}]", i), *sample);
    }
    active.set_uniform("ProjectionMatrix", ctx.frame.projection);
    active.set_uniform("Width", ctx.frame.width() as f32);
    active.set_uniform("Height", ctx.frame.height() as f32);
    active.set_uniform("NoiseSize", ctx.kernels.noise_size() as f32);
    active.set_uniform("KernelSize", kernel.len() as i32);
    active.set_uniform("Radius", ctx.scene.ssao.radius);
    active.draw(&ctx.geometry.quad);
    let usage = active.finish();

    report.record(ctx.registry, stage.name(), offscreen(target), &usage, &target.attachments())?;
    checkpoint(device, stage.name())
}

fn blur_pass(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    let stage = ShadingStage::SsaoOcclusionBlur;
    let target = ctx.targets.ssao_blur();
    target.bind_and_clear(device);
    device.set_render_state(RenderState::FULL_SCREEN);

    let mut active = ctx.programs.get(stage).activate(device)?;
    active.bind_texture(OcclusionBlurSlot::Occlusion, attachment(ctx.targets.ssao_occlusion(), "occlusion")?);
    active.set_uniform("noiseTextureSize", ctx.kernels.noise_size() as i32);
    active.draw(&ctx.geometry.quad);
    let usage = active.finish();

    report.record(ctx.registry, stage.name(), offscreen(target), &usage, &target.attachments())?;
    checkpoint(device, stage.name())
}

fn lighting_pass(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    let stage = ShadingStage::LightingSsao;
    let gbuffer = ctx.targets.ssao_gbuffer();
    RenderTarget::unbind(device, ctx.frame.viewport);
    device.clear(ClearFlags::COLOR | ClearFlags::DEPTH, LIGHTING_CLEAR);
    device.set_render_state(RenderState::FULL_SCREEN);

    let frame = ctx.frame;
    let settings = &ctx.scene.ssao;
    let mut active = ctx.programs.get(stage).activate(device)?;
    active.bind_texture(SsaoLightingSlot::PositionDepth, attachment(gbuffer, "position_depth")?);
    active.bind_texture(SsaoLightingSlot::Normal, attachment(gbuffer, "normal")?);
    active.bind_texture(SsaoLightingSlot::DiffuseSpecular, attachment(gbuffer, "diffuse_specular")?);
    active.bind_texture(SsaoLightingSlot::Specular, attachment(gbuffer, "specular")?);
    active.bind_texture(SsaoLightingSlot::Occlusion, attachment(ctx.targets.ssao_occlusion(), "occlusion")?);
    if settings.blurred {
        active.bind_texture(SsaoLightingSlot::BlurredOcclusion, attachment(ctx.targets.ssao_blur(), "occlusion")?);
    }
    active.set_uniform("LightPosition", frame.light_position);
    active.set_uniform("Linear", LINEAR);
    active.set_uniform("Quadratic", QUADRATIC);
    active.set_uniform("ProjectionMatrix", frame.projection);
    active.set_uniform("ViewMatrix", frame.view);
    active.set_uniform("ViewInverse", frame.view_inverse);
    active.set_uniform("AmbientLight", ctx.scene.ambient);
    active.set_uniform("Width", frame.width());
    active.set_uniform("Height", frame.height());
    active.set_uniform("LightColor", ctx.scene.light_color);
    active.set_uniform("IsAOEnabled", settings.enabled);
    active.set_uniform("IsBlurred", settings.blurred);
    active.draw(&ctx.geometry.quad);
    let usage = active.finish();

    report.record(ctx.registry, stage.name(), PassTarget::Screen, &usage, &[])?;
    checkpoint(device, stage.name())
}

/// Occlusion, blurred occlusion when the blur ran, and the noise tile
pub fn debug_buffers(ctx: &PassContext<'_>) -> Result<Vec<TextureId>> {
    let mut buffers = vec![attachment(ctx.targets.ssao_occlusion(), "occlusion")?];
    if ctx.scene.ssao.blurred {
        buffers.push(attachment(ctx.targets.ssao_blur(), "occlusion")?);
    }
    buffers.push(ctx.statics.noise());
    Ok(buffers)
}
