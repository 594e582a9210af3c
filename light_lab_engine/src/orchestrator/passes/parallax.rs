/// Forward rendering with normal and parallax mapping on the ground

use crate::device::{ClearFlags, GraphicsDevice, RenderState, TextureId};
use crate::error::Result;
use crate::render::gpu_program::ShadingStage;
use crate::render::render_target::RenderTarget;
use crate::render_graph::{FrameReport, PassTarget};
use crate::orchestrator::scene_draw::{draw_scene, LIGHTING_ORDER};
use super::{checkpoint, PassContext};

const CLEAR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];

pub fn run(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    let stage = ShadingStage::LightingParallaxMapping;
    RenderTarget::unbind(device, ctx.frame.viewport);
    device.clear(ClearFlags::COLOR | ClearFlags::DEPTH, CLEAR);
    device.set_render_state(RenderState::OPAQUE);

    let frame = ctx.frame;
    let settings = &ctx.scene.parallax;
    let flags = settings.variant.flags();

    let mut active = ctx.programs.get(stage).activate(device)?;
    active.set_uniform("WIDTH", frame.width());
    active.set_uniform("HEIGHT", frame.height());
    active.set_uniform("ProjectionMatrix", frame.projection);
    active.set_uniform("ViewMatrix", frame.view);
    active.set_uniform("ViewInverse", frame.view_inverse);
    active.set_uniform("lightPos", frame.light_position);
    active.set_uniform("mode", ctx.scene.mode);
    active.set_uniform("isNormalMapped", settings.normal_mapping);
    active.set_uniform("isParallaxMappingEnabled", flags.parallax);
    active.set_uniform("enhanceViewScaling", settings.enhance_view_scaling);
    active.set_uniform("isParallaxOcclusionMappingEnabled", flags.occlusion);
    active.set_uniform("isSteepParallaxMappingEnabled", flags.steep);
    active.set_uniform("cropTextureMap", settings.crop_texture_map);
    active.set_uniform("depthLayerAmount", settings.layer_count);
    active.set_uniform("heightScale", settings.height_scale);
    draw_scene(&mut active, ctx, &LIGHTING_ORDER, ctx.scene.draw_object);
    let usage = active.finish();

    report.record(ctx.registry, stage.name(), PassTarget::Screen, &usage, &[])?;
    checkpoint(device, stage.name())
}

/// Diffuse, normal and height maps of the current ground material
pub fn debug_buffers(ctx: &PassContext<'_>) -> Vec<TextureId> {
    ctx.statics.ground(ctx.scene.ground_material).to_vec()
}
