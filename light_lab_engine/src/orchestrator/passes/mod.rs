/// Pass sequences of the four techniques
///
/// Every pass follows the same shape: bind its destination, set the fixed
/// function state, activate its program, bind inputs through its slot
/// table, draw or dispatch, record itself in the frame report, then check
/// the device for errors.

pub mod deferred;
pub mod shadow_esm;
pub mod parallax;
pub mod ssao;

use crate::config::EngineConfig;
use crate::device::{GraphicsDevice, TextureId};
use crate::error::{Error, Result};
use crate::render::kernel::KernelData;
use crate::render::render_target::RenderTarget;
use crate::render_graph::{FrameReport, TextureRegistry};
use crate::scene::{CentralModel, LightSet, SceneState, Technique};
use super::frame_state::FrameState;
use super::resources::{ProgramSet, SceneGeometry, StaticTextures};
use super::targets::TargetSet;

/// Everything a pass reads, borrowed for one frame
pub struct PassContext<'a> {
    pub config: &'a EngineConfig,
    pub scene: &'a SceneState,
    pub frame: &'a FrameState,
    pub programs: &'a ProgramSet,
    pub targets: &'a TargetSet,
    pub statics: &'a StaticTextures,
    pub geometry: &'a SceneGeometry,
    pub model: Option<&'a CentralModel>,
    pub lights: &'a LightSet,
    pub kernels: &'a KernelData,
    pub registry: &'a TextureRegistry,
}

/// Run the pass sequence of `ctx.scene.technique`
pub fn run_technique(device: &mut dyn GraphicsDevice, ctx: &PassContext<'_>, report: &mut FrameReport) -> Result<()> {
    match ctx.scene.technique {
        Technique::Deferred => deferred::run(device, ctx, report),
        Technique::ForwardShadowEsm => shadow_esm::run(device, ctx, report),
        Technique::ForwardParallax => parallax::run(device, ctx, report),
        Technique::ForwardSsao => ssao::run(device, ctx, report),
    }
}

/// Intermediate buffers the debug overlay shows for the current technique
pub fn debug_buffers(ctx: &PassContext<'_>) -> Result<Vec<TextureId>> {
    match ctx.scene.technique {
        Technique::Deferred => deferred::debug_buffers(ctx),
        Technique::ForwardShadowEsm => shadow_esm::debug_buffers(ctx),
        Technique::ForwardParallax => Ok(parallax::debug_buffers(ctx)),
        Technique::ForwardSsao => ssao::debug_buffers(ctx),
    }
}

/// Fail the frame if the device flagged an error since the last checkpoint
pub fn checkpoint(device: &mut dyn GraphicsDevice, pass: &str) -> Result<()> {
    if let Some(code) = device.check_error() {
        let error = Error::GpuError {
            checkpoint: pass.to_string(),
            code,
        };
        crate::engine_error!("lightlab::FrameOrchestrator", "{}", error);
        return Err(error);
    }
    Ok(())
}

/// Color attachment `label` of `target`
pub fn attachment(target: &RenderTarget, label: &str) -> Result<TextureId> {
    target.color_texture_named(label).ok_or_else(|| {
        crate::engine_err!("lightlab::FrameOrchestrator",
            "Target '{}' has no attachment '{}'", target.name(), label)
    })
}
