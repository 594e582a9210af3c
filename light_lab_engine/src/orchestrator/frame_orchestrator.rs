/// Frame orchestrator - owns every GPU resource of the demo and runs the
/// pass sequence of the selected technique each frame
///
/// Scene parameters are owned by the host and passed by reference into
/// [`FrameOrchestrator::render_frame`]. Edits arrive as [`SceneCommand`]s
/// applied between frames.

use std::time::Duration;
use rand::SeedableRng;
use rand::rngs::StdRng;
use crate::config::EngineConfig;
use crate::device::{GraphicsDevice, RenderState, Viewport};
use crate::error::Result;
use crate::engine_bail;
use crate::render::debug_overlay::draw_debug_quads;
use crate::render::gpu_program::ShadingStage;
use crate::render::kernel::KernelData;
use crate::render::render_target::RenderTarget;
use crate::render_graph::{FrameReport, PassTarget, TextureRegistry};
use crate::scene::{
    AnimationClock, AssetSource, CentralModel, CommandQueue, LightSet, ModelKind, SceneCommand,
    SceneState, Technique,
};
use super::frame_state::FrameState;
use super::passes::{self, checkpoint, PassContext};
use super::resources::{ProgramSet, SceneGeometry, StaticTextures};
use super::targets::TargetSet;

/// Checkpoint name of the overlay pass
const DEBUG_OVERLAY_PASS: &str = "debugOverlay";

pub struct FrameOrchestrator {
    config: EngineConfig,
    programs: ProgramSet,
    targets: TargetSet,
    statics: StaticTextures,
    geometry: SceneGeometry,
    model: Option<CentralModel>,
    lights: LightSet,
    kernels: KernelData,
    registry: TextureRegistry,
    clock: AnimationClock,
    viewport: Viewport,
    rng: StdRng,
    last_technique: Option<Technique>,
}

impl FrameOrchestrator {
    // ===== LIFECYCLE =====

    /// Link every program, create and validate every target, upload the
    /// static textures and the scene geometry, load the initial model
    ///
    /// # Errors
    ///
    /// Any configuration error (invalid config, incomplete framebuffer,
    /// link failure, missing asset). Resources created before the failure
    /// are released.
    pub fn initialize(
        device: &mut dyn GraphicsDevice,
        config: EngineConfig,
        assets: &mut dyn AssetSource,
    ) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let kernels = KernelData::build(&config, &mut rng)?;
        let lights = LightSet::randomized(config.light_count, !config.random_light_colors, &mut rng);
        let mut registry = TextureRegistry::new();

        let programs = ProgramSet::create(device)?;
        let targets = match TargetSet::create(device, &config, &mut registry) {
            Ok(targets) => targets,
            Err(e) => {
                programs.destroy(device);
                return Err(e);
            }
        };
        let statics = match StaticTextures::create(device, &kernels, assets, &mut registry) {
            Ok(statics) => statics,
            Err(e) => {
                targets.destroy(device, &mut registry);
                programs.destroy(device);
                return Err(e);
            }
        };
        let geometry = match SceneGeometry::create(device, &config) {
            Ok(geometry) => geometry,
            Err(e) => {
                statics.destroy(device, &mut registry);
                targets.destroy(device, &mut registry);
                programs.destroy(device);
                return Err(e);
            }
        };
        let model = match CentralModel::create(device, config.initial_model.clone(), assets, &config) {
            Ok(model) => model,
            Err(e) => {
                geometry.destroy(device);
                statics.destroy(device, &mut registry);
                targets.destroy(device, &mut registry);
                programs.destroy(device);
                return Err(e);
            }
        };

        crate::engine_info!("lightlab::FrameOrchestrator",
            "Initialized {}x{}, {} programs, {} textures, {} lights",
            config.width, config.height, ShadingStage::ALL.len(), registry.len(), lights.len());

        Ok(Self {
            clock: AnimationClock::new(config.animation_tick, config.animation_revolution),
            viewport: Viewport::sized(config.width, config.height),
            config,
            programs,
            targets,
            statics,
            geometry,
            model: Some(model),
            lights,
            kernels,
            registry,
            rng,
            last_technique: None,
        })
    }

    /// Release every resource the orchestrator owns
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        let mut registry = self.registry;
        if let Some(model) = self.model {
            model.destroy(device);
        }
        self.geometry.destroy(device);
        self.statics.destroy(device, &mut registry);
        self.targets.destroy(device, &mut registry);
        self.programs.destroy(device);
        crate::engine_debug!("lightlab::FrameOrchestrator", "Destroyed all GPU resources");
    }

    // ===== FRAME =====

    /// Run the passes of `scene.technique`, then the debug overlay if enabled
    ///
    /// # Errors
    ///
    /// `Error::GpuError` when the device flags an error at a pass
    /// checkpoint, `Error::InvalidPassOrder` when a pass samples a texture
    /// this frame did not produce.
    pub fn render_frame(&mut self, device: &mut dyn GraphicsDevice, scene: &SceneState) -> Result<FrameReport> {
        if self.last_technique != Some(scene.technique) {
            crate::engine_info!("lightlab::FrameOrchestrator", "Rendering with {:?}", scene.technique);
            self.last_technique = Some(scene.technique);
        }

        let frame = FrameState::compute(scene, self.viewport, self.clock.phase_degrees());
        let ctx = PassContext {
            config: &self.config,
            scene,
            frame: &frame,
            programs: &self.programs,
            targets: &self.targets,
            statics: &self.statics,
            geometry: &self.geometry,
            model: self.model.as_ref(),
            lights: &self.lights,
            kernels: &self.kernels,
            registry: &self.registry,
        };

        let mut report = FrameReport::new(scene.technique);
        passes::run_technique(device, &ctx, &mut report)?;

        if scene.draw_debug_quads {
            let buffers = passes::debug_buffers(&ctx)?;
            RenderTarget::unbind(device, frame.viewport);
            let usage = draw_debug_quads(device, self.programs.get(ShadingStage::DebugWindow), &self.geometry.quad, &buffers)?;
            report.record(&self.registry, DEBUG_OVERLAY_PASS, PassTarget::Screen, &usage, &[])?;
            checkpoint(device, DEBUG_OVERLAY_PASS)?;
        }
        device.set_render_state(RenderState::OPAQUE);
        Ok(report)
    }

    /// Advance the animation by wall time, returns the ticks elapsed
    pub fn advance_animation(&mut self, dt: Duration) -> u32 {
        self.clock.advance(dt)
    }

    // ===== COMMANDS =====

    /// Apply one command between frames
    ///
    /// Scene parameters are edited in `scene`; light edits, model swaps and
    /// resizes act on the resources owned here.
    pub fn apply_command(
        &mut self,
        device: &mut dyn GraphicsDevice,
        assets: &mut dyn AssetSource,
        scene: &mut SceneState,
        command: SceneCommand,
    ) -> Result<()> {
        if scene.apply(&command) {
            return Ok(());
        }
        match command {
            SceneCommand::SelectLight(index) => self.lights.select(index)?,
            SceneCommand::SetSelectedLightColor(color) => self.lights.set_color(color),
            SceneCommand::MoveSelectedLight(delta) => self.lights.translate(delta),
            SceneCommand::SetSelectedLightRadius(radius) => self.lights.set_radius(radius),
            SceneCommand::RerollLights { all_white } => self.lights.reroll(all_white, &mut self.rng),
            SceneCommand::SetModel(kind) => self.swap_model(device, assets, kind)?,
            SceneCommand::Resize { width, height } => self.resize(device, width, height)?,
            // Scene parameters, applied above
            _ => {}
        }
        Ok(())
    }

    /// Drain `queue` in order
    ///
    /// A failing command does not stop the drain: every command is applied
    /// and the first error is returned once the queue is empty.
    pub fn process_commands(
        &mut self,
        device: &mut dyn GraphicsDevice,
        assets: &mut dyn AssetSource,
        scene: &mut SceneState,
        queue: &mut CommandQueue,
    ) -> Result<()> {
        let mut first_error = None;
        for command in queue.drain() {
            if let Err(e) = self.apply_command(device, assets, scene, command) {
                crate::engine_error!("lightlab::FrameOrchestrator", "Command failed: {}", e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Replace the central model
    ///
    /// The old model is destroyed first. If the new one cannot be built the
    /// scene has no central model until the next successful swap.
    pub fn swap_model(
        &mut self,
        device: &mut dyn GraphicsDevice,
        assets: &mut dyn AssetSource,
        kind: ModelKind,
    ) -> Result<()> {
        if let Some(old) = self.model.take() {
            old.destroy(device);
        }
        self.model = Some(CentralModel::create(device, kind, assets, &self.config)?);
        Ok(())
    }

    /// Rebuild the viewport-sized targets for a new window size
    pub fn resize(&mut self, device: &mut dyn GraphicsDevice, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            engine_bail!("lightlab::FrameOrchestrator", "Cannot resize to {}x{}", width, height);
        }
        if (width, height) == (self.viewport.width, self.viewport.height) {
            return Ok(());
        }
        self.targets.resize(device, width, height, &mut self.registry)?;
        self.viewport = Viewport::sized(width, height);
        Ok(())
    }

    // ===== GETTERS =====

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn lights(&self) -> &LightSet {
        &self.lights
    }

    pub fn model(&self) -> Option<&CentralModel> {
        self.model.as_ref()
    }

    pub fn kernels(&self) -> &KernelData {
        &self.kernels
    }

    /// Rebuild the blur weights for a new half width
    pub fn set_blur_half_width(&mut self, half_width: usize) -> Result<()> {
        if 2 * half_width > self.config.max_blur_width {
            engine_bail!("lightlab::FrameOrchestrator",
                "Blur half width {} exceeds {}", half_width, self.config.max_blur_width / 2);
        }
        self.kernels.rebuild_blur(half_width)
    }

    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    pub fn statics(&self) -> &StaticTextures {
        &self.statics
    }

    pub fn registry(&self) -> &TextureRegistry {
        &self.registry
    }

    pub fn animation(&self) -> &AnimationClock {
        &self.clock
    }
}

#[cfg(test)]
#[path = "frame_orchestrator_tests.rs"]
mod tests;
