/// Per-frame scene parameters and the commands that edit them
///
/// The host never mutates [`SceneState`] while a frame renders: input
/// handlers push [`SceneCommand`]s on a [`CommandQueue`] and the queue is
/// drained between frames.

use std::collections::VecDeque;
use glam::Vec3;
use super::camera::{OrbitCamera, ShadowLight};
use super::model::{GroundMaterial, ModelKind};

// ===== TECHNIQUES AND DEBUG MODES =====

/// Rendering strategy of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Technique {
    Deferred,
    ForwardShadowEsm,
    ForwardParallax,
    #[default]
    ForwardSsao,
}

impl Technique {
    pub const ALL: [Technique; 4] = [
        Technique::Deferred,
        Technique::ForwardShadowEsm,
        Technique::ForwardParallax,
        Technique::ForwardSsao,
    ];
}

/// G-buffer channel shown instead of the lit result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GBufferDebugMode {
    Position,
    Normal,
    DiffuseXyz,
    DiffuseW,
    Specular,
    #[default]
    None,
}

impl GBufferDebugMode {
    /// Value of the `gBufDebug` uniform
    pub fn as_uniform(self) -> i32 {
        self as i32
    }
}

/// Intermediate shadow quantity shown by the soft shadow pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowDebugMode {
    PixelDepth,
    PixelDepthMapped,
    LightDepth,
    LightDepthMapped,
    LightDepthFromTexture,
    ShadowColor,
    LightDepthLogarithmic,
    ExponentialPixelDepth,
    Visibility,
    #[default]
    None,
}

impl ShadowDebugMode {
    pub const ALL: [ShadowDebugMode; 10] = [
        ShadowDebugMode::PixelDepth,
        ShadowDebugMode::PixelDepthMapped,
        ShadowDebugMode::LightDepth,
        ShadowDebugMode::LightDepthMapped,
        ShadowDebugMode::LightDepthFromTexture,
        ShadowDebugMode::ShadowColor,
        ShadowDebugMode::LightDepthLogarithmic,
        ShadowDebugMode::ExponentialPixelDepth,
        ShadowDebugMode::Visibility,
        ShadowDebugMode::None,
    ];

    /// Value of the `shadowDebug` uniform
    pub fn as_uniform(self) -> i32 {
        self as i32
    }
}

/// Texture coordinate offsetting applied by the parallax pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallaxVariant {
    #[default]
    Off,
    /// Single-sample offset along the view vector
    Offset,
    /// Layered search through the height map
    Steep,
    /// Steep search plus interpolation between the last two layers
    Occlusion,
}

/// Parallax program switches derived from a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallaxFlags {
    pub parallax: bool,
    pub steep: bool,
    pub occlusion: bool,
}

impl ParallaxVariant {
    pub fn flags(self) -> ParallaxFlags {
        let (parallax, steep, occlusion) = match self {
            ParallaxVariant::Off => (false, false, false),
            ParallaxVariant::Offset => (true, false, false),
            ParallaxVariant::Steep => (true, true, false),
            ParallaxVariant::Occlusion => (true, false, true),
        };
        ParallaxFlags { parallax, steep, occlusion }
    }
}

// ===== PER-TECHNIQUE SETTINGS =====

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EsmSettings {
    /// Exponential shadow constant
    pub c: f32,
    pub debug: ShadowDebugMode,
}

impl Default for EsmSettings {
    fn default() -> Self {
        Self { c: 60.0, debug: ShadowDebugMode::None }
    }
}

/// Layer counts accepted by the steep parallax search
pub const LAYER_COUNT_RANGE: std::ops::RangeInclusive<i32> = 1..=100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxSettings {
    pub normal_mapping: bool,
    pub variant: ParallaxVariant,
    pub enhance_view_scaling: bool,
    pub crop_texture_map: bool,
    pub height_scale: f32,
    pub layer_count: i32,
}

impl Default for ParallaxSettings {
    fn default() -> Self {
        Self {
            normal_mapping: false,
            variant: ParallaxVariant::Off,
            enhance_view_scaling: false,
            crop_texture_map: false,
            height_scale: 0.1,
            layer_count: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SsaoSettings {
    pub enabled: bool,
    pub blurred: bool,
    pub radius: f32,
}

impl Default for SsaoSettings {
    fn default() -> Self {
        Self { enabled: true, blurred: false, radius: 1.0 }
    }
}

// ===== SCENE STATE =====

/// Everything a frame reads besides the orchestrator's own resources
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub technique: Technique,
    pub camera: OrbitCamera,
    pub light: ShadowLight,
    pub ambient: Vec3,
    pub light_color: Vec3,
    /// Free shading mode forwarded to the programs (keys 0-9)
    pub mode: i32,
    pub gbuffer_debug: GBufferDebugMode,
    pub esm: EsmSettings,
    pub parallax: ParallaxSettings,
    pub ssao: SsaoSettings,
    pub draw_ground: bool,
    pub draw_spheres: bool,
    /// Central model in the parallax pass
    pub draw_object: bool,
    pub sphere_count: u32,
    pub ground_material: GroundMaterial,
    pub draw_debug_quads: bool,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            technique: Technique::default(),
            camera: OrbitCamera::default(),
            light: ShadowLight::default(),
            ambient: Vec3::splat(0.2),
            light_color: Vec3::ONE,
            mode: 0,
            gbuffer_debug: GBufferDebugMode::None,
            esm: EsmSettings::default(),
            parallax: ParallaxSettings::default(),
            ssao: SsaoSettings::default(),
            draw_ground: true,
            draw_spheres: false,
            draw_object: false,
            sphere_count: 12,
            ground_material: GroundMaterial::Brick,
            draw_debug_quads: false,
        }
    }
}

// ===== COMMANDS =====

/// Edit requested by the host between frames
#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    OrbitCamera { spin: f32, tilt: f32 },
    Zoom(f32),
    Pan { dx: f32, dy: f32 },
    OrbitLight { spin: f32, tilt: f32 },
    LightDistance(f32),
    SetTechnique(Technique),
    SetMode(i32),
    SetGBufferDebug(GBufferDebugMode),
    SetShadowDebug(ShadowDebugMode),
    SetEsmConstant(f32),
    SetNormalMapping(bool),
    SetParallaxVariant(ParallaxVariant),
    SetEnhanceViewScaling(bool),
    SetCropTextureMap(bool),
    SetHeightScale(f32),
    SetLayerCount(i32),
    SetSsaoEnabled(bool),
    SetSsaoBlurred(bool),
    SetSsaoRadius(f32),
    SetAmbient(Vec3),
    SetLightColor(Vec3),
    ToggleGround,
    ToggleSpheres,
    ToggleObject,
    SetGroundMaterial(GroundMaterial),
    SetDebugQuads(bool),

    // Handled by the orchestrator (owned resources)
    SelectLight(usize),
    SetSelectedLightColor(Vec3),
    MoveSelectedLight(Vec3),
    SetSelectedLightRadius(f32),
    RerollLights { all_white: bool },
    SetModel(ModelKind),
    Resize { width: u32, height: u32 },
}

impl SceneState {
    /// Apply a command that only touches scene parameters
    ///
    /// Returns `false` for commands the orchestrator must handle.
    pub fn apply(&mut self, command: &SceneCommand) -> bool {
        match command {
            SceneCommand::OrbitCamera { spin, tilt } => self.camera.orbit(*spin, *tilt),
            SceneCommand::Zoom(delta) => self.camera.zoom += delta,
            SceneCommand::Pan { dx, dy } => self.camera.pan(*dx, *dy),
            SceneCommand::OrbitLight { spin, tilt } => self.light.orbit(*spin, *tilt),
            SceneCommand::LightDistance(delta) => self.light.distance += delta,
            SceneCommand::SetTechnique(technique) => {
                if self.technique != *technique {
                    crate::engine_info!("lightlab::SceneState",
                        "Technique {:?} -> {:?}", self.technique, technique);
                    self.technique = *technique;
                }
            }
            SceneCommand::SetMode(mode) => self.mode = *mode,
            SceneCommand::SetGBufferDebug(debug) => self.gbuffer_debug = *debug,
            SceneCommand::SetShadowDebug(debug) => self.esm.debug = *debug,
            SceneCommand::SetEsmConstant(c) => self.esm.c = *c,
            SceneCommand::SetNormalMapping(on) => self.parallax.normal_mapping = *on,
            SceneCommand::SetParallaxVariant(variant) => self.parallax.variant = *variant,
            SceneCommand::SetEnhanceViewScaling(on) => self.parallax.enhance_view_scaling = *on,
            SceneCommand::SetCropTextureMap(on) => self.parallax.crop_texture_map = *on,
            SceneCommand::SetHeightScale(scale) => self.parallax.height_scale = *scale,
            SceneCommand::SetLayerCount(count) => {
                self.parallax.layer_count =
                    (*count).clamp(*LAYER_COUNT_RANGE.start(), *LAYER_COUNT_RANGE.end());
            }
            SceneCommand::SetSsaoEnabled(on) => self.ssao.enabled = *on,
            SceneCommand::SetSsaoBlurred(on) => self.ssao.blurred = *on,
            SceneCommand::SetSsaoRadius(radius) => self.ssao.radius = *radius,
            SceneCommand::SetAmbient(color) => self.ambient = *color,
            SceneCommand::SetLightColor(color) => self.light_color = *color,
            SceneCommand::ToggleGround => self.draw_ground = !self.draw_ground,
            SceneCommand::ToggleSpheres => self.draw_spheres = !self.draw_spheres,
            SceneCommand::ToggleObject => self.draw_object = !self.draw_object,
            SceneCommand::SetGroundMaterial(material) => self.ground_material = *material,
            SceneCommand::SetDebugQuads(on) => self.draw_debug_quads = *on,
            SceneCommand::SelectLight(_)
            | SceneCommand::SetSelectedLightColor(_)
            | SceneCommand::MoveSelectedLight(_)
            | SceneCommand::SetSelectedLightRadius(_)
            | SceneCommand::RerollLights { .. }
            | SceneCommand::SetModel(_)
            | SceneCommand::Resize { .. } => return false,
        }
        true
    }
}

/// FIFO of commands waiting for the next frame boundary
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: VecDeque<SceneCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: SceneCommand) {
        self.commands.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Remove and return every queued command, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = SceneCommand> + '_ {
        self.commands.drain(..)
    }
}

#[cfg(test)]
#[path = "scene_state_tests.rs"]
mod tests;
