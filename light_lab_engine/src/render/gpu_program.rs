/// GPU programs and their scoped activation
///
/// A [`GpuProgram`] is an opaque linked program identified by its shading
/// stage. [`GpuProgram::activate`] returns an [`ActiveProgram`] guard:
/// uniforms, textures and draws go through the guard, and dropping it
/// unbinds every texture it bound and leaves no program in use.

use std::cell::RefCell;
use rustc_hash::FxHashMap;
use crate::device::{
    GraphicsDevice, ProgramId, ProgramDesc, ProgramKind, UniformLocation, UniformValue,
    TextureId, ImageAccess, VertexAttribute,
};
use crate::error::{Error, Result};
use super::drawable::Drawable;
use super::texture_units::TextureSlot;

// ===== SHADING STAGES =====

/// Named shading stages, each an opaque external program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadingStage {
    DeferredGBuffer,
    DeferredAmbient,
    DeferredLocalLights,
    Shadow,
    Blur,
    BlurVertical,
    LightingSoftShadow,
    LightingParallaxMapping,
    GBufferSsao,
    SsaoOcclusion,
    SsaoOcclusionBlur,
    LightingSsao,
    DebugWindow,
}

impl ShadingStage {
    pub const ALL: [ShadingStage; 13] = [
        ShadingStage::DeferredGBuffer,
        ShadingStage::DeferredAmbient,
        ShadingStage::DeferredLocalLights,
        ShadingStage::Shadow,
        ShadingStage::Blur,
        ShadingStage::BlurVertical,
        ShadingStage::LightingSoftShadow,
        ShadingStage::LightingParallaxMapping,
        ShadingStage::GBufferSsao,
        ShadingStage::SsaoOcclusion,
        ShadingStage::SsaoOcclusionBlur,
        ShadingStage::LightingSsao,
        ShadingStage::DebugWindow,
    ];

    /// Program name, also the shader source stem
    pub fn name(self) -> &'static str {
        match self {
            ShadingStage::DeferredGBuffer => "deferredGBuffer",
            ShadingStage::DeferredAmbient => "deferredAmbient",
            ShadingStage::DeferredLocalLights => "deferredLocalLights",
            ShadingStage::Shadow => "shadow",
            ShadingStage::Blur => "blur",
            ShadingStage::BlurVertical => "blurVertical",
            ShadingStage::LightingSoftShadow => "lightingSoftShadow",
            ShadingStage::LightingParallaxMapping => "lightingParallaxMapping",
            ShadingStage::GBufferSsao => "gBufferSSAO",
            ShadingStage::SsaoOcclusion => "ssaoOcclusionCalculationPass",
            ShadingStage::SsaoOcclusionBlur => "ssaoOcclusionBlurPass",
            ShadingStage::LightingSsao => "lightingSSAO",
            ShadingStage::DebugWindow => "debugWindow",
        }
    }

    pub fn kind(self) -> ProgramKind {
        match self {
            ShadingStage::Blur | ShadingStage::BlurVertical => ProgramKind::Compute,
            _ => ProgramKind::Graphics,
        }
    }

    /// Attribute names bound to slots 0..3, in slot order
    ///
    /// Scene programs and screen-space programs name their inputs
    /// differently, the slots are the same.
    pub fn attribute_names(self) -> &'static [&'static str] {
        match self {
            ShadingStage::Blur | ShadingStage::BlurVertical => &[],
            ShadingStage::DeferredAmbient
            | ShadingStage::SsaoOcclusion
            | ShadingStage::SsaoOcclusionBlur
            | ShadingStage::LightingSsao
            | ShadingStage::DebugWindow => &["vertPosition", "vertNormal", "vertTexCoord", "vertTangent"],
            _ => &["vertex", "vertexNormal", "vertexTexture", "vertexTangent"],
        }
    }
}

// ===== GPU PROGRAM =====

/// Linked program with its attribute slot bindings
pub struct GpuProgram {
    stage: ShadingStage,
    handle: ProgramId,
    attributes: Vec<(u32, &'static str)>,
    uniform_cache: RefCell<FxHashMap<String, Option<UniformLocation>>>,
}

impl GpuProgram {
    /// Compile and link the program for `stage`
    ///
    /// # Errors
    ///
    /// Link failures are reported by the device as `Error::ProgramLinkFailed`.
    pub fn create(device: &mut dyn GraphicsDevice, stage: ShadingStage) -> Result<Self> {
        let attributes: Vec<(u32, &'static str)> = VertexAttribute::ALL
            .iter()
            .zip(stage.attribute_names())
            .map(|(attribute, name)| (attribute.location(), *name))
            .collect();

        let handle = device
            .create_program(&ProgramDesc {
                name: stage.name(),
                kind: stage.kind(),
                attributes: &attributes,
            })
            .inspect_err(|e| crate::engine_error!("lightlab::GpuProgram", "{}", e))?;

        crate::engine_debug!("lightlab::GpuProgram", "Linked program '{}'", stage.name());

        Ok(Self {
            stage,
            handle,
            attributes,
            uniform_cache: RefCell::new(FxHashMap::default()),
        })
    }

    pub fn stage(&self) -> ShadingStage {
        self.stage
    }

    pub fn name(&self) -> &'static str {
        self.stage.name()
    }

    pub fn handle(&self) -> ProgramId {
        self.handle
    }

    /// Bound vertex attribute slots, in slot order
    pub fn attributes(&self) -> &[(u32, &'static str)] {
        &self.attributes
    }

    /// Make this program current for the lifetime of the returned guard
    ///
    /// # Errors
    ///
    /// `Error::ProgramAlreadyActive` if another program is still in use.
    pub fn activate<'a>(&'a self, device: &'a mut dyn GraphicsDevice) -> Result<ActiveProgram<'a>> {
        if let Some(active) = device.active_program() {
            let error = Error::ProgramAlreadyActive {
                active: device.program_name(active).unwrap_or_else(|| format!("{:?}", active)),
                requested: self.name().to_string(),
            };
            crate::engine_error!("lightlab::GpuProgram", "{}", error);
            return Err(error);
        }
        device.use_program(Some(self.handle));
        Ok(ActiveProgram {
            program: self,
            device,
            bound_units: Vec::new(),
            sampled: Vec::new(),
            written_images: Vec::new(),
        })
    }

    /// Release the linked program
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.destroy_program(self.handle);
    }

    fn location(&self, device: &mut dyn GraphicsDevice, name: &str) -> Option<UniformLocation> {
        if let Some(cached) = self.uniform_cache.borrow().get(name) {
            return *cached;
        }
        let location = device.uniform_location(self.handle, name);
        if location.is_none() {
            crate::engine_trace!("lightlab::GpuProgram",
                "Uniform '{}' not present in '{}', ignored", name, self.name());
        }
        self.uniform_cache.borrow_mut().insert(name.to_string(), location);
        location
    }
}

// ===== ACTIVE PROGRAM =====

/// Textures a pass sampled and images it wrote while its program was active
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramUsage {
    pub sampled: Vec<TextureId>,
    pub written_images: Vec<TextureId>,
}

/// Scoped activation of a [`GpuProgram`]
pub struct ActiveProgram<'a> {
    program: &'a GpuProgram,
    device: &'a mut dyn GraphicsDevice,
    bound_units: Vec<u32>,
    sampled: Vec<TextureId>,
    written_images: Vec<TextureId>,
}

impl<'a> ActiveProgram<'a> {
    pub fn program(&self) -> &GpuProgram {
        self.program
    }

    /// Set a uniform by name. Unknown names are ignored.
    pub fn set_uniform(&mut self, name: &str, value: impl Into<UniformValue>) {
        if let Some(location) = self.program.location(&mut *self.device, name) {
            self.device.set_uniform(location, value.into());
        }
    }

    /// Bind `texture` to the unit of `slot` and point its sampler at it
    pub fn bind_texture<S: TextureSlot>(&mut self, slot: S, texture: TextureId) {
        let unit = slot.unit();
        self.device.bind_texture(unit, Some(texture));
        self.set_uniform(slot.uniform_name(), UniformValue::Int(unit as i32));
        if !self.bound_units.contains(&unit) {
            self.bound_units.push(unit);
        }
        if !self.sampled.contains(&texture) {
            self.sampled.push(texture);
        }
    }

    /// Release the unit of `slot` before the guard ends
    pub fn unbind_texture<S: TextureSlot>(&mut self, slot: S) {
        let unit = slot.unit();
        self.device.bind_texture(unit, None);
        self.bound_units.retain(|u| *u != unit);
    }

    /// Bind `texture` as a load/store image on the unit of `slot`
    pub fn bind_image<S: TextureSlot>(&mut self, slot: S, texture: TextureId, access: ImageAccess) {
        self.device.bind_image(slot.unit(), texture, access);
        if access.writes() {
            if !self.written_images.contains(&texture) {
                self.written_images.push(texture);
            }
        } else if !self.sampled.contains(&texture) {
            self.sampled.push(texture);
        }
    }

    /// Upload `data` as the uniform block `block` at `binding`
    pub fn upload_uniform_block(&mut self, block: &str, binding: u32, data: &[f32]) -> Result<()> {
        self.device
            .upload_uniform_block(self.program.handle, block, binding, bytemuck::cast_slice(data))
    }

    pub fn draw(&mut self, drawable: &Drawable) {
        self.device.draw_mesh(drawable.mesh());
    }

    pub fn dispatch(&mut self, groups: [u32; 3]) {
        self.device.dispatch_compute(groups);
    }

    /// End the activation and report what the program touched
    pub fn finish(mut self) -> ProgramUsage {
        ProgramUsage {
            sampled: std::mem::take(&mut self.sampled),
            written_images: std::mem::take(&mut self.written_images),
        }
    }
}

impl Drop for ActiveProgram<'_> {
    fn drop(&mut self) {
        for unit in self.bound_units.drain(..) {
            self.device.bind_texture(unit, None);
        }
        self.device.use_program(None);
    }
}

#[cfg(test)]
#[path = "gpu_program_tests.rs"]
mod tests;
