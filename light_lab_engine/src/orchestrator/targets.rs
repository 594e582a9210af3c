/// Render targets and compute images owned by the orchestrator
///
/// The shadow map and blur images have a fixed size. G-buffers and the
/// occlusion buffers follow the viewport and are rebuilt on resize.

use crate::config::EngineConfig;
use crate::device::{
    GraphicsDevice, TextureDesc, TextureFilter, TextureFormat, TextureId, TextureUsage, TextureWrap,
};
use crate::error::Result;
use crate::render::render_target::{AttachmentSpec, RenderTarget};
use crate::render_graph::TextureRegistry;

/// Clear color of the shadow map (exponential depth of "far")
const SHADOW_CLEAR: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
const SSAO_GBUFFER_CLEAR: [f32; 4] = [0.5, 0.5, 0.5, 0.0];

fn shadow_attachments() -> [AttachmentSpec; 2] {
    [AttachmentSpec::color("map", TextureFormat::R32_SFLOAT), AttachmentSpec::depth()]
}

fn gbuffer_attachments() -> [AttachmentSpec; 5] {
    [
        AttachmentSpec::color("position", TextureFormat::R16G16B16_SFLOAT),
        AttachmentSpec::color("normal", TextureFormat::R16G16B16_SFLOAT),
        AttachmentSpec::color("diffuse", TextureFormat::R8G8B8A8_UNORM),
        AttachmentSpec::color("specular", TextureFormat::R8G8B8_UNORM),
        AttachmentSpec::depth(),
    ]
}

fn ssao_gbuffer_attachments() -> [AttachmentSpec; 5] {
    [
        AttachmentSpec::color("position_depth", TextureFormat::R32G32B32A32_SFLOAT),
        AttachmentSpec::color("normal", TextureFormat::R16G16B16_SFLOAT),
        AttachmentSpec::color("diffuse_specular", TextureFormat::R8G8B8A8_UNORM),
        AttachmentSpec::color("specular", TextureFormat::R8G8B8_UNORM),
        AttachmentSpec::depth(),
    ]
}

fn occlusion_attachments() -> [AttachmentSpec; 2] {
    [AttachmentSpec::color("occlusion", TextureFormat::R32_SFLOAT), AttachmentSpec::depth()]
}

// ===== VIEWPORT TARGETS =====

/// Targets sized like the viewport
#[derive(Debug)]
struct ViewportTargets {
    gbuffer: RenderTarget,
    ssao_gbuffer: RenderTarget,
    ssao_occlusion: RenderTarget,
    ssao_blur: RenderTarget,
}

impl ViewportTargets {
    fn create(device: &mut dyn GraphicsDevice, width: u32, height: u32) -> Result<Self> {
        let gbuffer = RenderTarget::create(device, "gbuffer", width, height, &gbuffer_attachments())?;

        let ssao_gbuffer = match RenderTarget::create(device, "ssao_gbuffer", width, height, &ssao_gbuffer_attachments()) {
            Ok(target) => target.with_clear_color(SSAO_GBUFFER_CLEAR),
            Err(e) => {
                gbuffer.destroy(device);
                return Err(e);
            }
        };
        let ssao_occlusion = match RenderTarget::create(device, "ssao_occlusion", width, height, &occlusion_attachments()) {
            Ok(target) => target,
            Err(e) => {
                gbuffer.destroy(device);
                ssao_gbuffer.destroy(device);
                return Err(e);
            }
        };
        let ssao_blur = match RenderTarget::create(device, "ssao_blur", width, height, &occlusion_attachments()) {
            Ok(target) => target,
            Err(e) => {
                gbuffer.destroy(device);
                ssao_gbuffer.destroy(device);
                ssao_occlusion.destroy(device);
                return Err(e);
            }
        };
        Ok(Self { gbuffer, ssao_gbuffer, ssao_occlusion, ssao_blur })
    }

    fn all(&self) -> [&RenderTarget; 4] {
        [&self.gbuffer, &self.ssao_gbuffer, &self.ssao_occlusion, &self.ssao_blur]
    }

    fn destroy(self, device: &mut dyn GraphicsDevice) {
        self.gbuffer.destroy(device);
        self.ssao_gbuffer.destroy(device);
        self.ssao_occlusion.destroy(device);
        self.ssao_blur.destroy(device);
    }
}

// ===== TARGET SET =====

/// Every offscreen destination of the four techniques
#[derive(Debug)]
pub struct TargetSet {
    shadow: RenderTarget,
    blur_temp: TextureId,
    blur_final: TextureId,
    viewport: ViewportTargets,
}

impl TargetSet {
    /// Create and validate every target, registering their textures
    ///
    /// # Errors
    ///
    /// `Error::IncompleteFramebuffer` if the device rejects a target.
    /// Targets created before the failure are released.
    pub fn create(
        device: &mut dyn GraphicsDevice,
        config: &EngineConfig,
        registry: &mut TextureRegistry,
    ) -> Result<Self> {
        let size = config.shadow_map_size;
        let shadow = RenderTarget::create(device, "shadow", size, size, &shadow_attachments())?
            .with_clear_color(SHADOW_CLEAR);

        let blur_temp = match blur_image(device, "blur.temp", size) {
            Ok(texture) => texture,
            Err(e) => {
                shadow.destroy(device);
                return Err(e);
            }
        };
        let blur_final = match blur_image(device, "blur.final", size) {
            Ok(texture) => texture,
            Err(e) => {
                shadow.destroy(device);
                device.destroy_texture(blur_temp);
                return Err(e);
            }
        };
        let viewport = match ViewportTargets::create(device, config.width, config.height) {
            Ok(targets) => targets,
            Err(e) => {
                shadow.destroy(device);
                device.destroy_texture(blur_temp);
                device.destroy_texture(blur_final);
                return Err(e);
            }
        };

        registry.register_target(&shadow);
        registry.register(blur_temp, "blur.temp");
        registry.register(blur_final, "blur.final");
        for target in viewport.all() {
            registry.register_target(target);
        }

        Ok(Self { shadow, blur_temp, blur_final, viewport })
    }

    /// Rebuild the viewport-sized targets
    ///
    /// The new targets are validated before the old ones are released; on
    /// failure the previous targets stay in place.
    pub fn resize(
        &mut self,
        device: &mut dyn GraphicsDevice,
        width: u32,
        height: u32,
        registry: &mut TextureRegistry,
    ) -> Result<()> {
        let fresh = ViewportTargets::create(device, width, height)?;
        let old = std::mem::replace(&mut self.viewport, fresh);
        for target in old.all() {
            registry.unregister_target(target);
        }
        old.destroy(device);
        for target in self.viewport.all() {
            registry.register_target(target);
        }
        crate::engine_debug!("lightlab::TargetSet", "Viewport targets rebuilt at {}x{}", width, height);
        Ok(())
    }

    // ===== GETTERS =====

    pub fn shadow(&self) -> &RenderTarget {
        &self.shadow
    }

    /// Horizontally blurred shadow map
    pub fn blur_temp(&self) -> TextureId {
        self.blur_temp
    }

    /// Fully blurred shadow map
    pub fn blur_final(&self) -> TextureId {
        self.blur_final
    }

    pub fn gbuffer(&self) -> &RenderTarget {
        &self.viewport.gbuffer
    }

    pub fn ssao_gbuffer(&self) -> &RenderTarget {
        &self.viewport.ssao_gbuffer
    }

    pub fn ssao_occlusion(&self) -> &RenderTarget {
        &self.viewport.ssao_occlusion
    }

    pub fn ssao_blur(&self) -> &RenderTarget {
        &self.viewport.ssao_blur
    }

    pub fn destroy(self, device: &mut dyn GraphicsDevice, registry: &mut TextureRegistry) {
        registry.unregister_target(&self.shadow);
        registry.unregister(self.blur_temp);
        registry.unregister(self.blur_final);
        for target in self.viewport.all() {
            registry.unregister_target(target);
        }
        self.shadow.destroy(device);
        device.destroy_texture(self.blur_temp);
        device.destroy_texture(self.blur_final);
        self.viewport.destroy(device);
    }
}

fn blur_image(device: &mut dyn GraphicsDevice, label: &str, size: u32) -> Result<TextureId> {
    device.create_texture(&TextureDesc {
        label,
        width: size,
        height: size,
        format: TextureFormat::R32_SFLOAT,
        usage: TextureUsage::SAMPLED | TextureUsage::STORAGE,
        filter: TextureFilter::Linear,
        wrap: TextureWrap::ClampToEdge,
        data: None,
    })
}

#[cfg(test)]
#[path = "targets_tests.rs"]
mod tests;
