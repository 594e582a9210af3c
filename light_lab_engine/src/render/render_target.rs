/// Offscreen render targets
///
/// A render target owns a framebuffer and its attachment textures. The
/// attachment list is fixed at creation, where completeness is checked
/// once; binding never re-validates.

use crate::device::{
    GraphicsDevice, FramebufferId, TextureId, TextureDesc, TextureFormat, TextureUsage,
    TextureFilter, TextureWrap, FramebufferDesc, ClearFlags, Viewport,
};
use crate::error::{Error, Result};
use crate::engine_bail;

// ===== ATTACHMENT SPEC =====

/// Description of one attachment of a render target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttachmentSpec {
    pub label: &'static str,
    pub format: TextureFormat,
    pub filter: TextureFilter,
    pub wrap: TextureWrap,
    /// Explicit size, `None` to follow the target size
    pub size: Option<(u32, u32)>,
}

impl AttachmentSpec {
    /// Sampled color attachment with linear filtering
    pub fn color(label: &'static str, format: TextureFormat) -> Self {
        Self {
            label,
            format,
            filter: TextureFilter::Linear,
            wrap: TextureWrap::ClampToEdge,
            size: None,
        }
    }

    /// 32-bit float depth attachment
    pub fn depth() -> Self {
        Self {
            label: "depth",
            format: TextureFormat::D32_FLOAT,
            filter: TextureFilter::Nearest,
            wrap: TextureWrap::ClampToEdge,
            size: None,
        }
    }

    pub fn with_filter(mut self, filter: TextureFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    fn usage(&self) -> TextureUsage {
        if self.format.is_depth() {
            TextureUsage::DEPTH_STENCIL
        } else {
            TextureUsage::SAMPLED | TextureUsage::RENDER_TARGET | TextureUsage::STORAGE
        }
    }
}

// ===== RENDER TARGET =====

/// Framebuffer plus its attachment textures
#[derive(Debug)]
pub struct RenderTarget {
    name: String,
    framebuffer: FramebufferId,
    width: u32,
    height: u32,
    color: Vec<TextureId>,
    color_labels: Vec<&'static str>,
    depth: Option<TextureId>,
    clear_color: [f32; 4],
}

impl RenderTarget {
    /// Allocate the attachments and the framebuffer, then check completeness
    ///
    /// # Errors
    ///
    /// - `Error::InvalidResource` for a zero size, no attachment or more
    ///   than one depth attachment
    /// - `Error::IncompleteFramebuffer` when the device rejects the
    ///   combination (mismatched sizes, bad formats)
    pub fn create(
        device: &mut dyn GraphicsDevice,
        name: &str,
        width: u32,
        height: u32,
        attachments: &[AttachmentSpec],
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            engine_bail!("lightlab::RenderTarget", "Target '{}' has zero size {}x{}", name, width, height);
        }
        if attachments.is_empty() {
            engine_bail!("lightlab::RenderTarget", "Target '{}' has no attachment", name);
        }
        if attachments.iter().filter(|a| a.format.is_depth()).count() > 1 {
            engine_bail!("lightlab::RenderTarget", "Target '{}' has more than one depth attachment", name);
        }

        let mut created: Vec<TextureId> = Vec::with_capacity(attachments.len());
        let mut color = Vec::new();
        let mut color_labels = Vec::new();
        let mut depth = None;

        for spec in attachments {
            let (w, h) = spec.size.unwrap_or((width, height));
            let label = format!("{}.{}", name, spec.label);
            let texture = match device.create_texture(&TextureDesc {
                label: &label,
                width: w,
                height: h,
                format: spec.format,
                usage: spec.usage(),
                filter: spec.filter,
                wrap: spec.wrap,
                data: None,
            }) {
                Ok(texture) => texture,
                Err(e) => {
                    release(device, &created, None);
                    return Err(e);
                }
            };
            created.push(texture);
            if spec.format.is_depth() {
                depth = Some(texture);
            } else {
                color.push(texture);
                color_labels.push(spec.label);
            }
        }

        let framebuffer = match device.create_framebuffer(&FramebufferDesc {
            label: name,
            color_attachments: &color,
            depth_attachment: depth,
        }) {
            Ok(framebuffer) => framebuffer,
            Err(e) => {
                release(device, &created, None);
                return Err(e);
            }
        };

        let status = device.framebuffer_status(framebuffer);
        if !status.is_complete() {
            release(device, &created, Some(framebuffer));
            let error = Error::IncompleteFramebuffer {
                target: name.to_string(),
                status: status.to_string(),
            };
            crate::engine_error!("lightlab::RenderTarget", "{}", error);
            return Err(error);
        }

        crate::engine_debug!("lightlab::RenderTarget",
            "Created '{}' {}x{} with {} color attachment(s){}",
            name, width, height, color.len(),
            if depth.is_some() { " and depth" } else { "" });

        Ok(Self {
            name: name.to_string(),
            framebuffer,
            width,
            height,
            color,
            color_labels,
            depth,
            clear_color: [0.0, 0.0, 0.0, 0.0],
        })
    }

    /// Color used by [`RenderTarget::bind_and_clear`]
    pub fn with_clear_color(mut self, color: [f32; 4]) -> Self {
        self.clear_color = color;
        self
    }

    // ===== BINDING =====

    /// Redirect draw output to this target and cover it with the viewport
    pub fn bind(&self, device: &mut dyn GraphicsDevice) {
        device.bind_framebuffer(Some(self.framebuffer));
        device.set_viewport(self.viewport());
    }

    /// Bind, then clear color and depth
    pub fn bind_and_clear(&self, device: &mut dyn GraphicsDevice) {
        self.bind(device);
        let mut flags = ClearFlags::COLOR;
        if self.depth.is_some() {
            flags |= ClearFlags::DEPTH;
        }
        device.clear(flags, self.clear_color);
    }

    /// Restore the screen as draw destination
    pub fn unbind(device: &mut dyn GraphicsDevice, screen: Viewport) {
        device.bind_framebuffer(None);
        device.set_viewport(screen);
    }

    // ===== GETTERS =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn framebuffer(&self) -> FramebufferId {
        self.framebuffer
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::sized(self.width, self.height)
    }

    /// Color attachment at `slot`
    pub fn color_texture(&self, slot: usize) -> Option<TextureId> {
        self.color.get(slot).copied()
    }

    /// Color attachment by its spec label
    pub fn color_texture_named(&self, label: &str) -> Option<TextureId> {
        self.color_labels
            .iter()
            .position(|l| *l == label)
            .map(|i| self.color[i])
    }

    pub fn color_textures(&self) -> &[TextureId] {
        &self.color
    }

    pub fn depth_texture(&self) -> Option<TextureId> {
        self.depth
    }

    /// Every texture the target writes when drawn into
    pub fn attachments(&self) -> Vec<TextureId> {
        self.color.iter().copied().chain(self.depth).collect()
    }

    /// Attachments with their labels, `<target>.<attachment>`
    pub fn labeled_attachments(&self) -> Vec<(TextureId, String)> {
        let color = self
            .color
            .iter()
            .zip(&self.color_labels)
            .map(|(texture, label)| (*texture, format!("{}.{}", self.name, label)));
        let depth = self.depth.map(|texture| (texture, format!("{}.depth", self.name)));
        color.chain(depth).collect()
    }

    /// Release the framebuffer and its textures
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        let textures = self.attachments();
        release(device, &textures, Some(self.framebuffer));
    }
}

fn release(device: &mut dyn GraphicsDevice, textures: &[TextureId], framebuffer: Option<FramebufferId>) {
    if let Some(framebuffer) = framebuffer {
        device.destroy_framebuffer(framebuffer);
    }
    for &texture in textures {
        device.destroy_texture(texture);
    }
}

#[cfg(test)]
#[path = "render_target_tests.rs"]
mod tests;
