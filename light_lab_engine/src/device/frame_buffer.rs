/// Framebuffer descriptor and completeness status
///
/// A framebuffer groups color and depth attachments. It is created once,
/// validated once, and rebound each frame. All color attachments are
/// enabled as draw buffers at creation.

use std::fmt;
use super::graphics_device::TextureId;

/// Descriptor for creating a framebuffer
#[derive(Debug, Clone)]
pub struct FramebufferDesc<'a> {
    /// Debug label
    pub label: &'a str,
    /// Color attachments, attachment slot = index
    pub color_attachments: &'a [TextureId],
    /// Optional depth attachment
    pub depth_attachment: Option<TextureId>,
}

/// Completeness status reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    Complete,
    /// An attachment is missing or has a format it cannot be attached with
    IncompleteAttachment,
    /// No attachment at all
    MissingAttachment,
    /// Attachments do not share the same width and height
    IncompleteDimensions,
    /// The combination of formats is not supported by the backend
    Unsupported,
}

impl FramebufferStatus {
    pub fn is_complete(self) -> bool {
        self == FramebufferStatus::Complete
    }
}

impl fmt::Display for FramebufferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FramebufferStatus::Complete => "complete",
            FramebufferStatus::IncompleteAttachment => "incomplete attachment",
            FramebufferStatus::MissingAttachment => "missing attachment",
            FramebufferStatus::IncompleteDimensions => "attachment dimensions differ",
            FramebufferStatus::Unsupported => "unsupported format combination",
        };
        f.write_str(text)
    }
}
