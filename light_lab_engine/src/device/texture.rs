/// Texture formats, usage flags, texture descriptor and texture info

use bitflags::bitflags;

/// Texture pixel format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum TextureFormat {
    // Color formats
    R8G8B8A8_UNORM,
    R8G8B8_UNORM,
    R16G16B16_SFLOAT,
    R16G16B16A16_SFLOAT,
    R32_SFLOAT,
    R32G32B32_SFLOAT,
    R32G32B32A32_SFLOAT,

    // Depth formats
    D24_UNORM,
    D32_FLOAT,
}

impl TextureFormat {
    /// True for depth attachment formats
    pub fn is_depth(self) -> bool {
        matches!(self, TextureFormat::D24_UNORM | TextureFormat::D32_FLOAT)
    }

    /// True for floating point color formats
    pub fn is_float(self) -> bool {
        matches!(
            self,
            TextureFormat::R16G16B16_SFLOAT
                | TextureFormat::R16G16B16A16_SFLOAT
                | TextureFormat::R32_SFLOAT
                | TextureFormat::R32G32B32_SFLOAT
                | TextureFormat::R32G32B32A32_SFLOAT
                | TextureFormat::D32_FLOAT
        )
    }

    /// Number of channels per texel
    pub fn channel_count(self) -> u32 {
        match self {
            TextureFormat::R32_SFLOAT | TextureFormat::D24_UNORM | TextureFormat::D32_FLOAT => 1,
            TextureFormat::R8G8B8_UNORM
            | TextureFormat::R16G16B16_SFLOAT
            | TextureFormat::R32G32B32_SFLOAT => 3,
            TextureFormat::R8G8B8A8_UNORM
            | TextureFormat::R16G16B16A16_SFLOAT
            | TextureFormat::R32G32B32A32_SFLOAT => 4,
        }
    }

    /// Size of one texel in bytes
    pub fn bytes_per_texel(self) -> u32 {
        match self {
            TextureFormat::R8G8B8A8_UNORM => 4,
            TextureFormat::R8G8B8_UNORM => 3,
            TextureFormat::R16G16B16_SFLOAT => 6,
            TextureFormat::R16G16B16A16_SFLOAT => 8,
            TextureFormat::R32_SFLOAT => 4,
            TextureFormat::R32G32B32_SFLOAT => 12,
            TextureFormat::R32G32B32A32_SFLOAT => 16,
            TextureFormat::D24_UNORM => 4,
            TextureFormat::D32_FLOAT => 4,
        }
    }
}

bitflags! {
    /// How a texture may be used by passes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextureUsage: u32 {
        /// Sampled through a texture unit
        const SAMPLED = 1 << 0;
        /// Color attachment of a framebuffer
        const RENDER_TARGET = 1 << 1;
        /// Depth attachment of a framebuffer
        const DEPTH_STENCIL = 1 << 2;
        /// Bound as an image for compute load/store
        const STORAGE = 1 << 3;
    }
}

/// Sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

/// Wrap mode for both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureWrap {
    Repeat,
    ClampToEdge,
}

// ===== TEXTURE DESC =====

/// Descriptor for creating a texture
#[derive(Debug, Clone)]
pub struct TextureDesc<'a> {
    /// Debug label
    pub label: &'a str,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel format
    pub format: TextureFormat,
    /// Usage flags
    pub usage: TextureUsage,
    pub filter: TextureFilter,
    pub wrap: TextureWrap,
    /// Optional initial texels, tightly packed in `format`
    pub data: Option<&'a [u8]>,
}

impl<'a> TextureDesc<'a> {
    /// Expected byte length of `data` for this descriptor
    pub fn expected_data_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_texel() as usize
    }
}

// ===== TEXTURE INFO =====

/// Read-only properties of a created texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub usage: TextureUsage,
}

impl TextureInfo {
    /// Single-channel float texture (shadow maps, occlusion buffers)
    pub fn is_single_channel_float(&self) -> bool {
        self.format.channel_count() == 1 && self.format.is_float() && !self.format.is_depth()
    }
}
