/// Per-pass texture binding tables (role -> texture unit)
///
/// Each pass samples through one table. Units are explicit enum
/// discriminants, so two roles on the same unit within a table do not
/// compile.

/// A sampling role bound to a fixed texture unit
pub trait TextureSlot: Copy + std::fmt::Debug {
    /// Texture (or image) unit
    fn unit(self) -> u32;

    /// Sampler uniform that receives the unit
    fn uniform_name(self) -> &'static str;
}

macro_rules! texture_slots {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $unit:literal => $uniform:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        $vis enum $name {
            $($variant = $unit),+
        }

        impl $name {
            /// Every role of the table
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl TextureSlot for $name {
            fn unit(self) -> u32 {
                self as u32
            }

            fn uniform_name(self) -> &'static str {
                match self {
                    $($name::$variant => $uniform),+
                }
            }
        }
    };
}

texture_slots! {
    /// Deferred G-buffer channels read by the ambient and local light passes
    pub enum GBufferSlot {
        Position = 0 => "gPositionMap",
        Normal = 1 => "gNormalMap",
        Specular = 2 => "gSpecularMap",
        DiffuseSpecular = 3 => "gDifSpecMap",
    }
}

texture_slots! {
    /// Ground material maps, bound whenever the ground is drawn
    pub enum GroundSlot {
        Diffuse = 0 => "groundTexture",
        Normal = 1 => "groundNormal",
        Height = 2 => "depthMap",
    }
}

texture_slots! {
    /// Shadow maps read by the soft shadow lighting pass
    pub enum SoftShadowSlot {
        ShadowMap = 5 => "shadowMap",
        BlurredShadowMap = 6 => "blurredShadowMap",
    }
}

texture_slots! {
    /// Image units of the separable blur
    pub enum BlurImageSlot {
        Source = 0 => "OriginalShadowMap",
        Destination = 1 => "BlurredShadowMap",
    }
}

texture_slots! {
    /// Inputs of the SSAO occlusion pass
    pub enum OcclusionSlot {
        PositionDepth = 0 => "gPositionDepth",
        Normal = 1 => "gNormal",
        Noise = 2 => "ssaoNoise",
    }
}

texture_slots! {
    /// Input of the SSAO occlusion blur
    pub enum OcclusionBlurSlot {
        Occlusion = 0 => "ssaoTexture",
    }
}

texture_slots! {
    /// Inputs of the SSAO lighting pass
    pub enum SsaoLightingSlot {
        PositionDepth = 0 => "gPositionDepth",
        Normal = 1 => "gNormal",
        DiffuseSpecular = 2 => "gDifSpec",
        Specular = 3 => "gSpecular",
        Occlusion = 4 => "ssaoFBO",
        BlurredOcclusion = 5 => "ssaoFBOBlurred",
    }
}

texture_slots! {
    /// Buffer shown by a debug overlay quad
    pub enum DebugSlot {
        Buffer = 7 => "fboToDebug",
    }
}

#[cfg(test)]
#[path = "texture_units_tests.rs"]
mod tests;
