/// Engine configuration
///
/// Sizes, kernel parameters and scene population fixed when the
/// orchestrator is initialized. Per-frame parameters live in
/// [`crate::scene::SceneState`].

use std::time::Duration;
use crate::error::{Error, Result};
use crate::render::kernel::MAX_BLUR_WIDTH;
use crate::scene::ModelKind;

/// Work group width of the blur compute programs
pub const BLUR_GROUP_WIDTH: u32 = 128;

/// Startup configuration of the frame orchestrator
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Initial viewport width
    pub width: u32,
    /// Initial viewport height
    pub height: u32,
    /// Side of the square shadow map and blur images
    pub shadow_map_size: u32,
    pub blur_half_width: usize,
    pub blur_sigma: f32,
    /// Widest blur window the blur programs accept
    pub max_blur_width: usize,
    pub ssao_kernel_size: usize,
    /// Side of the SSAO noise tile
    pub noise_size: usize,
    /// Local lights of the deferred technique
    pub light_count: usize,
    /// Random light colors, or all white
    pub random_light_colors: bool,
    /// Slices of the light proxy sphere
    pub light_sphere_slices: u32,
    /// Slices of the decorative spheres and the sun
    pub sphere_slices: u32,
    pub ground_radius: f32,
    pub ground_segments: u32,
    /// Central model loaded at startup
    pub initial_model: ModelKind,
    /// Fixed seed for reproducible lights and kernels, entropy otherwise
    pub rng_seed: Option<u64>,
    pub animation_tick: Duration,
    /// Time for the sphere ring to complete one turn
    pub animation_revolution: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            shadow_map_size: 1024,
            blur_half_width: 32,
            blur_sigma: 2.0,
            max_blur_width: MAX_BLUR_WIDTH,
            ssao_kernel_size: 64,
            noise_size: 4,
            light_count: 16,
            random_light_colors: true,
            light_sphere_slices: 32,
            sphere_slices: 32,
            ground_radius: 50.0,
            ground_segments: 100,
            initial_model: ModelKind::Teapot,
            rng_seed: None,
            animation_tick: Duration::from_millis(10),
            animation_revolution: Duration::from_secs(120),
        }
    }
}

impl EngineConfig {
    /// Reject configurations the orchestrator cannot build
    ///
    /// # Errors
    ///
    /// `Error::InitializationFailed` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid(format!("viewport {}x{} has a zero side", self.width, self.height)));
        }
        if self.shadow_map_size == 0 || self.shadow_map_size % BLUR_GROUP_WIDTH != 0 {
            return Err(invalid(format!(
                "shadow map size {} is not a positive multiple of {}",
                self.shadow_map_size, BLUR_GROUP_WIDTH
            )));
        }
        if self.max_blur_width > MAX_BLUR_WIDTH {
            return Err(invalid(format!(
                "max blur width {} exceeds the kernel block size {}",
                self.max_blur_width, MAX_BLUR_WIDTH
            )));
        }
        if 2 * self.blur_half_width > self.max_blur_width {
            return Err(invalid(format!(
                "blur half width {} exceeds {}",
                self.blur_half_width,
                self.max_blur_width / 2
            )));
        }
        if self.blur_sigma.is_nan() || self.blur_sigma <= 0.0 {
            return Err(invalid(format!("blur sigma {} is not positive", self.blur_sigma)));
        }
        if self.ssao_kernel_size == 0 || self.noise_size == 0 {
            return Err(invalid("SSAO kernel and noise tile cannot be empty".to_string()));
        }
        if self.light_sphere_slices < 3 || self.sphere_slices < 3 {
            return Err(invalid("spheres need at least 3 slices".to_string()));
        }
        if self.ground_radius <= 0.0 || self.ground_segments == 0 {
            return Err(invalid(format!(
                "ground {} / {} segments is degenerate",
                self.ground_radius, self.ground_segments
            )));
        }
        if self.animation_tick.is_zero() || self.animation_revolution.is_zero() {
            return Err(invalid("animation durations must be positive".to_string()));
        }
        Ok(())
    }

    /// Work groups of one blur dispatch over the shadow map
    pub fn blur_groups(&self) -> [u32; 3] {
        [self.shadow_map_size / BLUR_GROUP_WIDTH, self.shadow_map_size, 1]
    }
}

fn invalid(message: String) -> Error {
    crate::engine_error!("lightlab::EngineConfig", "{}", message);
    Error::InitializationFailed(format!("invalid configuration: {}", message))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
