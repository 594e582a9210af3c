/// Precomputed kernels: Gaussian blur weights, SSAO hemisphere samples
/// and the SSAO rotation noise tile
///
/// Randomness is injected, so the same RNG state always yields the same
/// kernels.

use glam::Vec3;
use rand::Rng;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::engine_bail;

/// Largest blur window (`2 * half_width`) the blur program accepts
pub const MAX_BLUR_WIDTH: usize = 100;

/// Standard normal density with mean `mu` and deviation `sigma`
fn normal_density(x: f32, mu: f32, sigma: f32) -> f32 {
    let z = (x - mu) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * std::f32::consts::PI).sqrt())
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

// ============================================================================
// Builders
// ============================================================================

/// `2 * half_width + 1` Gaussian weights at integer offsets, summing to 1
///
/// # Errors
///
/// Rejects `sigma <= 0` and windows wider than [`MAX_BLUR_WIDTH`].
pub fn build_blur_weights(half_width: usize, sigma: f32) -> Result<Vec<f32>> {
    if sigma.is_nan() || sigma <= 0.0 {
        engine_bail!("lightlab::KernelBuilder", "Blur sigma must be positive, got {}", sigma);
    }
    if 2 * half_width > MAX_BLUR_WIDTH {
        engine_bail!("lightlab::KernelBuilder",
            "Blur half width {} exceeds the maximum of {}", half_width, MAX_BLUR_WIDTH / 2);
    }

    let width = 2 * half_width + 1;
    let mut weights = vec![0.0f32; width];
    for i in 0..=half_width {
        let offset = (half_width - i) as f32;
        let weight = normal_density(offset, 0.0, sigma);
        weights[i] = weight;
        weights[width - 1 - i] = weight;
    }

    let total: f32 = weights.iter().sum();
    for weight in &mut weights {
        *weight /= total;
    }
    Ok(weights)
}

/// `count` hemisphere samples (z >= 0) scaled toward the origin
///
/// Each sample is a random direction scaled by a random length, then by
/// `lerp(0.1, 1.0, t^2)` with `t = i / count`.
pub fn build_ssao_kernel<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let direction = Vec3::new(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(0.0..=1.0),
            )
            .try_normalize()
            .unwrap_or(Vec3::Z);
            let length: f32 = rng.gen_range(0.0..=1.0);
            let t = i as f32 / count as f32;
            direction * length * lerp(0.1, 1.0, t * t)
        })
        .collect()
}

/// `size * size` unit vectors in the XY plane, row major
pub fn build_noise_tile<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<Vec3> {
    (0..size * size)
        .map(|_| {
            Vec3::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0), 0.0)
                .try_normalize()
                .unwrap_or(Vec3::X)
        })
        .collect()
}

// ============================================================================
// KernelData
// ============================================================================

/// Kernels consumed by the blur and SSAO passes
#[derive(Debug, Clone, PartialEq)]
pub struct KernelData {
    blur_half_width: usize,
    blur_sigma: f32,
    blur_weights: Vec<f32>,
    ssao_kernel: Vec<Vec3>,
    noise_size: usize,
    noise_tile: Vec<Vec3>,
}

impl KernelData {
    /// Build every kernel from `config`
    pub fn build<R: Rng + ?Sized>(config: &EngineConfig, rng: &mut R) -> Result<Self> {
        let blur_weights = build_blur_weights(config.blur_half_width, config.blur_sigma)?;
        let ssao_kernel = build_ssao_kernel(config.ssao_kernel_size, rng);
        let noise_tile = build_noise_tile(config.noise_size, rng);
        crate::engine_debug!("lightlab::KernelBuilder",
            "Built {} blur weights, {} SSAO samples, {}x{} noise tile",
            blur_weights.len(), ssao_kernel.len(), config.noise_size, config.noise_size);
        Ok(Self {
            blur_half_width: config.blur_half_width,
            blur_sigma: config.blur_sigma,
            blur_weights,
            ssao_kernel,
            noise_size: config.noise_size,
            noise_tile,
        })
    }

    /// Recompute the blur weights for a new half width
    ///
    /// The SSAO kernel and noise tile are left untouched.
    pub fn rebuild_blur(&mut self, half_width: usize) -> Result<()> {
        if half_width == self.blur_half_width {
            return Ok(());
        }
        self.blur_weights = build_blur_weights(half_width, self.blur_sigma)?;
        self.blur_half_width = half_width;
        Ok(())
    }

    // ===== GETTERS =====

    pub fn blur_half_width(&self) -> usize {
        self.blur_half_width
    }

    /// Window width passed to the blur program
    pub fn blur_width(&self) -> usize {
        2 * self.blur_half_width
    }

    pub fn blur_weights(&self) -> &[f32] {
        &self.blur_weights
    }

    /// Weights padded to the fixed size of the `Kernel` uniform block
    pub fn blur_block(&self) -> Vec<f32> {
        let mut block = self.blur_weights.clone();
        block.resize(MAX_BLUR_WIDTH + 1, 0.0);
        block
    }

    pub fn ssao_kernel(&self) -> &[Vec3] {
        &self.ssao_kernel
    }

    pub fn noise_size(&self) -> usize {
        self.noise_size
    }

    pub fn noise_tile(&self) -> &[Vec3] {
        &self.noise_tile
    }

    /// Noise tile as tightly packed RGB32F texels
    pub fn noise_texels(&self) -> Vec<f32> {
        self.noise_tile.iter().flat_map(|v| v.to_array()).collect()
    }
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
