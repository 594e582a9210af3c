/// Local point lights of the deferred technique
///
/// Each light carries the attenuation pair derived from its radius. The
/// lookup table is keyed by light range; a radius maps to the entry with
/// the largest key not above it (the first entry below the table, the
/// last one above it).

use glam::{Mat4, Vec2, Vec3};
use rand::Rng;
use crate::error::Result;
use crate::engine_bail;

/// Linear and quadratic falloff terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    pub const fn new(linear: f32, quadratic: f32) -> Self {
        Self { linear, quadratic }
    }

    /// Packed as the `Attenuation` uniform
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.linear, self.quadratic)
    }
}

/// Range thresholds and their attenuation, ascending
pub const ATTENUATION_TABLE: [(u32, Attenuation); 12] = [
    (7, Attenuation::new(0.7, 1.8)),
    (13, Attenuation::new(0.35, 0.44)),
    (20, Attenuation::new(0.22, 0.20)),
    (32, Attenuation::new(0.14, 0.07)),
    (50, Attenuation::new(0.09, 0.032)),
    (65, Attenuation::new(0.07, 0.017)),
    (100, Attenuation::new(0.045, 0.0075)),
    (160, Attenuation::new(0.027, 0.0028)),
    (200, Attenuation::new(0.022, 0.0019)),
    (325, Attenuation::new(0.014, 0.0007)),
    (600, Attenuation::new(0.007, 0.0002)),
    (3250, Attenuation::new(0.0014, 0.00007)),
];

/// Attenuation for a light range, nearest floor key
pub fn attenuation_for_radius(radius: f32) -> Attenuation {
    ATTENUATION_TABLE
        .iter()
        .rev()
        .find(|(key, _)| *key as f32 <= radius)
        .map_or(ATTENUATION_TABLE[0].1, |(_, attenuation)| *attenuation)
}

// ===== LIGHT RECORD =====

/// Radius given to randomized lights
pub const DEFAULT_LIGHT_RADIUS: f32 = 13.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRecord {
    pub position: Vec3,
    pub color: Vec3,
    radius: f32,
    attenuation: Attenuation,
}

impl LightRecord {
    pub fn new(position: Vec3, color: Vec3, radius: f32) -> Self {
        Self {
            position,
            color,
            radius,
            attenuation: attenuation_for_radius(radius),
        }
    }

    /// Light above the ground at a random spot, random or white color
    pub fn randomized<R: Rng + ?Sized>(rng: &mut R, all_white: bool) -> Self {
        let position = Vec3::new(
            rng.gen_range(-50.0..=50.0),
            rng.gen_range(-50.0..=50.0),
            rng.gen_range(1.0..=10.0),
        );
        let color = if all_white {
            Vec3::ONE
        } else {
            Vec3::new(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0))
        };
        Self::new(position, color, DEFAULT_LIGHT_RADIUS)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn attenuation(&self) -> Attenuation {
        self.attenuation
    }

    /// Change the range and re-derive the attenuation
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.attenuation = attenuation_for_radius(radius);
    }

    /// Proxy sphere transform, `T(position) * S(radius)`
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(Vec3::splat(self.radius))
    }
}

// ===== LIGHT SET =====

/// Local lights with one selected for editing
#[derive(Debug, Clone, Default)]
pub struct LightSet {
    lights: Vec<LightRecord>,
    selected: usize,
}

impl LightSet {
    pub fn new(lights: Vec<LightRecord>) -> Self {
        Self { lights, selected: 0 }
    }

    pub fn randomized<R: Rng + ?Sized>(count: usize, all_white: bool, rng: &mut R) -> Self {
        Self::new((0..count).map(|_| LightRecord::randomized(rng, all_white)).collect())
    }

    /// Replace every light with a new random one, keeping the count
    pub fn reroll<R: Rng + ?Sized>(&mut self, all_white: bool, rng: &mut R) {
        for light in &mut self.lights {
            *light = LightRecord::randomized(rng, all_white);
        }
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LightRecord> {
        self.lights.iter()
    }

    pub fn get(&self, index: usize) -> Option<&LightRecord> {
        self.lights.get(index)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&LightRecord> {
        self.lights.get(self.selected)
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.lights.len() {
            engine_bail!("lightlab::LightSet", "Light {} out of range ({} lights)", index, self.lights.len());
        }
        self.selected = index;
        Ok(())
    }

    // ===== EDITING (selected light) =====

    pub fn set_color(&mut self, color: Vec3) {
        if let Some(light) = self.lights.get_mut(self.selected) {
            light.color = color;
        }
    }

    pub fn translate(&mut self, delta: Vec3) {
        if let Some(light) = self.lights.get_mut(self.selected) {
            light.position += delta;
        }
    }

    pub fn set_radius(&mut self, radius: f32) {
        if let Some(light) = self.lights.get_mut(self.selected) {
            light.set_radius(radius);
        }
    }
}

#[cfg(test)]
#[path = "light_tests.rs"]
mod tests;
