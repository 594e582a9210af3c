/// CPU-side mesh data and the procedural shapes built in-engine
///
/// Teapot and imported meshes come from the asset source; spheres, the
/// ground disk and the full-screen quad are generated here.

use std::f32::consts::PI;
use glam::Vec3;
use crate::device::Vertex;
use crate::error::Result;
use crate::engine_bail;

/// Triangle list with the shared vertex layout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Check that the mesh is a non-empty triangle list with in-range indices
    pub fn validate(&self, label: &str) -> Result<()> {
        if self.vertices.is_empty() || self.indices.is_empty() {
            engine_bail!("lightlab::MeshData", "Mesh '{}' is empty", label);
        }
        if self.indices.len() % 3 != 0 {
            engine_bail!("lightlab::MeshData",
                "Mesh '{}' has {} indices, not a triangle list", label, self.indices.len());
        }
        let vertex_count = self.vertices.len() as u32;
        if let Some(bad) = self.indices.iter().find(|&&i| i >= vertex_count) {
            engine_bail!("lightlab::MeshData",
                "Mesh '{}' references vertex {} of {}", label, bad, vertex_count);
        }
        Ok(())
    }

    /// Axis-aligned bounds (min, max); zero for an empty mesh
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let mut iter = self.vertices.iter().map(|v| Vec3::from(v.position));
        let Some(first) = iter.next() else {
            return (Vec3::ZERO, Vec3::ZERO);
        };
        iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)))
    }

    /// Center of the bounds
    pub fn center(&self) -> Vec3 {
        let (min, max) = self.bounds();
        (min + max) * 0.5
    }

    /// Largest extent of the bounds
    pub fn size(&self) -> f32 {
        let (min, max) = self.bounds();
        (max - min).max_element()
    }

    // ===== PROCEDURAL SHAPES =====

    /// Unit sphere with `slices` segments around Z and `slices / 2` stacks
    pub fn sphere(slices: u32) -> Self {
        let slices = slices.max(3);
        let stacks = (slices / 2).max(2);
        let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);

        for j in 0..=stacks {
            let v = j as f32 / stacks as f32;
            let theta = v * PI;
            for i in 0..=slices {
                let u = i as f32 / slices as f32;
                let phi = u * 2.0 * PI;
                let normal = [theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()];
                let tangent = [-phi.sin(), phi.cos(), 0.0];
                vertices.push(Vertex::new(normal, normal, [u, v], tangent));
            }
        }

        let row = slices + 1;
        let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
        for j in 0..stacks {
            for i in 0..slices {
                let a = j * row + i;
                let b = a + row;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
        Self { vertices, indices }
    }

    /// Flat square ground of half-size `radius` in the Z = 0 plane,
    /// `segments` quads per side, texture repeating every 10 units
    pub fn ground(radius: f32, segments: u32) -> Self {
        let segments = segments.max(1);
        let mut vertices = Vec::with_capacity(((segments + 1) * (segments + 1)) as usize);
        for j in 0..=segments {
            let y = -radius + 2.0 * radius * j as f32 / segments as f32;
            for i in 0..=segments {
                let x = -radius + 2.0 * radius * i as f32 / segments as f32;
                vertices.push(Vertex::new([x, y, 0.0], [0.0, 0.0, 1.0], [x / 10.0, y / 10.0], [1.0, 0.0, 0.0]));
            }
        }

        let row = segments + 1;
        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for j in 0..segments {
            for i in 0..segments {
                let a = j * row + i;
                let b = a + row;
                indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
            }
        }
        Self { vertices, indices }
    }

    /// Two triangles covering normalized device coordinates
    pub fn full_screen_quad() -> Self {
        let normal = [0.0, 0.0, 1.0];
        let tangent = [1.0, 0.0, 0.0];
        Self {
            vertices: vec![
                Vertex::new([-1.0, -1.0, 0.0], normal, [0.0, 0.0], tangent),
                Vertex::new([1.0, -1.0, 0.0], normal, [1.0, 0.0], tangent),
                Vertex::new([1.0, 1.0, 0.0], normal, [1.0, 1.0], tangent),
                Vertex::new([-1.0, 1.0, 0.0], normal, [0.0, 1.0], tangent),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
