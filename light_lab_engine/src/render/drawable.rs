/// GPU-resident meshes with their material

use glam::Vec3;
use crate::device::{GraphicsDevice, MeshId, MeshDesc};
use crate::error::Result;
use super::geometry::MeshData;
use super::gpu_program::ActiveProgram;

/// Phong material constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Material {
    pub const fn new(diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self { diffuse, specular, shininess }
    }

    /// Upload as `diffuse`, `specular` and `shininess`
    pub fn apply(&self, program: &mut ActiveProgram<'_>) {
        program.set_uniform("diffuse", self.diffuse);
        program.set_uniform("specular", self.specular);
        program.set_uniform("shininess", self.shininess);
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::new(Vec3::splat(0.5), Vec3::splat(1.0), 120.0)
    }
}

/// Static mesh uploaded to the device
#[derive(Debug)]
pub struct Drawable {
    label: String,
    mesh: MeshId,
    vertex_count: usize,
    index_count: usize,
    material: Material,
}

impl Drawable {
    /// Validate and upload `data`
    ///
    /// # Errors
    ///
    /// Rejects empty meshes and indices that reach past the vertex count.
    pub fn create(
        device: &mut dyn GraphicsDevice,
        label: &str,
        data: &MeshData,
        material: Material,
    ) -> Result<Self> {
        data.validate(label)?;
        let mesh = device.create_mesh(&MeshDesc {
            label,
            vertices: &data.vertices,
            indices: &data.indices,
        })?;
        crate::engine_debug!("lightlab::Drawable",
            "Uploaded '{}' ({} vertices, {} indices)", label, data.vertices.len(), data.indices.len());
        Ok(Self {
            label: label.to_string(),
            mesh,
            vertex_count: data.vertices.len(),
            index_count: data.indices.len(),
            material,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Release the device buffers
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.destroy_mesh(self.mesh);
    }
}

#[cfg(test)]
#[path = "drawable_tests.rs"]
mod tests;
