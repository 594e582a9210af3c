/// Central model variants, the asset source and ground material sets
///
/// Decoding files is not the engine's job: meshes and images come from an
/// [`AssetSource`] supplied by the host. Spheres and the ground are
/// generated in-engine.

use glam::{Mat4, Vec3};
use crate::config::EngineConfig;
use crate::device::{GraphicsDevice, TextureFormat};
use crate::error::Result;
use crate::render::drawable::{Drawable, Material};
use crate::render::geometry::MeshData;

/// Mesh asset name of the teapot
pub const TEAPOT_ASSET: &str = "teapot";

/// Closed set of central models
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Teapot,
    Sphere,
    Ground,
    /// Mesh file resolved by the asset source
    ImportedMesh(String),
}

impl ModelKind {
    pub fn label(&self) -> &str {
        match self {
            ModelKind::Teapot => "teapot",
            ModelKind::Sphere => "sphere",
            ModelKind::Ground => "ground",
            ModelKind::ImportedMesh(name) => name,
        }
    }

    /// Mesh to request from the asset source, `None` for generated shapes
    pub fn asset_name(&self) -> Option<&str> {
        match self {
            ModelKind::Teapot => Some(TEAPOT_ASSET),
            ModelKind::ImportedMesh(name) => Some(name.as_str()),
            ModelKind::Sphere | ModelKind::Ground => None,
        }
    }
}

// ===== ASSETS =====

/// Decoded image ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub texels: Vec<u8>,
}

/// Host-provided loader for meshes and images
///
/// # Errors
///
/// Implementations return `Error::AssetNotFound` for unknown names.
pub trait AssetSource {
    fn load_mesh(&mut self, name: &str) -> Result<MeshData>;

    fn load_image(&mut self, name: &str) -> Result<ImageData>;
}

/// Ground texture sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundMaterial {
    #[default]
    Brick,
    Wooden,
}

impl GroundMaterial {
    pub const ALL: [GroundMaterial; 2] = [GroundMaterial::Brick, GroundMaterial::Wooden];

    /// Diffuse, normal and height map image names
    pub fn image_names(self) -> [&'static str; 3] {
        match self {
            GroundMaterial::Brick => [
                "images/bricks2.jpg",
                "images/bricks2_normal.jpg",
                "images/bricks2_disp.jpg",
            ],
            GroundMaterial::Wooden => [
                "images/wood.png",
                "images/toy_box_normal.png",
                "images/toy_box_disp.png",
            ],
        }
    }
}

// ===== CENTRAL MODEL =====

/// Material of the central model
pub const CENTRAL_MATERIAL: Material = Material::new(Vec3::new(0.5, 0.5, 0.7), Vec3::new(0.5, 0.5, 0.5), 120.0);

/// The model at the center of the scene, normalized to a size of 3
#[derive(Debug)]
pub struct CentralModel {
    kind: ModelKind,
    drawable: Drawable,
    transform: Mat4,
}

impl CentralModel {
    /// Build the mesh for `kind` and upload it
    pub fn create(
        device: &mut dyn GraphicsDevice,
        kind: ModelKind,
        assets: &mut dyn AssetSource,
        config: &EngineConfig,
    ) -> Result<Self> {
        let data = match kind.asset_name() {
            Some(name) => assets.load_mesh(name)?,
            None if kind == ModelKind::Sphere => MeshData::sphere(config.sphere_slices),
            None => MeshData::ground(config.ground_radius, config.ground_segments),
        };
        let transform = normalization(&kind, &data);
        let drawable = Drawable::create(device, kind.label(), &data, CENTRAL_MATERIAL)?;
        crate::engine_info!("lightlab::CentralModel", "Central model is now '{}'", kind.label());
        Ok(Self { kind, drawable, transform })
    }

    pub fn kind(&self) -> &ModelKind {
        &self.kind
    }

    pub fn drawable(&self) -> &Drawable {
        &self.drawable
    }

    /// Model matrix bringing the mesh to the scene center
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        self.drawable.destroy(device);
    }
}

/// Scale to a size of 3 around the origin
///
/// Imported meshes are stored Y-up and get turned Z-up. The generated
/// sphere is mirrored so its seam faces away from the camera.
pub fn normalization(kind: &ModelKind, data: &MeshData) -> Mat4 {
    let size = data.size();
    let s = if size > 0.0 { 3.0 / size } else { 1.0 };
    let center = Mat4::from_scale(Vec3::splat(s)) * Mat4::from_translation(-data.center());
    match kind {
        ModelKind::Teapot | ModelKind::Ground => center,
        ModelKind::ImportedMesh(_) => {
            Mat4::from_rotation_z(180f32.to_radians()) * Mat4::from_rotation_x(90f32.to_radians()) * center
        }
        ModelKind::Sphere => {
            Mat4::from_rotation_x(180f32.to_radians()) * Mat4::from_scale(Vec3::new(-s, s, s))
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
