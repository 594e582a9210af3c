/// Programs, static textures and scene geometry created at initialization

use glam::Vec3;
use crate::config::EngineConfig;
use crate::device::{
    GraphicsDevice, TextureDesc, TextureFilter, TextureFormat, TextureId, TextureUsage, TextureWrap,
};
use crate::error::Result;
use crate::render::drawable::{Drawable, Material};
use crate::render::geometry::MeshData;
use crate::render::gpu_program::{GpuProgram, ShadingStage};
use crate::render::kernel::KernelData;
use crate::render_graph::TextureRegistry;
use crate::scene::{AssetSource, GroundMaterial};

// ============================================================================
// Programs
// ============================================================================

/// One linked program per shading stage
pub struct ProgramSet {
    programs: Vec<GpuProgram>,
}

impl ProgramSet {
    /// Link every stage, releasing the linked ones if one fails
    pub fn create(device: &mut dyn GraphicsDevice) -> Result<Self> {
        let mut programs = Vec::with_capacity(ShadingStage::ALL.len());
        for stage in ShadingStage::ALL {
            match GpuProgram::create(device, stage) {
                Ok(program) => programs.push(program),
                Err(e) => {
                    for program in programs {
                        program.destroy(device);
                    }
                    return Err(e);
                }
            }
        }
        Ok(Self { programs })
    }

    pub fn get(&self, stage: ShadingStage) -> &GpuProgram {
        &self.programs[stage as usize]
    }

    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        for program in self.programs {
            program.destroy(device);
        }
    }
}

// ============================================================================
// Static textures
// ============================================================================

/// Textures uploaded once and only sampled afterwards
#[derive(Debug)]
pub struct StaticTextures {
    noise: TextureId,
    /// Diffuse, normal and height maps per ground material
    ground: [[TextureId; 3]; 2],
}

impl StaticTextures {
    pub fn create(
        device: &mut dyn GraphicsDevice,
        kernels: &KernelData,
        assets: &mut dyn AssetSource,
        registry: &mut TextureRegistry,
    ) -> Result<Self> {
        let mut created: Vec<TextureId> = Vec::with_capacity(7);
        match Self::upload(device, kernels, assets, &mut created) {
            Ok(textures) => {
                registry.register_static(textures.noise, "ssao.noise");
                for (material, maps) in GroundMaterial::ALL.iter().zip(&textures.ground) {
                    for (name, texture) in material.image_names().iter().zip(maps) {
                        registry.register_static(*texture, *name);
                    }
                }
                Ok(textures)
            }
            Err(e) => {
                for texture in created {
                    device.destroy_texture(texture);
                }
                Err(e)
            }
        }
    }

    fn upload(
        device: &mut dyn GraphicsDevice,
        kernels: &KernelData,
        assets: &mut dyn AssetSource,
        created: &mut Vec<TextureId>,
    ) -> Result<Self> {
        let size = kernels.noise_size() as u32;
        let texels = kernels.noise_texels();
        let noise = device.create_texture(&TextureDesc {
            label: "ssao.noise",
            width: size,
            height: size,
            format: TextureFormat::R32G32B32_SFLOAT,
            usage: TextureUsage::SAMPLED,
            filter: TextureFilter::Nearest,
            wrap: TextureWrap::Repeat,
            data: Some(bytemuck::cast_slice(&texels)),
        })?;
        created.push(noise);

        let mut ground = [[noise; 3]; 2];
        for (material, maps) in GroundMaterial::ALL.iter().zip(ground.iter_mut()) {
            for (name, slot) in material.image_names().iter().zip(maps.iter_mut()) {
                let image = assets.load_image(name)?;
                let texture = device.create_texture(&TextureDesc {
                    label: name,
                    width: image.width,
                    height: image.height,
                    format: image.format,
                    usage: TextureUsage::SAMPLED,
                    filter: TextureFilter::Linear,
                    wrap: TextureWrap::Repeat,
                    data: Some(&image.texels),
                })?;
                created.push(texture);
                *slot = texture;
            }
        }
        Ok(Self { noise, ground })
    }

    pub fn noise(&self) -> TextureId {
        self.noise
    }

    /// Diffuse, normal and height maps of `material`
    pub fn ground(&self, material: GroundMaterial) -> [TextureId; 3] {
        self.ground[material as usize]
    }

    pub fn destroy(self, device: &mut dyn GraphicsDevice, registry: &mut TextureRegistry) {
        for texture in std::iter::once(self.noise).chain(self.ground.into_iter().flatten()) {
            registry.unregister(texture);
            device.destroy_texture(texture);
        }
    }
}

// ============================================================================
// Scene geometry
// ============================================================================

const SPHERE_MATERIAL: Material = Material::new(Vec3::new(0.8, 0.8, 0.8), Vec3::new(0.5, 0.5, 0.5), 64.0);
const GROUND_MATERIAL: Material = Material::new(Vec3::new(0.3, 0.2, 0.1), Vec3::new(0.1, 0.1, 0.1), 10.0);

/// Generated meshes shared by every technique
#[derive(Debug)]
pub struct SceneGeometry {
    pub sphere: Drawable,
    pub ground: Drawable,
    /// Unit sphere scaled by each local light's radius
    pub light_sphere: Drawable,
    pub quad: Drawable,
}

impl SceneGeometry {
    pub fn create(device: &mut dyn GraphicsDevice, config: &EngineConfig) -> Result<Self> {
        let mut built: Vec<Drawable> = Vec::with_capacity(4);
        let meshes = [
            ("sphere", MeshData::sphere(config.sphere_slices), SPHERE_MATERIAL),
            ("ground", MeshData::ground(config.ground_radius, config.ground_segments), GROUND_MATERIAL),
            ("light_sphere", MeshData::sphere(config.light_sphere_slices), Material::default()),
            ("quad", MeshData::full_screen_quad(), Material::default()),
        ];
        for (label, data, material) in &meshes {
            match Drawable::create(device, label, data, *material) {
                Ok(drawable) => built.push(drawable),
                Err(e) => {
                    for drawable in built {
                        drawable.destroy(device);
                    }
                    return Err(e);
                }
            }
        }

        let mut built = built.into_iter();
        match (built.next(), built.next(), built.next(), built.next()) {
            (Some(sphere), Some(ground), Some(light_sphere), Some(quad)) => {
                Ok(Self { sphere, ground, light_sphere, quad })
            }
            _ => Err(crate::engine_err!("lightlab::SceneGeometry", "Scene geometry is incomplete")),
        }
    }

    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        self.sphere.destroy(device);
        self.ground.destroy(device);
        self.light_sphere.destroy(device);
        self.quad.destroy(device);
    }
}

#[cfg(test)]
#[path = "resources_tests.rs"]
mod tests;
