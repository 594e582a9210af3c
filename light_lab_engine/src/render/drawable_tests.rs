/// Tests for Drawable and Material

use super::*;
use crate::device::mock_graphics_device::MockGraphicsDevice;
use crate::device::{UniformValue, Vertex};
use crate::render::gpu_program::{GpuProgram, ShadingStage};

#[test]
fn test_create_uploads_mesh() {
    let mut device = MockGraphicsDevice::new();
    let sphere = Drawable::create(&mut device, "sphere", &MeshData::sphere(8), Material::default()).unwrap();
    assert_eq!(sphere.vertex_count(), 9 * 5);
    assert_eq!(sphere.index_count(), 8 * 4 * 6);
    assert_eq!(device.mesh_labels(), vec!["sphere"]);
}

#[test]
fn test_create_rejects_bad_indices() {
    let mut device = MockGraphicsDevice::new();
    let data = MeshData::new(vec![Vertex::default(); 3], vec![0, 1, 5]);
    assert!(Drawable::create(&mut device, "bad", &data, Material::default()).is_err());
    assert_eq!(device.mesh_count(), 0);
}

#[test]
fn test_destroy_releases_mesh() {
    let mut device = MockGraphicsDevice::new();
    let quad = Drawable::create(&mut device, "quad", &MeshData::full_screen_quad(), Material::default()).unwrap();
    quad.destroy(&mut device);
    assert_eq!(device.mesh_count(), 0);
}

#[test]
fn test_material_apply_sets_uniforms() {
    let mut device = MockGraphicsDevice::new();
    let program = GpuProgram::create(&mut device, ShadingStage::DeferredGBuffer).unwrap();
    let material = Material::new(Vec3::new(0.2, 0.4, 0.6), Vec3::ONE, 32.0);
    {
        let mut active = program.activate(&mut device).unwrap();
        material.apply(&mut active);
    }
    assert_eq!(
        device.uniform_value("deferredGBuffer", "diffuse"),
        Some(UniformValue::Vec3(Vec3::new(0.2, 0.4, 0.6)))
    );
    assert_eq!(device.uniform_value("deferredGBuffer", "shininess"), Some(UniformValue::Float(32.0)));
}
