use rand::SeedableRng;
use rand::rngs::StdRng;
use super::*;
use crate::device::mock_graphics_device::MockGraphicsDevice;
use crate::error::Error;
use crate::scene::test_assets::TestAssets;

fn kernels() -> KernelData {
    KernelData::build(&EngineConfig::default(), &mut StdRng::seed_from_u64(5)).unwrap()
}

// ============================================================================
// Programs
// ============================================================================

#[test]
fn test_program_set_indexes_by_stage() {
    let mut device = MockGraphicsDevice::new();
    let programs = ProgramSet::create(&mut device).unwrap();
    assert_eq!(device.program_count(), ShadingStage::ALL.len());
    for stage in ShadingStage::ALL {
        assert_eq!(programs.get(stage).stage(), stage);
    }
    programs.destroy(&mut device);
    assert_eq!(device.program_count(), 0);
}

#[test]
fn test_link_failure_releases_linked_programs() {
    let mut device = MockGraphicsDevice::new();
    device.fail_link("lightingSSAO");
    let error = ProgramSet::create(&mut device).err().unwrap();
    assert!(matches!(error, Error::ProgramLinkFailed { ref program, .. } if program == "lightingSSAO"));
    assert_eq!(device.program_count(), 0);
}

// ============================================================================
// Static textures
// ============================================================================

#[test]
fn test_static_textures_are_registered_static() {
    let mut device = MockGraphicsDevice::new();
    let mut registry = TextureRegistry::new();
    let mut assets = TestAssets::new();
    let statics = StaticTextures::create(&mut device, &kernels(), &mut assets, &mut registry).unwrap();

    assert_eq!(device.texture_count(), 7);
    assert!(registry.is_static(statics.noise()));
    assert_eq!(device.written_by(statics.noise()), Some("upload"));
    let wooden = statics.ground(GroundMaterial::Wooden);
    assert_eq!(registry.label(wooden[0]), "images/wood.png");
    assert_ne!(statics.ground(GroundMaterial::Brick), wooden);
    assert_eq!(assets.image_loads.len(), 6);

    statics.destroy(&mut device, &mut registry);
    assert_eq!(device.texture_count(), 0);
    assert!(registry.is_empty());
}

#[test]
fn test_noise_texture_is_repeat_rgb32f() {
    let mut device = MockGraphicsDevice::new();
    let statics = StaticTextures::create(&mut device, &kernels(), &mut TestAssets::new(), &mut TextureRegistry::new()).unwrap();
    let noise = device.texture(statics.noise()).unwrap();
    assert_eq!(noise.info.format, TextureFormat::R32G32B32_SFLOAT);
    assert_eq!((noise.info.width, noise.info.height), (4, 4));
    assert_eq!(noise.uploaded_bytes.as_ref().map(Vec::len), Some(4 * 4 * 12));
}

#[test]
fn test_missing_ground_image_releases_uploads() {
    let mut device = MockGraphicsDevice::new();
    let mut assets = TestAssets::new();
    assets.mark_missing("images/toy_box_disp.png");
    let result = StaticTextures::create(&mut device, &kernels(), &mut assets, &mut TextureRegistry::new());
    assert_eq!(result.err(), Some(Error::AssetNotFound("images/toy_box_disp.png".to_string())));
    assert_eq!(device.texture_count(), 0);
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_scene_geometry_uploads_four_meshes() {
    let mut device = MockGraphicsDevice::new();
    let geometry = SceneGeometry::create(&mut device, &EngineConfig::default()).unwrap();
    let mut labels = device.mesh_labels();
    labels.sort();
    assert_eq!(labels, vec!["ground", "light_sphere", "quad", "sphere"]);
    assert_eq!(geometry.quad.index_count(), 6);

    geometry.destroy(&mut device);
    assert_eq!(device.mesh_count(), 0);
}
