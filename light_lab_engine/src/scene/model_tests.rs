use glam::Vec3;
use super::*;
use crate::device::mock_graphics_device::MockGraphicsDevice;
use crate::error::Error;
use crate::scene::test_assets::TestAssets;

// ============================================================================
// ModelKind
// ============================================================================

#[test]
fn test_asset_names() {
    assert_eq!(ModelKind::Teapot.asset_name(), Some("teapot"));
    assert_eq!(ModelKind::ImportedMesh("bunny.ply".into()).asset_name(), Some("bunny.ply"));
    assert_eq!(ModelKind::Sphere.asset_name(), None);
    assert_eq!(ModelKind::Ground.asset_name(), None);
}

#[test]
fn test_ground_material_image_sets() {
    assert_eq!(GroundMaterial::default(), GroundMaterial::Brick);
    assert_eq!(GroundMaterial::Brick.image_names()[2], "images/bricks2_disp.jpg");
    assert_eq!(GroundMaterial::Wooden.image_names()[0], "images/wood.png");
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_teapot_normalized_to_size_three_at_origin() {
    let data = TestAssets::box_mesh();
    let transform = normalization(&ModelKind::Teapot, &data);

    assert!(transform.transform_point3(data.center()).abs_diff_eq(Vec3::ZERO, 1e-5));
    let (min, max) = data.bounds();
    let extent = transform.transform_point3(max) - transform.transform_point3(min);
    assert!((extent.max_element() - 3.0).abs() < 1e-5);
}

#[test]
fn test_imported_mesh_turned_z_up() {
    let data = TestAssets::box_mesh();
    let transform = normalization(&ModelKind::ImportedMesh("bunny.ply".into()), &data);
    let up = transform.transform_vector3(Vec3::Y).normalize();
    assert!(up.abs_diff_eq(Vec3::Z, 1e-5), "{:?}", up);
}

// ============================================================================
// CentralModel
// ============================================================================

#[test]
fn test_create_teapot_loads_asset() {
    let mut device = MockGraphicsDevice::new();
    let mut assets = TestAssets::new();
    let model = CentralModel::create(&mut device, ModelKind::Teapot, &mut assets, &EngineConfig::default()).unwrap();

    assert_eq!(assets.mesh_loads, vec!["teapot".to_string()]);
    assert_eq!(model.drawable().label(), "teapot");
    assert_eq!(device.mesh_count(), 1);
}

#[test]
fn test_create_sphere_is_generated() {
    let mut device = MockGraphicsDevice::new();
    let mut assets = TestAssets::new();
    let model = CentralModel::create(&mut device, ModelKind::Sphere, &mut assets, &EngineConfig::default()).unwrap();

    assert!(assets.mesh_loads.is_empty());
    assert_eq!(model.kind(), &ModelKind::Sphere);
    model.destroy(&mut device);
    assert_eq!(device.mesh_count(), 0);
}

#[test]
fn test_missing_asset_is_reported() {
    let mut device = MockGraphicsDevice::new();
    let mut assets = TestAssets::new();
    assets.mark_missing("dragon.ply");
    let result = CentralModel::create(
        &mut device,
        ModelKind::ImportedMesh("dragon.ply".into()),
        &mut assets,
        &EngineConfig::default(),
    );
    assert!(matches!(result, Err(Error::AssetNotFound(_))));
    assert_eq!(device.mesh_count(), 0);
}
