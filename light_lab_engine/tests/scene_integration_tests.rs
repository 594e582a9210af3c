//! Integration tests for scene parameters, lights and kernels
//!
//! These tests exercise the host-facing API without a graphics device.
//!
//! Run with: cargo test --test scene_integration_tests

use light_lab_engine::glam::{Vec3, Vec4};
use light_lab_engine::lightlab::{EngineConfig, Error};
use light_lab_engine::lightlab::render::{KernelData, MAX_BLUR_WIDTH};
use light_lab_engine::lightlab::scene::{
    attenuation_for_radius, Attenuation, CommandQueue, GroundMaterial, LightSet, ParallaxVariant,
    SceneCommand, SceneState, ShadowDebugMode, Technique, LAYER_COUNT_RANGE,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// COMMAND QUEUE
// ============================================================================

#[test]
fn test_integration_queue_applies_scene_commands_in_order() {
    let mut scene = SceneState::default();
    let mut queue = CommandQueue::new();
    queue.push(SceneCommand::SetTechnique(Technique::ForwardParallax));
    queue.push(SceneCommand::SetParallaxVariant(ParallaxVariant::Occlusion));
    queue.push(SceneCommand::SetLayerCount(500));
    queue.push(SceneCommand::SetGroundMaterial(GroundMaterial::Wooden));
    queue.push(SceneCommand::SetShadowDebug(ShadowDebugMode::Visibility));
    queue.push(SceneCommand::SelectLight(2));

    let deferred: Vec<SceneCommand> = queue.drain().filter(|c| !scene.apply(c)).collect();

    assert!(queue.is_empty());
    assert_eq!(deferred, vec![SceneCommand::SelectLight(2)]);
    assert_eq!(scene.technique, Technique::ForwardParallax);
    assert!(scene.parallax.variant.flags().occlusion);
    assert_eq!(scene.parallax.layer_count, *LAYER_COUNT_RANGE.end());
    assert_eq!(scene.ground_material, GroundMaterial::Wooden);
    assert_eq!(scene.esm.debug.as_uniform(), 8);
}

#[test]
fn test_integration_light_orbit_moves_shadow_frame() {
    let mut scene = SceneState::default();
    let before = scene.light.position();
    scene.apply(&SceneCommand::OrbitLight { spin: 90.0, tilt: 0.0 });
    scene.apply(&SceneCommand::LightDistance(20.0));

    let after = scene.light.position();
    assert_ne!(before, after);
    assert!((after.length() - 80.0).abs() < 1e-3);

    let center = scene.light.shadow_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    let center = center / center.w;
    assert!((center.x - 0.5).abs() < 1e-4 && (center.y - 0.5).abs() < 1e-4);
}

// ============================================================================
// LIGHTS
// ============================================================================

#[test]
fn test_integration_light_editing_tracks_attenuation() {
    let mut lights = LightSet::randomized(8, true, &mut StdRng::seed_from_u64(11));
    lights.select(5).unwrap();
    lights.set_radius(120.0);

    let light = lights.selected().unwrap();
    assert_eq!(light.color, Vec3::ONE);
    assert_eq!(light.attenuation(), attenuation_for_radius(100.0));
    assert_eq!(light.attenuation(), Attenuation::new(0.045, 0.0075));
}

// ============================================================================
// CONFIGURATION AND KERNELS
// ============================================================================

#[test]
fn test_integration_config_rejects_unaligned_shadow_map() {
    let config = EngineConfig { shadow_map_size: 1000, ..EngineConfig::default() };
    assert!(matches!(config.validate(), Err(Error::InitializationFailed(_))));
    assert!(EngineConfig::default().validate().is_ok());
}

#[test]
fn test_integration_kernels_from_default_config() {
    let config = EngineConfig::default();
    let kernels = KernelData::build(&config, &mut StdRng::seed_from_u64(5)).unwrap();

    let weights = kernels.blur_weights();
    assert_eq!(weights.len(), 2 * config.blur_half_width + 1);
    assert!((weights.iter().sum::<f32>() - 1.0).abs() < 1e-4);
    assert_eq!(weights.first(), weights.last());
    assert_eq!(kernels.blur_block().len(), MAX_BLUR_WIDTH + 1);

    assert_eq!(kernels.ssao_kernel().len(), 64);
    assert!(kernels.ssao_kernel().iter().all(|s| s.z >= 0.0 && s.length() <= 1.0 + 1e-5));
    assert_eq!(kernels.noise_tile().len(), 16);
    assert!(kernels.noise_tile().iter().all(|n| n.z == 0.0));
}

#[test]
fn test_integration_same_seed_same_kernels() {
    let config = EngineConfig::default();
    let a = KernelData::build(&config, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = KernelData::build(&config, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}
