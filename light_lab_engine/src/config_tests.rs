//! Unit tests for EngineConfig

use super::*;

// ============================================================================
// DEFAULTS
// ============================================================================

#[test]
fn test_defaults() {
    let config = EngineConfig::default();
    assert_eq!((config.width, config.height), (1024, 768));
    assert_eq!(config.shadow_map_size, 1024);
    assert_eq!(config.blur_half_width, 32);
    assert_eq!(config.blur_sigma, 2.0);
    assert_eq!(config.max_blur_width, 100);
    assert_eq!(config.ssao_kernel_size, 64);
    assert_eq!(config.noise_size, 4);
    assert_eq!(config.light_count, 16);
    assert!(config.random_light_colors);
    assert_eq!(config.light_sphere_slices, 32);
    assert_eq!(config.ground_radius, 50.0);
    assert_eq!(config.animation_tick, Duration::from_millis(10));
    assert_eq!(config.animation_revolution, Duration::from_secs(120));
}

#[test]
fn test_defaults_are_valid() {
    assert!(EngineConfig::default().validate().is_ok());
}

#[test]
fn test_blur_groups_cover_shadow_map() {
    let config = EngineConfig::default();
    assert_eq!(config.blur_groups(), [8, 1024, 1]);
}

// ============================================================================
// VALIDATION
// ============================================================================

#[test]
fn test_zero_viewport_rejected() {
    let config = EngineConfig { height: 0, ..EngineConfig::default() };
    assert!(matches!(config.validate(), Err(Error::InitializationFailed(_))));
}

#[test]
fn test_shadow_map_must_fit_blur_groups() {
    let config = EngineConfig { shadow_map_size: 1000, ..EngineConfig::default() };
    assert!(config.validate().is_err());
    let config = EngineConfig { shadow_map_size: 512, ..EngineConfig::default() };
    assert!(config.validate().is_ok());
}

#[test]
fn test_blur_wider_than_maximum_rejected() {
    let config = EngineConfig { blur_half_width: 51, ..EngineConfig::default() };
    assert!(config.validate().is_err());
    let config = EngineConfig { blur_half_width: 50, ..EngineConfig::default() };
    assert!(config.validate().is_ok());
}

#[test]
fn test_max_blur_width_capped_by_kernel_block() {
    let config = EngineConfig { max_blur_width: 200, ..EngineConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn test_non_positive_sigma_rejected() {
    let config = EngineConfig { blur_sigma: 0.0, ..EngineConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn test_empty_kernels_rejected() {
    let config = EngineConfig { ssao_kernel_size: 0, ..EngineConfig::default() };
    assert!(config.validate().is_err());
    let config = EngineConfig { noise_size: 0, ..EngineConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_animation_tick_rejected() {
    let config = EngineConfig { animation_tick: Duration::ZERO, ..EngineConfig::default() };
    assert!(config.validate().is_err());
}
