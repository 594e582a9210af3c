/// Scene module - camera, lights, central model and per-frame parameters

pub mod camera;
pub mod light;
pub mod model;
pub mod scene_state;
pub mod animation;

pub use camera::{OrbitCamera, ShadowLight};
pub use light::{Attenuation, LightRecord, LightSet, ATTENUATION_TABLE, attenuation_for_radius};
pub use model::{AssetSource, CentralModel, GroundMaterial, ImageData, ModelKind};
pub use scene_state::*;
pub use animation::AnimationClock;

// In-memory asset source for tests
#[cfg(test)]
pub mod test_assets;
