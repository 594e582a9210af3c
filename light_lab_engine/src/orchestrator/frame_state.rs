/// Per-frame transient state derived from the scene parameters

use glam::{Mat4, Vec3};
use crate::device::Viewport;
use crate::scene::SceneState;

/// Matrices and positions shared by every pass of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub viewport: Viewport,
    pub view: Mat4,
    pub projection: Mat4,
    pub view_inverse: Mat4,
    pub light_position: Vec3,
    pub light_view: Mat4,
    pub light_projection: Mat4,
    /// World to shadow map texture space
    pub shadow_matrix: Mat4,
    /// Rotation of the sphere ring
    pub sphere_model: Mat4,
    /// Sun sphere at the light position
    pub sun_model: Mat4,
}

impl FrameState {
    pub fn compute(scene: &SceneState, viewport: Viewport, phase_degrees: f32) -> Self {
        let view = scene.camera.view();
        let light_position = scene.light.position();
        Self {
            viewport,
            view,
            projection: scene.camera.projection(viewport.aspect_ratio()),
            view_inverse: view.inverse(),
            light_position,
            light_view: scene.light.view(),
            light_projection: scene.light.projection(),
            shadow_matrix: scene.light.shadow_matrix(),
            sphere_model: Mat4::from_rotation_z(phase_degrees.to_radians()),
            sun_model: Mat4::from_translation(light_position),
        }
    }

    pub fn width(&self) -> u32 {
        self.viewport.width
    }

    pub fn height(&self) -> u32 {
        self.viewport.height
    }
}

#[cfg(test)]
#[path = "frame_state_tests.rs"]
mod tests;
