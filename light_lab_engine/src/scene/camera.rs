/// Orbit camera and the shadow-casting light
///
/// Both are driven by angles in degrees. The camera orbits the origin at
/// `zoom` distance; the light sits on a sphere of radius `distance` and
/// always looks at the origin.

use glam::{Mat4, Vec3, Vec4};

/// Camera orbiting the scene origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Rotation around the world Z axis, degrees
    pub spin: f32,
    /// Elevation, degrees (0 looks along the ground)
    pub tilt: f32,
    pub zoom: f32,
    pub tx: f32,
    pub ty: f32,
    /// Vertical half extent of the view volume at unit distance
    pub ry: f32,
    pub front: f32,
    pub back: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            spin: -90.0,
            tilt: 0.0,
            zoom: 150.0,
            tx: 0.0,
            ty: 0.0,
            ry: 0.2,
            front: 0.1,
            back: 1000.0,
        }
    }
}

impl OrbitCamera {
    /// `T(tx, ty, -zoom) * Rx(tilt - 90) * Rz(spin)`
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.tx, self.ty, -self.zoom))
            * Mat4::from_rotation_x((self.tilt - 90.0).to_radians())
            * Mat4::from_rotation_z(self.spin.to_radians())
    }

    /// Perspective projection for the given viewport aspect ratio
    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        perspective(self.ry * aspect_ratio, self.ry, self.front, self.back)
    }

    pub fn orbit(&mut self, delta_spin: f32, delta_tilt: f32) {
        self.spin += delta_spin;
        self.tilt += delta_tilt;
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.tx += dx;
        self.ty += dy;
    }
}

/// Light that casts the exponential shadow map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowLight {
    pub spin: f32,
    pub tilt: f32,
    pub distance: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ShadowLight {
    fn default() -> Self {
        Self {
            spin: -90.0,
            tilt: -60.0,
            distance: 60.0,
            near: 1.0,
            far: 1000.0,
        }
    }
}

impl ShadowLight {
    /// World position from the spherical parameters
    pub fn position(&self) -> Vec3 {
        let (spin, tilt) = (self.spin.to_radians(), self.tilt.to_radians());
        self.distance * Vec3::new(spin.cos() * tilt.sin(), spin.sin() * tilt.sin(), tilt.cos())
    }

    /// Look-at from the light toward the origin, Z up
    ///
    /// Falls back to Y up when the light sits on the Z axis.
    pub fn view(&self) -> Mat4 {
        let eye = self.position();
        let up = if eye.normalize_or_zero().cross(Vec3::Z).length_squared() < 1e-8 {
            Vec3::Y
        } else {
            Vec3::Z
        };
        Mat4::look_at_rh(eye, Vec3::ZERO, up)
    }

    /// `frustum(-1, 1, -1, 1, near, far)`
    pub fn projection(&self) -> Mat4 {
        frustum(-1.0, 1.0, -1.0, 1.0, self.near, self.far)
    }

    /// Maps world positions to shadow map texture coordinates and depth
    pub fn shadow_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::splat(0.5))
            * Mat4::from_scale(Vec3::splat(0.5))
            * self.projection()
            * self.view()
    }

    pub fn orbit(&mut self, delta_spin: f32, delta_tilt: f32) {
        self.spin += delta_spin;
        self.tilt += delta_tilt;
    }
}

// ===== PROJECTIONS =====

/// Symmetric perspective with half extents `rx`, `ry` at unit distance
pub fn perspective(rx: f32, ry: f32, front: f32, back: f32) -> Mat4 {
    let depth = back - front;
    Mat4::from_cols(
        Vec4::new(1.0 / rx, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 1.0 / ry, 0.0, 0.0),
        Vec4::new(0.0, 0.0, -(back + front) / depth, -1.0),
        Vec4::new(0.0, 0.0, -2.0 * front * back / depth, 0.0),
    )
}

/// OpenGL-style off-axis frustum
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let width = right - left;
    let height = top - bottom;
    let depth = far - near;
    Mat4::from_cols(
        Vec4::new(2.0 * near / width, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / height, 0.0, 0.0),
        Vec4::new((right + left) / width, (top + bottom) / height, -(far + near) / depth, -1.0),
        Vec4::new(0.0, 0.0, -2.0 * far * near / depth, 0.0),
    )
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
