/// Scene content drawn by the geometry, shadow and forward lighting passes

use std::f32::consts::PI;
use glam::{Mat4, Vec3};
use crate::render::gpu_program::ActiveProgram;
use crate::render::texture_units::GroundSlot;
use super::passes::PassContext;

/// Drawable group of the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneItem {
    Spheres,
    Sun,
    Ground,
    Model,
}

/// Geometry passes of the deferred and SSAO techniques
pub const GEOMETRY_ORDER: [SceneItem; 4] = [SceneItem::Spheres, SceneItem::Sun, SceneItem::Ground, SceneItem::Model];

/// Shadow map pass
pub const SHADOW_ORDER: [SceneItem; 4] = [SceneItem::Spheres, SceneItem::Ground, SceneItem::Model, SceneItem::Sun];

/// Forward lighting passes
pub const LIGHTING_ORDER: [SceneItem; 4] = [SceneItem::Sun, SceneItem::Spheres, SceneItem::Ground, SceneItem::Model];

/// Marker color the shaders render as emissive
const SUN_DIFFUSE: Vec3 = Vec3::new(100.0, 1.0, 1.0);

/// Draw `order`, skipping items the scene toggled off
///
/// `include_model` gates the central model on top of its presence.
pub fn draw_scene(active: &mut ActiveProgram<'_>, ctx: &PassContext<'_>, order: &[SceneItem], include_model: bool) {
    for item in order {
        match item {
            SceneItem::Spheres if ctx.scene.draw_spheres => draw_spheres(active, ctx),
            SceneItem::Sun => draw_sun(active, ctx),
            SceneItem::Ground if ctx.scene.draw_ground => draw_ground(active, ctx),
            SceneItem::Model if include_model => draw_model(active, ctx),
            _ => {}
        }
    }
}

fn normal_matrix(model: Mat4) -> Mat4 {
    model.inverse().transpose()
}

fn draw_model(active: &mut ActiveProgram<'_>, ctx: &PassContext<'_>) {
    let Some(model) = ctx.model else {
        return;
    };
    let transform = model.transform();
    active.set_uniform("ModelMatrix", transform);
    active.set_uniform("NormalMatrix", normal_matrix(transform));
    model.drawable().material().apply(active);
    active.set_uniform("isTextured", false);
    active.draw(model.drawable());
}

/// Ring of spheres colored by their angle around the ring
fn draw_spheres(active: &mut ActiveProgram<'_>, ctx: &PassContext<'_>) {
    let sphere = &ctx.geometry.sphere;
    let material = sphere.material();
    active.set_uniform("specular", material.specular);
    active.set_uniform("shininess", material.shininess);

    let n = ctx.scene.sphere_count;
    for i in (0..2 * n).step_by(2) {
        let u = i as f32 / (2 * n) as f32;
        for j in (2..=n / 2).step_by(2) {
            let v = j as f32 / n as f32;
            let color = hsv_to_rgb(u, 1.0 - 2.0 * (v - 0.5).abs(), 1.0);
            let s = 3.0 * (v * PI).sin();
            let model = ctx.frame.sphere_model
                * Mat4::from_rotation_z((360.0 * u).to_radians())
                * Mat4::from_rotation_y((180.0 * v).to_radians())
                * Mat4::from_translation(Vec3::new(0.0, 0.0, 30.0))
                * Mat4::from_scale(Vec3::splat(s));
            active.set_uniform("ModelMatrix", model);
            active.set_uniform("NormalMatrix", normal_matrix(model));
            active.set_uniform("diffuse", color);
            active.set_uniform("isTextured", false);
            active.draw(sphere);
        }
    }
    active.set_uniform("ModelMatrix", Mat4::IDENTITY);
    active.set_uniform("NormalMatrix", Mat4::IDENTITY);
}

fn draw_ground(active: &mut ActiveProgram<'_>, ctx: &PassContext<'_>) {
    let ground = &ctx.geometry.ground;
    ground.material().apply(active);
    let [diffuse, normal, height] = ctx.statics.ground(ctx.scene.ground_material);
    active.bind_texture(GroundSlot::Diffuse, diffuse);
    active.bind_texture(GroundSlot::Normal, normal);
    active.bind_texture(GroundSlot::Height, height);
    active.set_uniform("ModelMatrix", Mat4::IDENTITY);
    active.set_uniform("NormalMatrix", Mat4::IDENTITY);
    active.set_uniform("isTextured", true);
    active.draw(ground);
    for slot in GroundSlot::ALL {
        active.unbind_texture(*slot);
    }
}

fn draw_sun(active: &mut ActiveProgram<'_>, ctx: &PassContext<'_>) {
    active.set_uniform("diffuse", SUN_DIFFUSE);
    active.set_uniform("ModelMatrix", ctx.frame.sun_model);
    active.set_uniform("Light", ctx.scene.light_color);
    active.set_uniform("Ambient", ctx.scene.ambient);
    active.set_uniform("isTextured", false);
    active.draw(&ctx.geometry.sphere);
}

/// HSV to RGB, every component in `[0, 1]`
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    if s <= 0.0 {
        return Vec3::splat(v);
    }
    let h = h.rem_euclid(1.0) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as u32 {
        0 => Vec3::new(v, t, p),
        1 => Vec3::new(q, v, p),
        2 => Vec3::new(p, v, t),
        3 => Vec3::new(p, q, v),
        4 => Vec3::new(t, p, v),
        _ => Vec3::new(v, p, q),
    }
}

#[cfg(test)]
#[path = "scene_draw_tests.rs"]
mod tests;
