use glam::{Mat4, Vec2, Vec3};
use super::*;
use crate::device::mock_graphics_device::{MockGraphicsDevice, MockCommand};
use crate::device::{TextureDesc, TextureFormat, TextureUsage, TextureFilter, TextureWrap, UniformValue};
use crate::render::geometry::MeshData;
use crate::render::drawable::Material;
use crate::render::gpu_program::ShadingStage;

fn setup(count: usize) -> (MockGraphicsDevice, GpuProgram, Drawable, Vec<TextureId>) {
    let mut device = MockGraphicsDevice::new();
    let program = GpuProgram::create(&mut device, ShadingStage::DebugWindow).unwrap();
    let quad = Drawable::create(&mut device, "quad", &MeshData::full_screen_quad(), Material::default()).unwrap();
    let data = vec![0u8; 4 * 4 * 4];
    let textures = (0..count)
        .map(|i| {
            device
                .create_texture(&TextureDesc {
                    label: &format!("buffer{}", i),
                    width: 4,
                    height: 4,
                    format: TextureFormat::R32_SFLOAT,
                    usage: TextureUsage::SAMPLED,
                    filter: TextureFilter::Linear,
                    wrap: TextureWrap::ClampToEdge,
                    data: Some(&data),
                })
                .unwrap()
        })
        .collect();
    (device, program, quad, textures)
}

fn debug_matrices(device: &MockGraphicsDevice) -> Vec<Mat4> {
    device
        .commands()
        .iter()
        .filter_map(|c| match c {
            MockCommand::SetUniform { name, value: UniformValue::Mat4(m), .. } if name == "DebugMatrix" => Some(*m),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_debug_matrix_places_scaled_quad() {
    let m = debug_matrix(Vec2::new(0.65, -0.25));
    let corner = m.transform_point3(Vec3::new(1.0, 1.0, 0.0));
    assert!(corner.abs_diff_eq(Vec3::new(0.95, 0.05, 0.5), 1e-5));
}

#[test]
fn test_one_draw_per_buffer_on_unit_seven() {
    let (mut device, program, quad, textures) = setup(3);
    let usage = draw_debug_quads(&mut device, &program, &quad, &textures).unwrap();

    let draws = device.draws_with("debugWindow");
    assert_eq!(draws.len(), 3);
    for (draw, texture) in draws.iter().zip(&textures) {
        assert_eq!(draw.sampled.len(), 1);
        assert_eq!(draw.sampled[0].unit, 7);
        assert_eq!(draw.sampled[0].texture, *texture);
    }
    assert_eq!(usage.sampled, textures);
    assert_eq!(debug_matrices(&device).len(), 3);
    assert_eq!(device.uniform_value("debugWindow", "fboToDebug"), Some(UniformValue::Int(7)));
}

#[test]
fn test_extra_buffers_are_not_drawn() {
    let (mut device, program, quad, textures) = setup(5);
    draw_debug_quads(&mut device, &program, &quad, &textures).unwrap();
    assert_eq!(device.draws_with("debugWindow").len(), 3);
}

#[test]
fn test_overlay_leaves_no_program_bound() {
    let (mut device, program, quad, textures) = setup(2);
    draw_debug_quads(&mut device, &program, &quad, &textures).unwrap();
    assert!(device.active_program().is_none());
    assert!(device.bound_texture(7).is_none());
    assert_eq!(device.render_state(), RenderState::FULL_SCREEN);
}
