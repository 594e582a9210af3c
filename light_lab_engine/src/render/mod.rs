/// Render module - programs, targets, drawables, kernels and the debug overlay

pub mod texture_units;
pub mod gpu_program;
pub mod render_target;
pub mod geometry;
pub mod drawable;
pub mod kernel;
pub mod debug_overlay;

pub use texture_units::*;
pub use gpu_program::{GpuProgram, ActiveProgram, ProgramUsage, ShadingStage};
pub use render_target::{AttachmentSpec, RenderTarget};
pub use geometry::MeshData;
pub use drawable::{Drawable, Material};
pub use kernel::{KernelData, MAX_BLUR_WIDTH, build_blur_weights, build_ssao_kernel, build_noise_tile};
pub use debug_overlay::{draw_debug_quads, debug_matrix, DEBUG_QUAD_POSITIONS};
