/// GraphicsDevice trait - the only boundary between the engine and the GPU API
///
/// Resources are addressed by slotmap keys. A backend keeps its native
/// handles in its own `SlotMap`s and hands the keys out; the engine never
/// sees API objects.

use slotmap::new_key_type;
use crate::error::Result;
use super::texture::{TextureDesc, TextureInfo};
use super::frame_buffer::{FramebufferDesc, FramebufferStatus};
use super::program::{ProgramDesc, UniformLocation, UniformValue, ImageAccess};
use super::mesh::MeshDesc;
use super::render_state::{ClearFlags, RenderState, Viewport};

new_key_type! {
    /// Texture handle
    pub struct TextureId;
    /// Framebuffer handle
    pub struct FramebufferId;
    /// Linked program handle
    pub struct ProgramId;
    /// Uploaded mesh (vertex + index buffers) handle
    pub struct MeshId;
}

/// Graphics device trait
///
/// Commands are submitted synchronously from a single thread in program
/// order. Backend failures surface either as `Err` from creation calls or
/// through [`GraphicsDevice::check_error`] at coarse checkpoints.
pub trait GraphicsDevice {
    // ===== TEXTURES =====

    /// Create a texture, optionally uploading initial texels
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureId>;

    /// Destroy a texture (no-op for unknown ids)
    fn destroy_texture(&mut self, texture: TextureId);

    /// Properties of a created texture
    fn texture_info(&self, texture: TextureId) -> Option<TextureInfo>;

    // ===== FRAMEBUFFERS =====

    /// Create a framebuffer and enable all its color attachments as draw buffers
    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<FramebufferId>;

    /// Completeness status of a framebuffer
    fn framebuffer_status(&self, framebuffer: FramebufferId) -> FramebufferStatus;

    fn destroy_framebuffer(&mut self, framebuffer: FramebufferId);

    /// Redirect draw output. `None` restores the default (screen) framebuffer.
    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>);

    // ===== FIXED-FUNCTION STATE =====

    fn set_viewport(&mut self, viewport: Viewport);

    fn clear(&mut self, flags: ClearFlags, color: [f32; 4]);

    fn set_render_state(&mut self, state: RenderState);

    // ===== PROGRAMS =====

    /// Compile and link a program
    ///
    /// # Errors
    ///
    /// Returns `Error::ProgramLinkFailed` with the info log on failure.
    fn create_program(&mut self, desc: &ProgramDesc) -> Result<ProgramId>;

    fn destroy_program(&mut self, program: ProgramId);

    /// Make a program current. `None` leaves no program in use.
    fn use_program(&mut self, program: Option<ProgramId>);

    /// Program currently in use
    fn active_program(&self) -> Option<ProgramId>;

    /// Name the program was created with
    fn program_name(&self, program: ProgramId) -> Option<String>;

    /// Location of a uniform, `None` when the linker dropped or never saw it
    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Upload a value to a uniform of the current program
    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue);

    /// Upload a uniform block and attach it to `binding`
    ///
    /// Unknown block names are ignored like unknown uniforms.
    fn upload_uniform_block(
        &mut self,
        program: ProgramId,
        block: &str,
        binding: u32,
        data: &[u8],
    ) -> Result<()>;

    // ===== BINDINGS AND WORK =====

    /// Bind (or unbind with `None`) a texture to a sampling unit
    fn bind_texture(&mut self, unit: u32, texture: Option<TextureId>);

    /// Bind a texture as a load/store image
    fn bind_image(&mut self, unit: u32, texture: TextureId, access: ImageAccess);

    /// Dispatch the current compute program
    fn dispatch_compute(&mut self, groups: [u32; 3]);

    /// Upload a mesh
    fn create_mesh(&mut self, desc: &MeshDesc) -> Result<MeshId>;

    fn destroy_mesh(&mut self, mesh: MeshId);

    /// Draw an indexed triangle list with the current program
    fn draw_mesh(&mut self, mesh: MeshId);

    // ===== DIAGNOSTICS =====

    /// Pop the oldest pending GPU error, if any
    fn check_error(&mut self) -> Option<String>;
}
