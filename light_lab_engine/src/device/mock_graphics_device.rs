/// Mock graphics device for unit tests (no GPU required)
///
/// Records every command, tracks which program last wrote each texture
/// and reproduces the GL behaviors the engine relies on: framebuffer
/// completeness rules, optimized-out uniforms, link failures and pending
/// error codes.

use std::collections::VecDeque;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;
use crate::device::{
    GraphicsDevice, TextureId, FramebufferId, ProgramId, MeshId,
    TextureDesc, TextureInfo, TextureUsage, FramebufferDesc, FramebufferStatus,
    ProgramDesc, ProgramKind, UniformLocation, UniformValue, ImageAccess,
    MeshDesc, ClearFlags, RenderState, Viewport,
};
use crate::error::{Error, Result};
use crate::engine_bail;

// ============================================================================
// Mock resources
// ============================================================================

#[derive(Debug, Clone)]
pub struct MockTexture {
    pub label: String,
    pub info: TextureInfo,
    pub uploaded_bytes: Option<Vec<u8>>,
    /// Program (or "clear") that last wrote the texture
    pub written_by: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MockFramebuffer {
    pub label: String,
    pub color: Vec<TextureId>,
    pub depth: Option<TextureId>,
}

#[derive(Debug, Clone)]
pub struct MockProgram {
    pub name: String,
    pub kind: ProgramKind,
    pub attributes: Vec<(u32, String)>,
}

#[derive(Debug, Clone)]
pub struct MockMesh {
    pub label: String,
    pub vertex_count: usize,
    pub index_count: usize,
}

// ============================================================================
// Recorded commands
// ============================================================================

/// Texture sampled by a draw or dispatch, with its writer at that moment
#[derive(Debug, Clone, PartialEq)]
pub struct SampledTexture {
    pub unit: u32,
    pub texture: TextureId,
    pub label: String,
    pub written_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub program: String,
    pub mesh: String,
    /// Framebuffer label, `None` for the screen
    pub framebuffer: Option<String>,
    pub render_state: RenderState,
    pub sampled: Vec<SampledTexture>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRecord {
    pub program: String,
    pub groups: [u32; 3],
    pub read_images: Vec<String>,
    pub written_images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    BindFramebuffer(Option<String>),
    SetViewport(Viewport),
    Clear(ClearFlags),
    SetRenderState(RenderState),
    UseProgram(Option<String>),
    SetUniform { program: String, name: String, value: UniformValue },
    UploadUniformBlock { program: String, block: String, binding: u32, len: usize },
    BindTexture { unit: u32, texture: Option<TextureId> },
    BindImage { unit: u32, texture: TextureId, access: ImageAccess },
    Dispatch(DispatchRecord),
    Draw(DrawRecord),
}

// ============================================================================
// Mock device
// ============================================================================

pub struct MockGraphicsDevice {
    textures: SlotMap<TextureId, MockTexture>,
    framebuffers: SlotMap<FramebufferId, MockFramebuffer>,
    programs: SlotMap<ProgramId, MockProgram>,
    meshes: SlotMap<MeshId, MockMesh>,

    current_framebuffer: Option<FramebufferId>,
    active_program: Option<ProgramId>,
    render_state: RenderState,
    viewport: Viewport,
    bound_textures: FxHashMap<u32, TextureId>,
    bound_images: FxHashMap<u32, (TextureId, ImageAccess)>,

    uniform_locations: Vec<(ProgramId, String)>,
    optimized_out: FxHashSet<(String, String)>,
    link_failures: FxHashSet<String>,
    pending_errors: VecDeque<String>,

    commands: Vec<MockCommand>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self {
            textures: SlotMap::with_key(),
            framebuffers: SlotMap::with_key(),
            programs: SlotMap::with_key(),
            meshes: SlotMap::with_key(),
            current_framebuffer: None,
            active_program: None,
            render_state: RenderState::default(),
            viewport: Viewport::sized(0, 0),
            bound_textures: FxHashMap::default(),
            bound_images: FxHashMap::default(),
            uniform_locations: Vec::new(),
            optimized_out: FxHashSet::default(),
            link_failures: FxHashSet::default(),
            pending_errors: VecDeque::new(),
            commands: Vec::new(),
        }
    }

    // ===== TEST CONFIGURATION =====

    /// Queue an error code returned by the next `check_error`
    pub fn inject_error(&mut self, code: &str) {
        self.pending_errors.push_back(code.to_string());
    }

    /// Make the linker drop `uniform` from `program`
    pub fn optimize_out(&mut self, program: &str, uniform: &str) {
        self.optimized_out.insert((program.to_string(), uniform.to_string()));
    }

    /// Make `create_program` fail for `program`
    pub fn fail_link(&mut self, program: &str) {
        self.link_failures.insert(program.to_string());
    }

    // ===== INSPECTION =====

    pub fn commands(&self) -> &[MockCommand] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn draws(&self) -> Vec<&DrawRecord> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                MockCommand::Draw(draw) => Some(draw),
                _ => None,
            })
            .collect()
    }

    pub fn dispatches(&self) -> Vec<&DispatchRecord> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                MockCommand::Dispatch(dispatch) => Some(dispatch),
                _ => None,
            })
            .collect()
    }

    /// Draws issued with the given program
    pub fn draws_with(&self, program: &str) -> Vec<&DrawRecord> {
        self.draws().into_iter().filter(|d| d.program == program).collect()
    }

    /// Latest value uploaded to `name` while `program` was active
    pub fn uniform_value(&self, program: &str, name: &str) -> Option<UniformValue> {
        self.commands.iter().rev().find_map(|c| match c {
            MockCommand::SetUniform { program: p, name: n, value } if p == program && n == name => {
                Some(*value)
            }
            _ => None,
        })
    }

    pub fn texture(&self, texture: TextureId) -> Option<&MockTexture> {
        self.textures.get(texture)
    }

    pub fn texture_label(&self, texture: TextureId) -> Option<&str> {
        self.textures.get(texture).map(|t| t.label.as_str())
    }

    pub fn written_by(&self, texture: TextureId) -> Option<&str> {
        self.textures.get(texture).and_then(|t| t.written_by.as_deref())
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn framebuffer_count(&self) -> usize {
        self.framebuffers.len()
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn mesh_labels(&self) -> Vec<&str> {
        self.meshes.values().map(|m| m.label.as_str()).collect()
    }

    pub fn program(&self, program: ProgramId) -> Option<&MockProgram> {
        self.programs.get(program)
    }

    pub fn bound_texture(&self, unit: u32) -> Option<TextureId> {
        self.bound_textures.get(&unit).copied()
    }

    pub fn current_framebuffer(&self) -> Option<FramebufferId> {
        self.current_framebuffer
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn render_state(&self) -> RenderState {
        self.render_state
    }

    // ===== INTERNAL HELPERS =====

    fn active_name(&self, program: Option<ProgramId>) -> Option<String> {
        program.and_then(|p| self.programs.get(p)).map(|p| p.name.clone())
    }

    fn framebuffer_label(&self) -> Option<String> {
        self.current_framebuffer
            .and_then(|f| self.framebuffers.get(f))
            .map(|f| f.label.clone())
    }

    fn mark_written(&mut self, texture: TextureId, writer: &str) {
        if let Some(t) = self.textures.get_mut(texture) {
            t.written_by = Some(writer.to_string());
        }
    }

    fn mark_framebuffer_written(&mut self, writer: &str) {
        let attachments: Vec<TextureId> = match self.current_framebuffer.and_then(|f| self.framebuffers.get(f)) {
            Some(fb) => fb.color.iter().copied().chain(fb.depth).collect(),
            None => return,
        };
        for texture in attachments {
            self.mark_written(texture, writer);
        }
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self, desc: &TextureDesc) -> Result<TextureId> {
        if desc.width == 0 || desc.height == 0 {
            engine_bail!("lightlab::MockGraphicsDevice",
                "Texture '{}' has zero size {}x{}", desc.label, desc.width, desc.height);
        }
        if let Some(data) = desc.data {
            if data.len() != desc.expected_data_len() {
                engine_bail!("lightlab::MockGraphicsDevice",
                    "Texture '{}' expects {} bytes, got {}",
                    desc.label, desc.expected_data_len(), data.len());
            }
        }
        Ok(self.textures.insert(MockTexture {
            label: desc.label.to_string(),
            info: TextureInfo {
                width: desc.width,
                height: desc.height,
                format: desc.format,
                usage: desc.usage,
            },
            uploaded_bytes: desc.data.map(|d| d.to_vec()),
            written_by: desc.data.map(|_| "upload".to_string()),
        }))
    }

    fn destroy_texture(&mut self, texture: TextureId) {
        self.textures.remove(texture);
    }

    fn texture_info(&self, texture: TextureId) -> Option<TextureInfo> {
        self.textures.get(texture).map(|t| t.info)
    }

    fn create_framebuffer(&mut self, desc: &FramebufferDesc) -> Result<FramebufferId> {
        Ok(self.framebuffers.insert(MockFramebuffer {
            label: desc.label.to_string(),
            color: desc.color_attachments.to_vec(),
            depth: desc.depth_attachment,
        }))
    }

    fn framebuffer_status(&self, framebuffer: FramebufferId) -> FramebufferStatus {
        let fb = match self.framebuffers.get(framebuffer) {
            Some(fb) => fb,
            None => return FramebufferStatus::MissingAttachment,
        };
        if fb.color.is_empty() && fb.depth.is_none() {
            return FramebufferStatus::MissingAttachment;
        }

        let mut size = None;
        for &texture in &fb.color {
            let Some(t) = self.textures.get(texture) else {
                return FramebufferStatus::IncompleteAttachment;
            };
            if t.info.format.is_depth() || !t.info.usage.contains(TextureUsage::RENDER_TARGET) {
                return FramebufferStatus::IncompleteAttachment;
            }
            match size {
                None => size = Some((t.info.width, t.info.height)),
                Some(s) if s != (t.info.width, t.info.height) => {
                    return FramebufferStatus::IncompleteDimensions;
                }
                _ => {}
            }
        }
        if let Some(depth) = fb.depth {
            let Some(t) = self.textures.get(depth) else {
                return FramebufferStatus::IncompleteAttachment;
            };
            if !t.info.format.is_depth() || !t.info.usage.contains(TextureUsage::DEPTH_STENCIL) {
                return FramebufferStatus::IncompleteAttachment;
            }
            if let Some(s) = size {
                if s != (t.info.width, t.info.height) {
                    return FramebufferStatus::IncompleteDimensions;
                }
            }
        }
        FramebufferStatus::Complete
    }

    fn destroy_framebuffer(&mut self, framebuffer: FramebufferId) {
        if self.current_framebuffer == Some(framebuffer) {
            self.current_framebuffer = None;
        }
        self.framebuffers.remove(framebuffer);
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
        self.current_framebuffer = framebuffer;
        let label = self.framebuffer_label();
        self.commands.push(MockCommand::BindFramebuffer(label));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.commands.push(MockCommand::SetViewport(viewport));
    }

    fn clear(&mut self, flags: ClearFlags, _color: [f32; 4]) {
        self.mark_framebuffer_written("clear");
        self.commands.push(MockCommand::Clear(flags));
    }

    fn set_render_state(&mut self, state: RenderState) {
        self.render_state = state;
        self.commands.push(MockCommand::SetRenderState(state));
    }

    fn create_program(&mut self, desc: &ProgramDesc) -> Result<ProgramId> {
        if self.link_failures.contains(desc.name) {
            return Err(Error::ProgramLinkFailed {
                program: desc.name.to_string(),
                log: "mock link failure".to_string(),
            });
        }
        Ok(self.programs.insert(MockProgram {
            name: desc.name.to_string(),
            kind: desc.kind,
            attributes: desc.attributes.iter().map(|(slot, name)| (*slot, name.to_string())).collect(),
        }))
    }

    fn destroy_program(&mut self, program: ProgramId) {
        if self.active_program == Some(program) {
            self.active_program = None;
        }
        self.uniform_locations.retain(|(owner, _)| *owner != program);
        self.programs.remove(program);
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.active_program = program;
        let name = self.active_name(program);
        self.commands.push(MockCommand::UseProgram(name));
    }

    fn active_program(&self) -> Option<ProgramId> {
        self.active_program
    }

    fn program_name(&self, program: ProgramId) -> Option<String> {
        self.active_name(Some(program))
    }

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        let program_name = self.programs.get(program)?.name.clone();
        if self.optimized_out.contains(&(program_name, name.to_string())) {
            return None;
        }
        let index = match self.uniform_locations.iter().position(|(p, n)| *p == program && n == name) {
            Some(index) => index,
            None => {
                self.uniform_locations.push((program, name.to_string()));
                self.uniform_locations.len() - 1
            }
        };
        Some(UniformLocation(index as i32))
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        let Some((owner, name)) = self.uniform_locations.get(location.0 as usize).cloned() else {
            self.pending_errors.push_back("GL_INVALID_OPERATION".to_string());
            return;
        };
        if self.active_program != Some(owner) {
            self.pending_errors.push_back("GL_INVALID_OPERATION".to_string());
            return;
        }
        let program = self.active_name(Some(owner)).unwrap_or_default();
        self.commands.push(MockCommand::SetUniform { program, name, value });
    }

    fn upload_uniform_block(
        &mut self,
        program: ProgramId,
        block: &str,
        binding: u32,
        data: &[u8],
    ) -> Result<()> {
        let Some(name) = self.active_name(Some(program)) else {
            engine_bail!("lightlab::MockGraphicsDevice", "Unknown program for block '{}'", block);
        };
        self.commands.push(MockCommand::UploadUniformBlock {
            program: name,
            block: block.to_string(),
            binding,
            len: data.len(),
        });
        Ok(())
    }

    fn bind_texture(&mut self, unit: u32, texture: Option<TextureId>) {
        match texture {
            Some(t) => {
                self.bound_textures.insert(unit, t);
            }
            None => {
                self.bound_textures.remove(&unit);
            }
        }
        self.commands.push(MockCommand::BindTexture { unit, texture });
    }

    fn bind_image(&mut self, unit: u32, texture: TextureId, access: ImageAccess) {
        self.bound_images.insert(unit, (texture, access));
        self.commands.push(MockCommand::BindImage { unit, texture, access });
    }

    fn dispatch_compute(&mut self, groups: [u32; 3]) {
        let program = self.active_program.and_then(|p| self.programs.get(p));
        let program = match program {
            Some(p) if p.kind == ProgramKind::Compute => p.name.clone(),
            _ => {
                self.pending_errors.push_back("GL_INVALID_OPERATION".to_string());
                return;
            }
        };

        let mut images: Vec<(u32, TextureId, ImageAccess)> =
            self.bound_images.iter().map(|(u, (t, a))| (*u, *t, *a)).collect();
        images.sort_by_key(|(unit, _, _)| *unit);

        let label = |device: &Self, t: TextureId| device.texture_label(t).unwrap_or("?").to_string();
        let read_images = images
            .iter()
            .filter(|(_, _, a)| *a != ImageAccess::WriteOnly)
            .map(|(_, t, _)| label(self, *t))
            .collect();
        let written: Vec<TextureId> = images
            .iter()
            .filter(|(_, _, a)| a.writes())
            .map(|(_, t, _)| *t)
            .collect();
        let written_images = written.iter().map(|t| label(self, *t)).collect();

        for texture in written {
            self.mark_written(texture, &program);
        }
        self.commands.push(MockCommand::Dispatch(DispatchRecord {
            program,
            groups,
            read_images,
            written_images,
        }));
    }

    fn create_mesh(&mut self, desc: &MeshDesc) -> Result<MeshId> {
        if desc.vertex_bytes().is_empty() || desc.index_bytes().is_empty() {
            engine_bail!("lightlab::MockGraphicsDevice", "Mesh '{}' has no geometry", desc.label);
        }
        Ok(self.meshes.insert(MockMesh {
            label: desc.label.to_string(),
            vertex_count: desc.vertices.len(),
            index_count: desc.indices.len(),
        }))
    }

    fn destroy_mesh(&mut self, mesh: MeshId) {
        self.meshes.remove(mesh);
    }

    fn draw_mesh(&mut self, mesh: MeshId) {
        let Some(program) = self.active_name(self.active_program) else {
            self.pending_errors.push_back("GL_INVALID_OPERATION".to_string());
            return;
        };
        let Some(mesh_label) = self.meshes.get(mesh).map(|m| m.label.clone()) else {
            self.pending_errors.push_back("GL_INVALID_VALUE".to_string());
            return;
        };

        let mut units: Vec<(u32, TextureId)> = self.bound_textures.iter().map(|(u, t)| (*u, *t)).collect();
        units.sort_by_key(|(unit, _)| *unit);
        let sampled = units
            .into_iter()
            .map(|(unit, texture)| SampledTexture {
                unit,
                texture,
                label: self.texture_label(texture).unwrap_or("?").to_string(),
                written_by: self.written_by(texture).map(str::to_string),
            })
            .collect();

        let record = DrawRecord {
            program: program.clone(),
            mesh: mesh_label,
            framebuffer: self.framebuffer_label(),
            render_state: self.render_state,
            sampled,
        };
        self.mark_framebuffer_written(&program);
        self.commands.push(MockCommand::Draw(record));
    }

    fn check_error(&mut self) -> Option<String> {
        self.pending_errors.pop_front()
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
