/// Vertex layout and mesh descriptor
///
/// Every program binds its attributes to the same slots, so any mesh can
/// be drawn by any program.

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex shared by every mesh
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
    pub tangent: [f32; 3],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2], tangent: [f32; 3]) -> Self {
        Self { position, normal, tex_coord, tangent }
    }
}

/// Vertex attribute slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum VertexAttribute {
    Position = 0,
    Normal = 1,
    TexCoord = 2,
    Tangent = 3,
}

impl VertexAttribute {
    /// All attributes in slot order
    pub const ALL: [VertexAttribute; 4] = [
        VertexAttribute::Position,
        VertexAttribute::Normal,
        VertexAttribute::TexCoord,
        VertexAttribute::Tangent,
    ];

    pub fn location(self) -> u32 {
        self as u32
    }

    /// Number of f32 components
    pub fn components(self) -> u32 {
        match self {
            VertexAttribute::TexCoord => 2,
            _ => 3,
        }
    }

    /// Byte offset inside [`Vertex`]
    pub fn offset(self) -> usize {
        match self {
            VertexAttribute::Position => std::mem::offset_of!(Vertex, position),
            VertexAttribute::Normal => std::mem::offset_of!(Vertex, normal),
            VertexAttribute::TexCoord => std::mem::offset_of!(Vertex, tex_coord),
            VertexAttribute::Tangent => std::mem::offset_of!(Vertex, tangent),
        }
    }
}

/// Descriptor for uploading a mesh
#[derive(Debug, Clone)]
pub struct MeshDesc<'a> {
    pub label: &'a str,
    pub vertices: &'a [Vertex],
    /// Triangle list indices
    pub indices: &'a [u32],
}

impl<'a> MeshDesc<'a> {
    /// Vertex data as raw bytes for upload
    pub fn vertex_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.vertices)
    }

    /// Index data as raw bytes for upload
    pub fn index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.indices)
    }
}
