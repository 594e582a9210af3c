/// Program descriptor and uniform values

use glam::{IVec2, Mat4, Vec2, Vec3, Vec4};

/// Pipeline kind of a program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramKind {
    /// Vertex + fragment stages
    Graphics,
    /// Single compute stage
    Compute,
}

/// Descriptor for creating (compiling and linking) a program
///
/// Sources are resolved by the backend from `name`
/// (`shaders/<name>.vert`, `.frag` or `.comp`).
#[derive(Debug, Clone)]
pub struct ProgramDesc<'a> {
    pub name: &'a str,
    pub kind: ProgramKind,
    /// Attribute slot bindings applied before linking
    pub attributes: &'a [(u32, &'a str)],
}

/// Backend uniform location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

/// Value uploaded to a uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Bool(bool),
    Float(f32),
    IVec2(IVec2),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(value)
    }
}

impl From<u32> for UniformValue {
    fn from(value: u32) -> Self {
        UniformValue::Int(value as i32)
    }
}

impl From<bool> for UniformValue {
    fn from(value: bool) -> Self {
        UniformValue::Bool(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<IVec2> for UniformValue {
    fn from(value: IVec2) -> Self {
        UniformValue::IVec2(value)
    }
}

impl From<Vec2> for UniformValue {
    fn from(value: Vec2) -> Self {
        UniformValue::Vec2(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4(value)
    }
}

/// Access mode of an image bound for compute load/store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageAccess {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl ImageAccess {
    pub fn writes(self) -> bool {
        matches!(self, ImageAccess::WriteOnly | ImageAccess::ReadWrite)
    }
}
