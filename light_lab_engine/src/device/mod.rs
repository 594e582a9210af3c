/// Graphics device module - the GPU boundary and its resource types

pub mod graphics_device;
pub mod texture;
pub mod frame_buffer;
pub mod program;
pub mod mesh;
pub mod render_state;

pub use graphics_device::*;
pub use texture::*;
pub use frame_buffer::*;
pub use program::*;
pub use mesh::*;
pub use render_state::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
