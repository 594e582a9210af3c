/*!
# Light Lab Engine

Render-pass orchestration for a real-time lighting demo.

The crate drives four interchangeable techniques over a shared scene:
deferred shading with many local lights, forward rendering with an
exponential soft shadow map, forward parallax mapping, and forward
screen-space ambient occlusion. GPU work goes through the
[`GraphicsDevice`](device::GraphicsDevice) trait; the windowing layer
and the backend live outside the crate.

## Architecture

- **GraphicsDevice**: the only boundary to the GPU API
- **RenderTarget**: framebuffer plus attachments, validated at creation
- **GpuProgram**: linked program with scoped activation
- **FrameOrchestrator**: owns every resource, runs the passes of a frame
- **FrameReport**: producer/consumer check of the passes of a frame
- **KernelData**: blur weights, SSAO kernel and noise tile
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod device;
pub mod render;
pub mod render_graph;
pub mod scene;
pub mod orchestrator;

// Main lightlab namespace module
pub mod lightlab {
    // Error types and the host-side fatal policy
    pub use crate::error::{Error, Result, exit_on_fatal};

    // Logging facade
    pub use crate::engine::Engine;

    // Orchestrator entry point
    pub use crate::orchestrator::FrameOrchestrator;

    // Startup configuration
    pub use crate::config::EngineConfig;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // GPU boundary
    pub mod device {
        pub use crate::device::*;
    }

    // Programs, targets, drawables and kernels
    pub mod render {
        pub use crate::render::*;
    }

    // Pass records
    pub mod render_graph {
        pub use crate::render_graph::*;
    }

    // Camera, lights, models and per-frame parameters
    pub mod scene {
        pub use crate::scene::*;
    }

    // Frame state and resource sets
    pub mod orchestrator {
        pub use crate::orchestrator::*;
    }
}

// Re-export math library at crate root
pub use glam;
