/// Orchestrator module - per-frame technique dispatch and resource ownership

pub mod frame_state;
pub mod targets;
pub mod resources;
pub mod scene_draw;
pub mod passes;
pub mod frame_orchestrator;

pub use frame_state::FrameState;
pub use targets::TargetSet;
pub use resources::{ProgramSet, SceneGeometry, StaticTextures};
pub use scene_draw::SceneItem;
pub use frame_orchestrator::FrameOrchestrator;
