/// Render graph module - per-frame pass records and producer/consumer checks

pub mod render_pass;
pub mod frame_report;

pub use render_pass::{PassRecord, PassTarget};
pub use frame_report::{FrameReport, TextureRegistry};
