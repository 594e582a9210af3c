/// Frame report and the texture registry it checks against
///
/// Every pass of a frame is recorded in order. A pass may only sample a
/// texture that an earlier pass of the same frame wrote, or a static
/// input uploaded at initialization (noise tile, ground maps).

use rustc_hash::{FxHashMap, FxHashSet};
use crate::device::TextureId;
use crate::error::{Error, Result};
use crate::render::gpu_program::ProgramUsage;
use crate::render::render_target::RenderTarget;
use crate::scene::Technique;
use super::render_pass::{PassRecord, PassTarget};

// ===== TEXTURE REGISTRY =====

/// Labels of every texture the orchestrator owns
#[derive(Debug, Default)]
pub struct TextureRegistry {
    labels: FxHashMap<TextureId, String>,
    static_inputs: FxHashSet<TextureId>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture written by passes
    pub fn register(&mut self, texture: TextureId, label: impl Into<String>) {
        self.labels.insert(texture, label.into());
    }

    /// Register a texture whose content was uploaded once
    pub fn register_static(&mut self, texture: TextureId, label: impl Into<String>) {
        self.register(texture, label);
        self.static_inputs.insert(texture);
    }

    /// Register every attachment of a render target
    pub fn register_target(&mut self, target: &RenderTarget) {
        for (texture, label) in target.labeled_attachments() {
            self.register(texture, label);
        }
    }

    pub fn unregister(&mut self, texture: TextureId) {
        self.labels.remove(&texture);
        self.static_inputs.remove(&texture);
    }

    pub fn unregister_target(&mut self, target: &RenderTarget) {
        for texture in target.attachments() {
            self.unregister(texture);
        }
    }

    /// Label of `texture`, `"?"` when unknown
    pub fn label(&self, texture: TextureId) -> &str {
        self.labels.get(&texture).map_or("?", String::as_str)
    }

    /// Texture registered under `label`
    pub fn find(&self, label: &str) -> Option<TextureId> {
        self.labels.iter().find(|(_, l)| l.as_str() == label).map(|(t, _)| *t)
    }

    pub fn is_static(&self, texture: TextureId) -> bool {
        self.static_inputs.contains(&texture)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ===== FRAME REPORT =====

/// Passes executed by one frame, in order
#[derive(Debug, Clone)]
pub struct FrameReport {
    technique: Technique,
    passes: Vec<PassRecord>,
    written: FxHashSet<TextureId>,
}

impl FrameReport {
    pub fn new(technique: Technique) -> Self {
        Self {
            technique,
            passes: Vec::new(),
            written: FxHashSet::default(),
        }
    }

    /// Append a pass and check its inputs
    ///
    /// `outputs` are the attachments the pass rendered into; images written
    /// by compute passes come from `usage`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidPassOrder` when a sampled texture is neither static
    /// nor written by an earlier pass of this frame. The pass is not
    /// recorded.
    pub fn record(
        &mut self,
        registry: &TextureRegistry,
        name: &str,
        target: PassTarget,
        usage: &ProgramUsage,
        outputs: &[TextureId],
    ) -> Result<()> {
        if let Some(texture) = usage
            .sampled
            .iter()
            .find(|t| !registry.is_static(**t) && !self.written.contains(*t))
        {
            let error = Error::InvalidPassOrder {
                pass: name.to_string(),
                texture: registry.label(*texture).to_string(),
            };
            crate::engine_error!("lightlab::FrameReport", "{}", error);
            return Err(error);
        }

        let written: Vec<TextureId> = outputs.iter().chain(&usage.written_images).copied().collect();
        crate::engine_trace!("lightlab::FrameReport",
            "{} -> {} ({} sampled, {} written)", name, target, usage.sampled.len(), written.len());

        self.passes.push(PassRecord {
            name: name.to_string(),
            target,
            sampled: usage.sampled.iter().map(|t| registry.label(*t).to_string()).collect(),
            written: written.iter().map(|t| registry.label(*t).to_string()).collect(),
        });
        self.written.extend(written);
        Ok(())
    }

    // ===== QUERIES =====

    pub fn technique(&self) -> Technique {
        self.technique
    }

    pub fn passes(&self) -> &[PassRecord] {
        &self.passes
    }

    pub fn pass(&self, name: &str) -> Option<&PassRecord> {
        self.passes.iter().find(|p| p.name == name)
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name.as_str()).collect()
    }

    /// True if a pass of this frame wrote `texture`
    pub fn was_written(&self, texture: TextureId) -> bool {
        self.written.contains(&texture)
    }
}

#[cfg(test)]
#[path = "frame_report_tests.rs"]
mod tests;
