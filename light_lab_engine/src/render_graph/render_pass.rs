/// Record of one executed pass

use std::fmt;

/// Where a pass wrote its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassTarget {
    /// Default framebuffer
    Screen,
    /// Offscreen render target, by name
    Offscreen(String),
    /// Compute pass writing load/store images
    Images,
}

impl fmt::Display for PassTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassTarget::Screen => f.write_str("screen"),
            PassTarget::Offscreen(name) => write!(f, "target '{}'", name),
            PassTarget::Images => f.write_str("images"),
        }
    }
}

/// Pass name, destination, and the textures it sampled and wrote (by label)
#[derive(Debug, Clone, PartialEq)]
pub struct PassRecord {
    pub name: String,
    pub target: PassTarget,
    pub sampled: Vec<String>,
    pub written: Vec<String>,
}

impl PassRecord {
    pub fn samples(&self, label: &str) -> bool {
        self.sampled.iter().any(|l| l == label)
    }

    pub fn writes(&self, label: &str) -> bool {
        self.written.iter().any(|l| l == label)
    }
}
