//! Error types for the Light Lab engine
//!
//! Every fallible operation returns [`Result`]. Configuration failures
//! (incomplete framebuffers, link failures, missing assets) are not
//! recoverable at runtime: the host hands them to [`exit_on_fatal`].

use std::fmt;

/// Result type for Light Lab engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Light Lab engine errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error reported by the graphics device
    BackendError(String),

    /// Invalid resource (texture, mesh, program, target)
    InvalidResource(String),

    /// Initialization failed (engine, orchestrator, subsystems)
    InitializationFailed(String),

    /// Framebuffer failed its completeness check at creation
    IncompleteFramebuffer { target: String, status: String },

    /// A program was activated while another one was still in use
    ProgramAlreadyActive { active: String, requested: String },

    /// Shader program failed to compile or link
    ProgramLinkFailed { program: String, log: String },

    /// Asset could not be found or decoded by the asset source
    AssetNotFound(String),

    /// A pass sampled a texture that no earlier pass of the frame produced
    InvalidPassOrder { pass: String, texture: String },

    /// GPU error flagged at a checkpoint
    GpuError { checkpoint: String, code: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::IncompleteFramebuffer { target, status } => {
                write!(f, "Framebuffer '{}' is incomplete: {}", target, status)
            }
            Error::ProgramAlreadyActive { active, requested } => write!(
                f,
                "Cannot use program '{}' while '{}' is still active",
                requested, active
            ),
            Error::ProgramLinkFailed { program, log } => {
                write!(f, "Program '{}' failed to link: {}", program, log)
            }
            Error::AssetNotFound(path) => write!(f, "Asset not found: {}", path),
            Error::InvalidPassOrder { pass, texture } => write!(
                f,
                "Pass '{}' samples '{}' before any pass of this frame wrote it",
                pass, texture
            ),
            Error::GpuError { checkpoint, code } => {
                write!(f, "GPU error {} after {}", code, checkpoint)
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// True for errors that mean the demo was set up wrong
    /// (as opposed to a misuse of the API by the caller).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::IncompleteFramebuffer { .. }
                | Error::ProgramLinkFailed { .. }
                | Error::AssetNotFound(_)
                | Error::InitializationFailed(_)
        )
    }
}

/// Unwrap a result, or log the diagnostic and terminate the process.
///
/// Intended for the host's outermost frame and initialization calls.
/// GPU and configuration failures in an interactive demo are developer
/// bugs, there is nothing to recover.
pub fn exit_on_fatal<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => {
            crate::engine_error!("lightlab::Fatal", "{}", error);
            std::process::exit(1);
        }
    }
}

// ===== ERROR MACROS =====

/// Log an error and build an `Error::InvalidResource` from it
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("lightlab::RenderTarget", "Unknown slot {}", slot);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::lightlab::Error::InvalidResource(message)
    }};
}

/// Log an error and return `Err(Error::InvalidResource)` from the current function
///
/// # Example
///
/// ```ignore
/// engine_bail!("lightlab::Drawable", "Index {} out of range", index);
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
