//! Error types for scratch disk provisioning.
//!
//! Errors are categorized by who can fix them:
//! - [`ScratchError::InvalidArgument`]: caller input (fix and retry)
//! - [`ScratchError::PathResolution`]: local path canonicalization
//! - [`ScratchError::Launch`] / [`ScratchError::NotFound`]: environment
//! - [`ScratchError::ProcessFailed`]: the control plane rejected the request
//! - [`ScratchError::Cancelled`] / [`ScratchError::Timeout`]: caller context

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result alias used across the scratchlite crates.
pub type ScratchResult<T> = Result<T, ScratchError>;

/// Errors that can occur while translating or running a scratch request.
///
/// ```ignore
/// match client.create_scratch(&cancel, dest).await {
///     Err(ScratchError::InvalidArgument(_)) => { /* fix options */ }
///     Err(e) if e.is_cancellation() => { /* caller gave up */ }
///     Err(ScratchError::ProcessFailed { code, output }) => { /* inspect output */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Error)]
pub enum ScratchError {
    /// A caller-supplied option violates a precondition.
    #[error("{0}")]
    InvalidArgument(String),

    /// Resolving a path to its absolute form failed.
    #[error("resolve {}: {source}", path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The control-plane process could not be started.
    #[error("launch {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The control-plane process ran and exited unsuccessfully.
    #[error("{}: {output}", describe_exit(*code))]
    ProcessFailed {
        /// Exit code, or `None` if the process was terminated by a signal.
        code: Option<i32>,
        /// Captured stdout followed by stderr.
        output: String,
    },

    /// The execution context was cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// The invocation exceeded its configured timeout.
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    /// A required binary or resource could not be found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Configuration could not be loaded.
    #[error("config: {0}")]
    Config(String),

    /// Plumbing failure (e.g. capturing process output).
    #[error("internal: {0}")]
    Internal(String),
}

fn describe_exit(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl ScratchError {
    /// Create a path resolution error.
    pub fn path_resolution(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::PathResolution {
            path: path.into(),
            source,
        }
    }

    /// Create a launch error.
    pub fn launch(program: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }

    /// True for both explicit cancellation and timeouts.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Timeout(_))
    }

    /// Exit code carried by a [`ScratchError::ProcessFailed`].
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ProcessFailed { code, .. } => *code,
            _ => None,
        }
    }
}
