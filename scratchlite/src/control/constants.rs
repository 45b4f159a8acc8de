//! Constants for control-plane invocation

// Re-export shared wire constants
pub use scratchlite_shared::constants::{binary, global};

/// Process termination
pub mod terminate {
    use std::time::Duration;

    /// Time between SIGTERM and SIGKILL when an invocation is cancelled
    pub const GRACE_PERIOD: Duration = Duration::from_millis(500);
}
