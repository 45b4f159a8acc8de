//! Control-plane process invocation.
//!
//! - `ProcessLauncher` - capability that runs the control-plane binary
//! - `CommandLauncher` - launcher backed by `tokio::process`
//! - `CommandInvoker` - maps launcher outcomes onto `ScratchError`
//! - `ControlPlaneOptions` - global flags, binary location, timeout

pub mod constants;
mod invoker;
mod launcher;
mod options;

pub use invoker::CommandInvoker;
pub use launcher::{CommandLauncher, ProcessLauncher, ProcessOutcome};
pub use options::{ControlPlaneOptions, LogFormat};
