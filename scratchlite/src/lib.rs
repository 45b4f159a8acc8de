//! Scratchlite - scratch disk provisioning through an external control plane.
//!
//! The control-plane executable does the privileged work (creating and
//! formatting the vhdx, possibly inside a utility VM). This crate validates
//! the request, serializes it into the control plane's command line, runs
//! the process and reports how it exited.
//!
//! ```ignore
//! use scratchlite::{ControlPlaneOptions, CreateScratchOptions, ScratchClient};
//! use tokio_util::sync::CancellationToken;
//!
//! let client = ScratchClient::new(&ControlPlaneOptions::default())?;
//! let opts = CreateScratchOptions::default().with_size_gb(20);
//! client
//!     .create_scratch_with_options(&CancellationToken::new(), "/d/scratch.vhdx", Some(&opts))
//!     .await?;
//! ```

mod client;
pub mod control;
pub mod scratch;
pub mod util;

pub use client::ScratchClient;
pub use control::{
    CommandInvoker, CommandLauncher, ControlPlaneOptions, LogFormat, ProcessLauncher,
    ProcessOutcome,
};
pub use scratch::{CreateScratchOptions, create_scratch_args};
pub use scratchlite_shared::errors::{ScratchError, ScratchResult};

// Re-exported so callers don't need a direct tokio-util dependency
pub use tokio_util::sync::CancellationToken;
