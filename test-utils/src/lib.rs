//! Test helpers shared by the scratchlite crates.
//!
//! - [`RecordingLauncher`] - in-process launcher fake with a call log
//! - [`FakeControlPlane`] - shell-script control plane on disk (unix only)

mod launcher;

#[cfg(unix)]
mod control_plane;

pub use launcher::{RecordingLauncher, Scripted};

#[cfg(unix)]
pub use control_plane::{FakeControlPlane, read_pid};
