//! Public entry point for scratch disk creation.

use std::sync::Arc;

use scratchlite_shared::errors::ScratchResult;
use tokio_util::sync::CancellationToken;

use crate::control::{CommandInvoker, CommandLauncher, ControlPlaneOptions, ProcessLauncher};
use crate::scratch::{CreateScratchOptions, create_scratch_args};

/// Client for the control plane's scratch disk commands.
///
/// Holds no per-request state, so one client can serve concurrent
/// requests. Identical concurrent requests are not de-duplicated.
#[derive(Clone, Debug)]
pub struct ScratchClient {
    invoker: CommandInvoker,
}

impl ScratchClient {
    /// Create a client that runs the control-plane binary described by
    /// `options`.
    pub fn new(options: &ControlPlaneOptions) -> ScratchResult<Self> {
        let launcher = CommandLauncher::from_options(options)?;
        tracing::debug!(binary = %launcher.binary().display(), "Using control plane");
        Ok(Self::with_launcher(Arc::new(launcher)))
    }

    /// Create a client over any launcher (e.g. a test fake).
    pub fn with_launcher(launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self {
            invoker: CommandInvoker::new(launcher),
        }
    }

    /// Create an ext4 formatted scratch vhdx at `dest_path` with default
    /// options.
    pub async fn create_scratch(
        &self,
        cancel: &CancellationToken,
        dest_path: &str,
    ) -> ScratchResult<()> {
        self.create_scratch_with_options(cancel, dest_path, None)
            .await
    }

    /// Create an ext4 formatted scratch vhdx at `dest_path` based on `opts`.
    ///
    /// Options are validated before anything is spawned.
    pub async fn create_scratch_with_options(
        &self,
        cancel: &CancellationToken,
        dest_path: &str,
        opts: Option<&CreateScratchOptions>,
    ) -> ScratchResult<()> {
        let args = create_scratch_args(dest_path, opts)?;
        self.invoker.invoke(cancel, &args).await
    }
}
