//! Maps control-plane outcomes onto `ScratchResult`.

use std::sync::Arc;

use scratchlite_shared::errors::{ScratchError, ScratchResult};
use tokio_util::sync::CancellationToken;

use super::launcher::ProcessLauncher;

/// Runs one control-plane command per call and reports how it went.
///
/// The invoker never retries and never logs failures; every error goes back
/// to the caller unchanged.
#[derive(Clone)]
pub struct CommandInvoker {
    launcher: Arc<dyn ProcessLauncher>,
}

impl CommandInvoker {
    pub fn new(launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self { launcher }
    }

    /// Run `args` and wait for the process to exit.
    ///
    /// # Errors
    /// * [`ScratchError::Cancelled`] - `cancel` fired before or during the run
    /// * [`ScratchError::Launch`] - the process could not be started
    /// * [`ScratchError::ProcessFailed`] - non-zero exit, with captured output
    pub async fn invoke(&self, cancel: &CancellationToken, args: &[String]) -> ScratchResult<()> {
        if cancel.is_cancelled() {
            return Err(ScratchError::Cancelled);
        }

        let outcome = self.launcher.launch(args, cancel).await?;
        if outcome.success() {
            return Ok(());
        }

        Err(ScratchError::ProcessFailed {
            code: outcome.code,
            output: String::from_utf8_lossy(&outcome.output)
                .trim_end()
                .to_string(),
        })
    }
}

impl std::fmt::Debug for CommandInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandInvoker").finish_non_exhaustive()
    }
}
