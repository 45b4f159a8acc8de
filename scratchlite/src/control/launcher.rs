//! Launching the control-plane binary.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use scratchlite_shared::errors::{ScratchError, ScratchResult};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

use super::constants::binary::DEFAULT_NAME;
#[cfg(unix)]
use super::constants::terminate::GRACE_PERIOD;
use super::options::ControlPlaneOptions;
use crate::util::find_binary;

/// How a control-plane process finished.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    /// Captured stdout followed by stderr.
    pub output: Vec<u8>,
}

impl ProcessOutcome {
    pub fn exited(code: i32, output: impl Into<Vec<u8>>) -> Self {
        Self {
            code: Some(code),
            output: output.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Capability that runs one control-plane process to completion.
///
/// Implementations must not spawn anything when `cancel` is already
/// cancelled, and should stop the process and return
/// [`ScratchError::Cancelled`] when it fires mid-run.
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    /// Run the control plane with `args` (command name first).
    async fn launch(
        &self,
        args: &[String],
        cancel: &CancellationToken,
    ) -> ScratchResult<ProcessOutcome>;
}

/// Launches the real control-plane binary with `tokio::process`.
#[derive(Clone, Debug)]
pub struct CommandLauncher {
    binary: PathBuf,
    global_args: Vec<String>,
    timeout: Option<Duration>,
}

enum Finished {
    Exited(ScratchResult<ProcessOutcome>),
    Cancelled,
    TimedOut(Duration),
}

impl CommandLauncher {
    /// Create a launcher for `binary` with the given global flags.
    pub fn new(binary: impl Into<PathBuf>, global_args: Vec<String>) -> Self {
        Self {
            binary: binary.into(),
            global_args,
            timeout: None,
        }
    }

    /// Locate the binary and derive global flags from `options`.
    pub fn from_options(options: &ControlPlaneOptions) -> ScratchResult<Self> {
        let binary = find_binary(DEFAULT_NAME, options.binary.as_deref())?;
        let global_args = options.global_args()?;
        Ok(Self::new(binary, global_args).with_timeout(options.timeout()))
    }

    /// Kill invocations that run longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn global_args(&self) -> &[String] {
        &self.global_args
    }

    fn build_command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.global_args).args(args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl ProcessLauncher for CommandLauncher {
    async fn launch(
        &self,
        args: &[String],
        cancel: &CancellationToken,
    ) -> ScratchResult<ProcessOutcome> {
        if cancel.is_cancelled() {
            return Err(ScratchError::Cancelled);
        }

        tracing::debug!(
            binary = %self.binary.display(),
            global_args = ?self.global_args,
            args = ?args,
            "Launching control plane"
        );

        let start = Instant::now();
        let mut child = self
            .build_command(args)
            .spawn()
            .map_err(|e| ScratchError::launch(&self.binary, e))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let finished = tokio::select! {
            biased;
            _ = cancel.cancelled() => Finished::Cancelled,
            _ = deadline(self.timeout) => Finished::TimedOut(self.timeout.unwrap_or_default()),
            result = wait_with_output(&mut child, stdout, stderr) => Finished::Exited(result),
        };

        match finished {
            Finished::Exited(result) => {
                let outcome = result?;
                tracing::debug!(
                    code = ?outcome.code,
                    elapsed = ?start.elapsed(),
                    "Control plane exited"
                );
                Ok(outcome)
            }
            Finished::Cancelled => {
                terminate(&mut child).await;
                Err(ScratchError::Cancelled)
            }
            Finished::TimedOut(timeout) => {
                terminate(&mut child).await;
                Err(ScratchError::Timeout(timeout))
            }
        }
    }
}

async fn deadline(timeout: Option<Duration>) {
    match timeout {
        Some(timeout) => tokio::time::sleep(timeout).await,
        None => std::future::pending().await,
    }
}

async fn wait_with_output(
    child: &mut Child,
    stdout: Option<impl AsyncRead + Unpin>,
    stderr: Option<impl AsyncRead + Unpin>,
) -> ScratchResult<ProcessOutcome> {
    let (status, stdout, stderr) =
        tokio::join!(child.wait(), read_pipe(stdout), read_pipe(stderr));

    let status = status
        .map_err(|e| ScratchError::Internal(format!("Failed to wait for control plane: {}", e)))?;

    let mut output = stdout?;
    output.extend(stderr?);

    Ok(ProcessOutcome {
        code: status.code(),
        output,
    })
}

async fn read_pipe(pipe: Option<impl AsyncRead + Unpin>) -> ScratchResult<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await.map_err(|e| {
            ScratchError::Internal(format!("Failed to read control plane output: {}", e))
        })?;
    }
    Ok(buf)
}

/// Stop a running child: SIGTERM, a short grace period, then SIGKILL.
async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        if let Some(pid) = child.id() {
            let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
            if let Ok(Ok(status)) = tokio::time::timeout(GRACE_PERIOD, child.wait()).await {
                tracing::debug!(pid, ?status, "Control plane stopped after SIGTERM");
                return;
            }
        }
    }

    if let Err(e) = child.kill().await {
        tracing::debug!(error = %e, "Failed to kill control plane");
    }
}
