use std::collections::VecDeque;
use std::io;

use async_trait::async_trait;
use parking_lot::Mutex;
use scratchlite::{ProcessLauncher, ProcessOutcome, ScratchError, ScratchResult};
use tokio_util::sync::CancellationToken;

/// What a [`RecordingLauncher`] does on its next call.
#[derive(Clone, Debug)]
pub enum Scripted {
    /// Pretend the process exited with this code and output.
    Exit(i32, String),
    /// Pretend the binary could not be started.
    LaunchFailure(io::ErrorKind),
    /// Block until the cancellation token fires.
    Hang,
}

/// Launcher fake that records every argument list it receives.
///
/// Responses are consumed in order; once exhausted every call succeeds
/// with exit code 0.
#[derive(Default)]
pub struct RecordingLauncher {
    calls: Mutex<Vec<Vec<String>>>,
    script: Mutex<VecDeque<Scripted>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue responses for the next calls.
    pub fn with_script(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// All argument lists seen so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// The only call made; panics if there were zero or several.
    pub fn single_call(&self) -> Vec<String> {
        let calls = self.calls.lock();
        assert_eq!(calls.len(), 1, "expected exactly one launch, got {:?}", *calls);
        calls[0].clone()
    }
}

#[async_trait]
impl ProcessLauncher for RecordingLauncher {
    async fn launch(
        &self,
        args: &[String],
        cancel: &CancellationToken,
    ) -> ScratchResult<ProcessOutcome> {
        if cancel.is_cancelled() {
            return Err(ScratchError::Cancelled);
        }

        self.calls.lock().push(args.to_vec());
        let next = self.script.lock().pop_front();

        match next {
            None => Ok(ProcessOutcome::exited(0, Vec::new())),
            Some(Scripted::Exit(code, output)) => Ok(ProcessOutcome::exited(code, output)),
            Some(Scripted::LaunchFailure(kind)) => Err(ScratchError::launch(
                "fake-control-plane",
                io::Error::new(kind, "scripted launch failure"),
            )),
            Some(Scripted::Hang) => {
                cancel.cancelled().await;
                Err(ScratchError::Cancelled)
            }
        }
    }
}
