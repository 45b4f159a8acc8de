//! Configuration for the control-plane process.

use super::constants::global as flags;
use scratchlite_shared::errors::{ScratchError, ScratchResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::util::{absolute_path_arg, path_arg};

/// Log format requested from the control plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Do not pass `--log-format`.
    #[default]
    None,
    Text,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::None => "none",
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ScratchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(LogFormat::None),
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ScratchError::InvalidArgument(format!(
                "unknown log format '{}' (expected none, text or json)",
                other
            ))),
        }
    }
}

/// Options applied to every control-plane invocation.
///
/// Loaded from JSON; every field is optional:
///
/// ```json
/// { "debug": true, "log": "runhcs.log", "log_format": "json", "timeout_secs": 120 }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlPlaneOptions {
    /// Explicit path to the control-plane binary.
    ///
    /// When unset the binary is searched for in `$SCRATCHLITE_RUNTIME_DIR`
    /// and `PATH`.
    pub binary: Option<PathBuf>,

    /// Enable control-plane debug logging (`--debug`).
    pub debug: bool,

    /// Control-plane log file (`--log`), resolved to an absolute path.
    pub log: Option<PathBuf>,

    /// Control-plane log format (`--log-format`).
    pub log_format: LogFormat,

    /// Owner recorded by the control plane (`--owner`).
    pub owner: Option<String>,

    /// Control-plane state root (`--root`).
    pub root: Option<PathBuf>,

    /// Abort invocations that run longer than this many seconds.
    ///
    /// `0` means no timeout, the same as leaving it unset.
    pub timeout_secs: Option<u64>,
}

impl ControlPlaneOptions {
    /// Load options from a JSON file.
    pub fn from_file(path: &Path) -> ScratchResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            ScratchError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&data).map_err(|e| {
            ScratchError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Per-invocation timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Global flags placed before the command name.
    ///
    /// Order: debug, log, log-format, owner, root.
    pub fn global_args(&self) -> ScratchResult<Vec<String>> {
        let mut out = Vec::new();

        if self.debug {
            out.push(flags::DEBUG.to_string());
        }

        if let Some(log) = non_empty(self.log.as_deref()) {
            out.push(flags::LOG.to_string());
            out.push(absolute_path_arg(log)?);
        }

        if self.log_format != LogFormat::None {
            out.push(flags::LOG_FORMAT.to_string());
            out.push(self.log_format.to_string());
        }

        if let Some(owner) = self.owner.as_deref().filter(|o| !o.is_empty()) {
            out.push(flags::OWNER.to_string());
            out.push(owner.to_string());
        }

        if let Some(root) = non_empty(self.root.as_deref()) {
            out.push(flags::ROOT.to_string());
            out.push(path_arg(root)?);
        }

        Ok(out)
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}
