use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use scratchlite::{ControlPlaneOptions, LogFormat, ScratchClient};

use crate::commands::create_scratch::CreateScratchArgs;

/// Default config file, relative to the platform config directory
const DEFAULT_CONFIG: &str = "scratchlite/config.json";

#[derive(Parser, Debug)]
#[command(name = "scratchlite", version, about = "Provision scratch disk images")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an ext4 formatted scratch vhdx
    CreateScratch(CreateScratchArgs),
}

/// Flags shared by every subcommand.
///
/// Command-line values override the config file.
#[derive(Args, Debug, Clone)]
pub struct GlobalFlags {
    /// JSON config file (default: <config dir>/scratchlite/config.json if present)
    #[arg(long, global = true, env = "SCRATCHLITE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Control-plane binary to run
    #[arg(long, global = true, env = "SCRATCHLITE_BINARY")]
    pub binary: Option<PathBuf>,

    /// Enable control-plane debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Control-plane log file
    #[arg(long, global = true, env = "SCRATCHLITE_LOG")]
    pub log: Option<PathBuf>,

    /// Control-plane log format (none, text, json)
    #[arg(long, global = true, env = "SCRATCHLITE_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Owner recorded by the control plane
    #[arg(long, global = true, env = "SCRATCHLITE_OWNER")]
    pub owner: Option<String>,

    /// Control-plane state root
    #[arg(long, global = true, env = "SCRATCHLITE_ROOT")]
    pub root: Option<PathBuf>,

    /// Abort the control plane after this many seconds
    #[arg(long, global = true, env = "SCRATCHLITE_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print debug logs from scratchlite itself
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalFlags {
    /// Merge the config file with command-line overrides.
    pub fn control_plane_options(&self) -> anyhow::Result<ControlPlaneOptions> {
        let mut options = match self.config_path() {
            Some(path) => ControlPlaneOptions::from_file(&path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ControlPlaneOptions::default(),
        };

        if self.binary.is_some() {
            options.binary = self.binary.clone();
        }
        if self.debug {
            options.debug = true;
        }
        if self.log.is_some() {
            options.log = self.log.clone();
        }
        if let Some(format) = self.log_format {
            options.log_format = format;
        }
        if self.owner.is_some() {
            options.owner = self.owner.clone();
        }
        if self.root.is_some() {
            options.root = self.root.clone();
        }
        if self.timeout.is_some() {
            options.timeout_secs = self.timeout;
        }

        Ok(options)
    }

    pub fn create_client(&self) -> anyhow::Result<ScratchClient> {
        let options = self.control_plane_options()?;
        tracing::debug!(?options, "Control-plane options");
        Ok(ScratchClient::new(&options)?)
    }

    fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config {
            return Some(path.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(DEFAULT_CONFIG))
            .filter(|path| path.is_file())
    }
}
