//! Options for `create-scratch`.

use scratchlite_shared::constants::create_scratch as flags;
use scratchlite_shared::errors::{ScratchError, ScratchResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util::absolute_path_arg;

/// Options accepted by [`crate::ScratchClient::create_scratch_with_options`].
///
/// Every field at its default value means "let the control plane decide",
/// so `CreateScratchOptions::default()` behaves exactly like passing no
/// options at all.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateScratchOptions {
    /// Size of the scratch image in GB.
    ///
    /// Must be >= 0. Zero means the control plane's default size and is
    /// never sent on the wire.
    #[serde(default)]
    pub size_gb: i64,

    /// Existing scratch image to copy instead of creating a fresh one.
    ///
    /// Relative paths are resolved against the current working directory.
    /// An empty path is treated as unset.
    #[serde(default)]
    pub cache_file: Option<PathBuf>,

    /// Back the utility VM that creates the scratch with virtual memory.
    #[serde(default)]
    pub use_virtual_memory: bool,
}

impl CreateScratchOptions {
    /// Set the image size in GB.
    pub fn with_size_gb(mut self, size_gb: i64) -> Self {
        self.size_gb = size_gb;
        self
    }

    /// Set the cache file to copy from.
    pub fn with_cache_file(mut self, cache_file: impl Into<PathBuf>) -> Self {
        self.cache_file = Some(cache_file.into());
        self
    }

    /// Request a virtual-memory backed utility VM.
    pub fn with_virtual_memory(mut self, enabled: bool) -> Self {
        self.use_virtual_memory = enabled;
        self
    }

    /// Serialize the options into flag arguments.
    ///
    /// Flags always come out as size, cache path, virtual memory. Nothing is
    /// returned unless every option validates.
    pub fn args(&self) -> ScratchResult<Vec<String>> {
        let mut out = Vec::new();

        if self.size_gb < 0 {
            return Err(ScratchError::InvalidArgument(
                "sizeGB must be >= 0".to_string(),
            ));
        } else if self.size_gb > 0 {
            out.push(flags::SIZE_GB.to_string());
            out.push(self.size_gb.to_string());
        }

        if let Some(cache_file) = self
            .cache_file
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
        {
            out.push(flags::CACHE_PATH.to_string());
            out.push(absolute_path_arg(cache_file)?);
        }

        if self.use_virtual_memory {
            out.push(flags::USE_VIRTUAL_MEMORY.to_string());
        }

        Ok(out)
    }
}
