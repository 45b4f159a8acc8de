//! Control-plane wire constants
//!
//! These constants must match the flags understood by the control-plane
//! executable. Changing any of them breaks compatibility with it.

/// `create-scratch` command tokens
pub mod create_scratch {
    /// Command name, always the first token after global flags
    pub const COMMAND: &str = "create-scratch";

    /// Destination path flag (always present)
    pub const DEST_PATH: &str = "--destpath";

    /// Image size in GB. Omitted when the size is 0.
    pub const SIZE_GB: &str = "--sizeGB";

    /// Absolute path of a template scratch image to copy
    pub const CACHE_PATH: &str = "--cache-path";

    /// Presence flag: back the utility VM with virtual memory
    pub const USE_VIRTUAL_MEMORY: &str = "--use-virtual-memory";
}

/// Global flags accepted before any command
pub mod global {
    pub const DEBUG: &str = "--debug";
    pub const LOG: &str = "--log";
    pub const LOG_FORMAT: &str = "--log-format";
    pub const OWNER: &str = "--owner";
    pub const ROOT: &str = "--root";
}

/// Control-plane binary discovery
pub mod binary {
    /// Default control-plane executable name
    #[cfg(windows)]
    pub const DEFAULT_NAME: &str = "runhcs.exe";

    /// Default control-plane executable name
    #[cfg(not(windows))]
    pub const DEFAULT_NAME: &str = "runhcs";

    /// Directory searched before `PATH`
    pub const RUNTIME_DIR_ENV: &str = "SCRATCHLITE_RUNTIME_DIR";
}
