//! Scratchlite Shared - Common types for the scratch disk client and CLI
//!
//! This crate contains the error taxonomy and the wire constants of the
//! control-plane command line, used by both the library (scratchlite)
//! and the command-line front end.

pub mod constants;
pub mod errors;

pub use errors::{ScratchError, ScratchResult};
