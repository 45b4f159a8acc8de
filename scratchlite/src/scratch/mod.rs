//! Scratch disk request translation.
//!
//! This module turns a destination path and optional
//! [`CreateScratchOptions`] into the argument list of the control plane's
//! `create-scratch` command.

mod options;

pub use options::CreateScratchOptions;

use scratchlite_shared::constants::create_scratch as flags;
use scratchlite_shared::errors::ScratchResult;

/// Build the full `create-scratch` argument list.
///
/// `None` and `Some(&CreateScratchOptions::default())` produce identical
/// output. On error no arguments are returned.
pub fn create_scratch_args(
    dest_path: &str,
    opts: Option<&CreateScratchOptions>,
) -> ScratchResult<Vec<String>> {
    let mut args = vec![
        flags::COMMAND.to_string(),
        flags::DEST_PATH.to_string(),
        dest_path.to_string(),
    ];

    if let Some(opts) = opts {
        args.extend(opts.args()?);
    }

    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scratchlite_shared::ScratchError;

    #[test]
    fn test_no_options() {
        let args = create_scratch_args("/tmp/x.vhdx", None).unwrap();
        assert_eq!(args, vec!["create-scratch", "--destpath", "/tmp/x.vhdx"]);
    }

    #[test]
    fn test_default_options_match_none() {
        let none = create_scratch_args("/tmp/x.vhdx", None).unwrap();
        let default =
            create_scratch_args("/tmp/x.vhdx", Some(&CreateScratchOptions::default())).unwrap();
        assert_eq!(none, default);
    }

    #[test]
    fn test_size_and_virtual_memory() {
        let opts = CreateScratchOptions::default()
            .with_size_gb(20)
            .with_virtual_memory(true);
        let args = create_scratch_args("/d/scratch.vhdx", Some(&opts)).unwrap();
        assert_eq!(
            args,
            vec![
                "create-scratch",
                "--destpath",
                "/d/scratch.vhdx",
                "--sizeGB",
                "20",
                "--use-virtual-memory",
            ]
        );
    }

    #[test]
    fn test_invalid_size_discards_everything() {
        let opts = CreateScratchOptions::default()
            .with_size_gb(-1)
            .with_virtual_memory(true);
        let err = create_scratch_args("/d/scratch.vhdx", Some(&opts)).unwrap_err();
        assert!(matches!(err, ScratchError::InvalidArgument(_)));
    }

    #[test]
    fn test_dest_path_is_passed_verbatim() {
        let args = create_scratch_args("relative/scratch.vhdx", None).unwrap();
        assert_eq!(args[2], "relative/scratch.vhdx");
    }
}
