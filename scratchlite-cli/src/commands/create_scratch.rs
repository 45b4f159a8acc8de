use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use scratchlite::{CancellationToken, CreateScratchOptions};

#[derive(Args, Debug)]
pub struct CreateScratchArgs {
    /// Where the scratch vhdx is written (passed through unchanged)
    #[arg(value_name = "DESTPATH")]
    pub dest_path: String,

    /// Image size in GB (0 = control-plane default)
    #[arg(long = "size-gb", default_value_t = 0, allow_negative_numbers = true)]
    pub size_gb: i64,

    /// Existing scratch image to copy instead of creating one
    #[arg(long = "cache-path", value_name = "PATH")]
    pub cache_path: Option<PathBuf>,

    /// Back the utility VM with virtual memory
    #[arg(long)]
    pub use_virtual_memory: bool,
}

impl CreateScratchArgs {
    fn to_options(&self) -> CreateScratchOptions {
        CreateScratchOptions {
            size_gb: self.size_gb,
            cache_file: self.cache_path.clone(),
            use_virtual_memory: self.use_virtual_memory,
        }
    }
}

pub async fn execute(
    args: CreateScratchArgs,
    global: &crate::cli::GlobalFlags,
) -> anyhow::Result<()> {
    let client = global.create_client()?;

    // Ctrl-C stops the control plane instead of orphaning it
    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    let opts = args.to_options();
    client
        .create_scratch_with_options(&cancel, &args.dest_path, Some(&opts))
        .await
        .with_context(|| format!("Failed to create scratch at {}", args.dest_path))?;

    println!("{}", args.dest_path);
    Ok(())
}
