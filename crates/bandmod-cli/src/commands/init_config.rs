//! Write a default engine config.

use bandmod_config::{EngineConfig, default_config_path};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct InitConfigArgs {
    /// Destination file. Defaults to the user config path.
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(short, long)]
    force: bool,
}

pub fn run(args: InitConfigArgs) -> anyhow::Result<()> {
    let path = args.path.unwrap_or_else(default_config_path);
    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    EngineConfig::default().save(&path)?;
    tracing::info!(path = %path.display(), "wrote default config");
    println!("Wrote {}", path.display());
    Ok(())
}
