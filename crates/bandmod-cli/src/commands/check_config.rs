//! Validate an engine config file.

use bandmod_config::EngineConfig;
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckConfigArgs {
    /// Config file to check
    #[arg(value_name = "PATH")]
    path: PathBuf,
}

pub fn run(args: CheckConfigArgs) -> anyhow::Result<()> {
    let config = EngineConfig::load(&args.path)?;

    match config.validate() {
        Ok(()) => {
            println!("{}: OK ({}, routing {})", args.path.display(), config.name, config.routing);
            Ok(())
        }
        Err(e) => {
            let violations = e.errors();
            for violation in &violations {
                println!("  {violation}");
            }
            anyhow::bail!(
                "{}: {} parameter(s) out of range",
                args.path.display(),
                violations.len()
            )
        }
    }
}
