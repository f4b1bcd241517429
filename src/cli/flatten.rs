//! Flatten command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use super::utils::{display_root, resolve_settings, SettingsArgs};
use crate::config::CliOverrides;
use crate::flatten::flatten;
use crate::utils::format_with_commas;

#[derive(Args)]
pub struct FlattenArgs {
    /// Directory to flatten (overrides FOLDER_PATH)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Write the blob to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

pub fn run(args: FlattenArgs) -> Result<()> {
    let overrides = CliOverrides { folder_path: args.path.clone(), ..CliOverrides::default() };
    // The env file only matters here when it is the source of FOLDER_PATH.
    let settings = resolve_settings(&args.settings, overrides, args.path.is_none())?;
    let root = settings.require_folder_path()?.to_path_buf();

    tracing::info!("Flattening {}", display_root(&root));
    let blob = flatten(&root, |progress| eprintln!("{progress}"))?;

    match &args.output {
        Some(path) => fs::write(path, blob.as_str())
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(blob.as_str().as_bytes()).context("Failed to write blob")?;
            stdout.flush()?;
        }
    }

    eprintln!(
        "Flattened {} files ({} skipped), {} bytes",
        blob.included().len(),
        blob.skipped().len(),
        format_with_commas(blob.len() as u64)
    );
    Ok(())
}
