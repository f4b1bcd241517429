//! Helpers shared by the subcommands

use anyhow::{Context, Result};
use clap::Args;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{load_env_file, load_settings, merge_cli_with_settings, CliOverrides, Settings};

/// Options controlling where settings are read from
#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Dotenv file holding GEMINI_API_KEY and FOLDER_PATH [default: ./.env]
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Path to a TOML config file [default: ./repo-gemini.toml if present]
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Load the env file, then layered settings, then apply CLI overrides.
///
/// A missing env file is fatal when `env_file_required` is set or when the
/// file was named explicitly.
pub fn resolve_settings(
    args: &SettingsArgs,
    overrides: CliOverrides,
    env_file_required: bool,
) -> Result<Settings> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let env_file = args.env_file.clone().unwrap_or_else(|| cwd.join(".env"));

    if args.env_file.is_some() || env_file_required || env_file.exists() {
        load_env_file(&env_file)?;
    } else {
        tracing::debug!("No env file at {}", env_file.display());
    }

    let settings = load_settings(&cwd, args.config.as_deref())?;
    Ok(merge_cli_with_settings(settings, overrides))
}

/// Prompt for and read one line of instruction text.
///
/// The trailing newline is kept. End of input yields whatever was read.
pub fn read_instruction<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<String> {
    write!(output, "Enter prompt: ")?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read prompt from stdin")?;
    if read == 0 {
        tracing::warn!("No prompt given on stdin; sending the project files alone");
    }
    Ok(line)
}

pub fn display_root(root: &Path) -> String {
    root.canonicalize().unwrap_or_else(|_| root.to_path_buf()).display().to_string()
}
