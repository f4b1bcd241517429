//! Ask command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

use super::utils::{display_root, read_instruction, resolve_settings, SettingsArgs};
use crate::config::CliOverrides;
use crate::dispatch::{build_prompt, send_prompt, GeminiClient};
use crate::flatten::flatten;

#[derive(Args)]
pub struct AskArgs {
    /// Directory to flatten (overrides FOLDER_PATH)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Instruction to send instead of reading one line from stdin
    #[arg(long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Gemini model name
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Gemini API base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

pub fn run(args: AskArgs) -> Result<()> {
    let overrides = CliOverrides {
        folder_path: args.path.clone(),
        model: args.model.clone(),
        timeout_secs: args.timeout,
        base_url: args.base_url.clone(),
    };
    let settings = resolve_settings(&args.settings, overrides, true)?;
    let root = settings.require_folder_path()?.to_path_buf();

    // Build the client first so a missing key fails before any work is done.
    let client = GeminiClient::new(settings.gemini_api_key.clone().unwrap_or_default())?
        .with_model(settings.model.as_str())
        .with_base_url(settings.base_url.as_str())
        .with_timeout(settings.timeout());

    tracing::info!("Flattening {} for model {}", display_root(&root), client.model());
    let blob = flatten(&root, |progress| println!("{progress}"))?;

    let instruction = match args.prompt {
        Some(prompt) => prompt,
        None => read_instruction(&mut io::stdin().lock(), &mut io::stdout())?,
    };

    let prompt = build_prompt(blob.as_str(), &instruction);
    println!("prompt has {} characters", prompt.len());

    let text = send_prompt(&prompt, &client)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes()).context("Failed to write response")?;
    if !text.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}
