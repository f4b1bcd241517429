//! repo-gemini: ask Gemini questions about a whole repository
//!
//! Concatenates every tracked text file of a project into one prompt, appends
//! an instruction and prints the model's answer.

use anyhow::Result;

fn main() -> Result<()> {
    repo_gemini::cli::run()
}
