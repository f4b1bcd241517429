//! Prompt dispatch
//!
//! Builds the final prompt from the flattened blob and the user instruction,
//! sends it to a generation service in a single attempt and relays the text
//! of every returned candidate.

use thiserror::Error;

use crate::domain::{GenerationResponse, PROMPT_PREAMBLE};

pub mod gemini;

pub use gemini::GeminiClient;

/// Errors raised while talking to the generation service
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The API key is missing, or the service rejected it.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The request could not be completed.
    #[error("generation request failed: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The service answered without any candidate.
    #[error("no candidates found in response{}", blocked_suffix(.block_reason))]
    EmptyResponse { block_reason: Option<String> },
}

impl DispatchError {
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        DispatchError::Transport { message: message.into(), source: None }
    }
}

fn blocked_suffix(block_reason: &Option<String>) -> String {
    block_reason.as_deref().map(|r| format!(" (prompt blocked: {r})")).unwrap_or_default()
}

/// A service that turns a prompt into generated candidates.
pub trait GenerationClient {
    fn generate(&self, prompt: &str) -> Result<GenerationResponse, DispatchError>;
}

/// Assemble the prompt: preamble, then the blob, then the instruction.
pub fn build_prompt(blob: &str, instruction: &str) -> String {
    let capacity = PROMPT_PREAMBLE.len() + blob.len() + 1 + instruction.len();
    let mut prompt = String::with_capacity(capacity);
    prompt.push_str(PROMPT_PREAMBLE);
    prompt.push_str(blob);
    prompt.push('\n');
    prompt.push_str(instruction);
    prompt
}

/// Send an already-built prompt and concatenate the candidate texts.
pub fn send_prompt<C>(prompt: &str, client: &C) -> Result<String, DispatchError>
where
    C: GenerationClient + ?Sized,
{
    let response = client.generate(prompt)?;
    if response.candidates.is_empty() {
        return Err(DispatchError::EmptyResponse { block_reason: response.block_reason });
    }

    tracing::debug!("Received {} candidates", response.candidates.len());
    for (index, candidate) in response.candidates.iter().enumerate() {
        let reason = candidate.finish_reason.as_deref().unwrap_or("unspecified");
        tracing::debug!("Candidate {} finished: {}", index, reason);
    }
    Ok(response.candidates.into_iter().map(|c| c.text).collect())
}

/// Build the prompt for `instruction` over `blob` and dispatch it.
pub fn dispatch<C>(instruction: &str, blob: &str, client: &C) -> Result<String, DispatchError>
where
    C: GenerationClient + ?Sized,
{
    let prompt = build_prompt(blob, instruction);
    send_prompt(&prompt, client)
}
