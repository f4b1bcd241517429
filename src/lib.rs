//! repo-gemini: flatten a git repository into a single prompt for Gemini
//!
//! The [`flatten`] module turns the tracked text files of a repository into
//! one blob; the [`dispatch`] module sends that blob plus an instruction to
//! the Gemini API and returns the generated text.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod flatten;
pub mod utils;
