//! LLM Provider layer
//!
//! OpenAI-compatible provider that handles streaming chat completions.

mod client;
mod config;

pub use client::*;
pub use config::*;
