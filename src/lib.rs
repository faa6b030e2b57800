//! Groq Voice - streaming Groq completions from the terminal
//!
//! This crate provides:
//! - Credential loading from the environment or a `.env` file
//! - A streaming OpenAI-compatible completion client
//! - The text pipeline (answer, then speech) and the vision pipeline
//!   (prompt plus image, answer echoed as it streams)

pub mod config;
pub mod error;
pub mod input;
pub mod message;
pub mod pipeline;
pub mod playback;
pub mod present;
pub mod provider;
pub mod retry;
pub mod speech;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use config::{load_credential, Credential, TelemetryConfig, CREDENTIAL_ENV};
pub use error::{Error, PlaybackError, RequestError, Result, SynthesisError};
pub use input::{ImageReference, LanguageCode, Prompter, RustylinePrompter};
pub use pipeline::{TextOutcome, TextPipeline, VisionPipeline};
pub use playback::{AudioPlayer, NoPlayback, SystemPlayer};
pub use provider::{
    CompletionRequester, Fragment, ProviderClient, ProviderConfig, ResponseStream, SamplingConfig,
};
pub use speech::{AudioArtifact, GoogleTts, SpeechOptions, SpeechSynthesizer};
pub use telemetry::Telemetry;
