//! Error types shared by both pipelines

use std::path::PathBuf;

use rustyline::error::ReadlineError;

/// Fatal errors surfaced at the top of each binary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Configuration(String),
    #[error(
        "El usuario no ha proporcionado una opción correcta hasta {attempts} veces. Programa terminado."
    )]
    TooManyInvalidAttempts { attempts: u32 },
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("could not read image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input error: {0}")]
    Input(#[from] ReadlineError),
    #[error("input interrupted")]
    Interrupted,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit status for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Configuration(_) => 1,
            Error::Request(_) => 2,
            Error::TooManyInvalidAttempts { .. } => 3,
            Error::Image { .. } => 4,
            Error::Input(_) | Error::Io(_) => 5,
            Error::Interrupted => 130,
        }
    }
}

/// Failures talking to the completion API.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("API stream error: {0}")]
    Stream(String),
    #[error("failed to decode stream chunk `{line}`: {source}")]
    Decode {
        line: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to build request: {0}")]
    Build(#[from] async_openai::error::OpenAIError),
}

/// Failures launching the platform audio player.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error("no audio player found on this system")]
    NoPlayer,
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    ExitStatus {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// Failures turning text into audio. Never fatal.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("No text to speak")]
    EmptyText,
    #[error("TTS request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("TTS service returned {status}")]
    Status { status: reqwest::StatusCode },
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
