//! Text-to-speech for the text pipeline
//!
//! Synthesis goes through Google Translate's public TTS endpoint, which only
//! accepts short snippets, so long answers are split into chunks whose MP3
//! bodies are concatenated into one file.

use crate::error::SynthesisError;
use crate::input::LanguageCode;
use crate::playback::AudioPlayer;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TTS_URL: &str = "https://translate.google.com";

/// Per-call synthesis settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechOptions {
    /// Longest snippet sent in one request
    pub max_chars: usize,
    /// Where the audio is written; replaced on every run
    pub output_path: PathBuf,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            max_chars: 200,
            output_path: PathBuf::from("response.mp3"),
        }
    }
}

impl SpeechOptions {
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

/// Audio written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub bytes: usize,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
        options: &SpeechOptions,
    ) -> Result<AudioArtifact, SynthesisError>;
}

/// Split `text` into snippets of at most `max_chars` characters.
///
/// Sentence-ending punctuation always closes a snippet. Words are never
/// broken unless a single word is longer than `max_chars`.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    fn flush(chunks: &mut Vec<String>, current: &mut String, current_len: &mut usize) {
        if !current.is_empty() {
            chunks.push(std::mem::take(current));
        }
        *current_len = 0;
    }

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            flush(&mut chunks, &mut current, &mut current_len);
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            flush(&mut chunks, &mut current, &mut current_len);
        }

        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;

        if word.ends_with(['.', '!', '?', ';', ':']) {
            flush(&mut chunks, &mut current, &mut current_len);
        }
    }

    flush(&mut chunks, &mut current, &mut current_len);
    chunks
}

/// Google Translate TTS client
#[derive(Clone)]
pub struct GoogleTts {
    http_client: reqwest::Client,
    base_url: String,
}

impl GoogleTts {
    pub fn new() -> Result<Self, SynthesisError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36")
            .build()?;

        Ok(Self {
            http_client,
            base_url: DEFAULT_TTS_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        idx: usize,
        total: usize,
        language: LanguageCode,
    ) -> Result<Vec<u8>, SynthesisError> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .http_client
            .get(format!("{}/translate_tts", self.base_url))
            .header("Referer", "https://translate.google.com/")
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language.as_str()),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SynthesisError::Status {
                status: response.status(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
        options: &SpeechOptions,
    ) -> Result<AudioArtifact, SynthesisError> {
        let chunks = split_text(text, options.max_chars);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        tracing::info!(
            target: "tts",
            language = language.as_str(),
            chunks = chunks.len(),
            "Synthesizing speech"
        );

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let part = self.fetch_chunk(chunk, idx, chunks.len(), language).await?;
            tracing::debug!(target: "tts", idx, bytes = part.len(), "Fetched audio chunk");
            audio.extend_from_slice(&part);
        }

        tokio::fs::write(&options.output_path, &audio)
            .await
            .map_err(|source| SynthesisError::Write {
                path: options.output_path.clone(),
                source,
            })?;

        Ok(AudioArtifact {
            path: options.output_path.clone(),
            bytes: audio.len(),
        })
    }
}

/// Synthesize and play `text`. Failures are reported on `out` and swallowed:
/// the answer has already been shown, so speech is best-effort.
pub async fn speak(
    synthesizer: &dyn SpeechSynthesizer,
    player: &dyn AudioPlayer,
    text: &str,
    language: LanguageCode,
    options: &SpeechOptions,
    out: &mut dyn Write,
) -> Option<AudioArtifact> {
    let result = async {
        let artifact = synthesizer.synthesize(text, language, options).await?;
        let _ = writeln!(
            out,
            "Audio guardado como {}. Reproduciendo...\n",
            artifact.path.display()
        );
        let _ = out.flush();
        player.play(&artifact.path).await?;
        Ok::<_, SynthesisError>(artifact)
    }
    .await;

    match result {
        Ok(artifact) => Some(artifact),
        Err(e) => {
            tracing::debug!(target: "tts", error = %e, "Speech synthesis failed");
            let _ = writeln!(out, "Error al convertir texto a voz: {}", e);
            None
        }
    }
}
