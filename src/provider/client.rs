//! OpenAI-compatible provider client
//!
//! Posts a streaming chat completion and exposes the server-sent events as a
//! lazy stream of text fragments.

use super::{ProviderConfig, SamplingConfig};
use crate::config::Credential;
use crate::error::RequestError;
use async_openai::types::ChatCompletionRequestMessage;
use async_stream::stream;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::{Duration, Instant};

/// One incremental delta of model output. `None` when a chunk carries no content.
pub type Fragment = Option<String>;

/// Lazy, finite, single-pass sequence of fragments
pub type ResponseStream = BoxStream<'static, Result<Fragment, RequestError>>;

/// Anything that can turn a message list into a fragment stream
#[async_trait]
pub trait CompletionRequester: Send + Sync {
    async fn request_completion(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
        sampling: &SamplingConfig,
    ) -> Result<ResponseStream, RequestError>;
}

#[derive(Debug, serde::Deserialize)]
struct StreamChunkDelta {
    content: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct StreamChoice {
    delta: StreamChunkDelta,
}

#[derive(Debug, serde::Deserialize)]
struct StreamErrorBody {
    message: String,
}

#[derive(Debug, serde::Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    error: Option<StreamErrorBody>,
}

/// A single decoded SSE line
#[derive(Debug, PartialEq)]
enum SseLine {
    Skip,
    Done,
    Fragment(Fragment),
}

fn parse_sse_line(line: &str) -> Result<SseLine, RequestError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(':') {
        return Ok(SseLine::Skip);
    }

    let Some(data) = line.strip_prefix("data:") else {
        // event:, id:, retry: fields carry nothing we use
        return Ok(SseLine::Skip);
    };
    let data = data.trim_start();

    if data == "[DONE]" {
        return Ok(SseLine::Done);
    }

    let chunk: StreamChunk = serde_json::from_str(data).map_err(|source| RequestError::Decode {
        line: data.to_string(),
        source,
    })?;

    if let Some(error) = chunk.error {
        return Err(RequestError::Stream(error.message));
    }

    let content = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content);
    Ok(SseLine::Fragment(content))
}

/// Handle bound to one provider and credential. Construction does no I/O.
#[derive(Clone)]
pub struct ProviderClient {
    config: ProviderConfig,
    credential: Credential,
    http_client: reqwest::Client,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig, credential: Credential) -> Result<Self, RequestError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .user_agent(concat!("groq-voice/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config,
            credential,
            http_client,
        })
    }
}

#[async_trait]
impl CompletionRequester for ProviderClient {
    async fn request_completion(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
        sampling: &SamplingConfig,
    ) -> Result<ResponseStream, RequestError> {
        let message_count = messages.len();
        let request = sampling.to_request(messages)?;

        let start = Instant::now();
        tracing::info!(
            target: "llm",
            provider = %self.config.name,
            model = %sampling.model,
            message_count,
            "Starting streaming completion"
        );

        let response = self
            .http_client
            .post(self.config.completions_url())
            .bearer_auth(self.credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(target: "llm", error = %e, "Completion request failed");
                RequestError::Http(e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(target: "llm", status = %status, error = %body, "Completion returned error");
            return Err(RequestError::Api { status, body });
        }

        let stream = stream! {
            let mut bytes = response.bytes_stream();
            let mut buffer: Vec<u8> = Vec::new();
            let mut fragments = 0usize;

            'read: loop {
                let next = bytes.next().await;
                let eof = next.is_none();
                match next {
                    Some(Ok(chunk)) => buffer.extend_from_slice(&chunk),
                    Some(Err(e)) => {
                        yield Err(RequestError::Http(e));
                        return;
                    }
                    None => buffer.push(b'\n'),
                }

                while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                    let raw: Vec<u8> = buffer.drain(..=pos).collect();
                    let line = String::from_utf8_lossy(&raw);
                    match parse_sse_line(&line) {
                        Ok(SseLine::Skip) => {}
                        Ok(SseLine::Done) => break 'read,
                        Ok(SseLine::Fragment(fragment)) => {
                            fragments += 1;
                            yield Ok(fragment);
                        }
                        Err(e) => {
                            tracing::debug!(target: "llm", error = %e, "Stream failed");
                            yield Err(e);
                            return;
                        }
                    }
                }

                if eof {
                    break;
                }
            }

            tracing::info!(
                target: "llm",
                fragments,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Streaming completion finished"
            );
        };

        Ok(Box::pin(stream))
    }
}
