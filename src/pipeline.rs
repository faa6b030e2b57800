//! The two end-to-end flows
//!
//! Each run is one prompt, one streaming request and one answer. Every
//! collaborator is borrowed as a trait object so the binaries can plug in the
//! real network clients and tests can plug in fakes.

use crate::error::Result;
use crate::input::{self, ImageReference, LanguageCode, Prompter};
use crate::message;
use crate::playback::AudioPlayer;
use crate::present::{self, TEXT_DELIMITER};
use crate::provider::{CompletionRequester, SamplingConfig};
use crate::speech::{self, AudioArtifact, SpeechOptions, SpeechSynthesizer};
use std::io::Write;

pub const TEXT_MODEL_LABEL: &str = "Llama 3.3-70B-Text";
pub const VISION_MODEL_LABEL: &str = "Llama 3.2-90B-Visión";

/// What a finished text run produced
#[derive(Debug)]
pub struct TextOutcome {
    pub answer: String,
    pub language: LanguageCode,
    /// `None` when speech failed; the failure was already reported
    pub audio: Option<AudioArtifact>,
}

/// Prompt → buffered answer → speech
pub struct TextPipeline<'a> {
    pub requester: &'a dyn CompletionRequester,
    pub synthesizer: &'a dyn SpeechSynthesizer,
    pub player: &'a dyn AudioPlayer,
    pub sampling: SamplingConfig,
    pub speech: SpeechOptions,
}

impl TextPipeline<'_> {
    pub async fn run(&self, prompter: &mut dyn Prompter, out: &mut dyn Write) -> Result<TextOutcome> {
        writeln!(out)?;
        out.flush()?;
        let prompt = input::read_prompt(prompter, TEXT_MODEL_LABEL)?;
        let language = input::read_language_choice(prompter)?;

        writeln!(out, "Generando respuesta en texto...\n")?;
        writeln!(out, "{}", TEXT_DELIMITER)?;
        out.flush()?;

        let stream = self
            .requester
            .request_completion(message::text_messages(&prompt)?, &self.sampling)
            .await?;
        let answer = present::accumulate(stream).await?;
        tracing::debug!(chars = answer.chars().count(), "Answer complete");

        present::print_answer(out, &answer)?;
        writeln!(out, "Generando respuesta en audio...")?;
        out.flush()?;

        let audio = speech::speak(
            self.synthesizer,
            self.player,
            &answer,
            language,
            &self.speech,
            out,
        )
        .await;

        Ok(TextOutcome {
            answer,
            language,
            audio,
        })
    }
}

/// Prompt + image → answer echoed as it streams
pub struct VisionPipeline<'a> {
    pub requester: &'a dyn CompletionRequester,
    pub sampling: SamplingConfig,
}

impl VisionPipeline<'_> {
    /// Returns the image that was sent.
    pub async fn run(
        &self,
        prompter: &mut dyn Prompter,
        out: &mut dyn Write,
    ) -> Result<ImageReference> {
        writeln!(out)?;
        out.flush()?;
        let prompt = input::read_prompt(prompter, VISION_MODEL_LABEL)?;
        let image = input::read_image_reference(prompter, out)?;

        let stream = self
            .requester
            .request_completion(message::vision_messages(&prompt, &image)?, &self.sampling)
            .await?;
        present::present_incremental(stream, out).await?;

        Ok(image)
    }
}
