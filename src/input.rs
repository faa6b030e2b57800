//! Interactive input collection

use crate::error::{Error, Result};
use crate::retry::{Attempts, Outcome};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use std::path::Path;

/// MIME marker prepended to inline images
pub const INLINE_IMAGE_PREFIX: &str = "data:image/jpeg;base64,";

/// Invalid image-mode answers tolerated before giving up
pub const MAX_MODE_ATTEMPTS: u32 = 3;

/// Source of interactive answers
pub trait Prompter {
    /// Show `prompt` and block until the user answers
    fn ask(&mut self, prompt: &str) -> Result<String>;
}

/// Terminal prompter backed by rustyline
pub struct RustylinePrompter {
    editor: DefaultEditor,
}

impl RustylinePrompter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Prompter for RustylinePrompter {
    fn ask(&mut self, prompt: &str) -> Result<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Err(Error::Interrupted),
            Err(e) => Err(e.into()),
        }
    }
}

/// Spoken language for the synthesized answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCode {
    Es,
    En,
}

impl LanguageCode {
    /// Exactly "es" (ignoring case and surrounding space) is Spanish; anything
    /// else falls back to English.
    pub fn from_choice(choice: &str) -> Self {
        if choice.trim().eq_ignore_ascii_case("es") {
            LanguageCode::Es
        } else {
            LanguageCode::En
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Es => "es",
            LanguageCode::En => "en",
        }
    }
}

/// Image passed alongside the vision prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    RemoteUrl(String),
    /// `data:image/jpeg;base64,...`
    InlineEncoded(String),
}

impl ImageReference {
    /// Value for the request's `image_url.url` field
    pub fn as_url(&self) -> &str {
        match self {
            ImageReference::RemoteUrl(url) => url,
            ImageReference::InlineEncoded(data) => data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageMode {
    Url,
    Path,
}

impl ImageMode {
    fn parse(raw: &str) -> Option<Self> {
        let choice = raw.trim().trim_matches('\'').trim().to_lowercase();
        match choice.as_str() {
            "url" => Some(ImageMode::Url),
            "ruta" | "path" => Some(ImageMode::Path),
            _ => None,
        }
    }
}

pub fn read_prompt(prompter: &mut dyn Prompter, model_label: &str) -> Result<String> {
    prompter.ask(&format!("¿Qué le quieres preguntar a {}?: ", model_label))
}

pub fn read_language_choice(prompter: &mut dyn Prompter) -> Result<LanguageCode> {
    let choice =
        prompter.ask("¿Quieres la respuesta en voz española (es) o inglesa (en)?: ")?;
    Ok(LanguageCode::from_choice(&choice))
}

/// Ask for a remote URL or a local file, allowing [`MAX_MODE_ATTEMPTS`]
/// invalid mode answers.
pub fn read_image_reference(
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<ImageReference> {
    let mut notice_error: Option<std::io::Error> = None;

    let outcome = Attempts::new(MAX_MODE_ATTEMPTS).run(
        |_| -> Result<Option<ImageReference>> {
            let answer = prompter.ask(
                "Tipea 'url' si quieres usar un link de internet o 'ruta' si quieres subir una imagen desde tu dispositivo: ",
            )?;

            match ImageMode::parse(&answer) {
                Some(ImageMode::Url) => {
                    let url = prompter.ask("Ingresa la url de tu imagen: ")?;
                    Ok(Some(ImageReference::RemoteUrl(url)))
                }
                Some(ImageMode::Path) => {
                    let raw = prompter.ask("Ingresa la ruta completa de tu imagen: ")?;
                    let path = raw.trim().trim_matches('"');
                    Ok(Some(ImageReference::InlineEncoded(encode_image_file(
                        Path::new(path),
                    )?)))
                }
                None => {
                    tracing::debug!(answer = %answer, "Invalid image mode");
                    Ok(None)
                }
            }
        },
        |_remaining| {
            if let Err(e) = writeln!(out, "Opción no válida") {
                if notice_error.is_none() {
                    notice_error = Some(e);
                }
            }
        },
    )?;

    if let Some(e) = notice_error {
        return Err(e.into());
    }

    match outcome {
        Outcome::Accepted(image) => Ok(image),
        Outcome::Exhausted { attempts } => Err(Error::TooManyInvalidAttempts { attempts }),
    }
}

/// Base64 data URI for raw image bytes
pub fn encode_image(bytes: &[u8]) -> String {
    format!("{}{}", INLINE_IMAGE_PREFIX, STANDARD.encode(bytes))
}

pub fn encode_image_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| Error::Image {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Encoded local image");
    Ok(encode_image(&bytes))
}
