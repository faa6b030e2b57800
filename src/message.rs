//! Request message construction for both pipelines

use crate::error::RequestError;
use crate::input::ImageReference;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs,
};

pub const SYSTEM_PROMPT: &str = "you are a helpful assistant.";

/// System framing plus the user's question.
pub fn text_messages(prompt: &str) -> Result<Vec<ChatCompletionRequestMessage>, RequestError> {
    let system = ChatCompletionRequestSystemMessageArgs::default()
        .content(SYSTEM_PROMPT)
        .build()?;
    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(prompt)
        .build()?;

    Ok(vec![system.into(), user.into()])
}

/// Empty assistant framing, then one user message carrying a text part and an
/// image part.
pub fn vision_messages(
    prompt: &str,
    image: &ImageReference,
) -> Result<Vec<ChatCompletionRequestMessage>, RequestError> {
    let assistant = ChatCompletionRequestAssistantMessageArgs::default()
        .content("")
        .build()?;

    let parts: Vec<ChatCompletionRequestUserMessageContentPart> = vec![
        ChatCompletionRequestMessageContentPartTextArgs::default()
            .text(prompt)
            .build()?
            .into(),
        ChatCompletionRequestMessageContentPartImageArgs::default()
            .image_url(ImageUrlArgs::default().url(image.as_url()).build()?)
            .build()?
            .into(),
    ];
    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(parts)
        .build()?;

    Ok(vec![assistant.into(), user.into()])
}
