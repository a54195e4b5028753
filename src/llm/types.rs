use crate::prompt::{PromptPayload, PromptSegment};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
    ImageUrlArgs,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub payload: PromptPayload,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub index: u32,
    pub content: String,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl ChatCompletionResponse {
    /// Content of the first choice that has any non-blank text.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .iter()
            .map(|choice| choice.content.as_str())
            .find(|content| !content.trim().is_empty())
    }

    /// Whether the provider stopped a choice for safety reasons.
    pub fn was_blocked(&self) -> bool {
        self.choices.iter().any(|choice| {
            choice
                .finish_reason
                .as_deref()
                .is_some_and(|reason| reason.to_ascii_lowercase().contains("filter"))
        })
    }
}

impl ChatCompletionRequest {
    /// Maps the payload to a single user message with ordered content parts.
    /// Adjacent text segments are joined with newlines.
    pub fn to_openai_message(&self) -> Result<ChatCompletionRequestMessage, crate::Error> {
        let mut parts: Vec<ChatCompletionRequestUserMessageContentPart> = Vec::new();
        let mut pending_text: Vec<&str> = Vec::new();

        for segment in self.payload.segments() {
            match segment {
                PromptSegment::Text(text) => pending_text.push(text),
                PromptSegment::Image(image) => {
                    flush_text(&mut parts, &mut pending_text)?;
                    let image_url = ImageUrlArgs::default().url(image.to_data_url()).build()?;
                    let part = ChatCompletionRequestMessageContentPartImageArgs::default()
                        .image_url(image_url)
                        .build()?;
                    parts.push(ChatCompletionRequestUserMessageContentPart::ImageUrl(part));
                }
            }
        }
        flush_text(&mut parts, &mut pending_text)?;

        if parts.is_empty() {
            return Err(crate::Error::internal("Prompt payload is empty"));
        }

        let msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(parts))
            .build()
            .map_err(|e| crate::Error::internal(format!("Failed to build user message: {}", e)))?;
        Ok(msg.into())
    }
}

fn flush_text(
    parts: &mut Vec<ChatCompletionRequestUserMessageContentPart>,
    pending: &mut Vec<&str>,
) -> Result<(), crate::Error> {
    if pending.is_empty() {
        return Ok(());
    }
    let part = ChatCompletionRequestMessageContentPartTextArgs::default()
        .text(pending.join("\n"))
        .build()?;
    parts.push(ChatCompletionRequestUserMessageContentPart::Text(part));
    pending.clear();
    Ok(())
}
