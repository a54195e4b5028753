use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_openai::{Client, config::OpenAIConfig, error::OpenAIError, types as openai_types};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;
}

/// Client for any OpenAI-compatible chat endpoint, Gemini's included.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config
            .credential()
            .ok_or(Error::NotConfigured)?
            .to_string();

        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url.trim_end_matches('/'));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let client = Client::with_config(openai_config).with_http_client(http_client);

        Ok(Self { client })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        if request.model.trim().is_empty() {
            return Err(Error::ModelInit {
                model: request.model,
            });
        }

        debug!(
            "Creating chat completion with {} prompt segments ({} images) for model {}",
            request.payload.len(),
            request.payload.image_count(),
            request.model
        );

        let message = request.to_openai_message()?;

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder.model(&request.model).messages(vec![message]);

        if let Some(temperature) = request.temperature {
            request_builder.temperature(temperature);
        }

        if let Some(max_tokens) = request.max_tokens {
            request_builder.max_completion_tokens(max_tokens);
        }

        let openai_request = request_builder.build()?;

        let response = self
            .client
            .chat()
            .create(openai_request)
            .await
            .map_err(|e| map_provider_error(e, &request.model))?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let choices = response
            .choices
            .into_iter()
            .map(|choice| Choice {
                index: choice.index,
                content: choice.message.content.unwrap_or_default(),
                finish_reason: choice.finish_reason.map(|fr| format!("{fr:?}")),
            })
            .collect();

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ChatCompletionResponse {
            id: response.id,
            model: response.model,
            choices,
            usage,
        })
    }
}

/// Unknown model identifiers become `ModelInit`; everything else stays a
/// provider error.
fn map_provider_error(error: OpenAIError, model: &str) -> Error {
    match &error {
        OpenAIError::ApiError(api_error) => {
            let code = api_error.code.as_deref().unwrap_or_default();
            let message = api_error.message.to_ascii_lowercase();
            if code == "model_not_found"
                || (message.contains("model") && message.contains("not found"))
            {
                Error::ModelInit {
                    model: model.to_string(),
                }
            } else {
                Error::OpenAi(error)
            }
        }
        _ => Error::OpenAi(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_openai::error::ApiError;

    fn create_test_config() -> LlmConfig {
        LlmConfig {
            api_key: Some("test-api-key".to_string()),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_openai_client_creation() {
        assert!(OpenAiClient::new(&create_test_config()).is_ok());
    }

    #[test]
    fn test_openai_client_without_credential() {
        let config = LlmConfig::default();
        assert!(matches!(
            OpenAiClient::new(&config),
            Err(Error::NotConfigured)
        ));
    }

    #[test]
    fn test_model_not_found_maps_to_model_init() {
        let error = OpenAIError::ApiError(ApiError {
            message: "models/gemini-nope is not found for API version v1beta".to_string(),
            r#type: None,
            param: None,
            code: None,
        });
        assert!(matches!(
            map_provider_error(error, "gemini-nope"),
            Error::ModelInit { model } if model == "gemini-nope"
        ));
    }

    #[test]
    fn test_other_api_errors_pass_through() {
        let error = OpenAIError::ApiError(ApiError {
            message: "API key not valid. Please pass a valid API key.".to_string(),
            r#type: Some("invalid_request_error".to_string()),
            param: None,
            code: Some("invalid_api_key".to_string()),
        });
        assert!(matches!(map_provider_error(error, "m"), Error::OpenAi(_)));
    }
}
