use async_openai::error::{ApiError, OpenAIError};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use svg_forge::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatCompletionResponse, Choice, LlmClient},
};

/// Mock LLM client for testing
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<ChatCompletionResponse>>>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    pub error: Option<String>,
    pub provider_error: Option<String>,
    pub model_init_error: bool,
    pub delay: Option<Duration>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, text: &str) -> Self {
        self.add_response(create_mock_response(text));
        self
    }

    pub fn with_response(self, response: ChatCompletionResponse) -> Self {
        self.add_response(response);
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    /// Fail every call the way the provider rejects a request.
    pub fn with_provider_error(mut self, message: &str) -> Self {
        self.provider_error = Some(message.to_string());
        self
    }

    pub fn with_model_init_error(mut self) -> Self {
        self.model_init_error = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn add_response(&self, response: ChatCompletionResponse) {
        self.responses.lock().unwrap().push(response);
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.model_init_error {
            return Err(Error::ModelInit { model });
        }

        if let Some(ref message) = self.provider_error {
            return Err(Error::OpenAi(OpenAIError::ApiError(ApiError {
                message: message.clone(),
                r#type: Some("invalid_request_error".to_string()),
                param: None,
                code: None,
            })));
        }

        if let Some(ref error) = self.error {
            return Err(Error::internal(error.clone()));
        }

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::internal("No more mock responses available"));
        }

        Ok(responses.remove(0))
    }
}

/// Single-choice response carrying `text`.
pub fn create_mock_response(text: &str) -> ChatCompletionResponse {
    create_mock_response_with_finish(text, "Stop")
}

pub fn create_mock_response_with_finish(
    text: &str,
    finish_reason: &str,
) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "resp-test".to_string(),
        model: "mock-model".to_string(),
        choices: vec![Choice {
            index: 0,
            content: text.to_string(),
            finish_reason: Some(finish_reason.to_string()),
        }],
        usage: None,
    }
}
