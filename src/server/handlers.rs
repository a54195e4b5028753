use super::types::{
    AnalyzeImageRequest, ConvertToSvgRequest, ErrorResponse, GenerateRequest, RefineSvgRequest,
    SvgResponse,
};
use crate::{
    Error, Result,
    config::LlmConfig,
    extract::{AnalysisResult, extract_analysis_sections, extract_svg},
    llm::{ChatCompletionRequest, LlmClient, OpenAiClient},
    prompt::{
        EmbeddedImage, PreviewImage, PromptPayload, build_analysis_prompt,
        build_generation_prompt, build_recreation_prompt, build_refinement_prompt,
    },
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use std::{fmt, sync::Arc, time::Duration};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Slider value used by `/generate` when the request omits one.
const DEFAULT_SLIDER_REQUEST: i64 = 5;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    /// `None` when no credential was configured at startup.
    pub llm: Option<Arc<dyn LlmClient>>,
    pub config: Arc<LlmConfig>,
}

impl AppState {
    pub fn new(llm: Option<Arc<dyn LlmClient>>, config: LlmConfig) -> Self {
        Self {
            llm,
            config: Arc::new(config),
        }
    }

    /// Builds the production client when a credential is present.
    pub fn from_config(config: LlmConfig) -> Result<Self> {
        let llm: Option<Arc<dyn LlmClient>> = match config.credential() {
            Some(_) => Some(Arc::new(OpenAiClient::new(&config)?)),
            None => {
                warn!("Google AI API key not found. AI features will be disabled.");
                None
            }
        };
        Ok(Self::new(llm, config))
    }

    fn client(&self) -> Result<&Arc<dyn LlmClient>> {
        self.llm.as_ref().ok_or(Error::NotConfigured)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Generation,
    Analysis,
    Recreation,
    Refinement,
}

impl Task {
    fn empty_message(self) -> &'static str {
        match self {
            Self::Generation => "AI generation failed. Response was empty or blocked.",
            Self::Analysis => "AI analysis failed. Response was empty or blocked.",
            Self::Recreation => {
                "AI generation failed during SVG recreation. Response was empty or blocked."
            }
            Self::Refinement => {
                "AI generation failed during SVG refinement. Response was empty or blocked."
            }
        }
    }

    fn extraction_message(self) -> &'static str {
        match self {
            Self::Refinement => "Failed to extract valid SVG code from refinement response.",
            _ => "Failed to extract valid SVG code from AI response.",
        }
    }

    fn internal_message(self) -> &'static str {
        match self {
            Self::Generation => "An internal error occurred during SVG generation.",
            Self::Analysis => "An internal error occurred during image analysis.",
            Self::Recreation => "An internal error occurred during SVG recreation.",
            Self::Refinement => "An internal error occurred during SVG refinement.",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Generation => "SVG generation",
            Self::Analysis => "image analysis",
            Self::Recreation => "SVG recreation",
            Self::Refinement => "SVG refinement",
        };
        f.write_str(name)
    }
}

fn error_response(task: Task, request_id: Uuid, err: Error) -> ApiError {
    let status = err.status_code();
    if status.is_server_error() {
        error!("Error during {} (request {}): {}", task, request_id, err);
    } else {
        info!("Rejected {} request {}: {}", task, request_id, err);
    }

    let message = err
        .public_message()
        .unwrap_or_else(|| task.internal_message().to_string());
    (status, Json(ErrorResponse { error: message }))
}

fn parse_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(request)| request).map_err(|rejection| {
        debug!("Rejected request body: {}", rejection);
        Error::invalid_input("Request must be JSON")
    })
}

fn required_field(value: Option<String>, name: &str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::invalid_input(format!("Missing '{}' in request", name)))
}

/// Sends the payload to the model and returns its first non-blank text.
async fn complete(
    state: &AppState,
    task: Task,
    model: String,
    payload: PromptPayload,
    temperature: Option<f32>,
) -> Result<String> {
    let client = state.client()?;
    let request = ChatCompletionRequest {
        model,
        payload,
        max_tokens: state.config.max_tokens,
        temperature,
    };

    let timeout = Duration::from_secs(state.config.timeout_secs);
    let response = tokio::time::timeout(timeout, client.create_chat_completion(request))
        .await
        .map_err(|_| {
            Error::generation(format!(
                "AI request timed out after {} seconds.",
                timeout.as_secs()
            ))
        })??;

    match response.first_text() {
        Some(text) => {
            debug!("Raw model response for {}: {}", task, text);
            Ok(text.to_string())
        }
        None if task == Task::Analysis && response.was_blocked() => Err(Error::generation(
            "Analysis request was blocked due to safety concerns.",
        )),
        None => Err(Error::generation(task.empty_message())),
    }
}

async fn complete_svg(
    state: &AppState,
    task: Task,
    model: String,
    payload: PromptPayload,
) -> Result<String> {
    let raw = complete(state, task, model, payload, Some(state.config.temperature)).await?;
    extract_svg(&raw).ok_or_else(|| Error::extraction(task.extraction_message()))
}

pub async fn generate(
    State(state): State<AppState>,
    body: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> std::result::Result<Json<SvgResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    match run_generate(&state, request_id, body).await {
        Ok(svg_code) => Ok(Json(SvgResponse { svg_code })),
        Err(e) => Err(error_response(Task::Generation, request_id, e)),
    }
}

async fn run_generate(
    state: &AppState,
    request_id: Uuid,
    body: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<String> {
    state.client()?;
    let request = parse_body(body)?;
    let prompt = required_field(request.prompt, "prompt")?;
    let model = request
        .model
        .unwrap_or_else(|| state.config.models.generate.clone());

    info!(
        "Received SVG generation request {} for model: {}",
        request_id, model
    );

    // Absent sliders default high; an explicit null drops the hint.
    let full_prompt = build_generation_prompt(
        &prompt,
        request.complexity.unwrap_or(Some(DEFAULT_SLIDER_REQUEST)),
        request.color_usage.unwrap_or(Some(DEFAULT_SLIDER_REQUEST)),
    )?;

    complete_svg(state, Task::Generation, model, PromptPayload::from(full_prompt)).await
}

pub async fn analyze_image(
    State(state): State<AppState>,
    body: std::result::Result<Json<AnalyzeImageRequest>, JsonRejection>,
) -> std::result::Result<Json<AnalysisResult>, ApiError> {
    let request_id = Uuid::new_v4();
    match run_analyze_image(&state, request_id, body).await {
        Ok(sections) => Ok(Json(sections)),
        Err(e) => Err(error_response(Task::Analysis, request_id, analysis_error(e))),
    }
}

async fn run_analyze_image(
    state: &AppState,
    request_id: Uuid,
    body: std::result::Result<Json<AnalyzeImageRequest>, JsonRejection>,
) -> Result<AnalysisResult> {
    state.client()?;
    let request = parse_body(body)?;
    let image_data = request
        .image_data
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::invalid_input("No image data provided"))?;
    let model = request
        .model
        .unwrap_or_else(|| state.config.models.analyze.clone());

    info!(
        "Received image analysis request {} for model: {}",
        request_id, model
    );

    let image = EmbeddedImage::from_data_url(&image_data)?;
    let payload = build_analysis_prompt(request.context_prompt.as_deref().unwrap_or(""), image);

    let analysis_text = complete(state, Task::Analysis, model, payload, None).await?;
    let sections = extract_analysis_sections(&analysis_text);
    debug!("Parsed analysis sections for {}: {:?}", request_id, sections);

    Ok(sections)
}

/// Credential problems get a message pointing at server configuration.
fn analysis_error(err: Error) -> Error {
    match err {
        Error::OpenAi(ref e) if e.to_string().contains("API key") => {
            error!("Image analysis rejected by provider: {}", e);
            Error::generation("API key validation failed. Please check server configuration.")
        }
        other => other,
    }
}

pub async fn convert_to_svg(
    State(state): State<AppState>,
    body: std::result::Result<Json<ConvertToSvgRequest>, JsonRejection>,
) -> std::result::Result<Json<SvgResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    match run_convert_to_svg(&state, request_id, body).await {
        Ok(svg_code) => Ok(Json(SvgResponse { svg_code })),
        Err(e) => Err(error_response(Task::Recreation, request_id, e)),
    }
}

async fn run_convert_to_svg(
    state: &AppState,
    request_id: Uuid,
    body: std::result::Result<Json<ConvertToSvgRequest>, JsonRejection>,
) -> Result<String> {
    state.client()?;
    let request = parse_body(body)?;
    let image_data = required_field(request.image_data, "image_data")?;
    let analysis_data = match request.analysis_data {
        Some(serde_json::Value::Object(map)) if !map.is_empty() => map,
        Some(value) if !is_blank_value(&value) => {
            return Err(Error::invalid_input("Incomplete 'analysis_data' provided."));
        }
        _ => return Err(Error::invalid_input("Missing 'analysis_data' in request")),
    };
    let analysis = AnalysisResult::from_json_object(&analysis_data).map_err(|key| {
        debug!("analysis_data is missing key '{}'", key);
        Error::invalid_input("Incomplete 'analysis_data' provided.")
    })?;
    let model = request
        .model
        .unwrap_or_else(|| state.config.models.convert.clone());

    info!(
        "Received SVG recreation request {} for model: {}",
        request_id, model
    );

    let image = EmbeddedImage::from_data_url(&image_data)?;
    let payload = build_recreation_prompt(image, &analysis);

    complete_svg(state, Task::Recreation, model, payload).await
}

/// Null, `false`, zero and empty strings, arrays or objects.
fn is_blank_value(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

pub async fn refine_svg(
    State(state): State<AppState>,
    body: std::result::Result<Json<RefineSvgRequest>, JsonRejection>,
) -> std::result::Result<Json<SvgResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    match run_refine_svg(&state, request_id, body).await {
        Ok(svg_code) => Ok(Json(SvgResponse { svg_code })),
        Err(e) => Err(error_response(Task::Refinement, request_id, e)),
    }
}

async fn run_refine_svg(
    state: &AppState,
    request_id: Uuid,
    body: std::result::Result<Json<RefineSvgRequest>, JsonRejection>,
) -> Result<String> {
    state.client()?;
    let request = parse_body(body)?;
    let original_svg = required_field(request.svg_code, "svg_code")?;
    let model = request
        .model
        .unwrap_or_else(|| state.config.models.refine.clone());

    info!(
        "Received SVG refinement request {} for model: {}",
        request_id, model
    );

    let preview = match request.png_data.filter(|v| !v.is_empty()) {
        None => PreviewImage::None,
        Some(png_data) => {
            info!("PNG data included for self-critique.");
            match EmbeddedImage::from_data_url(&png_data) {
                Ok(image) => PreviewImage::Decoded(image),
                Err(e) => {
                    warn!("Failed to decode/load PNG data: {}", e);
                    PreviewImage::Unreadable
                }
            }
        }
    };

    let payload = build_refinement_prompt(
        &original_svg,
        request.refinement_prompt.as_deref().unwrap_or(""),
        preview,
    );

    complete_svg(state, Task::Refinement, model, payload).await
}
