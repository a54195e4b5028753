use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    /// Absent is `None`; an explicit `null` is `Some(None)`.
    #[serde(default, deserialize_with = "present_or_null")]
    pub complexity: Option<Option<i64>>,
    #[serde(default, rename = "colorUsage", deserialize_with = "present_or_null")]
    pub color_usage: Option<Option<i64>>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeImageRequest {
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub context_prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConvertToSvgRequest {
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub analysis_data: Option<serde_json::Value>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RefineSvgRequest {
    #[serde(default)]
    pub svg_code: Option<String>,
    #[serde(default)]
    pub refinement_prompt: Option<String>,
    #[serde(default)]
    pub png_data: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SvgResponse {
    pub svg_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Keeps a present-but-null field distinct from a missing one.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
