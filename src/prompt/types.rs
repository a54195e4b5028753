use crate::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Raster image carried inside a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl EmbeddedImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Decodes a `data:<mime>;base64,<payload>` string.
    ///
    /// Everything before the first comma is treated as the header; only the
    /// MIME type is taken from it.
    pub fn from_data_url(data_url: &str) -> Result<Self> {
        let (header, encoded) = data_url
            .split_once(',')
            .ok_or_else(|| Error::internal("Malformed data URL: missing ',' separator"))?;

        let mime_type = header
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME)
            .to_string();

        let data = BASE64.decode(encoded.trim())?;
        if data.is_empty() {
            return Err(Error::internal("Data URL contains no image bytes"));
        }

        Ok(Self { mime_type, data })
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.data))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSegment {
    Text(String),
    Image(EmbeddedImage),
}

/// Ordered prompt content. The model reads segments in sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptPayload {
    segments: Vec<PromptSegment>,
}

impl PromptPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.segments.push(PromptSegment::Text(text.into()));
        self
    }

    pub fn image(&mut self, image: EmbeddedImage) -> &mut Self {
        self.segments.push(PromptSegment::Image(image));
        self
    }

    pub fn segments(&self) -> &[PromptSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn image_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, PromptSegment::Image(_)))
            .count()
    }

    /// All text segments joined, images skipped.
    pub fn joined_text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                PromptSegment::Text(text) => Some(text.as_str()),
                PromptSegment::Image(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<String> for PromptPayload {
    fn from(text: String) -> Self {
        let mut payload = Self::new();
        payload.text(text);
        payload
    }
}

impl FromIterator<PromptSegment> for PromptPayload {
    fn from_iter<I: IntoIterator<Item = PromptSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
