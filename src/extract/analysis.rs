use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const NO_TEXT_DETECTED: &str = "No text detected.";

/// One analysis section: response key, header text and placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub key: &'static str,
    pub header: &'static str,
    pub placeholder: &'static str,
}

/// Sections in the order the model is asked to produce them.
pub const SECTIONS: [Section; 5] = [
    Section {
        key: "metadata",
        header: "Metadata Analysis",
        placeholder: "Metadata analysis not found.",
    },
    Section {
        key: "semantic",
        header: "Semantic Analysis",
        placeholder: "Semantic analysis not found.",
    },
    Section {
        key: "layout",
        header: "Layout Analysis",
        placeholder: "Layout analysis not found.",
    },
    Section {
        key: "content_styling",
        header: "Content & Styling Analysis",
        placeholder: "Content & Styling analysis not found.",
    },
    Section {
        key: "ocr",
        header: "OCR Analysis",
        placeholder: "OCR analysis not found.",
    },
];

/// Header patterns, one per entry of [`SECTIONS`].
///
/// Accepts `**Name:**`, `**Name**:` and Markdown `#` headings.
static HEADER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SECTIONS
        .iter()
        .map(|section| {
            let name = regex::escape(section.header).replace(' ', r"\s+");
            let pattern = format!(
                r"(?im)(?:\*\*|^[ \t]*#{{1,6}}[ \t]*(?:\*\*)?)[ \t]*{name}[ \t]*:?[ \t]*(?:\*\*)?[ \t]*:?"
            );
            Regex::new(&pattern).expect("section header pattern is valid")
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metadata: String,
    pub semantic: String,
    pub layout: String,
    pub content_styling: String,
    pub ocr: String,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            metadata: SECTIONS[0].placeholder.to_string(),
            semantic: SECTIONS[1].placeholder.to_string(),
            layout: SECTIONS[2].placeholder.to_string(),
            content_styling: SECTIONS[3].placeholder.to_string(),
            ocr: SECTIONS[4].placeholder.to_string(),
        }
    }
}

impl AnalysisResult {
    /// Builds a result from a JSON object carrying every section key.
    ///
    /// Returns the first missing key on failure. Non-string values are kept
    /// in their JSON form.
    pub fn from_json_object(
        object: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Self, &'static str> {
        let mut values = Vec::with_capacity(SECTIONS.len());
        for section in &SECTIONS {
            let value = object.get(section.key).ok_or(section.key)?;
            values.push(match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        }

        let mut result = Self::default();
        for (section, value) in SECTIONS.iter().zip(values) {
            *result.field_mut(section.key) = value;
        }
        Ok(result)
    }

    fn field_mut(&mut self, key: &str) -> &mut String {
        match key {
            "metadata" => &mut self.metadata,
            "semantic" => &mut self.semantic,
            "layout" => &mut self.layout,
            "content_styling" => &mut self.content_styling,
            _ => &mut self.ocr,
        }
    }
}

/// Splits an analysis response into its five sections.
///
/// Never fails: a section whose header cannot be found keeps its placeholder.
/// Each body runs to the nearest later section header, or to the end of text.
pub fn extract_analysis_sections(raw_text: &str) -> AnalysisResult {
    let mut result = AnalysisResult::default();

    for (index, section) in SECTIONS.iter().enumerate() {
        let Some(header) = HEADER_PATTERNS[index].find(raw_text) else {
            continue;
        };

        let body_start = header.end();
        let rest = &raw_text[body_start..];
        let body_end = HEADER_PATTERNS[index + 1..]
            .iter()
            .filter_map(|pattern| pattern.find(rest).map(|m| m.start()))
            .min()
            .unwrap_or(rest.len());

        let body = rest[..body_end].trim();
        let value = if section.key == "ocr" && body.is_empty() {
            NO_TEXT_DETECTED.to_string()
        } else {
            body.to_string()
        };
        *result.field_mut(section.key) = value;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const FULL_RESPONSE: &str = "Here is the analysis.\n\n\
**Metadata Analysis:**\n  - Dimensions: 800x600\n  - Key Colors: #ffffff\n\n\
**Semantic Analysis:**\nA company logo.\n\n\
**Layout Analysis:**\nCentered mark with text below.\n\n\
**Content & Styling Analysis:**\nFlat, minimalist.\n\n\
**OCR Analysis:**\n1. \"ACME\" (center, centered)\n";

    #[test]
    fn test_all_sections_extracted() {
        let result = extract_analysis_sections(FULL_RESPONSE);
        assert_eq!(
            result,
            AnalysisResult {
                metadata: "- Dimensions: 800x600\n  - Key Colors: #ffffff".to_string(),
                semantic: "A company logo.".to_string(),
                layout: "Centered mark with text below.".to_string(),
                content_styling: "Flat, minimalist.".to_string(),
                ocr: "1. \"ACME\" (center, centered)".to_string(),
            }
        );
    }

    #[test]
    fn test_unrelated_text_yields_placeholders() {
        let result = extract_analysis_sections("I'm sorry, I can't analyze this image.");
        assert_eq!(result, AnalysisResult::default());
        assert_eq!(result.metadata, "Metadata analysis not found.");
        assert_eq!(result.content_styling, "Content & Styling analysis not found.");
        assert_eq!(result.ocr, "OCR analysis not found.");
    }

    #[test]
    fn test_blank_ocr_becomes_marker() {
        let raw = "**Metadata Analysis:** m\n**Semantic Analysis:** s\n**Layout Analysis:** l\n\
**Content & Styling Analysis:** c\n**OCR Analysis:**\n   \n";
        let result = extract_analysis_sections(raw);
        assert_eq!(result.ocr, NO_TEXT_DETECTED);
        assert_eq!(result.content_styling, "c");
    }

    #[test]
    fn test_header_matching_ignores_case() {
        let raw = "**METADATA ANALYSIS:**\nbig\n**semantic analysis:**\nmeaning";
        let result = extract_analysis_sections(raw);
        assert_eq!(result.metadata, "big");
        assert_eq!(result.semantic, "meaning");
        assert_eq!(result.layout, "Layout analysis not found.");
    }

    #[test]
    fn test_markdown_heading_variants() {
        let raw = "## Metadata Analysis\nsize\n\
                   ### **Semantic Analysis**:\npurpose\n\
                   **Layout Analysis**\ngrid";
        let result = extract_analysis_sections(raw);
        assert_eq!(result.metadata, "size");
        assert_eq!(result.semantic, "purpose");
        assert_eq!(result.layout, "grid");
    }

    #[test]
    fn test_missing_middle_section_does_not_swallow_rest() {
        let raw = "**Metadata Analysis:**\nm\n\
                   **Layout Analysis:**\nl\n\
                   **OCR Analysis:**\nNo text detected";
        let result = extract_analysis_sections(raw);
        assert_eq!(result.metadata, "m");
        assert_eq!(result.semantic, "Semantic analysis not found.");
        assert_eq!(result.layout, "l");
        assert_eq!(result.ocr, "No text detected");
    }

    #[test]
    fn test_serializes_with_all_keys() {
        let value = serde_json::to_value(AnalysisResult::default()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 5);
        for section in &SECTIONS {
            assert!(object.contains_key(section.key));
        }
    }

    #[test]
    fn test_from_json_object() {
        let value = json!({
            "metadata": "m", "semantic": "s", "layout": "l",
            "content_styling": "c", "ocr": 42
        });
        let result = AnalysisResult::from_json_object(value.as_object().unwrap()).unwrap();
        assert_eq!(result.metadata, "m");
        assert_eq!(result.content_styling, "c");
        assert_eq!(result.ocr, "42");
    }

    #[test]
    fn test_from_json_object_reports_missing_key() {
        let value = json!({ "metadata": "m", "semantic": "s", "layout": "l", "ocr": "o" });
        assert_eq!(
            AnalysisResult::from_json_object(value.as_object().unwrap()),
            Err("content_styling")
        );
    }
}
