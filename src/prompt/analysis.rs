use super::types::{EmbeddedImage, PromptPayload};
use crate::extract::SECTIONS;

const METADATA_FIELDS: &[&str] = &[
    "  - Dimensions: Estimated width/height in pixels.",
    "  - Aspect Ratio: Calculated width:height.",
    "  - Key Colors: List primary, secondary, and background hex codes.",
    "  - Fonts: Identify font families, styles (bold, italic), and relative sizes if possible.",
];

const SEMANTIC_FIELDS: &[&str] = &[
    "  - Describe the overall purpose and meaning of the image.",
    "  - Identify the main subject, key objects, or concepts presented.",
    "  - What is the core message or information being conveyed?",
];

const LAYOUT_FIELDS: &[&str] = &[
    "  - Overall Structure: Describe the main layout areas (header, body, sidebar, footer?).",
    "  - Element Positioning: Describe the placement of key elements (images, text blocks, shapes) using relative terms (top-left, center, bottom-right).",
    "  - Alignment: How are elements aligned relative to each other or the page (left, center, right)?",
    "  - Spacing: Describe the relative spacing or padding between major elements.",
    "  - Shapes: Identify main shapes (rectangles, circles, lines) and their approximate location and size.",
];

const CONTENT_STYLING_FIELDS: &[&str] = &[
    "  - Text Content: Transcribe all significant text, preserving line breaks and general formatting as seen.",
    "  - Visual Style: Describe the overall aesthetic (e.g., flat, minimalist, illustrative, realistic).",
    "  - Color Palette Usage: How are the key colors used across elements?",
    "  - Borders/Lines: Describe any significant borders or lines, including thickness and style (solid, dashed).",
    "  - Effects: Mention any shadows, gradients, or other visual effects.",
];

const OCR_FIELDS: &[&str] = &[
    "  - Identify any tables or structured charts first. If found:",
    "  - Describe the structure (rows, columns).",
    "  - Extract header text.",
    "  - Note any merged cells or special cell alignments.",
    "Provide cell content of the table if present, maintaining row/column relationships (e.g., using a simple markdown table or list format. NEVER indent the cell/table content.).",
    "  - For all other text:",
    "  - Transcribe text content sequentially (top-to-bottom, left-to-right).",
    "  - Group text belonging to the same visual container (e.g., a specific box, paragraph). Number these containers.",
    "  - For each text container, describe its approximate relative position (e.g., top-left, middle, bottom-right).",
    "  - Describe the text alignment within its container (left, center, right, justified?).",
    "  - If no text is found, state 'No text detected'.",
];

/// Sub-fields requested for each section, in section order.
const SECTION_FIELDS: [&[&str]; 5] = [
    METADATA_FIELDS,
    SEMANTIC_FIELDS,
    LAYOUT_FIELDS,
    CONTENT_STYLING_FIELDS,
    OCR_FIELDS,
];

/// Builds the image analysis prompt. The image is always the final segment.
pub fn build_analysis_prompt(user_context: &str, image: EmbeddedImage) -> PromptPayload {
    let context = if user_context.trim().is_empty() {
        "None provided"
    } else {
        user_context
    };

    let order = SECTIONS
        .iter()
        .map(|section| section.header)
        .collect::<Vec<_>>()
        .join(", ");

    let mut payload = PromptPayload::new();
    payload
        .text("Analyze the following image to gather information for recreating it as an SVG.")
        .text("User context/request for the final SVG: ")
        .text(context)
        .text("\n\n")
        .text(format!(
            "Provide a structured analysis with the following sections clearly marked using Markdown headers (e.g., **Section Name:**) IN THIS EXACT ORDER: {order}."
        ));

    for (section, fields) in SECTIONS.iter().zip(SECTION_FIELDS) {
        payload.text(format!("\n\n**{}:**", section.header));
        for field in fields {
            payload.text(*field);
        }
    }

    payload.text("\n\n").image(image);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptSegment;
    use pretty_assertions::assert_eq;

    fn test_image() -> EmbeddedImage {
        EmbeddedImage::new("image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn test_image_is_last_segment() {
        let payload = build_analysis_prompt("make it a logo", test_image());
        assert_eq!(payload.image_count(), 1);
        assert!(matches!(
            payload.segments().last(),
            Some(PromptSegment::Image(_))
        ));
    }

    #[test]
    fn test_headers_in_fixed_order() {
        let text = build_analysis_prompt("", test_image()).joined_text();
        let headers = [
            "**Metadata Analysis:**",
            "**Semantic Analysis:**",
            "**Layout Analysis:**",
            "**Content & Styling Analysis:**",
            "**OCR Analysis:**",
        ];
        let positions: Vec<usize> = headers.iter().map(|h| text.find(h).unwrap()).collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
        assert!(text.contains(
            "IN THIS EXACT ORDER: Metadata Analysis, Semantic Analysis, Layout Analysis, Content & Styling Analysis, OCR Analysis."
        ));
    }

    #[test]
    fn test_empty_context_placeholder() {
        let text = build_analysis_prompt("  ", test_image()).joined_text();
        assert!(text.contains("None provided"));
    }

    #[test]
    fn test_context_passed_through() {
        let text = build_analysis_prompt("keep the logo crisp", test_image()).joined_text();
        assert!(text.contains("keep the logo crisp"));
        assert!(!text.contains("None provided"));
    }

    #[test]
    fn test_sub_fields_listed() {
        let text = build_analysis_prompt("", test_image()).joined_text();
        assert!(text.contains("Aspect Ratio"));
        assert!(text.contains("Number these containers"));
        assert!(text.contains("Spacing"));
    }
}
