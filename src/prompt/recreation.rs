use super::types::{EmbeddedImage, PromptPayload};
use crate::extract::AnalysisResult;

const CLOSING_INSTRUCTIONS: &[&str] = &[
    "\n\n**SVG Generation Instructions:**",
    "1. Recreate the visual structure, element placement, shapes, colors, and styling based *primarily* on the image, using the analysis sections to clarify details and ensure accuracy.",
    "2. **CRITICAL:** Accurately reproduce ALL text content identified in the OCR Analysis. Preserve its formatting (bold, italic), alignment, size, and relative positioning as described in the analysis. Use appropriate `<text>` elements with relevant attributes (`x`, `y`, `font-family`, `font-size`, `font-weight`, `font-style`, `fill`, `text-anchor`).",
    "3. Use standard SVG elements (`<rect>`, `<circle>`, `<path>`, `<line>`, `<text>`, `<g>`, etc.).",
    "4. The root `<svg>` element MUST include `xmlns=\"http://www.w3.org/2000/svg\"` and a relevant `viewBox` (estimate based on analysis or image aspect ratio, e.g., `viewBox=\"0 0 width height\"`).",
    "5. Pay attention to layering (e.g., text should generally be on top of background shapes). Use `<g>` elements for grouping where logical.",
    "6. Prioritize visual accuracy and clean, standard SVG code. Use presentation attributes (e.g., `fill`, `stroke`) over inline `style` attributes unless necessary.",
    "7. Output ONLY the raw SVG code, starting strictly with `<svg` and ending strictly with `</svg>`. No markdown fences, no XML declaration, no comments, no other text.",
];

/// Builds the image-to-SVG prompt from the source image and its analysis.
pub fn build_recreation_prompt(image: EmbeddedImage, analysis: &AnalysisResult) -> PromptPayload {
    let mut payload = PromptPayload::new();
    payload
        .text("You are an expert SVG generator. Your task is to recreate the provided image as accurately as possible in SVG format, paying close attention to text content, formatting, and layout, using the provided analysis as a guide.")
        .text("\n\n**Input Image:**")
        .image(image)
        .text("\n\n**Image Analysis Results (Use this information heavily to guide the recreation):**")
        .text("\n\n--- METADATA ANALYSIS ---")
        .text(analysis.metadata.as_str())
        .text("\n\n--- SEMANTIC ANALYSIS --- (Purpose/Meaning)")
        .text(analysis.semantic.as_str())
        .text("\n\n--- LAYOUT ANALYSIS --- (Structure/Placement)")
        .text(analysis.layout.as_str())
        .text("\n\n--- CONTENT & STYLING ANALYSIS --- (Text Content/Visuals)")
        .text(analysis.content_styling.as_str())
        .text("\n\n--- OCR ANALYSIS --- (Detailed Text/Structure)")
        .text(analysis.ocr.as_str());

    for line in CLOSING_INSTRUCTIONS {
        payload.text(*line);
    }
    payload
}
