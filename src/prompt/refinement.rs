use super::types::{EmbeddedImage, PromptPayload};

/// State of the optional rendered preview supplied with a refinement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewImage {
    None,
    Decoded(EmbeddedImage),
    /// Preview was supplied but could not be decoded.
    Unreadable,
}

const REFINEMENT_INSTRUCTIONS: &[&str] = &[
    "\n\n**IMPORTANT Instructions for Refinement & Self-Correction:**\n",
    "1. **Analyze PNG vs SVG:** Compare the rendered PNG image to the Original SVG Code. Identify any discrepancies, rendering issues, or areas where the SVG deviates from expected visual quality (e.g., incorrect layering, alignment, text formatting, missing elements, unintended artifacts).",
    "2. **Self-Critique:** Based on your analysis in step 1, determine necessary corrections even if the user didn't mention them. Prioritize fixing obvious errors or significant visual deviations.",
    "3. **Apply User Feedback:** If the user provided explicit instructions, address them precisely.",
    "4. **Combine & Prioritize:** Integrate your self-corrections (from step 2) with the user's requested changes (from step 3). If there's a conflict, generally prioritize fixing rendering errors/major quality issues first, then apply user cosmetic requests.",
    "5. **Minimal Changes:** Apply only the necessary changes. Do NOT add unrelated elements or completely redesign.",
    "6. **Preserve Structure:** Maintain existing SVG structure (groups, IDs, classes) unless modification is essential for the fix.",
    "7. **Text Fidelity:** Keep all existing text content exactly as written unless the user asks to change it. Use standard SVG elements and keep `xmlns=\"http://www.w3.org/2000/svg\"` and the `viewBox` on the root element.",
    "8. **Validity & Format:** Ensure the output is valid SVG code starting strictly with `<svg` and ending strictly with `</svg>`. No markdown, XML declaration, comments, or explanations.",
];

/// Builds the SVG refinement prompt.
pub fn build_refinement_prompt(
    original_svg: &str,
    refinement_instructions: &str,
    preview: PreviewImage,
) -> PromptPayload {
    let mut payload = PromptPayload::new();
    payload
        .text("You are an expert SVG editor performing a refinement task. \
You will analyze the provided original SVG code, its rendered appearance (shown in the PNG image), and optional user refinement instructions. \
Your goal is to improve the SVG based on both the user's feedback AND your own expert critique of the rendered PNG compared to common SVG best practices or the likely original intent.")
        .text(format!(
            "\n\n**Original SVG Code:**\n```svg\n{original_svg}\n```\n"
        ));

    match preview {
        PreviewImage::Decoded(image) => {
            payload
                .text("\n\n**Rendered PNG of Original SVG:**")
                .image(image)
                .text("(This image shows how the 'Original SVG Code' above currently renders.)");
        }
        PreviewImage::Unreadable => {
            payload.text("\n\n(Error loading rendered PNG preview)");
        }
        PreviewImage::None => {}
    }

    let instructions = if refinement_instructions.trim().is_empty() {
        "None provided."
    } else {
        refinement_instructions
    };
    payload.text(format!(
        "\n\n**User's Explicit Refinement Instructions:**\n{instructions}\n"
    ));

    for line in REFINEMENT_INSTRUCTIONS {
        payload.text(*line);
    }
    payload
}
