use crate::{Error, Result};

pub const SLIDER_MIN: i64 = 1;
pub const SLIDER_MAX: i64 = 6;
pub const SLIDER_DEFAULT: i64 = 3;

const PERSONA: &str = "You are an expert graphic designer specializing in modern vector graphics and SVG creation. \
You have a keen eye for aesthetics, color theory, clean design principles, and efficient SVG code. \
Your goal is to translate the user's description into a high-quality, visually appealing, and technically sound SVG file.";

const INSTRUCTIONS: &str = "Instructions:\n\
1. Generate ONLY the raw SVG code based on the User Request and Design Hints.\n\
2. The root `<svg>` element MUST include `xmlns=\"http://www.w3.org/2000/svg\"` and an appropriate `viewBox`. Estimate the viewBox based on the described elements (e.g., `viewBox=\"0 0 100 100\"` for simple centered shapes).\n\
3. Use standard SVG elements (`<rect>`, `<circle>`, `<path>`, `<text>`, `<g>`, etc.).\n\
4. Apply colors, strokes, and fills as described or implied. Use presentation attributes (e.g., `fill`, `stroke`) over inline `style` attributes where possible.\n\
5. Ensure the output starts strictly with `<svg` and ends strictly with `</svg>`. No markdown fences, no XML declaration, no explanations, no other text.";

/// Slider values outside `[1, 6]` fall back to the midpoint.
pub fn clamp_slider(value: i64) -> i64 {
    if (SLIDER_MIN..=SLIDER_MAX).contains(&value) {
        value
    } else {
        SLIDER_DEFAULT
    }
}

fn complexity_hint(level: i64) -> &'static str {
    match clamp_slider(level) {
        ..=2 => "Keep the shapes and structure very simple (low complexity).",
        5.. => {
            "Incorporate intricate details, potentially multiple overlapping elements or complex paths (high complexity)."
        }
        _ => "Aim for moderate complexity.",
    }
}

fn color_hint(level: i64) -> &'static str {
    match clamp_slider(level) {
        ..=2 => {
            "Use a very limited color palette, possibly monochrome or just 2-3 colors (low color usage)."
        }
        5.. => "Feel free to use a rich and diverse color palette (high color usage).",
        _ => "Use a balanced number of colors (moderate color usage).",
    }
}

/// Builds the text-to-SVG prompt.
///
/// A `None` slider contributes no hint; any other value is clamped first.
pub fn build_generation_prompt(
    description: &str,
    complexity: Option<i64>,
    color_diversity: Option<i64>,
) -> Result<String> {
    if description.trim().is_empty() {
        return Err(Error::invalid_input("User prompt cannot be empty."));
    }

    let hints: Vec<&str> = [
        complexity.map(complexity_hint),
        color_diversity.map(color_hint),
    ]
    .into_iter()
    .flatten()
    .collect();

    let hints_string = if hints.is_empty() {
        String::new()
    } else {
        format!(" Design Hints: {}", hints.join(" "))
    };

    Ok(format!(
        "{PERSONA}\n\nUser Request: \"{description}\"{hints_string}\n\n{INSTRUCTIONS}"
    ))
}
