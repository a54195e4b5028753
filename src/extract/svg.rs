use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// First `<svg` opening tag through the last `</svg>`.
static SVG_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<svg[\s>/].*</svg>").expect("SVG block pattern is valid")
});

const FENCE: &str = "```";

/// Pulls SVG markup out of raw model output.
///
/// Returns `None` unless the result opens with a complete `<svg` tag
/// and ends with `</svg>`.
pub fn extract_svg(raw_text: &str) -> Option<String> {
    let text = raw_text.trim();
    if text.is_empty() {
        return None;
    }

    let candidate = match SVG_BLOCK.find(text) {
        Some(block) => block.as_str().trim(),
        None => strip_fences(text),
    };

    if opens_svg_tag(candidate) && candidate.ends_with("</svg>") {
        Some(candidate.to_string())
    } else {
        warn!(
            "Model output could not be cleaned into valid SVG: {}",
            raw_text
        );
        None
    }
}

/// `<svg` followed by whitespace, `>` or `/`, never `<svgx`.
fn opens_svg_tag(text: &str) -> bool {
    text.strip_prefix("<svg")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_whitespace() || c == '>' || c == '/')
}

fn strip_fences(text: &str) -> &str {
    let mut text = text;
    if text.starts_with(FENCE) {
        // Drop the opening fence line, language tag included.
        text = text.split_once('\n').map_or("", |(_, rest)| rest);
    }
    if let Some(stripped) = text.strip_suffix(FENCE) {
        text = stripped;
    }
    text.trim()
}
