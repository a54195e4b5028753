//! Cleanup of raw model output into SVG markup or analysis sections.

mod analysis;
mod svg;

pub use analysis::{
    AnalysisResult, NO_TEXT_DETECTED, SECTIONS, Section, extract_analysis_sections,
};
pub use svg::extract_svg;
