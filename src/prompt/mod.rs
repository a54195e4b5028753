//! Prompt construction for the generation, analysis, recreation and
//! refinement tasks. Everything here is pure.

mod analysis;
mod generation;
mod recreation;
mod refinement;
mod types;

pub use analysis::build_analysis_prompt;
pub use generation::{
    SLIDER_DEFAULT, SLIDER_MAX, SLIDER_MIN, build_generation_prompt, clamp_slider,
};
pub use recreation::build_recreation_prompt;
pub use refinement::{PreviewImage, build_refinement_prompt};
pub use types::*;
