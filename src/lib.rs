pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod prompt;
pub mod server;

pub use error::{Error, Result};
