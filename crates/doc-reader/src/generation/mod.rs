//! Prompt construction for the reasoning backend

pub mod prompt;

pub use prompt::PromptBuilder;
