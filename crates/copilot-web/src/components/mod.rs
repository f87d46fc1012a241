pub mod composer;
pub mod prompt_suggestions;
pub mod question_input;

pub use prompt_suggestions::{PromptSuggestions, EXAMPLE_PROMPTS};
pub use question_input::QuestionInput;
