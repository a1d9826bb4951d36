//! Prompt construction for the detection and generation requests.
//!
//! Detection asks for a comma-separated list of languages/technologies so the
//! result renders cleanly in the confirmation view. A refinement round always
//! carries the previous answer, the user's correction, and the original file
//! manifest; a correction must never be folded away into a manifest-only
//! prompt.

use crate::config::GPT_4;

/// Rough token estimate. The chat endpoints tokenize at roughly four
/// characters per token for English text; close enough for a guard rail.
const CHARS_PER_TOKEN: usize = 4;

const GPT_35_CONTEXT_TOKENS: usize = 4096;
const GPT_4_CONTEXT_TOKENS: usize = 8192;

/// First-round detection prompt, built from the manifest alone.
pub fn detect(manifest: &[String]) -> String {
    format!(
        "Use the following files to tell me what languages and technologies are being used \
         in this project. Return a comma-separated list with just the names: {}",
        manifest.join(", ")
    )
}

/// Refinement prompt for a re-detection round after the user rejected the
/// previous answer.
pub fn refine(previous_stack: &str, correction: &str, manifest: &[String]) -> String {
    format!(
        "You said this project uses the following languages and technologies: {}.\n\
         According to the user, this is not correct. Here's some additional info from \
         the user: {}.\n\
         The project contains these files: {}.\n\
         Return a comma-separated list of the languages and technologies used by this project.",
        previous_stack,
        correction,
        manifest.join(", ")
    )
}

/// Workflow generation prompt.
pub fn generate(stack: &str, tasks: &str) -> String {
    format!(
        "For a {} project, generate a GitHub Actions workflow that will include the \
         following tasks: {}.\n\
         Leave placeholders for things like versions, and at the end of the workflow tell \
         the user in YAML comments what their next steps should be.",
        stack, tasks
    )
}

pub fn estimated_tokens(prompt: &str) -> usize {
    prompt.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Whether a prompt is too large for the selected model's context window.
pub fn exceeds_context_budget(prompt: &str, model: &str) -> bool {
    let budget = if model == GPT_4 {
        GPT_4_CONTEXT_TOKENS
    } else {
        GPT_35_CONTEXT_TOKENS
    };
    estimated_tokens(prompt) > budget
}
