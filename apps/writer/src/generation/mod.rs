// Post generation: few-shot writer, demo search, compiled-writer cache, and
// the generator the interactive loop talks to.
// All model calls go through llm_client.

use thiserror::Error;

use crate::llm_client::LlmError;

pub mod compiled;
pub mod generator;
pub mod optimizer;
pub mod prompts;
pub mod writer;

/// Why a post could not be produced.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("language model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("model returned an empty post")]
    EmptyPost,
}
