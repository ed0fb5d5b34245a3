//! Post writers — the callable the optimizer tunes and the generator invokes.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::generation::prompts::{
    DEMOS_HEADER, DEMO_TEMPLATE, WRITER_PROMPT_TEMPLATE, WRITER_SYSTEM_TEMPLATE,
};
use crate::generation::GenerationError;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::{complete_json, LanguageModel};
use crate::models::persona::PostRequest;
use crate::models::training::TrainingExample;

/// Maps (persona, bullets) to post text.
#[async_trait]
pub trait PostWriter: Send + Sync {
    async fn write(&self, request: &PostRequest) -> Result<String, GenerationError>;
}

/// Structured reply the writer prompt asks for.
#[derive(Debug, Deserialize)]
struct WriterOutput {
    #[serde(default)]
    reasoning: String,
    post: String,
}

/// Prompt-based writer steered by a fixed set of few-shot demos.
#[derive(Clone)]
pub struct FewShotWriter {
    model: Arc<dyn LanguageModel>,
    demos: Vec<TrainingExample>,
}

impl FewShotWriter {
    pub fn zero_shot(model: Arc<dyn LanguageModel>) -> Self {
        Self::with_demos(model, Vec::new())
    }

    pub fn with_demos(model: Arc<dyn LanguageModel>, demos: Vec<TrainingExample>) -> Self {
        Self { model, demos }
    }

    pub fn demos(&self) -> &[TrainingExample] {
        &self.demos
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }
}

#[async_trait]
impl PostWriter for FewShotWriter {
    async fn write(&self, request: &PostRequest) -> Result<String, GenerationError> {
        let system = WRITER_SYSTEM_TEMPLATE.replace("{json_only}", JSON_ONLY_SYSTEM);
        let prompt = build_writer_prompt(&self.demos, request);

        let output: WriterOutput = complete_json(self.model.as_ref(), &prompt, &system).await?;
        debug!(
            "Writer reasoning: {:?}",
            output.reasoning.chars().take(120).collect::<String>()
        );

        let post = output.post.trim();
        if post.is_empty() {
            return Err(GenerationError::EmptyPost);
        }
        Ok(post.to_string())
    }
}

fn build_writer_prompt(demos: &[TrainingExample], request: &PostRequest) -> String {
    let demos_block = if demos.is_empty() {
        String::new()
    } else {
        let rendered: Vec<String> = demos
            .iter()
            .enumerate()
            .map(|(i, demo)| {
                let n = (i + 1).to_string();
                fill_template(
                    DEMO_TEMPLATE,
                    &[
                        ("n", n.as_str()),
                        ("person_name", demo.person_name.as_str()),
                        ("person_title", demo.person_title.as_str()),
                        ("company", demo.company.as_str()),
                        ("content_bullets", demo.content_bullets.as_str()),
                        ("post", demo.post.as_str()),
                    ],
                )
            })
            .collect();
        format!("{DEMOS_HEADER}\n\n{}\n\n", rendered.join("\n\n"))
    };

    fill_template(
        WRITER_PROMPT_TEMPLATE,
        &[
            ("demos", demos_block.as_str()),
            ("grounding_instruction", GROUNDING_INSTRUCTION),
            ("person_name", request.person_name.as_str()),
            ("person_title", request.person_title.as_str()),
            ("company", request.company.as_str()),
            ("content_bullets", request.content_bullets.as_str()),
        ],
    )
}

/// Replaces each `{key}` in one left-to-right pass. Substituted text is never
/// scanned again; braces that name no key are kept as-is.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values
            .iter()
            .find(|(key, _)| tail.starts_with(key) && tail[key.len()..].starts_with('}'));
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
