//! Interactive console loop.
//!
//! Generic over its input and output so tests can drive it with in-memory
//! buffers. Generation failures are shown and the loop continues; a failed
//! memory write ends the loop with an error.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::errors::AppError;
use crate::generation::generator::PostGenerator;

const RULE_WIDTH: usize = 70;
const MEMORY_PREVIEW_COUNT: usize = 5;
const MEMORY_PREVIEW_CHARS: usize = 50;

/// One line of user input, classified.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Memory,
    Empty,
    Content(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") {
            Command::Quit
        } else if trimmed.eq_ignore_ascii_case("memory") {
            Command::Memory
        } else if trimmed.is_empty() {
            Command::Empty
        } else {
            Command::Content(trimmed)
        }
    }
}

/// Save prompt answer, lower-cased once: `y` or `yes`.
pub fn confirms_save(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

pub async fn run<R, W>(generator: &PostGenerator, input: &mut R, out: &mut W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let persona = generator.persona().name.clone();

    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "READY TO GENERATE POSTS")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "\nEnter content bullets to generate a post in {persona}'s style.")?;
    writeln!(out, "Type 'quit' to exit, 'memory' to see saved posts.\n")?;

    loop {
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        let Some(line) = prompt_line(input, out, "📝 Enter content bullets (or command): ").await?
        else {
            break;
        };

        match Command::parse(&line) {
            Command::Quit => break,
            Command::Memory => show_memory(generator, out)?,
            Command::Empty => writeln!(out, "⚠️  Please enter some content bullets.")?,
            Command::Content(bullets) => generate_and_offer_save(generator, bullets, input, out).await?,
        }
    }

    writeln!(out, "👋 Thank you for using the {persona} Persona Writer!")?;
    Ok(())
}

async fn generate_and_offer_save<R, W>(
    generator: &PostGenerator,
    bullets: &str,
    input: &mut R,
    out: &mut W,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "\n⏳ Generating post...")?;

    let post = match generator.generate(bullets).await {
        Ok(post) => post,
        Err(e) => {
            warn!("Generation failed: {e}");
            writeln!(out, "Error generating post: {e}")?;
            return Ok(());
        }
    };

    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "✨ GENERATED POST:")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{}", post.text)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    let answer = prompt_line(input, out, "\n💾 Save to memory? (y/n): ")
        .await?
        .unwrap_or_default();
    if confirms_save(&answer) {
        generator.save(&post.text, &post.source_bullets)?;
        writeln!(out, "✓ Post saved!")?;
    }
    Ok(())
}

fn show_memory<W: Write>(generator: &PostGenerator, out: &mut W) -> Result<(), AppError> {
    let memory = generator.load_memory();
    if memory.is_empty() {
        writeln!(out, "  (No saved posts yet)")?;
        return Ok(());
    }

    writeln!(out, "\nSaved {} posts:", memory.len())?;
    let skip = memory.len().saturating_sub(MEMORY_PREVIEW_COUNT);
    for (i, record) in memory.iter().skip(skip).enumerate() {
        writeln!(out, "  {}. {}", i + 1, record.bullets_preview(MEMORY_PREVIEW_CHARS))?;
    }
    Ok(())
}

/// Prints `prompt` and reads one line. `None` on end of input.
async fn prompt_line<R, W>(input: &mut R, out: &mut W, prompt: &str) -> Result<Option<String>, AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::generation::testing::{reply, ScriptedModel};
    use crate::generation::writer::FewShotWriter;
    use crate::llm_client::LlmError;
    use crate::memory::MemoryStore;
    use crate::models::persona::PersonaProfile;
    use crate::models::post::MemoryRecord;

    const POST: &str = "I'm thrilled to share... 🔥 We grew 20%! #boAt";

    fn generator(dir: &tempfile::TempDir, model: ScriptedModel) -> PostGenerator {
        PostGenerator::new(
            Arc::new(FewShotWriter::zero_shot(Arc::new(model))),
            PersonaProfile::default(),
            MemoryStore::new(dir.path().join("memory.json")),
        )
        .unwrap()
    }

    async fn drive(generator: &PostGenerator, script: &str) -> String {
        let mut input = script.as_bytes();
        let mut out = Vec::new();
        run(generator, &mut input, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("quit\n"), Command::Quit);
        assert_eq!(Command::parse("  QUIT "), Command::Quit);
        assert_eq!(Command::parse("Memory"), Command::Memory);
        assert_eq!(Command::parse("   \n"), Command::Empty);
        assert_eq!(
            Command::parse(" launched Airdopes \n"),
            Command::Content("launched Airdopes")
        );
    }

    #[test]
    fn test_confirms_save_is_case_insensitive() {
        for yes in ["y", "Y", "yes", "YES", " Yes\n"] {
            assert!(confirms_save(yes), "{yes:?} should confirm");
        }
        for no in ["n", "", "yeah", "no"] {
            assert!(!confirms_save(no), "{no:?} should not confirm");
        }
    }

    #[tokio::test]
    async fn test_generate_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(&dir, ScriptedModel::new(|_| reply(POST)));
        let output = drive(&generator, "Launched new product\nY\nquit\n").await;

        assert!(output.contains("✨ GENERATED POST:"));
        assert!(output.contains(POST));
        assert!(output.contains("✓ Post saved!"));
        let memory = generator.load_memory();
        assert_eq!(memory.len(), 1);
        assert_eq!(memory[0].bullets, "Launched new product");
    }

    #[tokio::test]
    async fn test_declined_save_is_not_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(&dir, ScriptedModel::new(|_| reply(POST)));
        drive(&generator, "Launched new product\nn\nquit\n").await;
        assert!(generator.load_memory().is_empty());
    }

    #[tokio::test]
    async fn test_generation_error_is_reported_and_loop_continues() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(
            &dir,
            ScriptedModel::new(|_| {
                Err(LlmError::Api {
                    status: 500,
                    message: "backend unavailable".into(),
                })
            }),
        );
        let output = drive(&generator, "bullets\nmemory\nquit\n").await;
        assert!(output.contains("Error generating post:"));
        assert!(output.contains("backend unavailable"));
        assert!(output.contains("(No saved posts yet)"));
        assert!(output.contains("Thank you for using the Aman Gupta Persona Writer!"));
    }

    #[tokio::test]
    async fn test_empty_input_reprompts_without_calling_model() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(ScriptedModel::new(|_| reply(POST)));
        let generator = PostGenerator::new(
            Arc::new(FewShotWriter::zero_shot(model.clone())),
            PersonaProfile::default(),
            MemoryStore::new(dir.path().join("memory.json")),
        )
        .unwrap();
        let output = drive(&generator, "\n   \nquit\n").await;
        assert_eq!(output.matches("Please enter some content bullets").count(), 2);
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_memory_lists_last_five_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new(dir.path().join("memory.json"));
        for i in 0..7 {
            let bullets = format!("bullets {i} {}", "x".repeat(60));
            store.append(MemoryRecord::new("p", &bullets)).unwrap();
        }
        let generator = generator(&dir, ScriptedModel::new(|_| reply(POST)));
        let output = drive(&generator, "memory\nquit\n").await;

        assert!(output.contains("Saved 7 posts:"));
        assert!(!output.contains("bullets 1 "));
        assert!(output.contains(&format!("  1. bullets 2 {}...", "x".repeat(40))));
        assert!(output.contains("  5. bullets 6 "));
    }

    #[tokio::test]
    async fn test_end_of_input_exits_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(&dir, ScriptedModel::new(|_| reply(POST)));
        let output = drive(&generator, "").await;
        assert!(output.contains("Thank you for using"));
    }

    #[tokio::test]
    async fn test_end_of_input_at_save_prompt_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator(&dir, ScriptedModel::new(|_| reply(POST)));
        drive(&generator, "Launched new product\n").await;
        assert!(generator.load_memory().is_empty());
    }
}
