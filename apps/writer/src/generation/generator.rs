//! Post generator — the tuned writer bound to the persona, plus the memory log.
//!
//! No re-scoring happens here; the metric only steers the demo search.

use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::generation::writer::PostWriter;
use crate::generation::GenerationError;
use crate::memory::MemoryStore;
use crate::models::persona::PersonaProfile;
use crate::models::post::{GeneratedPost, MemoryRecord};

pub struct PostGenerator {
    writer: Arc<dyn PostWriter>,
    persona: PersonaProfile,
    memory: MemoryStore,
}

impl PostGenerator {
    /// Builds the generator and makes sure the memory log exists.
    pub fn new(
        writer: Arc<dyn PostWriter>,
        persona: PersonaProfile,
        memory: MemoryStore,
    ) -> Result<Self, AppError> {
        memory.ensure_exists()?;
        info!("Memory log: {}", memory.path().display());
        Ok(Self {
            writer,
            persona,
            memory,
        })
    }

    pub fn persona(&self) -> &PersonaProfile {
        &self.persona
    }

    pub async fn generate(&self, content_bullets: &str) -> Result<GeneratedPost, GenerationError> {
        let request = self.persona.request(content_bullets);
        let text = self.writer.write(&request).await?;
        info!("Generated post ({} chars)", text.chars().count());
        Ok(GeneratedPost::new(text, content_bullets.to_string()))
    }

    /// Appends the post to the memory log, stamped with the save time.
    pub fn save(&self, post: &str, bullets: &str) -> Result<(), AppError> {
        let count = self.memory.append(MemoryRecord::new(post, bullets))?;
        info!("Saved post to memory ({count} total)");
        Ok(())
    }

    /// Every saved record; empty when the log is absent or unreadable.
    pub fn load_memory(&self) -> Vec<MemoryRecord> {
        self.memory.load()
    }
}
