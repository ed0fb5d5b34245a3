use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A post produced by the generator. Ownership passes to the caller, which
/// decides whether to persist it; the record is stamped when saved.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPost {
    pub text: String,
    pub source_bullets: String,
}

impl GeneratedPost {
    pub fn new(text: String, source_bullets: String) -> Self {
        Self {
            text,
            source_bullets,
        }
    }
}

/// Persisted form of a generated post.
///
/// `timestamp` is a naive local ISO-8601 datetime, e.g. `2025-01-31T09:15:02.123456`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub post: String,
    pub bullets: String,
    pub timestamp: NaiveDateTime,
}

impl MemoryRecord {
    pub fn new(post: &str, bullets: &str) -> Self {
        Self {
            post: post.to_string(),
            bullets: bullets.to_string(),
            timestamp: Local::now().naive_local(),
        }
    }

    /// Bullets cut to `max_chars` characters with a trailing ellipsis.
    pub fn bullets_preview(&self, max_chars: usize) -> String {
        let preview: String = self.bullets.chars().take(max_chars).collect();
        format!("{preview}...")
    }
}
