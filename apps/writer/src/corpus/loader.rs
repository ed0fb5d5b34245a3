use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::training::TrainingExample;

/// Top-level key holding the example array.
pub const TRAINING_KEY: &str = "training_posts";

/// Loads labeled examples from a `{"training_posts": [...]}` JSON file.
pub fn load(path: &Path) -> Result<Vec<TrainingExample>, AppError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        AppError::DataFormat(format!("cannot read {}: {e}", path.display()))
    })?;

    let examples = parse(&content)
        .map_err(|e| AppError::DataFormat(format!("{}: {e}", path.display())))?;

    info!("Loaded {} training posts from {}", examples.len(), path.display());
    Ok(examples)
}

fn parse(content: &str) -> Result<Vec<TrainingExample>, String> {
    let mut root: Value =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;

    let posts = root
        .get_mut(TRAINING_KEY)
        .map(Value::take)
        .ok_or_else(|| format!("missing top-level key '{TRAINING_KEY}'"))?;

    if !posts.is_array() {
        return Err(format!("'{TRAINING_KEY}' must be an array"));
    }

    serde_json::from_value(posts).map_err(|e| format!("malformed training record: {e}"))
}
