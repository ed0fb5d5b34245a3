//! Compiled writer cache — persists the winning demo set so a later run can
//! skip the search.

use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::optimizer::Optimized;
use crate::generation::writer::FewShotWriter;
use crate::llm_client::LanguageModel;
use crate::models::training::TrainingExample;
use crate::scoring::MetricKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledWriter {
    pub demos: Vec<TrainingExample>,
    pub score: f64,
    pub metric: MetricKind,
    pub model: String,
    pub compiled_at: NaiveDateTime,
}

impl CompiledWriter {
    pub fn from_optimized(optimized: &Optimized, metric: MetricKind) -> Self {
        Self {
            demos: optimized.writer.demos().to_vec(),
            score: optimized.report.best_score,
            metric,
            model: optimized.writer.model_name().to_string(),
            compiled_at: Local::now().naive_local(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Persistence(format!("cannot serialize compiled writer: {e}")))?;
        std::fs::write(path, content)?;
        info!("Saved compiled writer ({} demos) to {}", self.demos.len(), path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::DataFormat(format!("{}: {e}", path.display())))
    }

    pub fn into_writer(self, model: Arc<dyn LanguageModel>) -> FewShotWriter {
        FewShotWriter::with_demos(model, self.demos)
    }
}
