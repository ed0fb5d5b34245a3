//! Style scoring — pluggable metrics that judge how closely a generated post
//! matches the persona's voice.
//!
//! Both metrics are pure functions of the post text. The optimizer holds an
//! `Arc<dyn StyleMetric>` chosen at startup via `--metric`.

use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::training::TrainingExample;

pub mod binary;
pub mod markers;
pub mod tone;

pub use binary::AcceptanceMetric;
pub use tone::ToneMetric;

/// Output of a metric: a verdict or a bounded score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreResult {
    Pass(bool),
    Score(f64),
}

impl ScoreResult {
    /// Numeric view used when averaging over a training set.
    pub fn as_f64(&self) -> f64 {
        match *self {
            ScoreResult::Pass(true) => 1.0,
            ScoreResult::Pass(false) => 0.0,
            ScoreResult::Score(s) => s.clamp(0.0, 1.0),
        }
    }

    /// Whether the result is good enough to keep a bootstrapped demo.
    pub fn accepted(&self) -> bool {
        self.as_f64() >= 0.5
    }
}

/// A style metric. `example` is the labeled record the post was generated
/// for; the built-in metrics only inspect the post itself.
pub trait StyleMetric: Send + Sync {
    fn evaluate(&self, example: &TrainingExample, post: &str) -> ScoreResult;

    fn name(&self) -> &'static str;
}

/// Which metric drives the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Pass when at least 3 of 5 style criteria hold.
    #[default]
    Binary,
    /// Weighted 0–1 tone score.
    Tone,
}

impl MetricKind {
    pub fn build(self) -> Arc<dyn StyleMetric> {
        match self {
            MetricKind::Binary => Arc::new(AcceptanceMetric::default()),
            MetricKind::Tone => Arc::new(ToneMetric::default()),
        }
    }
}

/// Post length in characters (not bytes).
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
