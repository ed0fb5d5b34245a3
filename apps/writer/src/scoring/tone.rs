//! Continuous tone metric — a weighted 0–1 score for finer comparison
//! between candidate demo sets than the pass/fail verdict allows.

use crate::models::training::TrainingExample;
use crate::scoring::markers::StyleMarkers;
use crate::scoring::{char_len, ScoreResult, StyleMetric};

/// Partial weight per criterion. Emoji is a bonus, not a requirement.
#[derive(Debug, Clone, Copy)]
pub struct ToneWeights {
    pub first_person: f64,
    pub length: f64,
    pub energy: f64,
    pub authenticity: f64,
    pub emoji_bonus: f64,
}

impl Default for ToneWeights {
    fn default() -> Self {
        Self {
            first_person: 0.2,
            length: 0.2,
            energy: 0.2,
            authenticity: 0.2,
            emoji_bonus: 0.1,
        }
    }
}

const MIN_LENGTH: usize = 100;
const MAX_LENGTH: usize = 700;

pub struct ToneMetric {
    markers: StyleMarkers,
    weights: ToneWeights,
}

impl Default for ToneMetric {
    fn default() -> Self {
        Self {
            markers: StyleMarkers::tone(),
            weights: ToneWeights::default(),
        }
    }
}

impl ToneMetric {
    pub fn score(&self, post: &str) -> f64 {
        let lower = post.to_lowercase();
        let len = char_len(post);
        let w = &self.weights;
        let mut score = 0.0;

        if self.markers.has_first_person(&lower) {
            score += w.first_person;
        }
        if MIN_LENGTH < len && len < MAX_LENGTH {
            score += w.length;
        }
        if post.contains('!') || self.markers.has_formality(&lower) {
            score += w.energy;
        }
        if self.markers.matched_tone(post).is_some() {
            score += w.authenticity;
        }
        if self.markers.has_emoji(post) {
            score += w.emoji_bonus;
        }

        score.clamp(0.0, 1.0)
    }
}

impl StyleMetric for ToneMetric {
    fn evaluate(&self, _example: &TrainingExample, post: &str) -> ScoreResult {
        ScoreResult::Score(self.score(post))
    }

    fn name(&self) -> &'static str {
        "tone"
    }
}
