//! Pass/fail acceptance metric.
//!
//! Five independent criteria, pass when at least three hold. No single
//! criterion is mandatory, so inspirational, casual, factual and strategic
//! posts can all clear the bar through different combinations.

use tracing::trace;

use crate::models::training::TrainingExample;
use crate::scoring::markers::{StyleMarkers, ToneCategory};
use crate::scoring::{char_len, ScoreResult, StyleMetric};

/// Exclusive length bounds, in characters.
const MIN_LENGTH: usize = 50;
const MAX_LENGTH: usize = 1000;
const REQUIRED_CRITERIA: usize = 3;

/// Per-criterion breakdown of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptanceCriteria {
    pub first_person: bool,
    pub reasonable_length: bool,
    pub energy_or_formality: bool,
    pub emoji: bool,
    /// Register of the first signature phrase found, if any.
    pub voice_tone: Option<ToneCategory>,
}

impl AcceptanceCriteria {
    pub fn met(&self) -> usize {
        [
            self.first_person,
            self.reasonable_length,
            self.energy_or_formality,
            self.emoji,
            self.voice_tone.is_some(),
        ]
        .iter()
        .filter(|&&c| c)
        .count()
    }

    pub fn passed(&self) -> bool {
        self.met() >= REQUIRED_CRITERIA
    }
}

pub struct AcceptanceMetric {
    markers: StyleMarkers,
}

impl Default for AcceptanceMetric {
    fn default() -> Self {
        Self::new(StyleMarkers::acceptance())
    }
}

impl AcceptanceMetric {
    pub fn new(markers: StyleMarkers) -> Self {
        Self { markers }
    }

    pub fn criteria(&self, post: &str) -> AcceptanceCriteria {
        let lower = post.to_lowercase();
        let len = char_len(post);

        AcceptanceCriteria {
            first_person: self.markers.has_first_person(&lower),
            reasonable_length: MIN_LENGTH < len && len < MAX_LENGTH,
            energy_or_formality: post.contains('!')
                || post.contains('?')
                || self.markers.has_formality(&lower),
            emoji: self.markers.has_emoji(post),
            voice_tone: self.markers.matched_tone(post),
        }
    }
}

impl StyleMetric for AcceptanceMetric {
    fn evaluate(&self, _example: &TrainingExample, post: &str) -> ScoreResult {
        let criteria = self.criteria(post);
        trace!(
            met = criteria.met(),
            tone = ?criteria.voice_tone,
            "acceptance criteria evaluated"
        );
        ScoreResult::Pass(criteria.passed())
    }

    fn name(&self) -> &'static str {
        "binary"
    }
}
