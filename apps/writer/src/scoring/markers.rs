//! Lexical marker sets the style metrics look for.
//!
//! Kept as data so the tables can be tested and extended without touching
//! the scoring logic in `binary.rs` / `tone.rs`.

/// Stylistic registers the persona writes in. Each one contributes a
/// signature phrase to the authentic-voice check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneCategory {
    ReflectiveInspirational,
    CelebratoryCasual,
    ProfessionalFactual,
    ReflectivePractical,
    VulnerableInspirational,
    ProfessionalStrategic,
}

/// One signature phrase and the register it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoicePhrase {
    pub tone: ToneCategory,
    pub phrase: &'static str,
}

const fn voice(tone: ToneCategory, phrase: &'static str) -> VoicePhrase {
    VoicePhrase { tone, phrase }
}

/// Signature phrases shared by both metrics, one per tone.
const CORE_VOICE_PHRASES: [VoicePhrase; 6] = [
    voice(ToneCategory::ReflectiveInspirational, "i realized"),
    voice(ToneCategory::CelebratoryCasual, "big applause"),
    voice(ToneCategory::ProfessionalFactual, "we admit"),
    voice(ToneCategory::ReflectivePractical, "no suits"),
    voice(ToneCategory::VulnerableInspirational, "failure teaches"),
    voice(ToneCategory::ProfessionalStrategic, "world wants"),
];

/// Full marker configuration for one metric. Word markers are lowercase and
/// matched against lowercased text; voice phrases and emoji match the post
/// verbatim, so "I realized" is not "i realized".
#[derive(Debug, Clone)]
pub struct StyleMarkers {
    pub first_person_markers: Vec<&'static str>,
    pub formality_markers: Vec<&'static str>,
    pub emoji_set: Vec<&'static str>,
    pub voice_phrases_by_tone: Vec<VoicePhrase>,
}

impl StyleMarkers {
    /// Markers for the pass/fail acceptance metric.
    pub fn acceptance() -> Self {
        Self {
            first_person_markers: vec!["i ", "i'm", "my ", "we ", "me "],
            formality_markers: vec!["honored", "strategic", "promise"],
            emoji_set: vec!["🔥", "💡", "🎧", "🇮🇳", "💪", "🙏", "😊", "✨", "🤖"],
            voice_phrases_by_tone: CORE_VOICE_PHRASES.to_vec(),
        }
    }

    /// Markers for the continuous tone metric.
    pub fn tone() -> Self {
        let mut voice_phrases_by_tone = CORE_VOICE_PHRASES.to_vec();
        voice_phrases_by_tone.push(voice(ToneCategory::ProfessionalStrategic, "jai hind"));

        Self {
            first_person_markers: vec!["i ", "i'm", "my ", "we "],
            formality_markers: vec!["honored", "global", "innovation"],
            emoji_set: vec!["🔥", "💡", "🇮🇳", "💪", "🙏", "😊", "✨"],
            voice_phrases_by_tone,
        }
    }

    pub fn has_first_person(&self, lower: &str) -> bool {
        self.first_person_markers.iter().any(|m| lower.contains(m))
    }

    pub fn has_formality(&self, lower: &str) -> bool {
        self.formality_markers.iter().any(|m| lower.contains(m))
    }

    pub fn has_emoji(&self, text: &str) -> bool {
        self.emoji_set.iter().any(|e| text.contains(e))
    }

    /// First tone whose signature phrase appears in `text`, case-sensitive.
    pub fn matched_tone(&self, text: &str) -> Option<ToneCategory> {
        self.voice_phrases_by_tone
            .iter()
            .find(|v| text.contains(v.phrase))
            .map(|v| v.tone)
    }
}
