//! Corpus quality gate.
//!
//! Missing fields fail the check; short posts and vague bullets only warn.
//! The check never raises: the caller decides whether to proceed.

use tracing::{info, warn};

use crate::models::training::TrainingExample;

/// Soft minimums, in characters.
const MIN_POST_CHARS: usize = 50;
const MIN_BULLETS_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct MissingFields {
    /// 1-based position in the corpus.
    pub post_number: usize,
    pub fields: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QualityWarning {
    ShortPost { post_number: usize, chars: usize },
    VagueBullets { post_number: usize, chars: usize },
}

#[derive(Debug, Clone, Default)]
pub struct QualityReport {
    pub total: usize,
    pub missing: Vec<MissingFields>,
    pub warnings: Vec<QualityWarning>,
}

impl QualityReport {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Checks every example and logs the findings.
pub fn verify(examples: &[TrainingExample]) -> QualityReport {
    let mut report = QualityReport {
        total: examples.len(),
        ..Default::default()
    };

    info!("Data quality check: {} posts", examples.len());

    for (idx, example) in examples.iter().enumerate() {
        let post_number = idx + 1;

        let fields = example.missing_fields();
        if !fields.is_empty() {
            warn!("Post {post_number}: missing {fields:?}");
            report.missing.push(MissingFields {
                post_number,
                fields,
            });
            continue;
        }

        let post_chars = example.post.chars().count();
        let bullets_chars = example.content_bullets.chars().count();

        if post_chars < MIN_POST_CHARS {
            warn!("Post {post_number}: very short ({post_chars} chars)");
            report.warnings.push(QualityWarning::ShortPost {
                post_number,
                chars: post_chars,
            });
        }
        if bullets_chars < MIN_BULLETS_CHARS {
            warn!("Post {post_number}: vague bullets ({bullets_chars} chars)");
            report.warnings.push(QualityWarning::VagueBullets {
                post_number,
                chars: bullets_chars,
            });
        }

        let preview: String = example.content_bullets.chars().take(30).collect();
        info!("Post {post_number}: {post_chars} chars, {preview}...");
    }

    if report.passed() {
        info!(
            "Data quality check complete ({} warnings)",
            report.warnings.len()
        );
    } else {
        warn!(
            "Data quality check failed: {} of {} posts incomplete",
            report.missing.len(),
            report.total
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(bullets: &str, post: &str) -> TrainingExample {
        TrainingExample {
            person_name: "Aman Gupta".into(),
            person_title: "Co-Founder & CMO".into(),
            company: "boAt Lifestyle".into(),
            content_bullets: bullets.into(),
            post: post.into(),
        }
    }

    #[test]
    fn test_complete_corpus_passes_without_warnings() {
        let examples = vec![example(
            "Launched Airdopes; record sales",
            &"We did it! ".repeat(10),
        )];
        let report = verify(&examples);
        assert!(report.passed());
        assert!(report.warnings.is_empty());
        assert_eq!(report.total, 1);
    }

    #[test]
    fn test_missing_field_fails_and_is_named() {
        let mut broken = example("Launched Airdopes; record sales", &"x".repeat(60));
        broken.company = String::new();
        let examples = vec![
            example("Launched Airdopes; record sales", &"x".repeat(60)),
            broken,
        ];
        let report = verify(&examples);
        assert!(!report.passed());
        assert_eq!(
            report.missing,
            vec![MissingFields {
                post_number: 2,
                fields: vec!["company"],
            }]
        );
    }

    #[test]
    fn test_every_incomplete_record_is_reported() {
        let examples = vec![
            TrainingExample::default(),
            example("Launched Airdopes; record sales", &"x".repeat(60)),
            TrainingExample {
                post: "p".into(),
                ..Default::default()
            },
        ];
        let report = verify(&examples);
        assert_eq!(report.missing.len(), 2);
        assert_eq!(report.missing[0].fields.len(), 5);
        assert_eq!(report.missing[1].post_number, 3);
        assert!(!report.missing[1].fields.contains(&"post"));
    }

    #[test]
    fn test_short_fields_warn_but_pass() {
        let report = verify(&[example("hiring", "Short one.")]);
        assert!(report.passed());
        assert_eq!(
            report.warnings,
            vec![
                QualityWarning::ShortPost {
                    post_number: 1,
                    chars: 10
                },
                QualityWarning::VagueBullets {
                    post_number: 1,
                    chars: 6
                },
            ]
        );
    }

    #[test]
    fn test_empty_corpus_passes() {
        let report = verify(&[]);
        assert!(report.passed());
        assert_eq!(report.total, 0);
    }
}
