use serde::{Deserialize, Serialize};

use crate::models::persona::PostRequest;

/// Field names every training record must carry, in file order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "person_name",
    "person_title",
    "company",
    "content_bullets",
    "post",
];

/// A labeled (persona + bullets → post) example.
///
/// Absent fields deserialize to empty strings so the corpus check can name
/// them instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingExample {
    #[serde(default)]
    pub person_name: String,
    #[serde(default)]
    pub person_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub content_bullets: String,
    #[serde(default)]
    pub post: String,
}

impl TrainingExample {
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "person_name" => Some(&self.person_name),
            "person_title" => Some(&self.person_title),
            "company" => Some(&self.company),
            "content_bullets" => Some(&self.content_bullets),
            "post" => Some(&self.post),
            _ => None,
        }
    }

    /// Required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|name| self.field(name).map_or(true, |v| v.trim().is_empty()))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// The input half of the example.
    pub fn request(&self) -> PostRequest {
        PostRequest {
            person_name: self.person_name.clone(),
            person_title: self.person_title.clone(),
            company: self.company.clone(),
            content_bullets: self.content_bullets.clone(),
        }
    }

    /// Pairs a request with an output, used for bootstrapped demos.
    pub fn from_request(request: &PostRequest, post: String) -> Self {
        Self {
            person_name: request.person_name.clone(),
            person_title: request.person_title.clone(),
            company: request.company.clone(),
            content_bullets: request.content_bullets.clone(),
            post,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_deserialize_as_missing() {
        let json = r#"{"person_name": "Aman Gupta", "post": "Hello world"}"#;
        let example: TrainingExample = serde_json::from_str(json).unwrap();
        assert_eq!(
            example.missing_fields(),
            vec!["person_title", "company", "content_bullets"]
        );
        assert!(!example.is_complete());
    }

    #[test]
    fn test_blank_field_counts_as_missing() {
        let example = TrainingExample {
            person_name: "Aman Gupta".into(),
            person_title: "CMO".into(),
            company: "boAt".into(),
            content_bullets: "   ".into(),
            post: "A post".into(),
        };
        assert_eq!(example.missing_fields(), vec!["content_bullets"]);
    }

    #[test]
    fn test_request_round_trips_inputs() {
        let example = TrainingExample {
            person_name: "Aman Gupta".into(),
            person_title: "CMO".into(),
            company: "boAt".into(),
            content_bullets: "launch".into(),
            post: "We launched!".into(),
        };
        let demo = TrainingExample::from_request(&example.request(), "Generated".into());
        assert_eq!(demo.content_bullets, "launch");
        assert_eq!(demo.post, "Generated");
    }
}
