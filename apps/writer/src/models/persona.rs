use serde::{Deserialize, Serialize};

/// The single individual whose voice every generated post imitates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub name: String,
    pub title: String,
    pub company: String,
    pub company_profile: String,
}

impl Default for PersonaProfile {
    fn default() -> Self {
        Self {
            name: "Aman Gupta".to_string(),
            title: "Co-Founder & CMO".to_string(),
            company: "boAt Lifestyle".to_string(),
            company_profile: "Consumer Electronics, 500+ employees".to_string(),
        }
    }
}

/// Inputs for one post: who is writing and what to cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRequest {
    pub person_name: String,
    pub person_title: String,
    pub company: String,
    pub content_bullets: String,
}

impl PersonaProfile {
    pub fn request(&self, content_bullets: &str) -> PostRequest {
        PostRequest {
            person_name: self.name.clone(),
            person_title: self.title.clone(),
            company: self.company.clone(),
            content_bullets: content_bullets.to_string(),
        }
    }
}
