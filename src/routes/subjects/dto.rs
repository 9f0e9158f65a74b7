use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{school_subject_topic, subject};
use crate::forms::FormErrors;
use crate::utils::validation::{subject_display_name, validate_subject_name};

#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct SubjectForm {
    /// Catalogue code, e.g. `Mat`.
    #[serde(default)]
    #[schema(example = "Mat")]
    pub name: String,
}

impl SubjectForm {
    pub fn validate(&self) -> Result<String, FormErrors> {
        let mut errors = FormErrors::new();
        match errors.check("name", validate_subject_name(&self.name)) {
            Some(name) => Ok(name),
            None => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubjectSummary {
    pub subject_id: i32,
    pub name: String,
    pub display_name: String,
}

impl From<&subject::Model> for SubjectSummary {
    fn from(subject: &subject::Model) -> Self {
        Self {
            subject_id: subject.subject_id,
            name: subject.name.clone(),
            display_name: subject_display_name(&subject.name)
                .unwrap_or(&subject.name)
                .to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopicResponse {
    pub topic_id: i32,
    pub name: String,
    pub subject_id: i32,
}

impl From<school_subject_topic::Model> for TopicResponse {
    fn from(topic: school_subject_topic::Model) -> Self {
        Self {
            topic_id: topic.topic_id,
            name: topic.name,
            subject_id: topic.subject_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    #[serde(flatten)]
    pub subject: SubjectSummary,
    pub topics: Vec<TopicResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectListResponse {
    pub total: usize,
    pub subjects: Vec<SubjectResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_name_must_be_a_catalogue_code() {
        let form = SubjectForm {
            name: "Alchemy".to_string(),
        };
        assert!(form.validate().err().unwrap().contains("name"));

        let form = SubjectForm {
            name: "Chem".to_string(),
        };
        assert_eq!(form.validate().ok(), Some("Chem".to_string()));
    }

    #[test]
    fn summary_carries_display_name() {
        let subject = subject::Model {
            subject_id: 3,
            name: "Fiz".to_string(),
        };
        let summary = SubjectSummary::from(&subject);
        assert_eq!(summary.display_name, "Physics");
    }
}
