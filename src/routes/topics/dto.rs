use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::forms::FormErrors;
use crate::utils::validation::{TOPIC_NAME_MAX_LENGTH, parse_choice_id, validate_text};

#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct TopicForm {
    #[serde(default)]
    #[schema(example = "Quadratic equations")]
    pub name: String,

    /// Subject id.
    #[serde(default)]
    #[schema(example = "1")]
    pub subject: String,
}

pub struct ValidTopic {
    pub name: String,
    pub subject_id: i32,
}

impl TopicForm {
    pub fn validate(&self) -> Result<ValidTopic, FormErrors> {
        let mut errors = FormErrors::new();
        let name = errors.check("name", validate_text(&self.name, TOPIC_NAME_MAX_LENGTH));
        let subject_id = errors.check("subject", parse_choice_id(&self.subject));

        match (name, subject_id) {
            (Some(name), Some(subject_id)) => Ok(ValidTopic { name, subject_id }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_needs_name_and_subject() {
        let errors = TopicForm::default().validate().err().unwrap();
        assert!(errors.contains("name"));
        assert!(errors.contains("subject"));
    }

    #[test]
    fn topic_name_is_trimmed_and_bounded() {
        let form = TopicForm {
            name: "  Fractions ".to_string(),
            subject: "4".to_string(),
        };
        let topic = form.validate().ok().unwrap();
        assert_eq!(topic.name, "Fractions");
        assert_eq!(topic.subject_id, 4);

        let form = TopicForm {
            name: "x".repeat(65),
            subject: "4".to_string(),
        };
        assert!(form.validate().err().unwrap().contains("name"));
    }
}
