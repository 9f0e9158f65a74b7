use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::Gender;
use crate::entities::{subject, teacher};
use crate::forms::FormErrors;
use crate::repositories::NewTeacher;
use crate::routes::subjects::dto::SubjectSummary;
use crate::utils::validation::{parse_choice_ids, parse_gender, validate_person_name};

#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct TeacherForm {
    #[serde(default)]
    #[schema(example = "Jan")]
    pub first_name: String,

    #[serde(default)]
    #[schema(example = "Kowalski")]
    pub last_name: String,

    /// `M` or `F`.
    #[serde(default)]
    #[schema(example = "M")]
    pub gender: String,

    /// Subject ids.
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl TeacherForm {
    pub fn validate(&self) -> Result<NewTeacher, FormErrors> {
        let mut errors = FormErrors::new();
        let first_name = errors.check("first_name", validate_person_name(&self.first_name));
        let last_name = errors.check("last_name", validate_person_name(&self.last_name));
        let gender = errors.check("gender", parse_gender(&self.gender));
        let subject_ids = errors.check("subjects", parse_choice_ids(&self.subjects));

        match (first_name, last_name, gender, subject_ids) {
            (Some(first_name), Some(last_name), Some(gender), Some(subject_ids)) => {
                Ok(NewTeacher {
                    first_name,
                    last_name,
                    gender,
                    subject_ids,
                })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub teacher_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub subjects: Vec<SubjectSummary>,
}

impl TeacherResponse {
    pub fn new(teacher: teacher::Model, subjects: &[subject::Model]) -> Self {
        Self {
            teacher_id: teacher.teacher_id,
            first_name: teacher.first_name,
            last_name: teacher.last_name,
            gender: teacher.gender,
            subjects: subjects.iter().map(SubjectSummary::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherListResponse {
    pub total: usize,
    pub teachers: Vec<TeacherResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teacher_without_subjects_is_valid() {
        let form = TeacherForm {
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            gender: "M".to_string(),
            subjects: vec![],
        };
        let teacher = form.validate().ok().unwrap();
        assert_eq!(teacher.gender, Gender::Male);
        assert!(teacher.subject_ids.is_empty());
    }

    #[test]
    fn teacher_gender_is_required() {
        let form = TeacherForm {
            first_name: "Jan".to_string(),
            last_name: "Kowalski".to_string(),
            gender: String::new(),
            subjects: vec!["abc".to_string()],
        };
        let errors = form.validate().err().unwrap();
        assert_eq!(errors.get("gender"), Some("This field is required."));
        assert!(errors.contains("subjects"));
    }
}
