use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::student;
use crate::forms::{FormErrors, blank_as_none};
use crate::repositories::{GradeWithLinks, NewGrade};
use crate::routes::subjects::dto::{SubjectSummary, TopicResponse};
use crate::utils::validation::{REQUIRED, grade_label, parse_choice_id, parse_choice_ids, parse_grade};

#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct GradeForm {
    /// Scale label (`4+`) or value (`4.5`).
    #[serde(default)]
    #[schema(example = "4+")]
    pub grade: String,

    /// Subject id.
    #[serde(default)]
    #[schema(example = "1")]
    pub subject: String,

    /// Topic ids; each must belong to the subject.
    #[serde(default)]
    pub topics: Vec<String>,

    /// Student ids; at least one.
    #[serde(default)]
    pub students: Vec<String>,
}

impl GradeForm {
    pub fn validate(&self) -> Result<NewGrade, FormErrors> {
        let mut errors = FormErrors::new();
        let value = errors.check("grade", parse_grade(&self.grade));
        let subject_id = errors.check("subject", parse_choice_id(&self.subject));
        let topic_ids = errors.check("topics", parse_choice_ids(&self.topics));
        let student_ids = errors.check(
            "students",
            parse_choice_ids(&self.students).and_then(|ids| {
                if ids.is_empty() {
                    Err(REQUIRED.to_string())
                } else {
                    Ok(ids)
                }
            }),
        );

        match (value, subject_id, topic_ids, student_ids) {
            (Some(value), Some(subject_id), Some(topic_ids), Some(student_ids)) => Ok(NewGrade {
                value,
                subject_id,
                topic_ids,
                student_ids,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GradeListQuery {
    /// Only grades of this subject.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub subject: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentSummary {
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<student::Model> for StudentSummary {
    fn from(student: student::Model) -> Self {
        Self {
            student_id: student.student_id,
            first_name: student.first_name,
            last_name: student.last_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeResponse {
    pub grade_id: i32,
    pub value: f64,
    pub label: String,
    pub created_at: NaiveDateTime,
    pub topics: Vec<TopicResponse>,
    pub students: Vec<StudentSummary>,
}

impl From<GradeWithLinks> for GradeResponse {
    fn from(linked: GradeWithLinks) -> Self {
        Self {
            grade_id: linked.grade.grade_id,
            value: linked.grade.value,
            label: grade_label(linked.grade.value)
                .unwrap_or_default()
                .to_string(),
            created_at: linked.grade.created_at,
            topics: linked.topics.into_iter().map(Into::into).collect(),
            students: linked.students.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectGradesResponse {
    pub subject: SubjectSummary,
    pub topics: Vec<TopicResponse>,
    pub grades: Vec<GradeResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GradeListResponse {
    pub total: usize,
    pub subjects: Vec<SubjectGradesResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(grade: &str, students: &[&str]) -> GradeForm {
        GradeForm {
            grade: grade.to_string(),
            subject: "1".to_string(),
            topics: vec!["3".to_string()],
            students: students.iter().map(|id| id.to_string()).collect(),
        }
    }

    #[test]
    fn grade_label_is_converted_to_value() {
        let grade = form("4+", &["7", "8"]).validate().ok().unwrap();
        assert_eq!(grade.value, 4.5);
        assert_eq!(grade.topic_ids, vec![3]);
        assert_eq!(grade.student_ids, vec![7, 8]);
    }

    #[test]
    fn grade_off_the_scale_is_rejected() {
        let errors = form("6.5", &["7"]).validate().err().unwrap();
        assert!(errors.contains("grade"));
        let errors = form("1.25", &["7"]).validate().err().unwrap();
        assert!(errors.contains("grade"));
    }

    #[test]
    fn grade_needs_a_student() {
        let errors = form("3", &[""]).validate().err().unwrap();
        assert_eq!(errors.get("students"), Some(REQUIRED));
    }
}
