use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::sea_orm_active_enums::Gender;
use crate::entities::{grade, presence_list, student, subject};
use crate::forms::{FormErrors, blank_as_none};
use crate::repositories::{NewStudent, StudentFilter};
use crate::routes::classes::dto::SchoolClassResponse;
use crate::routes::subjects::dto::SubjectSummary;
use crate::utils::validation::{
    grade_label, parse_choice_id, parse_choice_ids, parse_day, parse_gender, parse_presence,
    parse_whole_number, subject_display_name, validate_age, validate_person_name,
};

#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct StudentForm {
    #[serde(default)]
    #[schema(example = "Anna")]
    pub first_name: String,

    #[serde(default)]
    #[schema(example = "Nowak")]
    pub last_name: String,

    /// `M` or `F`.
    #[serde(default)]
    #[schema(example = "F")]
    pub gender: String,

    #[serde(default)]
    #[schema(example = "17")]
    pub age: String,

    /// Class id; blank for none.
    #[serde(default)]
    pub school_class: String,

    /// Subject ids.
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl StudentForm {
    pub fn validate(&self) -> Result<NewStudent, FormErrors> {
        let mut errors = FormErrors::new();
        let first_name = errors.check("first_name", validate_person_name(&self.first_name));
        let last_name = errors.check("last_name", validate_person_name(&self.last_name));
        let gender = errors.check("gender", parse_gender(&self.gender));
        let age = errors.check(
            "age",
            parse_whole_number(&self.age).and_then(validate_age),
        );
        let school_class_id = errors.check(
            "school_class",
            match self.school_class.trim() {
                "" => Ok(None),
                raw => parse_choice_id(raw).map(Some),
            },
        );
        let subject_ids = errors.check("subjects", parse_choice_ids(&self.subjects));

        match (first_name, last_name, gender, age, school_class_id, subject_ids) {
            (
                Some(first_name),
                Some(last_name),
                Some(gender),
                Some(age),
                Some(school_class_id),
                Some(subject_ids),
            ) => Ok(NewStudent {
                first_name,
                last_name,
                gender: Some(gender),
                age,
                school_class_id,
                subject_ids,
            }),
            _ => Err(errors),
        }
    }
}

/// Exact-match filters for the student list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentListQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub age: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub school_class: Option<i32>,
}

impl From<StudentListQuery> for StudentFilter {
    fn from(query: StudentListQuery) -> Self {
        let non_blank = |value: Option<String>| {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        Self {
            first_name: non_blank(query.first_name),
            last_name: non_blank(query.last_name),
            age: query.age,
            school_class_id: query.school_class,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentResponse {
    pub student_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub age: i32,
    pub school_class_id: Option<i32>,
}

impl From<student::Model> for StudentResponse {
    fn from(student: student::Model) -> Self {
        Self {
            student_id: student.student_id,
            first_name: student.first_name,
            last_name: student.last_name,
            gender: student.gender,
            age: student.age,
            school_class_id: student.school_class_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListResponse {
    pub total: usize,
    pub students: Vec<StudentResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentGradeResponse {
    pub grade_id: i32,
    pub value: f64,
    pub label: String,
    pub subject_id: i32,
    pub subject_name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct SubjectAverage {
    pub subject_id: i32,
    pub subject_name: String,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PresenceResponse {
    pub presence_id: i32,
    pub day: NaiveDateTime,
    pub present: Option<bool>,
}

impl From<presence_list::Model> for PresenceResponse {
    fn from(presence: presence_list::Model) -> Self {
        Self {
            presence_id: presence.presence_id,
            day: presence.day,
            present: presence.present,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDetailResponse {
    pub student: StudentResponse,
    pub school_class: Option<SchoolClassResponse>,
    pub subjects: Vec<SubjectSummary>,
    pub grades: Vec<StudentGradeResponse>,
    pub averages: Vec<SubjectAverage>,
    pub presence: Vec<PresenceResponse>,
}

fn display_name(subject: Option<&subject::Model>) -> String {
    subject
        .map(|subject| {
            subject_display_name(&subject.name)
                .unwrap_or(&subject.name)
                .to_string()
        })
        .unwrap_or_default()
}

pub fn grade_responses(grades: &[(grade::Model, Option<subject::Model>)]) -> Vec<StudentGradeResponse> {
    grades
        .iter()
        .map(|(grade, subject)| StudentGradeResponse {
            grade_id: grade.grade_id,
            value: grade.value,
            label: grade_label(grade.value).unwrap_or_default().to_string(),
            subject_id: grade.subject_id,
            subject_name: display_name(subject.as_ref()),
            created_at: grade.created_at,
        })
        .collect()
}

/// Mean grade per subject, rounded to two decimals, ordered by subject id.
pub fn subject_averages(grades: &[(grade::Model, Option<subject::Model>)]) -> Vec<SubjectAverage> {
    let mut per_subject: BTreeMap<i32, (String, f64, usize)> = BTreeMap::new();
    for (grade, subject) in grades {
        let entry = per_subject
            .entry(grade.subject_id)
            .or_insert_with(|| (display_name(subject.as_ref()), 0.0, 0));
        entry.1 += grade.value;
        entry.2 += 1;
    }

    per_subject
        .into_iter()
        .map(|(subject_id, (subject_name, sum, count))| SubjectAverage {
            subject_id,
            subject_name,
            average: (sum / count as f64 * 100.0).round() / 100.0,
            count,
        })
        .collect()
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct PresenceForm {
    /// `YYYY-MM-DD` or `YYYY-MM-DD HH:MM[:SS]`.
    #[serde(default)]
    #[schema(example = "2024-09-02")]
    pub day: String,

    /// `true`, `false` or blank for unknown.
    #[serde(default)]
    #[schema(example = "true")]
    pub present: String,
}

pub struct ValidPresence {
    pub day: NaiveDateTime,
    pub present: Option<bool>,
}

impl PresenceForm {
    pub fn validate(&self) -> Result<ValidPresence, FormErrors> {
        let mut errors = FormErrors::new();
        let day = errors.check("day", parse_day(&self.day));
        let present = errors.check("present", parse_presence(&self.present));

        match (day, present) {
            (Some(day), Some(present)) => Ok(ValidPresence { day, present }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_form() -> StudentForm {
        StudentForm {
            first_name: "Anna".to_string(),
            last_name: "Nowak".to_string(),
            gender: "F".to_string(),
            age: "17".to_string(),
            school_class: String::new(),
            subjects: vec!["1".to_string(), "2".to_string()],
        }
    }

    #[test]
    fn valid_student_form_builds_new_student() {
        let student = valid_form().validate().ok().unwrap();
        assert_eq!(student.first_name, "Anna");
        assert_eq!(student.gender, Some(Gender::Female));
        assert_eq!(student.school_class_id, None);
        assert_eq!(student.subject_ids, vec![1, 2]);
    }

    #[test]
    fn student_form_reports_every_bad_field() {
        let form = StudentForm {
            first_name: "Ann4".to_string(),
            last_name: String::new(),
            gender: "X".to_string(),
            age: "15".to_string(),
            school_class: "abc".to_string(),
            subjects: vec![],
        };
        let errors = form.validate().err().unwrap();
        for field in ["first_name", "last_name", "gender", "age", "school_class"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(!errors.contains("subjects"));
    }

    #[test]
    fn blank_list_filters_are_ignored() {
        let filter = StudentFilter::from(StudentListQuery {
            first_name: Some("  ".to_string()),
            last_name: Some("Nowak".to_string()),
            age: None,
            school_class: None,
        });
        assert_eq!(filter.first_name, None);
        assert_eq!(filter.last_name.as_deref(), Some("Nowak"));
    }

    #[test]
    fn averages_are_grouped_per_subject() {
        let created_at = NaiveDate::from_ymd_opt(2024, 9, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let maths = subject::Model {
            subject_id: 1,
            name: "Mat".to_string(),
        };
        let grade = |grade_id, value, subject_id| grade::Model {
            grade_id,
            value,
            subject_id,
            created_at,
        };
        let grades = vec![
            (grade(1, 5.0, 1), Some(maths.clone())),
            (grade(2, 3.75, 1), Some(maths)),
            (grade(3, 2.0, 2), None),
        ];

        let averages = subject_averages(&grades);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].subject_name, "Mathematics");
        assert_eq!(averages[0].average, 4.38);
        assert_eq!(averages[0].count, 2);
        assert_eq!(averages[1].average, 2.0);

        let responses = grade_responses(&grades);
        assert_eq!(responses[1].label, "4-");
    }

    #[test]
    fn presence_form_accepts_unknown_attendance() {
        let form = PresenceForm {
            day: "2024-09-02".to_string(),
            present: String::new(),
        };
        let presence = form.validate().ok().unwrap();
        assert_eq!(presence.present, None);

        let form = PresenceForm {
            day: "yesterday".to_string(),
            present: "yes".to_string(),
        };
        assert!(form.validate().err().unwrap().contains("day"));
    }
}
