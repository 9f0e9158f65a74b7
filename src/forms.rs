//! Form layer shared by every write handler.
//!
//! Browser forms arrive as string fields. Each entity's form struct binds
//! them untyped and its `validate()` turns them into a typed value or a
//! [`FormErrors`] map keyed by field name. Handlers answer a failed
//! submission with the same [`FormPage`] a GET would render, plus errors.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::{StatusCode, header};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::Gender;
use crate::entities::{school_class, school_subject_topic, student, subject};
use crate::utils::validation::{GRADE_SCALE, SUBJECT_CATALOGUE, subject_display_name};

/// Key for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error; the first message for a field is kept.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// Unwraps a field check, recording its error under `field`.
    pub fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl ToString, label: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
        }
    }
}

pub fn gender_choices() -> Vec<Choice> {
    [Gender::Male, Gender::Female]
        .into_iter()
        .map(|gender| Choice::new(gender.code(), gender.label()))
        .collect()
}

pub fn grade_choices() -> Vec<Choice> {
    GRADE_SCALE
        .iter()
        .map(|(value, label)| Choice::new(value, *label))
        .collect()
}

/// Catalogue codes not yet taken by an existing subject.
pub fn subject_name_choices(existing: &[subject::Model]) -> Vec<Choice> {
    SUBJECT_CATALOGUE
        .iter()
        .filter(|(code, _)| !existing.iter().any(|subject| subject.name == *code))
        .map(|(code, name)| Choice::new(code, *name))
        .collect()
}

pub fn subject_choices(subjects: &[subject::Model]) -> Vec<Choice> {
    subjects
        .iter()
        .map(|subject| {
            let label = subject_display_name(&subject.name).unwrap_or(&subject.name);
            Choice::new(subject.subject_id, label)
        })
        .collect()
}

pub fn school_class_choices(classes: &[school_class::Model]) -> Vec<Choice> {
    classes
        .iter()
        .map(|class| {
            Choice::new(
                class.school_class_id,
                format!("{} ({})", class.name, class.year),
            )
        })
        .collect()
}

pub fn student_choices(students: &[student::Model]) -> Vec<Choice> {
    students
        .iter()
        .map(|student| {
            Choice::new(
                student.student_id,
                format!("{} {}", student.first_name, student.last_name),
            )
        })
        .collect()
}

/// Topics labelled with their subject, e.g. `Mathematics: Fractions`.
pub fn topic_choices(
    topics: &[school_subject_topic::Model],
    subjects: &[subject::Model],
) -> Vec<Choice> {
    topics
        .iter()
        .map(|topic| {
            let subject_name = subjects
                .iter()
                .find(|subject| subject.subject_id == topic.subject_id)
                .map(|subject| subject_display_name(&subject.name).unwrap_or(&subject.name))
                .unwrap_or_default();
            Choice::new(topic.topic_id, format!("{subject_name}: {}", topic.name))
        })
        .collect()
}

/// Everything a form template needs: current values, errors and select options.
#[derive(Debug, Serialize)]
pub struct FormPage<F> {
    pub form: F,
    pub errors: FormErrors,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub choices: BTreeMap<&'static str, Vec<Choice>>,
}

impl<F: Serialize> FormPage<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            errors: FormErrors::new(),
            choices: BTreeMap::new(),
        }
    }

    pub fn with_choices(mut self, field: &'static str, choices: Vec<Choice>) -> Self {
        self.choices.insert(field, choices);
        self
    }

    pub fn with_errors(mut self, errors: FormErrors) -> Self {
        self.errors = errors;
        self
    }

    /// Renders a rejected submission.
    pub fn invalid(self) -> Response {
        (StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

impl<F: Serialize> IntoResponse for FormPage<F> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Query filter value where a blank field means "no filter".
///
/// Non-blank values that fail to parse are rejected, so the extractor answers 400.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// `302 Found` to `location`.
pub fn redirect_to(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_for_a_field_wins() {
        let mut errors = FormErrors::new();
        errors.add("age", "Enter a whole number.");
        errors.add("age", "Age must be between 16 and 80.");
        assert_eq!(errors.get("age"), Some("Enter a whole number."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn check_records_only_failures() {
        let mut errors = FormErrors::new();
        let ok: Option<i32> = errors.check("year", Ok(2024));
        let bad: Option<i32> = errors.check("name", Err("This field is required.".to_string()));
        assert_eq!(ok, Some(2024));
        assert_eq!(bad, None);
        assert!(errors.contains("name"));
        assert!(!errors.contains("year"));
    }

    #[test]
    fn redirect_uses_found_status() {
        let response = redirect_to("/class/list");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/class/list"
        );
    }

    #[derive(Debug, Deserialize)]
    struct AgeFilter {
        #[serde(default, deserialize_with = "blank_as_none")]
        age: Option<i32>,
    }

    #[test]
    fn blank_numeric_filters_mean_no_filter() {
        let blank: AgeFilter = serde_json::from_value(serde_json::json!({"age": " "})).unwrap();
        assert_eq!(blank.age, None);
        let missing: AgeFilter = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(missing.age, None);
        let set: AgeFilter = serde_json::from_value(serde_json::json!({"age": "17"})).unwrap();
        assert_eq!(set.age, Some(17));
        assert!(serde_json::from_value::<AgeFilter>(serde_json::json!({"age": "old"})).is_err());
    }

    #[test]
    fn subject_name_choices_skip_taken_codes() {
        let taken = vec![subject::Model {
            subject_id: 1,
            name: "Mat".to_string(),
        }];
        let choices = subject_name_choices(&taken);
        assert_eq!(choices.len(), SUBJECT_CATALOGUE.len() - 1);
        assert!(choices.iter().all(|choice| choice.value != "Mat"));
    }

    #[test]
    fn grade_choices_carry_scale_labels() {
        let choices = grade_choices();
        assert_eq!(choices.len(), 16);
        assert_eq!(choices[1].value, "1.5");
        assert_eq!(choices[1].label, "1+");
    }

    #[test]
    fn form_page_serializes_errors_as_map() {
        let mut errors = FormErrors::new();
        errors.add(NON_FIELD_ERRORS, "Duplicate");
        let page = FormPage::new(serde_json::json!({"name": "3"})).with_errors(errors);
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["errors"]["__all__"], "Duplicate");
        assert!(value.get("choices").is_none());
    }
}
