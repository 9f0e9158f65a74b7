use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::school_class;
use crate::forms::FormErrors;
use crate::routes::students::dto::StudentResponse;
use crate::utils::validation::{
    CLASS_NAME_MAX_LENGTH, parse_whole_number, validate_class_year, validate_text,
};

#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct SchoolClassForm {
    #[serde(default)]
    #[schema(example = "3B")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "2024")]
    pub year: String,
}

pub struct ValidSchoolClass {
    pub name: String,
    pub year: i32,
}

impl SchoolClassForm {
    pub fn validate(&self, current_year: i32) -> Result<ValidSchoolClass, FormErrors> {
        let mut errors = FormErrors::new();
        let name = errors.check("name", validate_text(&self.name, CLASS_NAME_MAX_LENGTH));
        let year = errors.check(
            "year",
            parse_whole_number(&self.year).and_then(|year| validate_class_year(year, current_year)),
        );

        match (name, year) {
            (Some(name), Some(year)) => Ok(ValidSchoolClass { name, year }),
            _ => Err(errors),
        }
    }
}

impl From<&school_class::Model> for SchoolClassForm {
    fn from(school_class: &school_class::Model) -> Self {
        Self {
            name: school_class.name.clone(),
            year: school_class.year.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SchoolClassResponse {
    pub school_class_id: i32,
    pub name: String,
    pub year: i32,
}

impl From<school_class::Model> for SchoolClassResponse {
    fn from(school_class: school_class::Model) -> Self {
        Self {
            school_class_id: school_class.school_class_id,
            name: school_class.name,
            year: school_class.year,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SchoolClassListResponse {
    pub total: usize,
    pub classes: Vec<SchoolClassResponse>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SchoolClassDetailResponse {
    pub school_class: SchoolClassResponse,
    pub students: Vec<StudentResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, year: &str) -> SchoolClassForm {
        SchoolClassForm {
            name: name.to_string(),
            year: year.to_string(),
        }
    }

    #[test]
    fn year_before_2020_is_rejected() {
        let errors = form("1A", "2019").validate(2026).err().unwrap();
        assert_eq!(
            errors.get("year"),
            Some("Ensure this value is greater than or equal to 2020.")
        );
    }

    #[test]
    fn current_and_next_year_are_accepted() {
        assert_eq!(form("1A", "2026").validate(2026).ok().unwrap().year, 2026);
        assert_eq!(form("1A", "2027").validate(2026).ok().unwrap().year, 2027);
        assert!(form("1A", "2028").validate(2026).is_err());
    }

    #[test]
    fn name_and_year_are_required() {
        let errors = form("", "abc").validate(2026).err().unwrap();
        assert!(errors.contains("name"));
        assert_eq!(errors.get("year"), Some("Enter a whole number."));
        assert!(form(&"x".repeat(17), "2024").validate(2026).is_err());
    }
}
