use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};

use crate::entities::sea_orm_active_enums::Gender;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Select a valid choice.";

pub const NAME_MAX_LENGTH: usize = 32;
pub const CLASS_NAME_MAX_LENGTH: usize = 16;
pub const TOPIC_NAME_MAX_LENGTH: usize = 64;
pub const USERNAME_MAX_LENGTH: usize = 150;
pub const PASSWORD_MIN_LENGTH: usize = 8;

pub const MIN_STUDENT_AGE: i32 = 16;
pub const MAX_STUDENT_AGE: i32 = 80;
pub const FIRST_CLASS_YEAR: i32 = 2020;

/// Grade scale with the label teachers write on paper.
pub const GRADE_SCALE: [(f64, &str); 16] = [
    (1.0, "1"),
    (1.5, "1+"),
    (1.75, "2-"),
    (2.0, "2"),
    (2.5, "2+"),
    (2.75, "3-"),
    (3.0, "3"),
    (3.5, "3+"),
    (3.75, "4-"),
    (4.0, "4"),
    (4.5, "4+"),
    (4.75, "5-"),
    (5.0, "5"),
    (5.5, "5+"),
    (5.75, "6-"),
    (6.0, "6"),
];

/// Subject codes a school can teach, with display names.
pub const SUBJECT_CATALOGUE: [(&str, &str); 11] = [
    ("Pol", "Polish language"),
    ("Ang", "English language"),
    ("His", "History"),
    ("Wos", "Civics"),
    ("Pp", "Entrepreneurship"),
    ("Geo", "Geography"),
    ("Biol", "Biology"),
    ("Chem", "Chemistry"),
    ("Fiz", "Physics"),
    ("Mat", "Mathematics"),
    ("Inf", "Computer science"),
];

pub fn current_year() -> i32 {
    Local::now().year()
}

pub fn not_a_choice(value: &str) -> String {
    format!("Select a valid choice. {value} is not one of the available choices.")
}

fn required(raw: &str) -> Result<&str, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(REQUIRED.to_string());
    }
    Ok(value)
}

fn max_length(value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!(
            "Ensure this value has at most {max} characters (it has {}).",
            value.chars().count()
        ));
    }
    Ok(())
}

/// First and last names: letters only, any alphabet.
pub fn validate_person_name(raw: &str) -> Result<String, String> {
    let value = required(raw)?;
    max_length(value, NAME_MAX_LENGTH)?;
    if !value.chars().all(char::is_alphabetic) {
        return Err("Only letters are allowed.".to_string());
    }
    Ok(value.to_string())
}

pub fn parse_gender(raw: &str) -> Result<Gender, String> {
    let value = required(raw)?;
    Gender::from_code(value).ok_or_else(|| not_a_choice(value))
}

pub fn validate_text(raw: &str, max: usize) -> Result<String, String> {
    let value = required(raw)?;
    max_length(value, max)?;
    Ok(value.to_string())
}

pub fn parse_whole_number(raw: &str) -> Result<i32, String> {
    required(raw)?
        .parse::<i32>()
        .map_err(|_| "Enter a whole number.".to_string())
}

pub fn validate_age(age: i32) -> Result<i32, String> {
    if !(MIN_STUDENT_AGE..=MAX_STUDENT_AGE).contains(&age) {
        return Err(format!(
            "Age must be between {MIN_STUDENT_AGE} and {MAX_STUDENT_AGE}."
        ));
    }
    Ok(age)
}

/// Classes may start from 2020 up to next year's intake.
pub fn validate_class_year(year: i32, current_year: i32) -> Result<i32, String> {
    let last = current_year + 1;
    if year < FIRST_CLASS_YEAR {
        return Err(format!(
            "Ensure this value is greater than or equal to {FIRST_CLASS_YEAR}."
        ));
    }
    if year > last {
        return Err(format!("Ensure this value is less than or equal to {last}."));
    }
    Ok(year)
}

pub fn grade_label(value: f64) -> Option<&'static str> {
    GRADE_SCALE
        .iter()
        .find(|(scale, _)| (scale - value).abs() < f64::EPSILON)
        .map(|(_, label)| *label)
}

/// Accepts either a scale label (`"4+"`) or its numeric value (`"4.5"`).
pub fn parse_grade(raw: &str) -> Result<f64, String> {
    let value = required(raw)?;
    if let Some((grade, _)) = GRADE_SCALE.iter().find(|(_, label)| *label == value) {
        return Ok(*grade);
    }
    let invalid = || not_a_choice(value);
    let number = value.replace(',', ".").parse::<f64>().map_err(|_| invalid())?;
    GRADE_SCALE
        .iter()
        .map(|(grade, _)| *grade)
        .find(|grade| (grade - number).abs() < f64::EPSILON)
        .ok_or_else(invalid)
}

pub fn subject_display_name(code: &str) -> Option<&'static str> {
    SUBJECT_CATALOGUE
        .iter()
        .find(|(catalogue_code, _)| *catalogue_code == code)
        .map(|(_, name)| *name)
}

pub fn validate_subject_name(raw: &str) -> Result<String, String> {
    let value = required(raw)?;
    subject_display_name(value)
        .map(|_| value.to_string())
        .ok_or_else(|| not_a_choice(value))
}

pub fn parse_choice_id(raw: &str) -> Result<i32, String> {
    required(raw)?
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| INVALID_CHOICE.to_string())
}

/// Empty selects are dropped; duplicates collapse.
pub fn parse_choice_ids(raw: &[String]) -> Result<Vec<i32>, String> {
    let mut ids = Vec::with_capacity(raw.len());
    for value in raw.iter().filter(|value| !value.trim().is_empty()) {
        let id = parse_choice_id(value)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

pub fn validate_username(raw: &str) -> Result<String, String> {
    let value = required(raw)?;
    max_length(value, USERNAME_MAX_LENGTH)?;
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if !value.chars().all(allowed) {
        return Err("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.".to_string());
    }
    Ok(value.to_string())
}

pub fn validate_password(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err(REQUIRED.to_string());
    }
    if raw.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(format!(
            "This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."
        ));
    }
    if raw.chars().all(|c| c.is_ascii_digit()) {
        return Err("This password is entirely numeric.".to_string());
    }
    Ok(raw.to_string())
}

/// Attendance mark; an empty value means "unknown".
pub fn parse_presence(raw: &str) -> Result<Option<bool>, String> {
    match raw.trim().to_lowercase().as_str() {
        "" | "unknown" | "null" | "none" => Ok(None),
        "true" | "1" | "on" | "yes" => Ok(Some(true)),
        "false" | "0" | "off" | "no" => Ok(Some(false)),
        _ => Err(INVALID_CHOICE.to_string()),
    }
}

pub fn parse_day(raw: &str) -> Result<NaiveDateTime, String> {
    let value = required(raw)?;
    const DATE_TIME_FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    for format in DATE_TIME_FORMATS {
        if let Ok(day) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(day);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| "Enter a valid date/time.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_names_accept_letters_from_any_alphabet() {
        assert_eq!(validate_person_name("  Łukasz ").unwrap(), "Łukasz");
        assert!(validate_person_name("Anna-Maria").is_err());
        assert!(validate_person_name("R2D2").is_err());
        assert_eq!(validate_person_name("   ").unwrap_err(), REQUIRED);
        assert!(validate_person_name(&"a".repeat(33)).is_err());
    }

    #[test]
    fn gender_uses_one_letter_codes() {
        assert_eq!(parse_gender("F"), Ok(Gender::Female));
        assert_eq!(parse_gender(" m "), Ok(Gender::Male));
        assert_eq!(parse_gender("").unwrap_err(), REQUIRED);
        assert!(parse_gender("X").is_err());
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(validate_age(15).is_err());
        assert_eq!(validate_age(16), Ok(16));
        assert_eq!(validate_age(80), Ok(80));
        assert!(validate_age(81).is_err());
    }

    #[test]
    fn class_year_window_runs_from_2020_to_next_year() {
        assert!(validate_class_year(2019, 2026).is_err());
        assert_eq!(validate_class_year(2020, 2026), Ok(2020));
        assert_eq!(validate_class_year(2026, 2026), Ok(2026));
        assert_eq!(validate_class_year(2027, 2026), Ok(2027));
        assert!(validate_class_year(2028, 2026).is_err());
    }

    #[test]
    fn grades_parse_from_label_or_value() {
        assert_eq!(parse_grade("4+"), Ok(4.5));
        assert_eq!(parse_grade("2-"), Ok(1.75));
        assert_eq!(parse_grade("5.75"), Ok(5.75));
        assert_eq!(parse_grade("3,5"), Ok(3.5));
        assert!(parse_grade("1.25").is_err());
        assert!(parse_grade("7").is_err());
        assert!(parse_grade("").is_err());
        assert_eq!(grade_label(4.75), Some("5-"));
        assert_eq!(grade_label(4.25), None);
    }

    #[test]
    fn subjects_must_come_from_the_catalogue() {
        assert_eq!(validate_subject_name("Mat"), Ok("Mat".to_string()));
        assert!(validate_subject_name("Astrology").is_err());
        assert_eq!(subject_display_name("Inf"), Some("Computer science"));
    }

    #[test]
    fn choice_ids_skip_blanks_and_duplicates() {
        let raw = vec!["2".to_string(), "".to_string(), "2".to_string(), "5".to_string()];
        assert_eq!(parse_choice_ids(&raw), Ok(vec![2, 5]));
        assert!(parse_choice_ids(&["x".to_string()]).is_err());
        assert!(parse_choice_ids(&["0".to_string()]).is_err());
    }

    #[test]
    fn usernames_and_passwords() {
        assert!(validate_username("jan.kowalski+1@school").is_ok());
        assert!(validate_username("jan kowalski").is_err());
        assert!(validate_password("short").is_err());
        assert!(validate_password("12345678").is_err());
        assert!(validate_password("correct horse").is_ok());
    }

    #[test]
    fn presence_and_day_parsing() {
        assert_eq!(parse_presence(""), Ok(None));
        assert_eq!(parse_presence("on"), Ok(Some(true)));
        assert_eq!(parse_presence("False"), Ok(Some(false)));
        assert!(parse_presence("maybe").is_err());

        let day = parse_day("2024-09-02").unwrap();
        assert_eq!(day.to_string(), "2024-09-02 00:00:00");
        assert!(parse_day("2024-09-02T08:15").is_ok());
        assert!(parse_day("02.09.2024").is_err());
    }
}
