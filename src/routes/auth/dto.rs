use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::forms::FormErrors;
use crate::utils::validation::{REQUIRED, validate_password, validate_username};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginQuery {
    /// Path the user was sent away from.
    pub index: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    #[schema(example = "admin")]
    pub uname: String,

    #[serde(default, skip_serializing)]
    #[schema(example = "password123")]
    pub psw: String,

    #[serde(default)]
    pub index: String,
}

pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<Credentials, FormErrors> {
        let mut errors = FormErrors::new();
        let username = self.uname.trim();
        if username.is_empty() {
            errors.add("uname", REQUIRED);
        }
        if self.psw.is_empty() {
            errors.add("psw", REQUIRED);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Credentials {
            username: username.to_string(),
            password: self.psw.clone(),
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewUserForm {
    #[serde(default)]
    #[schema(example = "secretary")]
    pub username: String,

    #[serde(default, skip_serializing)]
    pub password1: String,

    #[serde(default, skip_serializing)]
    pub password2: String,
}

impl NewUserForm {
    pub fn validate(&self) -> Result<Credentials, FormErrors> {
        let mut errors = FormErrors::new();
        let username = errors.check("username", validate_username(&self.username));
        let password = errors.check("password1", validate_password(&self.password1));

        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        } else if self.password1 != self.password2 {
            errors.add("password2", "The two password fields didn't match.");
        }

        match (username, password) {
            (Some(username), Some(password)) if errors.is_empty() => {
                Ok(Credentials { username, password })
            }
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
pub struct ChangePasswordForm {
    #[serde(default, skip_serializing)]
    pub old_password: String,

    #[serde(default, skip_serializing)]
    pub new_password1: String,

    #[serde(default, skip_serializing)]
    pub new_password2: String,
}

pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<PasswordChange, FormErrors> {
        let mut errors = FormErrors::new();
        if self.old_password.is_empty() {
            errors.add("old_password", REQUIRED);
        }
        let new_password = errors.check("new_password1", validate_password(&self.new_password1));

        if self.new_password2.is_empty() {
            errors.add("new_password2", REQUIRED);
        } else if self.new_password1 != self.new_password2 {
            errors.add("new_password2", "The two password fields didn't match.");
        }

        match new_password {
            Some(new_password) if errors.is_empty() => Ok(PasswordChange {
                old_password: self.old_password.clone(),
                new_password,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let errors = LoginForm::default().validate().err().unwrap();
        assert!(errors.contains("uname"));
        assert!(errors.contains("psw"));
    }

    #[test]
    fn login_password_is_never_echoed() {
        let form = LoginForm {
            uname: "admin".to_string(),
            psw: "hunter22".to_string(),
            index: String::new(),
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["uname"], "admin");
        assert!(value.get("psw").is_none());
    }

    #[test]
    fn new_user_passwords_must_match() {
        let form = NewUserForm {
            username: "secretary".to_string(),
            password1: "correct horse".to_string(),
            password2: "correct hose".to_string(),
        };
        let errors = form.validate().err().unwrap();
        assert_eq!(
            errors.get("password2"),
            Some("The two password fields didn't match.")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn new_user_accepts_valid_input() {
        let form = NewUserForm {
            username: " secretary ".to_string(),
            password1: "correct horse".to_string(),
            password2: "correct horse".to_string(),
        };
        let credentials = form.validate().ok().unwrap();
        assert_eq!(credentials.username, "secretary");
    }

    #[test]
    fn change_password_checks_new_password_rules() {
        let form = ChangePasswordForm {
            old_password: "old secret".to_string(),
            new_password1: "1234567890".to_string(),
            new_password2: "1234567890".to_string(),
        };
        let errors = form.validate().err().unwrap();
        assert!(errors.contains("new_password1"));
        assert!(!errors.contains("old_password"));
    }
}
