use crate::domain::{is_valid_email, Credentials, RegisteredUser};
use crate::error::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Checks run in order: required fields, matching passwords, email shape.
pub fn validate_registration(form: &RegistrationForm) -> Result<RegisteredUser, CoreError> {
    let username = form.username.trim();
    let email = form.email.trim();
    if username.is_empty()
        || email.is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err(CoreError::AllFieldsRequired);
    }
    if form.password != form.confirm_password {
        return Err(CoreError::PasswordMismatch);
    }
    if !is_valid_email(email) {
        return Err(CoreError::InvalidEmail);
    }
    Ok(RegisteredUser {
        username: username.to_string(),
        email: email.to_string(),
        password: form.password.clone(),
    })
}

pub fn validate_login(form: &LoginForm) -> Result<Credentials, CoreError> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return Err(CoreError::CredentialsRequired);
    }
    Ok(Credentials {
        username: username.to_string(),
        password: form.password.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::{validate_login, validate_registration, LoginForm, RegistrationForm};
    use crate::error::CoreError;

    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "sam".to_string(),
            email: "sam@example.com".to_string(),
            password: "hunter2".to_string(),
            confirm_password: "hunter2".to_string(),
        }
    }

    #[test]
    fn registration_accepts_complete_form() {
        let user = validate_registration(&form()).unwrap();
        assert_eq!(user.username, "sam");
        assert_eq!(user.email, "sam@example.com");
    }

    #[test]
    fn registration_requires_every_field() {
        let mut missing = form();
        missing.confirm_password.clear();
        assert_eq!(
            validate_registration(&missing),
            Err(CoreError::AllFieldsRequired)
        );
    }

    #[test]
    fn registration_checks_passwords_before_email() {
        let mut bad = form();
        bad.confirm_password = "other".to_string();
        bad.email = "not-an-email".to_string();
        assert_eq!(validate_registration(&bad), Err(CoreError::PasswordMismatch));

        let mut bad_email = form();
        bad_email.email = "sam@example".to_string();
        assert_eq!(validate_registration(&bad_email), Err(CoreError::InvalidEmail));
    }

    #[test]
    fn login_requires_username_and_password() {
        let err = validate_login(&LoginForm {
            username: "  ".to_string(),
            password: "x".to_string(),
        })
        .unwrap_err();
        assert_eq!(err, CoreError::CredentialsRequired);
        assert!(err.is_validation());

        let creds = validate_login(&LoginForm {
            username: "sam".to_string(),
            password: "x".to_string(),
        })
        .unwrap();
        assert_eq!(creds.username, "sam");
    }
}
