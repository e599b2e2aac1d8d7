use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("all fields are required")]
    AllFieldsRequired,
    #[error("username and password are required")]
    CredentialsRequired,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("invalid email format")]
    InvalidEmail,
    #[error("invalid lead score: {0}")]
    InvalidLeadScore(String),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
    #[error("invalid lead id: {0}")]
    InvalidLeadId(String),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

impl CoreError {
    /// Errors raised by form validation, as opposed to malformed identifiers.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::MissingField(_)
                | CoreError::AllFieldsRequired
                | CoreError::CredentialsRequired
                | CoreError::PasswordMismatch
                | CoreError::InvalidEmail
                | CoreError::InvalidLeadScore(_)
        )
    }
}
