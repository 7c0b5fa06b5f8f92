use thiserror::Error as ThisError;

/// Registration form failures, one per rule of the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SignUpError {
    #[error("This field is required")]
    FieldRequired(&'static str),

    #[error("Please provide username credentials for sign-up")]
    MissingCredentials,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl SignUpError {
    pub fn code(&self) -> &'static str {
        match self {
            SignUpError::FieldRequired(_) => "required",
            SignUpError::MissingCredentials => "missingCredentials",
            SignUpError::PasswordMismatch => "passwordMismatch",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            SignUpError::FieldRequired(field) => field,
            SignUpError::MissingCredentials | SignUpError::PasswordMismatch => "verifyPassword",
        }
    }
}
