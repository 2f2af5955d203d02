use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("validation error on `{field}`: {message}")]
    Validation { field: &'static str, message: String },
}

impl ModelError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }

    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Validation { field, .. } => field,
        }
    }
}
