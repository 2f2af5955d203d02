use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
    #[error("Item with ID {0} not found")]
    NotFound(u64),
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }

    /// Offending field for validation failures.
    pub fn validation_field(&self) -> Option<&'static str> {
        match self {
            Self::Model(e) => Some(e.field()),
            _ => None,
        }
    }
}
