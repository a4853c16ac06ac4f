use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipesError {
    /// The search request cannot be compiled; retrying it unchanged will fail again.
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// The recipe store could not be reached or failed mid-query.
    #[error("Recipe store unavailable")]
    Unavailable,

    #[error("Internal error")]
    Internal,
}

impl RecipesError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn unavailable() -> Self {
        Self::Unavailable
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for RecipesError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            MalformedSearch { message } => Self::bad_request(message),
            InvalidPage { message } => Self::bad_request(message),
            Database { .. } => Self::unavailable(),
            CorruptRecord { .. } => Self::internal(),
        }
    }
}
