use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Malformed search: {message}")]
    MalformedSearch { message: String },

    #[error("Invalid page: {message}")]
    InvalidPage { message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    /// Stored data the domain cannot represent (e.g. an unknown tag code).
    #[error("Corrupt record {entity}: {message}")]
    CorruptRecord {
        entity: &'static str,
        message: String,
    },
}

impl DomainError {
    pub fn malformed_search(message: impl Into<String>) -> Self {
        Self::MalformedSearch {
            message: message.into(),
        }
    }

    pub fn invalid_page(message: impl Into<String>) -> Self {
        Self::InvalidPage {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn corrupt_record(entity: &'static str, message: impl Into<String>) -> Self {
        Self::CorruptRecord {
            entity,
            message: message.into(),
        }
    }
}

impl From<search_core::PageError> for DomainError {
    fn from(e: search_core::PageError) -> Self {
        use search_core::PageError::*;
        match e {
            InvalidPageSize | InvalidPageIndex(_) => Self::invalid_page(e.to_string()),
            Db(message) => Self::database(message),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::database(e.to_string())
    }
}
