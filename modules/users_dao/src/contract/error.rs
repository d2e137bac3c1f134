use thiserror::Error;

/// Library-local result type.
pub type Result<T> = std::result::Result<T, UserDaoError>;

/// The one failure kind of the data-access layer.
///
/// Constraint violations, lost connections and malformed statements all end
/// up here with the driver's message; callers cannot tell them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserDaoError {
    #[error("Data access failure: {message}")]
    DataAccess { message: String },
}

impl UserDaoError {
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::DataAccess { message } => message,
        }
    }
}

impl From<sea_orm::DbErr> for UserDaoError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::data_access(err.to_string())
    }
}
