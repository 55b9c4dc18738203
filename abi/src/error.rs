use thiserror::Error;

use crate::SpotNumber;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Reservation not found")]
    NotFound,

    #[error("No available parking spots")]
    NoCapacity,

    #[error("Spot {0} is not available")]
    SpotUnavailable(SpotNumber),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    DbError(sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to read configuration file: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

impl Error {
    /// Domain errors are caused by the request and are reported back as-is.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::NotFound
                | Error::NoCapacity
                | Error::SpotUnavailable(_)
                | Error::InvalidInput(_)
        )
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Error::NotFound,
            _ => Error::DbError(e),
        }
    }
}

// only used in tests, sqlx::Error is not comparable
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound, Self::NotFound) => true,
            (Self::NoCapacity, Self::NoCapacity) => true,
            (Self::SpotUnavailable(a), Self::SpotUnavailable(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::DbError(_), Self::DbError(_)) => true,
            (Self::MigrateError(_), Self::MigrateError(_)) => true,
            (Self::ConfigRead(_), Self::ConfigRead(_)) => true,
            (Self::ConfigParse(_), Self::ConfigParse(_)) => true,
            _ => false,
        }
    }
}
