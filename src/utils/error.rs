use std::fmt;

#[derive(Debug)]
pub enum MigrationError {
    Config(String),
    Source(sqlx::Error),
    Target(mongodb::error::Error),
    Encode(mongodb::bson::ser::Error),
}

impl fmt::Display for MigrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationError::Config(msg) => write!(f, "Configuration error: {}", msg),
            MigrationError::Source(e) => write!(f, "PostgreSQL error: {}", e),
            MigrationError::Target(e) => write!(f, "MongoDB error: {}", e),
            MigrationError::Encode(e) => write!(f, "BSON encoding error: {}", e),
        }
    }
}

impl std::error::Error for MigrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MigrationError::Config(_) => None,
            MigrationError::Source(e) => Some(e),
            MigrationError::Target(e) => Some(e),
            MigrationError::Encode(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for MigrationError {
    fn from(e: sqlx::Error) -> Self {
        MigrationError::Source(e)
    }
}

impl From<mongodb::error::Error> for MigrationError {
    fn from(e: mongodb::error::Error) -> Self {
        MigrationError::Target(e)
    }
}

impl From<mongodb::bson::ser::Error> for MigrationError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        MigrationError::Encode(e)
    }
}
