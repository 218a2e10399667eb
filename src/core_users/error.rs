// Error handling for the user database module
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User id not found: {0}")]
    UidNotFound(u32),

    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    #[error("Malformed user database entry: {0}")]
    MalformedEntry(String),

    #[error("Failed to read user database: {0}")]
    DatabaseRead(String),

    #[error("Invalid user database configuration: {0}")]
    InvalidConfig(String),
}
