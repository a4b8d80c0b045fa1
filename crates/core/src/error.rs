#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("username and age are required")]
    MissingRequiredFields,
    #[error("hobbies must be an array of strings")]
    InvalidHobbies,
    #[error("user not found: {0}")]
    UserNotFound(users_uuid::UserId),
    #[error("user store lock poisoned")]
    StorePoisoned,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid identifier: {0}")]
    Uuid(#[from] users_uuid::UuidError),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
