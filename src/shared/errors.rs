use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Navigation item has an empty id (label: {0})")]
    EmptyNavId(String),

    #[error("Duplicate navigation id: {0}")]
    DuplicateNavId(String),

    #[error("Duplicate navigation href: {0}")]
    DuplicateHref(String),

    #[error("Unknown navigation section: {0}")]
    UnknownSection(String),

    #[error("Invalid color {palette}.{shade}: {value}")]
    InvalidColor {
        palette: String,
        shade: String,
        value: String,
    },

    #[error("Animation {animation} references undefined keyframes: {keyframes}")]
    UndefinedKeyframes {
        animation: String,
        keyframes: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
