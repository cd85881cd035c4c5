use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("point awards must be non-negative, got {0}")]
    NegativeAward(i64),

    #[error("feedback is empty")]
    EmptyFeedback,

    #[error("unknown tab '{0}' (expected home, livemap, routes, green, lostfound or feedback)")]
    UnknownTab(String),

    #[error("unknown language '{0}' (expected english, hindi, telugu or tamil)")]
    UnknownLanguage(String),

    #[error("no route matches '{0}'")]
    UnknownRoute(String),

    #[error("no async runtime is running to schedule the SOS reset")]
    NoRuntime,

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("invalid sample data: {0}")]
    InvalidSampleData(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
