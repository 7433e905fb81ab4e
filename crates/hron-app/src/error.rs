use thiserror::Error;

/// Application-level errors (command layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ScheduleError(#[from] hron::ScheduleError),

    #[error("invalid instant '{input}': {reason}")]
    InvalidInstant { input: String, reason: String },
}

pub type AppResult<T> = std::result::Result<T, AppError>;
