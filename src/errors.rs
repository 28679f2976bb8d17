use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid rating: {0} (expected 0-3)")]
    InvalidRating(i32),
    #[error("Card not found: {0}")]
    CardNotFound(String),
}
