use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid digest: expected 32 hex characters, got {0:?}")]
    InvalidDigest(String),
    #[error("invalid avatar size: {0} (expected 1..=2048)")]
    InvalidSize(u32),
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid default image: {0}")]
    InvalidDefaultImage(String),
    #[error("invalid rating: {0}")]
    InvalidRating(String),
}
