use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a reactor.
///
/// The tick loop itself never fails: bad runtime requests are clamped or
/// ignored. Only configuration and its I/O can go wrong.
#[derive(Debug, Error)]
pub enum Error {
    /// A settings value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Settings file is not valid JSON for [`crate::Settings`].
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
