use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CookieNameError {
    /// The starting value contains a character outside the cookie-name grammar
    #[error("Invalid cookie-name detected: {0:?}")]
    InvalidArgument(String),
}
