use thiserror::Error;

use crate::cookie::CookieNameError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// Error from cookie-name normalization
    #[error("Cookie name error: {0}")]
    CookieName(#[from] CookieNameError),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
