mod config;
mod errors;
mod policy;
mod types;

pub use config::{AUTH_COOKIE_MAX_AGE_KEY, AUTH_COOKIE_NAME_KEY};
pub use errors::OptionsError;
pub use types::{
    COOKIE_AUTHENTICATION_SCHEME, CookieAuthOptions, CookieSecurePolicy, CookieSettings, ROOT_PATH,
    SameSite, SchemeForwarding,
};
