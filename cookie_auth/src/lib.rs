//! cookie_auth - Host-only cookie authentication for Rust web applications
//!
//! This crate computes the name of the authentication cookie, making sure it
//! carries the `__Host-` prefix, and describes the cookie authentication scheme
//! as plain options that an HTTP framework integration consumes at startup.
//! Session storage, ticket issuance and credential verification are left to
//! the application.

mod cookie;
mod options;
mod utils;

pub use cookie::{
    CookieName, CookieNameError, DEFAULT_COOKIE_NAME, HOST_PREFIX, normalize_cookie_name,
};

pub use options::{
    AUTH_COOKIE_MAX_AGE_KEY, AUTH_COOKIE_NAME_KEY, COOKIE_AUTHENTICATION_SCHEME, CookieAuthOptions,
    CookieSecurePolicy, CookieSettings, OptionsError, ROOT_PATH, SameSite, SchemeForwarding,
};

pub use utils::{UtilError, get_cookie_from_headers, header_clear_cookie, header_set_cookie};
