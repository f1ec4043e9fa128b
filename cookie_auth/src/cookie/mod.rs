mod errors;
mod name;

pub use errors::CookieNameError;
pub use name::{CookieName, DEFAULT_COOKIE_NAME, HOST_PREFIX, normalize_cookie_name};

pub(crate) use name::is_cookie_name_char;
