//! Axum integration for the cookie_auth crate
//!
//! Guards application routes with the `__Host-` authentication cookie and
//! redirects plain HTTP to HTTPS.

mod error;
mod https;
mod middleware;
mod router;
mod session;

pub use error::AuthError;
pub use https::https_redirect_router;
pub use middleware::is_authenticated;
pub use router::require_authorization;
pub use session::{AuthCookie, sign_in_headers, sign_out_headers};

// Re-export the options so applications only depend on this crate
pub use cookie_auth::{CookieAuthOptions, CookieSettings, OptionsError};
