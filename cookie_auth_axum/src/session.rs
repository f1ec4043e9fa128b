use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts, OptionalFromRequestParts};
use http::{HeaderMap, Method, request::Parts};

use super::error::AuthError;
use cookie_auth::{CookieAuthOptions, get_cookie_from_headers, header_clear_cookie, header_set_cookie};

/// Raw value of the authentication cookie, available as an Axum extractor.
///
/// The value is the opaque ticket the application issued at sign-in; this
/// crate never interprets it. Requires `Arc<CookieAuthOptions>` to be
/// reachable from the router state.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use axum::{routing::get, Router};
/// use cookie_auth::CookieAuthOptions;
/// use cookie_auth_axum::AuthCookie;
///
/// async fn protected_handler(cookie: AuthCookie) -> String {
///     format!("{} bytes of ticket", cookie.as_str().len())
/// }
///
/// let options = Arc::new(CookieAuthOptions::host_only(None, None).unwrap());
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler))
///     .with_state(options);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthCookie(pub String);

impl AuthCookie {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The challenge issued to a request without the authentication cookie
pub(crate) fn challenge(options: &CookieAuthOptions, method: &Method) -> AuthError {
    match &options.login_path {
        Some(login_path) if method == Method::GET => AuthError::LoginRequired(login_path.clone()),
        _ => AuthError::Unauthenticated,
    }
}

/// Looks up the authentication cookie, challenging when it is missing
pub(crate) fn authenticate(
    headers: &HeaderMap,
    method: &Method,
    options: &CookieAuthOptions,
) -> Result<AuthCookie, AuthError> {
    let name = options.cookie.name.as_str();

    match get_cookie_from_headers(headers, name) {
        Ok(Some(value)) if !value.is_empty() => Ok(AuthCookie(value.to_string())),
        Ok(_) => {
            tracing::debug!("Missing authentication cookie {}", name);
            Err(challenge(options, method))
        }
        Err(e) => {
            tracing::warn!("Rejecting request with unreadable cookies: {}", e);
            Err(challenge(options, method))
        }
    }
}

impl<S> FromRequestParts<S> for AuthCookie
where
    Arc<CookieAuthOptions>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by the middleware
        if let Some(cookie) = parts.extensions.get::<AuthCookie>() {
            return Ok(cookie.clone());
        }

        let options = Arc::<CookieAuthOptions>::from_ref(state);
        authenticate(&parts.headers, &parts.method, &options)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthCookie
where
    Arc<CookieAuthOptions>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <AuthCookie as FromRequestParts<S>>::from_request_parts(parts, state).await {
            Ok(cookie) => Ok(Some(cookie)),
            Err(_) => Ok(None),
        }
    }
}

/// Headers that sign the user in by issuing the authentication cookie.
///
/// Cookies are only issued from the HTTPS listener, so the `Secure` attribute
/// is always computed for an HTTPS request.
pub fn sign_in_headers(options: &CookieAuthOptions, ticket: &str) -> Result<HeaderMap, AuthError> {
    let mut headers = HeaderMap::new();
    header_set_cookie(&mut headers, &options.cookie, ticket, true)?;
    Ok(headers)
}

/// Headers that sign the user out by expiring the authentication cookie
pub fn sign_out_headers(options: &CookieAuthOptions) -> Result<HeaderMap, AuthError> {
    let mut headers = HeaderMap::new();
    header_clear_cookie(&mut headers, &options.cookie, true)?;
    Ok(headers)
}
