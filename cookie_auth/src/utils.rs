use http::header::{COOKIE, HeaderMap, HeaderValue, SET_COOKIE};
use thiserror::Error;

use crate::options::CookieSettings;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UtilError {
    #[error("Cookie error: {0}")]
    Cookie(String),

    #[error("Header error: {0}")]
    Header(String),
}

// cookie-octet: visible US-ASCII except DQUOTE, comma, semicolon and backslash
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

fn render_cookie(
    settings: &CookieSettings,
    value: &str,
    max_age: Option<u64>,
    request_is_https: bool,
) -> String {
    let mut cookie = format!(
        "{}={value}; SameSite={}",
        settings.name,
        settings.same_site.as_str()
    );
    if settings.secure_policy.is_secure(request_is_https) {
        cookie.push_str("; Secure");
    }
    if settings.http_only {
        cookie.push_str("; HttpOnly");
    }
    cookie.push_str("; Path=");
    cookie.push_str(&settings.path);
    if let Some(domain) = &settings.domain {
        cookie.push_str("; Domain=");
        cookie.push_str(domain);
    }
    if let Some(max_age) = max_age {
        cookie.push_str(&format!("; Max-Age={max_age}"));
    }
    cookie
}

fn append_set_cookie(headers: &mut HeaderMap, cookie: String) -> Result<&HeaderMap, UtilError> {
    let header_value = HeaderValue::from_str(&cookie)
        .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?;
    headers.append(SET_COOKIE, header_value);
    Ok(headers)
}

/// Appends a `Set-Cookie` header issuing the authentication cookie with `value`.
///
/// The value is an opaque ticket produced by the application.
pub fn header_set_cookie<'a>(
    headers: &'a mut HeaderMap,
    settings: &CookieSettings,
    value: &str,
    request_is_https: bool,
) -> Result<&'a HeaderMap, UtilError> {
    if value.is_empty() || !value.bytes().all(is_cookie_octet) {
        return Err(UtilError::Cookie(
            "Cookie value contains characters outside cookie-octet".to_string(),
        ));
    }

    let cookie = render_cookie(settings, value, settings.max_age, request_is_https);
    tracing::debug!("Issuing cookie {}", settings.name);
    append_set_cookie(headers, cookie)
}

/// Appends a `Set-Cookie` header that expires the authentication cookie
pub fn header_clear_cookie<'a>(
    headers: &'a mut HeaderMap,
    settings: &CookieSettings,
    request_is_https: bool,
) -> Result<&'a HeaderMap, UtilError> {
    let cookie = render_cookie(settings, "", Some(0), request_is_https);
    tracing::debug!("Clearing cookie {}", settings.name);
    append_set_cookie(headers, cookie)
}

/// Finds the value of cookie `name` in the request `Cookie` headers
pub fn get_cookie_from_headers<'a>(
    headers: &'a HeaderMap,
    name: &str,
) -> Result<Option<&'a str>, UtilError> {
    for cookie_header in headers.get_all(COOKIE) {
        let cookie_str = cookie_header.to_str().map_err(|e| {
            tracing::error!("Invalid cookie header: {}", e);
            UtilError::Header("Invalid cookie header".to_string())
        })?;

        let found = cookie_str.split(';').map(|s| s.trim()).find_map(|s| {
            let (k, v) = s.split_once('=')?;
            (k.trim() == name).then_some(v.trim())
        });

        if found.is_some() {
            return Ok(found);
        }
    }

    tracing::debug!("No cookie '{}' found in request", name);
    Ok(None)
}
