//! Redirection of plain HTTP requests to HTTPS

use axum::{
    Router,
    http::{HeaderMap, StatusCode, Uri, header::HOST, uri::Authority},
    response::{IntoResponse, Redirect, Response},
};

const DEFAULT_HTTPS_PORT: u16 = 443;

/// Router answering every request with `307 Temporary Redirect` to the same
/// host, path and query over `https` on `https_port`.
///
/// `__Host-` cookies are `Secure`, so the application itself is only served
/// over HTTPS; mount this router on the plain HTTP listener.
pub fn https_redirect_router(https_port: u16) -> Router {
    Router::new().fallback(move |headers: HeaderMap, uri: Uri| async move {
        redirect_to_https(&headers, &uri, https_port)
    })
}

fn redirect_to_https(headers: &HeaderMap, uri: &Uri, https_port: u16) -> Response {
    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| uri.host());

    match host.and_then(|host| https_location(host, uri, https_port)) {
        Some(location) => {
            tracing::debug!("Redirecting {} to {}", uri, location);
            Redirect::temporary(&location).into_response()
        }
        None => {
            tracing::warn!("Cannot redirect {} to HTTPS without a valid Host", uri);
            (StatusCode::BAD_REQUEST, "Missing or invalid Host header").into_response()
        }
    }
}

/// HTTPS URL for `uri` as received on `host`; the port of `host` is replaced
pub(crate) fn https_location(host: &str, uri: &Uri, https_port: u16) -> Option<String> {
    let authority: Authority = host.parse().ok()?;
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let location = if https_port == DEFAULT_HTTPS_PORT {
        format!("https://{}{}", authority.host(), path_and_query)
    } else {
        format!(
            "https://{}:{}{}",
            authority.host(),
            https_port,
            path_and_query
        )
    };
    Some(location)
}
