//! Routers for authenticated applications

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state};
use cookie_auth::CookieAuthOptions;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::middleware::is_authenticated;

/// Require the authentication cookie on every route of `router`
///
/// Requests without the cookie never reach a handler: they are challenged
/// with `401 Unauthorized`, or redirected to the login path when one is
/// configured. Handlers can read the cookie through the
/// [`AuthCookie`](crate::AuthCookie) extension.
pub fn require_authorization(router: Router, options: Arc<CookieAuthOptions>) -> Router {
    router
        .route_layer(from_fn_with_state(options, is_authenticated))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Extension, body::Body, routing::get};
    use http::{Request, StatusCode, header::COOKIE, header::LOCATION};
    use tower::ServiceExt;

    use crate::AuthCookie;

    async fn whoami(Extension(cookie): Extension<AuthCookie>) -> String {
        cookie.0
    }

    fn app(options: CookieAuthOptions) -> Router {
        require_authorization(
            Router::new()
                .route("/whoami", get(whoami))
                .route("/nested/ping", get(|| async { "pong" })),
            Arc::new(options),
        )
    }

    fn options() -> CookieAuthOptions {
        CookieAuthOptions::host_only(Some("Auth"), None).unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_request_without_cookie_is_unauthorized() {
        let response = app(options())
            .oneshot(Request::get("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_request_with_cookie_reaches_handler() {
        let response = app(options())
            .oneshot(
                Request::get("/whoami")
                    .header(COOKIE, "theme=dark; __Host-Auth=ticket42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ticket42");
    }

    #[tokio::test]
    async fn test_cookie_without_host_prefix_is_not_accepted() {
        let response = app(options())
            .oneshot(
                Request::get("/nested/ping")
                    .header(COOKIE, "Auth=ticket42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_get_is_redirected_to_login_path() {
        let mut options = options();
        options.login_path = Some("/login".to_string());

        let response = app(options)
            .oneshot(Request::get("/nested/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        // route_layer only guards matched routes
        let response = app(options())
            .oneshot(Request::get("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
