use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use cookie_auth_axum::{AuthCookie, CookieAuthOptions, CookieSettings};

pub(super) fn router(options: Arc<CookieAuthOptions>) -> Router {
    Router::new()
        .route("/api/whoami", get(whoami))
        .route("/api/cookie", get(cookie))
        .with_state(options)
}

#[derive(Serialize)]
pub(crate) struct WhoAmI {
    authenticated: bool,
    ticket_length: usize,
}

// The authentication middleware has already resolved the cookie
pub(crate) async fn whoami(auth_cookie: AuthCookie) -> Json<WhoAmI> {
    Json(WhoAmI {
        authenticated: true,
        ticket_length: auth_cookie.as_str().len(),
    })
}

pub(crate) async fn cookie(State(options): State<Arc<CookieAuthOptions>>) -> Json<CookieSettings> {
    Json(options.cookie.clone())
}
