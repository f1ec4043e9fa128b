use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::session::authenticate;
use cookie_auth::CookieAuthOptions;

// Authentication checker: challenges requests without the authentication cookie
pub async fn is_authenticated(
    State(options): State<Arc<CookieAuthOptions>>,
    mut req: Request,
    next: Next,
) -> Response {
    match authenticate(req.headers(), req.method(), &options) {
        Ok(auth_cookie) => {
            req.extensions_mut().insert(auth_cookie);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
