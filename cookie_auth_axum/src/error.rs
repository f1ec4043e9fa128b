use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use cookie_auth::UtilError;

/// Authentication errors for the middleware layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No authentication cookie and no login page to send the user to
    #[error("Not authenticated")]
    Unauthenticated,

    /// No authentication cookie; the browser is sent to the login page
    #[error("Login required at {0}")]
    LoginRequired(String),

    /// Authenticated, but the application refuses the request.
    ///
    /// Never produced by this crate: the cookie carries no roles or claims.
    /// Handlers return it after their own access check on the ticket.
    #[error("Forbidden")]
    Forbidden,

    /// Failed to build the authentication cookie
    #[error("Cookie error: {0}")]
    Cookie(#[from] UtilError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            Self::LoginRequired(ref login_path) => {
                tracing::debug!("Redirecting to {}", login_path);
                Redirect::temporary(login_path).into_response()
            }
            Self::Forbidden => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
            Self::Cookie(_) => {
                tracing::error!(error = %self, "Auth internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
