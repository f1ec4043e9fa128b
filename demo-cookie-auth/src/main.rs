use std::sync::Arc;

use cookie_auth_axum::{CookieAuthOptions, https_redirect_router, require_authorization};

mod protected;
mod server;

use crate::server::{HTTP_PORT, HTTPS_PORT, init_tracing, spawn_http_server, spawn_https_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install default CryptoProvider for rustls to prevent:
    // "no process-level CryptoProvider available -- call CryptoProvider::install_default() before this point"
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| "Failed to install default CryptoProvider")?;

    dotenvy::dotenv().ok();
    init_tracing(env!("CARGO_CRATE_NAME"));

    // A misconfigured cookie is fatal: the server must not start
    let options = CookieAuthOptions::from_env().inspect_err(|e| {
        tracing::error!("Invalid cookie authentication configuration: {}", e);
    })?;
    let options = Arc::new(options);

    let app = require_authorization(protected::router(options.clone()), options);

    let http_server = spawn_http_server(*HTTP_PORT, https_redirect_router(*HTTPS_PORT));
    let https_server = spawn_https_server(*HTTPS_PORT, app).await?;

    // Wait for both servers to complete (which they never will in this case)
    tokio::try_join!(http_server, https_server)?;
    Ok(())
}
