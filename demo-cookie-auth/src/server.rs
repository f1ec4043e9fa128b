use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::LazyLock;
use tokio::task::JoinHandle;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Port of the plain HTTP listener, which only redirects to HTTPS
pub(crate) static HTTP_PORT: LazyLock<u16> = LazyLock::new(|| {
    std::env::var("HTTP_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3001)
});

pub(crate) static HTTPS_PORT: LazyLock<u16> = LazyLock::new(|| {
    std::env::var("HTTPS_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3443)
});

static TLS_CERT_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    std::env::var("TLS_CERT_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_cert_dir().join("cert.pem"))
});

static TLS_KEY_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    std::env::var("TLS_KEY_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_cert_dir().join("key.pem"))
});

fn default_cert_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("self_signed_certs")
}

pub(crate) fn spawn_http_server(port: u16, app: Router) -> JoinHandle<()> {
    tokio::spawn(async move {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        tracing::info!("HTTP server listening on {}", addr);
        if let Err(e) = axum_server::bind(addr)
            .serve(app.into_make_service())
            .await
        {
            tracing::error!("HTTP server failed: {}", e);
        }
    })
}

pub(crate) async fn spawn_https_server(
    port: u16,
    app: Router,
) -> Result<JoinHandle<()>, std::io::Error> {
    let config = RustlsConfig::from_pem_file(TLS_CERT_PATH.as_path(), TLS_KEY_PATH.as_path())
        .await
        .inspect_err(|e| {
            tracing::error!(
                "Failed to load TLS certificates from {} and {}: {}",
                TLS_CERT_PATH.display(),
                TLS_KEY_PATH.display(),
                e
            )
        })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("HTTPS server listening on {}", addr);
    Ok(tokio::spawn(async move {
        if let Err(e) = axum_server::bind_rustls(addr, config)
            .serve(app.into_make_service())
            .await
        {
            tracing::error!("HTTPS server failed: {}", e);
        }
    }))
}

pub(crate) fn init_tracing(app_name: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            format!(
                "cookie_auth_axum=trace,cookie_auth=trace,tower_http=debug,{}=trace,info",
                app_name
            )
            .into()
        }

        #[cfg(not(debug_assertions))]
        {
            "info".into()
        }
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(debug_assertions)]
    tracing::info!(
        "{}: tracing cookie lookups and challenges of cookie_auth_axum",
        app_name
    );
    #[cfg(not(debug_assertions))]
    tracing::info!(
        "{}: set RUST_LOG=cookie_auth_axum=debug to log requests rejected for a missing cookie",
        app_name
    );
}
