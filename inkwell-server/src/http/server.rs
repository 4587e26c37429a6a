//! Router assembly and the serve loop
//!
//! The blog API is served from one axum router. Browsers on the local dev
//! ports may call it unless permissive CORS is switched on; every request is
//! traced; unmatched paths get the same JSON error body as handler errors.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method, Uri};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;

/// Front-end origins allowed when CORS is not permissive.
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:3030",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:3030",
];

/// HTTP server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// Accept cross-origin requests from anywhere instead of the local
    /// front-end origins only.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
        }
    }
}

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

fn cors_layer(permissive: bool) -> CorsLayer {
    if permissive {
        tracing::warn!("CORS: permissive mode, any origin may call the blog API");
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(LOCAL_ORIGINS.map(HeaderValue::from_static))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: "route",
        id: uri.path().to_owned(),
    }
}

/// Build the blog API router over a store pool.
pub fn build_router(pool: PgPool, config: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::blogs::router())
        .merge(routes::tags::router())
        .fallback(unknown_route)
        .layer(cors_layer(config.cors_permissive))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { pool }))
}

/// Bind and serve until Ctrl+C or SIGTERM, letting in-flight requests finish.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&store_config).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind_addr,
            source,
        })?;
    tracing::info!(addr = %config.bind_addr, "blog API listening");

    axum::serve(listener, build_router(pool, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("blog API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("cannot install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = ctrl_c => "Ctrl+C",
        _ = terminate => "SIGTERM",
    };
    tracing::info!(signal = received, "shutting down, draining in-flight requests");
}

/// Serve loop failures
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::routes::test_support::{offline_router, send};
    use axum::http::StatusCode;

    #[test]
    fn default_config_is_local() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3030);
        assert!(config.bind_addr.ip().is_loopback());
        assert!(!config.cors_permissive);
    }

    #[test]
    fn bind_error_names_the_address() {
        let err = ServerError::Bind {
            addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().starts_with("cannot bind 127.0.0.1:3030"));
    }

    #[tokio::test]
    async fn unknown_path_is_json_404() {
        let (status, body) = send(offline_router(), "GET", "/posts", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "route '/posts' not found");
    }
}
