//! Server startup and shutdown.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tokio::signal;
use tracing::{error, info, warn};
use vinyl_auth::{AuthConfig, TokenValidator};
use vinyl_store::{seed, MusicStore};

use crate::router::create_router;
use crate::state::AppState;

/// Seed the store and generate album art before serving.
///
/// Failures are logged and do not stop startup; the store keeps whatever was
/// loaded.
pub fn prepare_store(store: &MusicStore, recreate: bool, web_root: Option<&Path>) {
    let seeded = if recreate {
        seed::recreate_and_seed(store)
    } else {
        seed::seed(store)
    };
    match seeded {
        Ok(summary) if summary.is_empty() => info!("Catalog already present"),
        Ok(summary) => info!(%summary, "Catalog seeded"),
        Err(e) => error!(error = %e, "Seeding the catalog failed"),
    }

    match web_root {
        Some(root) => match seed::ensure_album_art(store, root) {
            Ok(written) => info!(written, web_root = %root.display(), "Album art ready"),
            Err(e) => error!(error = %e, "Generating album art failed"),
        },
        None => warn!("No web root configured; album art is not generated or served"),
    }
}

/// A bound HTTP server.
pub struct Server {
    router: Router,
    listener: tokio::net::TcpListener,
}

impl Server {
    /// Bind `addr` and build the router.
    pub async fn bind<V: TokenValidator>(
        addr: SocketAddr,
        state: AppState,
        validator: Arc<V>,
        auth: AuthConfig,
    ) -> std::io::Result<Self> {
        if !auth.enabled {
            warn!("Authentication disabled; every request runs as the developer user");
        }
        let router = create_router(state, validator, auth);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        Ok(Self { router, listener })
    }

    /// The bound address.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run(self) -> std::io::Result<()> {
        info!("Vinyl listening on http://{}", self.local_addr()?);
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use vinyl_auth::StaticTokenValidator;

    #[test]
    fn test_prepare_store_seeds_and_draws() {
        let dir = tempfile::tempdir().unwrap();
        let store = MusicStore::new();
        prepare_store(&store, false, Some(dir.path()));
        assert_eq!(store.albums.len(), 100);
        assert!(dir.path().join("Images/AlbumArt/album-1.png").exists());
    }

    #[test]
    fn test_prepare_store_recreate() {
        let store = MusicStore::new();
        prepare_store(&store, false, None);
        store.albums.remove(vinyl_core::AlbumId(1));
        prepare_store(&store, false, None);
        assert_eq!(store.albums.len(), 99);
        prepare_store(&store, true, None);
        assert_eq!(store.albums.len(), 100);
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let state = AppState::new(Arc::new(MusicStore::new()));
        let server = Server::bind(
            "127.0.0.1:0".parse().unwrap(),
            state,
            Arc::new(StaticTokenValidator::default()),
            AuthConfig::default(),
        )
        .await
        .unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }
}
