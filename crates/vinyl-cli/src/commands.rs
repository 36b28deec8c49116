//! `serve`, `seed`, and `art`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};
use vinyl_api::{prepare_store, AppState, Server};
use vinyl_secrets::create_secret_store;
use vinyl_store::seed::{self, SeedSummary, ALBUM_ART_DIR};
use vinyl_store::MusicStore;

use crate::config::VinylConfig;
use crate::error::{Error, Result};

/// Seed the store, then serve until shutdown.
pub async fn serve(config: &VinylConfig) -> Result<()> {
    let secrets = create_secret_store(&config.secrets);
    let validator = config.token_validator(secrets.as_ref()).await?;
    if config.auth.enabled && validator.is_empty() {
        warn!("Authentication is enabled but no users are configured; checkout and admin are unreachable");
    }
    info!(users = validator.len(), secrets = secrets.name(), "Token validator ready");

    let web_root = config.assets.web_root.clone();
    let store = seeded_store(config.store.recreate_on_startup, web_root.clone()).await?;

    let mut state = AppState::new(store);
    if let Some(root) = web_root {
        state = state.with_web_root(root);
    }

    let server = Server::bind(
        config.bind_addr()?,
        state,
        Arc::new(validator),
        config.auth_config(),
    )
    .await
    .map_err(Error::Server)?;
    server.run().await.map_err(Error::Server)
}

/// Build and seed the store on the blocking pool.
async fn seeded_store(recreate: bool, web_root: Option<PathBuf>) -> Result<Arc<MusicStore>> {
    let store = Arc::new(MusicStore::new());
    let seeding = Arc::clone(&store);
    tokio::task::spawn_blocking(move || prepare_store(&seeding, recreate, web_root.as_deref()))
        .await
        .map_err(|e| Error::Server(std::io::Error::other(e)))?;
    Ok(store)
}

/// Outcome of [`seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    /// Rows inserted.
    pub summary: SeedSummary,
    /// Covers written.
    pub covers: usize,
}

/// Seed a fresh in-memory catalog and write its covers under `web_root`.
///
/// With `recreate`, the cover directory is removed first so every cover is
/// redrawn.
pub fn seed(web_root: &Path, recreate: bool) -> Result<SeedReport> {
    if recreate {
        let art_dir = web_root.join(ALBUM_ART_DIR);
        if art_dir.exists() {
            std::fs::remove_dir_all(&art_dir).map_err(|e| Error::io_with_path(e, &art_dir))?;
            info!(dir = %art_dir.display(), "Removed existing covers");
        }
    }

    let store = MusicStore::new();
    let summary = seed::seed(&store)?;
    let covers = seed::ensure_album_art(&store, web_root)?;
    Ok(SeedReport { summary, covers })
}

/// Write one cover to `out`.
pub fn art(genre: &str, index: i64, out: &Path) -> Result<PathBuf> {
    vinyl_art::write_album_art(out, genre, index)?;
    Ok(out.to_path_buf())
}
