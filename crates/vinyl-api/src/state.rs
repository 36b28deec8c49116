use std::path::PathBuf;
use std::sync::Arc;

use vinyl_store::MusicStore;

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The store context.
    pub store: Arc<MusicStore>,
    /// Directory static files (album covers) are served from.
    pub web_root: Option<PathBuf>,
}

impl AppState {
    /// State over `store`, serving no static files.
    pub fn new(store: Arc<MusicStore>) -> Self {
        Self {
            store,
            web_root: None,
        }
    }

    /// Serve static files from `web_root`.
    pub fn with_web_root(mut self, web_root: impl Into<PathBuf>) -> Self {
        self.web_root = Some(web_root.into());
        self
    }
}
