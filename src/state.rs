//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! shared with the reload task. It owns the index loader and the current
//! manifest. A reload builds a complete manifest without holding the lock,
//! then swaps the `Arc` in one write; readers clone the `Arc` and never see
//! a half-built manifest or wait on a fetch.
//!
//! Reloads are not serialized against each other. Two overlapping reloads
//! both swap in full manifests and the last writer wins.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::config::Config;
use crate::manifest::Manifest;
use crate::manifest::loader::IndexLoader;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    loader: Arc<IndexLoader>,
    manifest: Arc<RwLock<Option<Arc<Manifest>>>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, loader: IndexLoader) -> Self {
        Self { config: Arc::new(config), loader: Arc::new(loader), manifest: Arc::new(RwLock::new(None)) }
    }

    /// The current manifest, or `None` before the first load completes.
    pub async fn current(&self) -> Option<Arc<Manifest>> {
        self.manifest.read().await.clone()
    }

    /// Replace the current manifest wholesale.
    pub async fn replace(&self, manifest: Manifest) -> Arc<Manifest> {
        let manifest = Arc::new(manifest);
        *self.manifest.write().await = Some(Arc::clone(&manifest));
        manifest
    }

    /// Load the index again and swap in the result.
    ///
    /// On failure the previous manifest is kept. If there was none, an empty
    /// manifest is stored so the server can report zero components.
    pub async fn reload(&self) -> Option<Arc<Manifest>> {
        match self.loader.load().await {
            Ok(manifest) => {
                info!(
                    components = manifest.len(),
                    stories = manifest.story_count(),
                    source = %manifest.source(),
                    "story index loaded"
                );
                Some(self.replace(manifest).await)
            }
            Err(e) => {
                error!(error = %e, "failed to load story index");
                let mut slot = self.manifest.write().await;
                if slot.is_none() {
                    *slot = Some(Arc::new(Manifest::empty()));
                }
                slot.clone()
            }
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
