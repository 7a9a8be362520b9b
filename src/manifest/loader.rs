//! Index loader — live documentation server first, static build second.
//!
//! The live fetch is bounded by the configured timeout; any failure there
//! (connect, non-2xx, timeout, bad body) falls through to
//! `<static_dir>/index.json`. Only a static-side failure is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use super::{Manifest, Source, StoryIndex, build_manifest};
use crate::config::Config;

const INDEX_FILE: &str = "index.json";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("story index not found at {}. Run 'storybook:build' first.", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

#[derive(Debug, thiserror::Error)]
enum LiveFetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
}

// =============================================================================
// LOADER
// =============================================================================

pub struct IndexLoader {
    http: reqwest::Client,
    index_url: Option<String>,
    static_dir: PathBuf,
}

impl IndexLoader {
    /// Build a loader for the given live base URL and static directory.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the HTTP client cannot be constructed.
    pub fn new(base_url: Option<&str>, static_dir: impl Into<PathBuf>, timeout: Duration) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| LoadError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            index_url: base_url.map(|url| format!("{}/{INDEX_FILE}", url.trim_end_matches('/'))),
            static_dir: static_dir.into(),
        })
    }

    /// Build a loader from server config.
    ///
    /// # Errors
    ///
    /// Returns `HttpClientBuild` if the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, LoadError> {
        Self::new(config.storybook_url.as_deref(), config.static_dir.clone(), config.fetch_timeout)
    }

    /// Full URL of the live index, if live fetch is enabled.
    #[must_use]
    pub fn index_url(&self) -> Option<&str> {
        self.index_url.as_deref()
    }

    #[must_use]
    pub fn static_path(&self) -> PathBuf {
        self.static_dir.join(INDEX_FILE)
    }

    /// Load the story index and tag it with where it came from.
    ///
    /// # Errors
    ///
    /// Returns an error only when the live source is unavailable and the
    /// static file is missing, unreadable, or malformed.
    pub async fn load_index(&self) -> Result<(StoryIndex, Source), LoadError> {
        if let Some(url) = &self.index_url {
            match self.fetch_live(url).await {
                Ok(index) => return Ok((index, Source::Dev)),
                Err(e) => debug!(%url, error = %e, "live index unavailable; falling back to static build"),
            }
        }

        let index = read_static_index(&self.static_path()).await?;
        Ok((index, Source::Static))
    }

    /// Load the story index and build a manifest from it.
    ///
    /// # Errors
    ///
    /// See [`IndexLoader::load_index`].
    pub async fn load(&self) -> Result<Manifest, LoadError> {
        let (index, source) = self.load_index().await?;
        Ok(build_manifest(&index, source))
    }

    async fn fetch_live(&self, url: &str) -> Result<StoryIndex, LiveFetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LiveFetchError::Status(status.as_u16()));
        }
        Ok(response.json::<StoryIndex>().await?)
    }
}

async fn read_static_index(path: &Path) -> Result<StoryIndex, LoadError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound { path: path.to_path_buf() });
        }
        Err(source) => return Err(LoadError::Io { path: path.to_path_buf(), source }),
    };
    serde_json::from_str(&raw).map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
