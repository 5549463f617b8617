//! Widget HTML loading
//!
//! Remote widgets are fetched with a bounded timeout; local widgets are read
//! from the assets directory. Successful loads are cached for a fixed TTL and
//! a stale copy is served if a later refresh fails.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, warn};

use super::{WidgetError, WidgetSource};

struct CachedHtml {
    html: String,
    fetched_at: Instant,
}

pub struct WidgetFetcher {
    client: reqwest::Client,
    /// Keyed by [`WidgetSource::cache_key`].
    cache: DashMap<String, CachedHtml>,
    ttl: Duration,
}

impl WidgetFetcher {
    /// Builds a fetcher whose HTTP requests give up after `timeout`.
    /// A zero `ttl` disables caching.
    pub fn new(timeout: Duration, ttl: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("widget-apps/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::from_client(client, ttl))
    }

    pub fn from_client(client: reqwest::Client, ttl: Duration) -> Self {
        Self {
            client,
            cache: DashMap::new(),
            ttl,
        }
    }

    /// Returns the widget HTML, from cache when fresh.
    pub async fn load(&self, source: &WidgetSource) -> Result<String, WidgetError> {
        let key = source.cache_key();

        if let Some(html) = self.fresh(&key) {
            debug!(widget = %key, "widget cache hit");
            return Ok(html);
        }

        match self.fetch(source).await {
            Ok(html) => {
                if !self.ttl.is_zero() {
                    self.cache.insert(
                        key,
                        CachedHtml {
                            html: html.clone(),
                            fetched_at: Instant::now(),
                        },
                    );
                }
                Ok(html)
            }
            Err(err) => match self.cache.get(&key) {
                Some(stale) => {
                    warn!(widget = %key, error = %err, "widget refresh failed; serving stale copy");
                    Ok(stale.html.clone())
                }
                None => Err(err),
            },
        }
    }

    #[cfg(test)]
    fn clear(&self) {
        self.cache.clear();
    }

    fn fresh(&self, key: &str) -> Option<String> {
        let entry = self.cache.get(key)?;
        (entry.fetched_at.elapsed() < self.ttl).then(|| entry.html.clone())
    }

    async fn fetch(&self, source: &WidgetSource) -> Result<String, WidgetError> {
        match source {
            WidgetSource::Remote(url) => self.fetch_remote(url).await,
            WidgetSource::Local { dir, file } => load_local(dir, file).await,
        }
    }

    async fn fetch_remote(&self, url: &str) -> Result<String, WidgetError> {
        let http_err = |source| WidgetError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(http_err)
    }
}

/// Reads `<dir>/<file>`, falling back to the newest hashed build
/// (`<stem>-<hash>.html`) when the primary file is absent.
async fn load_local(dir: &Path, file: &str) -> Result<String, WidgetError> {
    let primary = dir.join(file);
    let path = if tokio::fs::try_exists(&primary).await.unwrap_or(false) {
        primary
    } else {
        find_hashed_build(dir, file).await?
    };

    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| WidgetError::Io { path, source })
}

async fn find_hashed_build(dir: &Path, file: &str) -> Result<PathBuf, WidgetError> {
    let stem = file.strip_suffix(".html").unwrap_or(file);
    let prefix = format!("{stem}-");

    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|source| WidgetError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut builds = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.starts_with(&prefix) && name.ends_with(".html") {
                builds.push(path);
            }
        }
    }

    // Lexicographically last is the latest build.
    builds.sort();
    builds
        .pop()
        .ok_or_else(|| WidgetError::Missing(dir.to_path_buf()))
}
