//! qBittorrent Web API v2 wrapper.
//!
//! One authenticated session per run: the cookie store on the underlying
//! client carries the `SID` cookie set by `/auth/login` across every
//! subsequent call. All calls are sequential and unretried; any
//! transport or HTTP failure aborts the run.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::cookie::Jar;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::orphans::normalize_rel_path;

mod error;

pub use error::QbitError;

/// Sentinel category for torrents with an empty or absent category.
pub const UNCATEGORIZED: &str = "__UNCATEGORIZED__";

/// Literal body `/auth/login` returns on success.
const LOGIN_OK_BODY: &str = "Ok.";

const LOGIN_TIMEOUT_SECS: u64 = 10;
const DATA_TIMEOUT_SECS: u64 = 20;

/// One torrent record from `/torrents/info`. Only the fields this tool
/// reads; the endpoint returns many more.
#[derive(Debug, Clone, Deserialize)]
pub struct Torrent {
    /// Torrent content hash, used to address `/torrents/files`.
    pub hash: String,
    /// Category label; empty or absent for uncategorized torrents.
    #[serde(default)]
    pub category: Option<String>,
}

/// One file entry from `/torrents/files`.
#[derive(Debug, Clone, Deserialize)]
pub struct TorrentFile {
    /// Path of the file inside the torrent, as qBittorrent reports it.
    pub name: String,
}

/// Category → set of normalized relative paths every torrent in that
/// category reports.
pub type TrackedFiles = HashMap<String, HashSet<String>>;

/// Authenticated handle to one qBittorrent instance.
#[derive(Debug, Clone)]
pub struct QbitClient {
    client: Client,
    api: String,
}

impl QbitClient {
    /// Creates a client against `host` (scheme and port included,
    /// trailing slashes tolerated). No request is made until
    /// [`login`](Self::login).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(host: &str) -> Self {
        let client = Client::builder()
            .cookie_provider(Arc::new(Jar::default()))
            .timeout(Duration::from_secs(DATA_TIMEOUT_SECS))
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            api: format!("{}/api/v2", host.trim_end_matches('/')),
        }
    }

    /// Authenticates the session.
    ///
    /// Success is the literal body `Ok.`; any other body is an
    /// authentication failure carrying the server's message.
    ///
    /// # Errors
    ///
    /// Returns [`QbitError::Auth`] when the server rejects the
    /// credentials, or a transport error variant when the call fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), QbitError> {
        let url = format!("{}/auth/login", self.api);
        let response = self
            .client
            .post(&url)
            .form(&[("username", username), ("password", password)])
            .timeout(Duration::from_secs(LOGIN_TIMEOUT_SECS))
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&url, e))?;

        if body != LOGIN_OK_BODY {
            return Err(QbitError::auth(body));
        }
        debug!("authenticated to qBittorrent");
        Ok(())
    }

    /// Lists all torrents with their hash and category.
    ///
    /// # Errors
    ///
    /// Returns a transport, HTTP status, or decode error; all are fatal.
    pub async fn torrents(&self) -> Result<Vec<Torrent>, QbitError> {
        self.get_json(&format!("{}/torrents/info", self.api), &[])
            .await
    }

    /// Lists the file entries of one torrent.
    ///
    /// # Errors
    ///
    /// Returns a transport, HTTP status, or decode error; all are fatal.
    pub async fn files(&self, hash: &str) -> Result<Vec<TorrentFile>, QbitError> {
        self.get_json(
            &format!("{}/torrents/files", self.api),
            &[("hash", hash)],
        )
        .await
    }

    /// Fetches the full torrent-to-file manifest, grouped by category.
    ///
    /// Files are fetched one torrent at a time. Each path is normalized
    /// (backslashes to forward slashes, lowercased) before insertion so
    /// membership tests are case- and separator-insensitive. Torrents
    /// with an empty or absent category land in [`UNCATEGORIZED`].
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`torrents`](Self::torrents) or
    /// [`files`](Self::files).
    pub async fn tracked_files(&self) -> Result<TrackedFiles, QbitError> {
        let torrents = self.torrents().await?;
        debug!(torrents = torrents.len(), "fetched torrent list");

        let mut tracked = TrackedFiles::new();
        for torrent in &torrents {
            let category = torrent
                .category
                .as_deref()
                .filter(|category| !category.is_empty())
                .unwrap_or(UNCATEGORIZED);
            let files = self.files(&torrent.hash).await?;
            let bucket = tracked.entry(category.to_string()).or_default();
            for file in files {
                bucket.insert(normalize_rel_path(&file.name));
            }
        }
        Ok(tracked)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, QbitError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        if !response.status().is_success() {
            return Err(QbitError::http_status(url, response.status().as_u16()));
        }

        response.json().await.map_err(|e| QbitError::decode(url, e))
    }
}

fn transport_error(url: &str, error: reqwest::Error) -> QbitError {
    if error.is_timeout() {
        QbitError::timeout(url)
    } else {
        QbitError::network(url, error)
    }
}
