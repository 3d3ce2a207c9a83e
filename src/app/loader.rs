//! Data loader: folder lists, file lists and graph documents.
//!
//! [`GraphSource`] is the seam between the orchestrator and the server.
//! [`HttpSource`] talks to the real endpoints; tests substitute their own.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::graph::JsonGraph;

/// Response from `GET /get-folder-list`.
#[derive(Debug, Default, Deserialize)]
struct FolderListing {
    #[serde(default)]
    err: bool,
    #[serde(default)]
    folders: Vec<String>,
}

/// Response from `GET /get-file-list`.
#[derive(Debug, Default, Deserialize)]
struct FileListing {
    #[serde(rename = "jsonFiles", default)]
    json_files: Vec<String>,
}

/// Errors from data loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("server could not list data folders")]
    Server,
}

/// Asynchronous access to folders, files and documents.
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Folder paths in server order.  A server-side error flag is
    /// reported as [`LoadError::Server`].
    async fn folder_list(&self) -> Result<Vec<String>, LoadError>;

    /// JSON file names inside `folder` (already `/`-terminated).
    async fn file_list(&self, folder: &str) -> Result<Vec<String>, LoadError>;

    /// Fetch and parse the document at `path` (`folder/` + file).
    async fn load_json(&self, path: &str) -> Result<JsonGraph, LoadError>;
}

// ───────────────────────────────────────── HTTP ──────────────

#[derive(Debug, Clone)]
pub struct HttpSource {
    http: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LoadError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, ?query, "GET");

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LoadError::Decode(format!("{endpoint}: {e}")))
    }
}

#[async_trait]
impl GraphSource for HttpSource {
    async fn folder_list(&self) -> Result<Vec<String>, LoadError> {
        let listing: FolderListing = self.get_json("/get-folder-list", &[]).await?;
        if listing.err {
            return Err(LoadError::Server);
        }
        Ok(listing.folders)
    }

    async fn file_list(&self, folder: &str) -> Result<Vec<String>, LoadError> {
        let listing: FileListing = self
            .get_json("/get-file-list", &[("folder", folder)])
            .await?;
        Ok(listing.json_files)
    }

    async fn load_json(&self, path: &str) -> Result<JsonGraph, LoadError> {
        let value: serde_json::Value = self.get_json("/get-file", &[("file", path)]).await?;
        Ok(JsonGraph(value))
    }
}
