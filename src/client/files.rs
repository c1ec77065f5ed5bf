use std::path::{Path, PathBuf};

use bytes::Bytes;
use reqwest::Method;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::{Client, Query};
use crate::{
    error::{Error, Result},
    storage,
    types::{DirectoryInfo, FileInfo},
    utils,
};

pub(crate) fn require_path(file_path: &str) -> Result<()> {
    if file_path.trim().is_empty() {
        return Err(Error::validation("file path must not be empty"));
    }
    Ok(())
}

pub(crate) fn require_paths<S: AsRef<str>>(paths: &[S]) -> Result<Vec<String>> {
    if paths.is_empty() {
        return Err(Error::validation("at least one path is required"));
    }
    paths
        .iter()
        .map(|p| {
            require_path(p.as_ref())?;
            Ok(p.as_ref().to_string())
        })
        .collect()
}

impl Client {
    /// Lists a remote directory. An empty `path` lists the root; `search`
    /// switches the server to a recursive name search below `path`.
    pub async fn browse_files(
        &self,
        cancel: &CancellationToken,
        path: &str,
        search: Option<&str>,
    ) -> Result<DirectoryInfo> {
        let mut query = Query::new();
        if !path.is_empty() {
            query.push(("path", path.to_string()));
        }
        if let Some(search) = utils::non_empty(search) {
            query.push(("search", search.to_string()));
        }
        self.get(cancel, &["files", "browse"], &query).await
    }

    pub async fn file_info(&self, cancel: &CancellationToken, file_path: &str) -> Result<FileInfo> {
        require_path(file_path)?;
        self.get(cancel, &["files", "info"], &[("path", file_path.to_string())])
            .await
    }

    /// Downloads a file into memory.
    pub async fn download_file(&self, cancel: &CancellationToken, file_path: &str) -> Result<Bytes> {
        require_path(file_path)?;
        self.request_bytes(
            cancel,
            Method::GET,
            &["files", "download"],
            &[("path", file_path.to_string())],
            None,
        )
        .await
    }

    /// Downloads a file and atomically writes it to `save_path`.
    ///
    /// Nothing touches `save_path` until the whole body has arrived; the bytes are
    /// then written to a sibling temp file and renamed into place. A failed or
    /// cancelled download leaves any existing file untouched.
    pub async fn download_file_to(
        &self,
        cancel: &CancellationToken,
        file_path: &str,
        save_path: &Path,
    ) -> Result<PathBuf> {
        let data = self.download_file(cancel, file_path).await?;
        storage::write_atomic(save_path, &data).await?;
        tracing::info!(remote = file_path, local = %save_path.display(), bytes = data.len(), "download saved");
        Ok(save_path.to_path_buf())
    }

    pub async fn cover_art(&self, cancel: &CancellationToken, file_path: &str) -> Result<Bytes> {
        require_path(file_path)?;
        self.request_bytes(
            cancel,
            Method::GET,
            &["files", "cover-art"],
            &[("path", file_path.to_string())],
            None,
        )
        .await
    }

    /// Builds a zip archive of the selected paths synchronously on the server and
    /// returns the archive bytes. Large selections should use
    /// [`Client::start_zip_job`] instead.
    pub async fn create_zip<S: AsRef<str>>(&self, cancel: &CancellationToken, paths: &[S]) -> Result<Bytes> {
        let paths = require_paths(paths)?;
        let body = json!({ "paths": paths });
        self.request_bytes(cancel, Method::POST, &["files", "zip-selection"], &[], Some(&body))
            .await
    }
}
