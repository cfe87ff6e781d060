//! Registry JSON API client

use crate::client::NetClient;
use reqwest::StatusCode;
use spout_errors::{Error, NetworkError, RegistryError};
use spout_events::{AppEvent, EventEmitter, EventSender, RegistryEvent};
use spout_index::PackageDocument;

/// Fetches package documents from a registry JSON API
#[derive(Clone)]
pub struct RegistryClient {
    client: NetClient,
    base_url: String,
}

impl RegistryClient {
    pub fn new(client: NetClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn package_url(&self, name: &str) -> String {
        format!("{}/{name}/json", self.base_url)
    }

    #[must_use]
    pub fn release_url(&self, name: &str, version: &str) -> String {
        format!("{}/{name}/{version}/json", self.base_url)
    }

    /// Fetch the document for a package, including its release map
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::PackageNotFound` on a 404, a network error for
    /// transport failures and `RegistryError::InvalidDocument` for bad JSON.
    pub async fn fetch_package(
        &self,
        name: &str,
        tx: &EventSender,
    ) -> Result<PackageDocument, Error> {
        let url = self.package_url(name);
        let document = self
            .fetch(name, &url, tx, || RegistryError::PackageNotFound {
                name: name.to_string(),
            })
            .await?;

        tx.emit(AppEvent::Registry(RegistryEvent::FetchCompleted {
            package: document.info.name.clone(),
            releases: document.releases.len(),
            files: document.file_count(),
        }));
        Ok(document)
    }

    /// Fetch the document for one release of a package
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ReleaseNotFound` on a 404, otherwise the same
    /// errors as [`RegistryClient::fetch_package`].
    pub async fn fetch_release(
        &self,
        name: &str,
        version: &str,
        tx: &EventSender,
    ) -> Result<PackageDocument, Error> {
        let url = self.release_url(name, version);
        let document = self
            .fetch(name, &url, tx, || RegistryError::ReleaseNotFound {
                name: name.to_string(),
                version: version.to_string(),
            })
            .await?;

        tx.emit(AppEvent::Registry(RegistryEvent::FetchCompleted {
            package: document.info.name.clone(),
            releases: 1,
            files: document.urls.len(),
        }));
        Ok(document)
    }

    async fn fetch(
        &self,
        name: &str,
        url: &str,
        tx: &EventSender,
        not_found: impl FnOnce() -> RegistryError,
    ) -> Result<PackageDocument, Error> {
        tx.emit(AppEvent::Registry(RegistryEvent::FetchStarted {
            package: name.to_string(),
            url: url.to_string(),
        }));

        let response = self.client.get(url, tx).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found().into());
        }
        if !status.is_success() {
            return Err(NetworkError::HttpError {
                status: status.as_u16(),
                message: status.to_string(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::DownloadFailed(e.to_string()))?;
        PackageDocument::from_json(&body)
    }
}
