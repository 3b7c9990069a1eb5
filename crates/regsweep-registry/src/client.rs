//! Docker Registry HTTP API client for cleanup operations.
//!
//! This module provides the [`RegistryApi`] seam the cleanup orchestrator
//! talks to, and [`RegistryClient`], its `reqwest` implementation.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Response, StatusCode};
use url::Url;

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::oci::{
    Catalog, ErrorResponse, ManifestDigest, MediaType, TagList, DOCKER_CONTENT_DIGEST,
};

/// Registry operations needed to plan and execute a cleanup.
///
/// Every call is a fresh request; implementations must not cache results.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Lists all repository names in the registry catalog.
    async fn catalog(&self) -> Result<Vec<String>, RegistryError>;

    /// Lists the tags of a repository in registry order.
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>, RegistryError>;

    /// Resolves the schema-2 manifest digest a tag currently points to.
    async fn manifest_digest(
        &self,
        repository: &str,
        tag: &str,
    ) -> Result<ManifestDigest, RegistryError>;

    /// Deletes a manifest by digest.
    async fn delete_manifest(
        &self,
        repository: &str,
        digest: &ManifestDigest,
    ) -> Result<(), RegistryError>;
}

/// Client for a Docker Registry v2 compatible registry.
#[derive(Debug)]
pub struct RegistryClient {
    config: RegistryConfig,
    http: reqwest::Client,
}

impl RegistryClient {
    /// Creates a new registry client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not an absolute `http`/`https` URL or
    /// the HTTP client cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use regsweep_registry::{RegistryClient, RegistryConfig};
    ///
    /// let config = RegistryConfig::new("https://registry.example.com");
    /// let client = RegistryClient::new(config)?;
    /// # Ok::<(), regsweep_registry::RegistryError>(())
    /// ```
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        Self::validate_url(&config.url)?;
        let http = Self::build_http_client(&config)?;

        Ok(Self { config, http })
    }

    /// Returns the registry configuration.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    fn validate_url(url: &str) -> Result<(), RegistryError> {
        let parsed = Url::parse(url).map_err(|_| RegistryError::InvalidUrl {
            url: url.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(RegistryError::InvalidUrl {
                url: url.to_string(),
            });
        }

        Ok(())
    }

    /// Builds the HTTP client with proper configuration.
    fn build_http_client(config: &RegistryConfig) -> Result<reqwest::Client, RegistryError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent);

        if let Some(ref tls) = config.tls {
            if tls.insecure_skip_verify {
                builder = builder.danger_accept_invalid_certs(true);
            }

            if let Some(ref ca_cert) = tls.ca_cert {
                let cert_pem = std::fs::read(ca_cert).map_err(|e| RegistryError::IoError {
                    path: ca_cert.clone(),
                    source: e,
                })?;
                let cert = reqwest::Certificate::from_pem(&cert_pem).map_err(|e| {
                    RegistryError::InvalidTls {
                        message: format!("Invalid CA certificate: {e}"),
                    }
                })?;
                builder = builder.add_root_certificate(cert);
            }
        }

        builder.build().map_err(|e| RegistryError::ConnectionFailed {
            url: config.url.clone(),
            source: e,
        })
    }

    /// Reads the body of a failed response into an error.
    async fn error_from(response: Response) -> RegistryError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|errors| errors.summary())
            .ok()
            .filter(|summary| !summary.is_empty())
            .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());

        RegistryError::HttpError {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl RegistryApi for RegistryClient {
    async fn catalog(&self) -> Result<Vec<String>, RegistryError> {
        let url = self.config.endpoint("/v2/_catalog");
        tracing::debug!(%url, "Fetching catalog");

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let body = response.text().await?;
        let catalog: Catalog = serde_json::from_str(&body)?;
        Ok(catalog.repositories)
    }

    async fn list_tags(&self, repository: &str) -> Result<Vec<String>, RegistryError> {
        let url = self.config.endpoint(&format!("/v2/{repository}/tags/list"));
        tracing::debug!(%url, repository, "Listing tags");

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            if response.status() == StatusCode::NOT_FOUND {
                return Ok(Vec::new());
            }
            return Err(Self::error_from(response).await);
        }

        let body = response.text().await?;
        let tag_list: TagList = serde_json::from_str(&body)?;
        Ok(tag_list.tags)
    }

    async fn manifest_digest(
        &self,
        repository: &str,
        tag: &str,
    ) -> Result<ManifestDigest, RegistryError> {
        let url = self
            .config
            .endpoint(&format!("/v2/{repository}/manifests/{tag}"));
        tracing::debug!(%url, repository, tag, "Resolving manifest digest");

        let response = self
            .http
            .head(&url)
            .header(ACCEPT, MediaType::DOCKER_MANIFEST_V2)
            .send()
            .await?;

        if !response.status().is_success() {
            if response.status() == StatusCode::NOT_FOUND {
                return Err(RegistryError::NotFound {
                    repository: repository.to_string(),
                    reference: tag.to_string(),
                });
            }
            return Err(Self::error_from(response).await);
        }

        response
            .headers()
            .get(DOCKER_CONTENT_DIGEST)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ManifestDigest::new)
            .ok_or_else(|| RegistryError::DigestMissing {
                repository: repository.to_string(),
                tag: tag.to_string(),
            })
    }

    async fn delete_manifest(
        &self,
        repository: &str,
        digest: &ManifestDigest,
    ) -> Result<(), RegistryError> {
        let url = self
            .config
            .endpoint(&format!("/v2/{repository}/manifests/{digest}"));
        tracing::debug!(%url, repository, %digest, "Deleting manifest");

        let response = self.http.delete(&url).send().await?;

        if !response.status().is_success() {
            if response.status() == StatusCode::NOT_FOUND {
                return Err(RegistryError::NotFound {
                    repository: repository.to_string(),
                    reference: digest.to_string(),
                });
            }
            return Err(Self::error_from(response).await);
        }

        tracing::info!(repository, %digest, "Deleted manifest");
        Ok(())
    }
}
