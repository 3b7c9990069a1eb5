//! Docker Registry v2 / OCI Distribution wire types.
//!
//! This module defines the payloads and header values the cleanup client
//! exchanges with a registry.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Media types sent in `Accept` headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaType;

impl MediaType {
    /// Docker image manifest, schema 2.
    ///
    /// Registries report the digest of this representation in
    /// `Docker-Content-Digest`, which is the digest a delete must target.
    pub const DOCKER_MANIFEST_V2: &'static str =
        "application/vnd.docker.distribution.manifest.v2+json";
}

/// Response header carrying the manifest digest.
pub const DOCKER_CONTENT_DIGEST: &str = "Docker-Content-Digest";

/// Response from the `/v2/_catalog` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    /// Repository names in registry order.
    pub repositories: Vec<String>,
}

/// Response from the `/v2/<name>/tags/list` endpoint.
///
/// Registries answer `"tags": null` for repositories whose tags were all
/// deleted; an absent, `null` or non-array `tags` value reads as no tags and
/// non-string entries are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagList {
    /// List of tags.
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::String(tag) => Some(tag),
            _ => None,
        })
        .collect())
}

/// Content-addressed manifest reference (e.g. `sha256:4f1c...`).
///
/// The value is opaque to the client; it is only ever echoed back in the
/// delete request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestDigest(String);

impl ManifestDigest {
    /// Wraps a digest string.
    #[must_use]
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Returns the digest string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ManifestDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error response from registry API.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// List of errors.
    pub errors: Vec<RegistryApiError>,
}

impl ErrorResponse {
    /// Joins the error messages into one line.
    #[must_use]
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Individual error from registry API.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryApiError {
    /// Error code.
    pub code: String,

    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}
