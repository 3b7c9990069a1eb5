//! # Regsweep Registry
//!
//! Docker Registry v2 client used by regsweep to inspect and prune tags.
//!
//! This crate covers exactly the four endpoints a tag cleanup needs:
//!
//! - `GET /v2/_catalog` - repository listing
//! - `GET /v2/<name>/tags/list` - tag listing
//! - `HEAD /v2/<name>/manifests/<tag>` - manifest digest lookup
//! - `DELETE /v2/<name>/manifests/<digest>` - manifest deletion
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use regsweep_registry::{RegistryApi, RegistryClient, RegistryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RegistryClient::new(RegistryConfig::new("http://localhost:5000"))?;
//!
//!     for repository in client.catalog().await? {
//!         let tags = client.list_tags(&repository).await?;
//!         println!("{repository}: {} tag(s)", tags.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod client;
mod config;
mod error;
mod oci;

pub use client::{RegistryApi, RegistryClient};
pub use config::{RegistryConfig, TlsConfig};
pub use error::RegistryError;
pub use oci::{
    Catalog, ErrorResponse, ManifestDigest, MediaType, RegistryApiError, TagList,
    DOCKER_CONTENT_DIGEST,
};
