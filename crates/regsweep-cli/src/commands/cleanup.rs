//! Cleanup command implementation.
//!
//! Keeps the newest N tags of every repository and deletes the rest after a
//! single confirmation.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{info, warn};
use url::Url;

use regsweep_cleanup::{Cleanup, CleanupOptions, CleanupState, ConsoleReporter, PromptConfirm};
use regsweep_registry::{RegistryClient, RegistryConfig, TlsConfig};

/// Arguments for a cleanup run.
#[derive(Args)]
pub struct CleanupArgs {
    /// Registry URL (e.g., `<http://localhost:5000>`)
    #[arg(short, long, env = "REGSWEEP_REGISTRY_URL", value_parser = parse_registry_url)]
    pub url: String,

    /// Number of newest tags to keep per repository
    #[arg(short, long, env = "REGSWEEP_KEEP")]
    pub keep: usize,

    /// Accepted for compatibility; deletion is always gated by the prompt
    #[arg(long, hide = true)]
    pub delete: bool,

    /// Show the plan without prompting or deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Additional root CA certificate (PEM) for the registry
    #[arg(long)]
    pub ca_cert: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CleanupArgs {
    /// Builds the registry configuration from the arguments.
    fn registry_config(&self) -> RegistryConfig {
        let config =
            RegistryConfig::new(&self.url).with_timeout(Duration::from_secs(self.timeout));

        if !self.insecure && self.ca_cert.is_none() {
            return config;
        }

        let mut tls = TlsConfig::new();
        if let Some(ref ca_cert) = self.ca_cert {
            tls = tls.with_ca_cert(ca_cert);
        }
        if self.insecure {
            tls = tls.insecure();
        }
        config.with_tls(tls)
    }

    const fn options(&self) -> CleanupOptions {
        CleanupOptions::new(self.keep).with_dry_run(self.dry_run)
    }
}

/// Accepts absolute `http`/`https` URLs and strips trailing slashes.
fn parse_registry_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL: {e}"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!(
            "unsupported scheme '{}', expected http or https",
            url.scheme()
        ));
    }
    if url.host_str().is_none() {
        return Err("URL has no host".to_string());
    }

    Ok(value.trim_end_matches('/').to_string())
}

/// Runs the cleanup.
///
/// # Errors
///
/// Returns an error if:
/// - The registry client cannot be created
/// - The repository catalog cannot be fetched
/// - Console output fails
pub async fn run(args: &CleanupArgs) -> Result<()> {
    if args.delete {
        warn!("--delete has no effect; deletions are confirmed interactively");
    }

    info!(url = %args.url, keep = args.keep, dry_run = args.dry_run, "Starting cleanup");

    let client =
        RegistryClient::new(args.registry_config()).context("Failed to create registry client")?;
    info!(
        url = %client.config().url,
        timeout = ?client.config().timeout,
        tls = client.config().tls.is_some(),
        "Registry client ready"
    );

    let mut reporter = ConsoleReporter::stdout().with_colors(!args.no_color);
    let mut confirm = PromptConfirm::stdio();

    let report = Cleanup::new(client, args.options())
        .run(&mut reporter, &mut confirm)
        .await
        .with_context(|| format!("Cleanup of {} failed", args.url))?;

    info!(
        state = %report.state,
        deleted = report.deleted.len(),
        failed = report.failures.len(),
        "Cleanup finished"
    );
    if report.state == CleanupState::Cancelled {
        println!("Aborted.");
    }

    Ok(())
}
