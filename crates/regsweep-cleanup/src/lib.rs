//! # Regsweep Cleanup
//!
//! Plans and executes keep-newest-N tag cleanups against a Docker registry.
//!
//! A [`Cleanup`] run lists every repository, ranks its tags, shows what it
//! would keep and delete, asks once for confirmation and then deletes each
//! planned tag by manifest digest. The registry, the console and the
//! confirmation prompt are all injected, so a run can be driven entirely from
//! tests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use regsweep_cleanup::{Cleanup, CleanupOptions, ConsoleReporter, PromptConfirm};
//! use regsweep_registry::{RegistryClient, RegistryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RegistryClient::new(RegistryConfig::new("http://localhost:5000"))?;
//!     let options = CleanupOptions::new(10).with_dry_run(true);
//!
//!     let report = Cleanup::new(client, options)
//!         .run(&mut ConsoleReporter::stdout(), &mut PromptConfirm::stdio())
//!         .await?;
//!
//!     println!("{} tag(s) would be deleted", report.planned());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod console;
mod error;
mod orchestrator;
mod report;

pub use console::{Confirm, ConsoleReporter, PromptConfirm, Reporter};
pub use error::CleanupError;
pub use orchestrator::{Cleanup, CleanupOptions};
pub use report::{CleanupReport, CleanupState, DeletedTag, DeletionFailure};
