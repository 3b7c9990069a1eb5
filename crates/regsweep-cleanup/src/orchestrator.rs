//! The cleanup run state machine.
//!
//! A run walks `Listing → Planning → AwaitingConfirmation → Executing → Done`.
//! Declining the plan ends in `Cancelled`. An empty plan or a dry run goes
//! straight from `Planning` to `Done`.

use regsweep_core::{rank_and_plan, DeletePlan};
use regsweep_registry::RegistryApi;

use crate::console::{Confirm, Reporter};
use crate::error::CleanupError;
use crate::report::{CleanupReport, CleanupState, DeletedTag, DeletionFailure};

/// Options for a cleanup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Number of newest tags to keep per repository.
    pub keep: usize,

    /// Plan only; never prompt, never delete.
    pub dry_run: bool,
}

impl CleanupOptions {
    /// Creates options keeping `keep` tags per repository.
    #[must_use]
    pub const fn new(keep: usize) -> Self {
        Self {
            keep,
            dry_run: false,
        }
    }

    /// Sets dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// One cleanup run against a registry.
///
/// # Examples
///
/// ```no_run
/// use regsweep_cleanup::{Cleanup, CleanupOptions, ConsoleReporter, PromptConfirm};
/// use regsweep_registry::{RegistryClient, RegistryConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RegistryClient::new(RegistryConfig::new("http://localhost:5000"))?;
/// let mut cleanup = Cleanup::new(client, CleanupOptions::new(5));
///
/// let report = cleanup
///     .run(&mut ConsoleReporter::stdout(), &mut PromptConfirm::stdio())
///     .await?;
/// println!("deleted {} tags", report.deleted.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Cleanup<R: RegistryApi> {
    registry: R,
    options: CleanupOptions,
    state: CleanupState,
}

impl<R: RegistryApi> Cleanup<R> {
    /// Creates a run that has not started yet.
    pub const fn new(registry: R, options: CleanupOptions) -> Self {
        Self {
            registry,
            options,
            state: CleanupState::Listing,
        }
    }

    /// Current state of the run.
    pub const fn state(&self) -> CleanupState {
        self.state
    }

    fn transition(&mut self, report: &mut CleanupReport, next: CleanupState) {
        tracing::debug!(from = %self.state, to = %next, "Cleanup state change");
        self.state = next;
        report.state = next;
    }

    /// Runs the cleanup to completion.
    ///
    /// # Errors
    ///
    /// Returns [`CleanupError::Catalog`] if the catalog cannot be fetched and
    /// [`CleanupError::Output`] if console output fails. Tag listing and
    /// deletion failures are recorded in the report instead.
    pub async fn run(
        &mut self,
        reporter: &mut dyn Reporter,
        confirm: &mut dyn Confirm,
    ) -> Result<CleanupReport, CleanupError> {
        let mut report = CleanupReport::new(self.options.dry_run);
        self.transition(&mut report, CleanupState::Listing);

        let repositories = self
            .registry
            .catalog()
            .await
            .map_err(|source| CleanupError::Catalog { source })?;
        report.repositories = repositories.len();
        tracing::info!(repositories = repositories.len(), "Fetched catalog");

        self.transition(&mut report, CleanupState::Planning);
        for repository in &repositories {
            self.plan_repository(repository, &mut report, reporter).await?;
        }

        reporter.plan(&report.plan)?;

        if self.options.dry_run || report.plan.is_empty() {
            self.transition(&mut report, CleanupState::Done);
            reporter.summary(&report)?;
            return Ok(report);
        }

        self.transition(&mut report, CleanupState::AwaitingConfirmation);
        if !confirm.confirm(&report.plan) {
            tracing::info!(planned = report.planned(), "Cleanup declined");
            self.transition(&mut report, CleanupState::Cancelled);
            reporter.summary(&report)?;
            return Ok(report);
        }

        self.transition(&mut report, CleanupState::Executing);
        let plan = std::mem::take(&mut report.plan);
        self.execute(&plan, &mut report, reporter).await?;
        report.plan = plan;

        self.transition(&mut report, CleanupState::Done);
        reporter.summary(&report)?;
        Ok(report)
    }

    async fn plan_repository(
        &self,
        repository: &str,
        report: &mut CleanupReport,
        reporter: &mut dyn Reporter,
    ) -> Result<(), CleanupError> {
        reporter.repository(repository)?;

        let tags = match self.registry.list_tags(repository).await {
            Ok(tags) => tags,
            Err(e) => {
                tracing::warn!(repository, error = %e, "Failed to list tags, skipping");
                reporter.listing_failed(repository, &e)?;
                report.listing_failures.push(repository.to_string());
                Vec::new()
            }
        };

        let retention = rank_and_plan(tags, self.options.keep);
        for decision in retention.decisions(repository) {
            reporter.decision(&decision)?;
        }

        report.kept += retention.kept().len();
        let (_, delete) = retention.into_parts();
        report.plan.extend(repository, delete);
        Ok(())
    }

    async fn execute(
        &self,
        plan: &DeletePlan,
        report: &mut CleanupReport,
        reporter: &mut dyn Reporter,
    ) -> Result<(), CleanupError> {
        for (repository, tag) in plan.iter() {
            let outcome = match self.registry.manifest_digest(repository, tag).await {
                Ok(digest) => self
                    .registry
                    .delete_manifest(repository, &digest)
                    .await
                    .map(|()| digest),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(digest) => {
                    tracing::info!(repository, tag, %digest, "Deleted tag");
                    reporter.deleted(repository, tag, &digest)?;
                    report.deleted.push(DeletedTag {
                        repository: repository.to_string(),
                        tag: tag.to_string(),
                        digest,
                    });
                }
                Err(error) => {
                    tracing::warn!(repository, tag, error = %error, "Failed to delete tag");
                    let failure = DeletionFailure {
                        repository: repository.to_string(),
                        tag: tag.to_string(),
                        error,
                    };
                    reporter.deletion_failed(&failure)?;
                    report.failures.push(failure);
                }
            }
        }

        Ok(())
    }
}
