//! Cleanup run state and outcome.

use std::fmt;

use regsweep_core::DeletePlan;
use regsweep_registry::{ManifestDigest, RegistryError};

/// Phase of a cleanup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleanupState {
    /// Fetching the repository catalog.
    Listing,

    /// Listing tags and building the delete plan.
    Planning,

    /// Waiting for the user to confirm the plan.
    AwaitingConfirmation,

    /// Deleting planned tags.
    Executing,

    /// Finished; every planned deletion was attempted, or nothing was planned.
    Done,

    /// The user declined the plan; nothing was deleted.
    Cancelled,
}

impl fmt::Display for CleanupState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Listing => write!(f, "listing"),
            Self::Planning => write!(f, "planning"),
            Self::AwaitingConfirmation => write!(f, "awaiting confirmation"),
            Self::Executing => write!(f, "executing"),
            Self::Done => write!(f, "done"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A tag that was deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedTag {
    /// Repository name.
    pub repository: String,

    /// Tag name.
    pub tag: String,

    /// Digest of the deleted manifest.
    pub digest: ManifestDigest,
}

/// A planned deletion that did not go through.
#[derive(Debug)]
pub struct DeletionFailure {
    /// Repository name.
    pub repository: String,

    /// Tag name.
    pub tag: String,

    /// Why the digest lookup or delete failed.
    pub error: RegistryError,
}

/// Outcome of a cleanup run.
#[derive(Debug)]
pub struct CleanupReport {
    /// Terminal state of the run.
    pub state: CleanupState,

    /// Whether the run was a dry run.
    pub dry_run: bool,

    /// Number of repositories in the catalog.
    pub repositories: usize,

    /// Repositories whose tags could not be listed.
    pub listing_failures: Vec<String>,

    /// Number of tags retained.
    pub kept: usize,

    /// Tags selected for deletion.
    pub plan: DeletePlan,

    /// Tags that were deleted.
    pub deleted: Vec<DeletedTag>,

    /// Deletions that failed.
    pub failures: Vec<DeletionFailure>,
}

impl CleanupReport {
    pub(crate) const fn new(dry_run: bool) -> Self {
        Self {
            state: CleanupState::Listing,
            dry_run,
            repositories: 0,
            listing_failures: Vec::new(),
            kept: 0,
            plan: DeletePlan::new(),
            deleted: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Number of tags selected for deletion.
    #[must_use]
    pub fn planned(&self) -> usize {
        self.plan.len()
    }

    /// Returns true if any listing or deletion failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty() || !self.listing_failures.is_empty()
    }
}
