//! # Regsweep Core
//!
//! Tag ranking and retention planning for the regsweep registry cleanup tool.
//!
//! This crate is free of I/O. It provides:
//!
//! - [`rank_key`] - maps a raw tag onto a totally ordered [`VersionKey`]
//! - [`plan`] / [`rank_and_plan`] - keep-newest-N partitioning of a tag list
//! - [`DeletePlan`] - the registry-wide set of tags awaiting deletion
//!
//! ## Example
//!
//! ```rust
//! use regsweep_core::{rank_and_plan, DeletePlan};
//!
//! let tags = vec!["5", "3", "10", "master-abc"]
//!     .into_iter()
//!     .map(String::from)
//!     .collect();
//!
//! let retention = rank_and_plan(tags, 1);
//! assert_eq!(retention.kept(), ["10"]);
//!
//! let mut plan = DeletePlan::new();
//! plan.extend("web", retention.deleted().iter().cloned());
//! assert_eq!(plan.len(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod plan;
pub mod retention;
pub mod version;


pub use plan::{DeletePlan, PlanEntry};
pub use retention::{plan, rank_and_plan, Retention, RetentionDecision, RetentionPlan};
pub use version::{
    compare_newest_first, rank_key, sort_newest_first, DottedVersion, Numeral, Segment, Tier,
    VersionKey, BRANCH_PREFIX, LATEST_TAG,
};
