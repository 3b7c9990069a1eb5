//! Keep-newest-N retention planning.

use std::fmt;

use crate::version::sort_newest_first;

/// Classification of a single tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Retention {
    /// The tag is within the retention window.
    Keep,

    /// The tag falls outside the retention window.
    Delete,
}

impl Retention {
    /// Classifies a 0-based rank against the keep-count.
    ///
    /// # Examples
    ///
    /// ```
    /// use regsweep_core::Retention;
    ///
    /// assert_eq!(Retention::for_rank(0, 2), Retention::Keep);
    /// assert_eq!(Retention::for_rank(2, 2), Retention::Delete);
    /// assert_eq!(Retention::for_rank(0, 0), Retention::Delete);
    /// ```
    #[must_use]
    pub const fn for_rank(rank: usize, keep: usize) -> Self {
        if rank < keep {
            Self::Keep
        } else {
            Self::Delete
        }
    }

    /// Returns true for [`Retention::Delete`].
    #[must_use]
    pub const fn is_delete(self) -> bool {
        matches!(self, Self::Delete)
    }
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// The retention outcome of one tag in one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionDecision {
    /// Repository name.
    pub repository: String,

    /// Tag name.
    pub tag: String,

    /// 0-based rank, newest first.
    pub rank: usize,

    /// Keep or delete.
    pub retention: Retention,
}

/// Partition of a repository's tags into kept and deleted tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPlan {
    keep: Vec<String>,
    delete: Vec<String>,
}

impl RetentionPlan {
    /// Returns the kept tags, newest first.
    #[must_use]
    pub fn kept(&self) -> &[String] {
        &self.keep
    }

    /// Returns the tags selected for deletion, newest first.
    #[must_use]
    pub fn deleted(&self) -> &[String] {
        &self.delete
    }

    /// Total number of tags in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keep.len() + self.delete.len()
    }

    /// Returns true if the plan holds no tags at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty() && self.delete.is_empty()
    }

    /// Splits the plan into `(keep, delete)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.keep, self.delete)
    }

    /// Yields one decision per tag in rank order.
    pub fn decisions<'a>(
        &'a self,
        repository: &'a str,
    ) -> impl Iterator<Item = RetentionDecision> + 'a {
        let keep = self.keep.len();
        self.keep
            .iter()
            .chain(&self.delete)
            .enumerate()
            .map(move |(rank, tag)| RetentionDecision {
                repository: repository.to_string(),
                tag: tag.clone(),
                rank,
                retention: Retention::for_rank(rank, keep),
            })
    }
}

/// Splits tags that are already sorted newest-first.
///
/// The first `keep` tags are kept, the rest are deleted. The input is not
/// re-sorted.
///
/// # Examples
///
/// ```
/// use regsweep_core::plan;
///
/// let tags = vec!["3".to_string(), "2".to_string(), "1".to_string()];
/// let plan = plan(tags, 1);
/// assert_eq!(plan.kept(), ["3"]);
/// assert_eq!(plan.deleted(), ["2", "1"]);
/// ```
#[must_use]
pub fn plan(sorted_tags: Vec<String>, keep: usize) -> RetentionPlan {
    let mut kept = sorted_tags;
    let delete = if keep < kept.len() {
        kept.split_off(keep)
    } else {
        Vec::new()
    };

    RetentionPlan { keep: kept, delete }
}

/// Sorts tags newest-first, then plans them.
#[must_use]
pub fn rank_and_plan(mut tags: Vec<String>, keep: usize) -> RetentionPlan {
    sort_newest_first(&mut tags);
    tracing::debug!(tags = tags.len(), keep, "Planning retention");
    plan(tags, keep)
}
