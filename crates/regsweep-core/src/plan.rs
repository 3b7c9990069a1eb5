//! Registry-wide delete plan.

use std::fmt;

/// Tags of one repository selected for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Repository name.
    pub repository: String,

    /// Tags to delete, newest first.
    pub tags: Vec<String>,
}

/// All `(repository, tag)` pairs selected for deletion in one run.
///
/// Entries keep the order in which repositories were added, which is the
/// catalog order during a cleanup run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletePlan {
    entries: Vec<PlanEntry>,
}

impl DeletePlan {
    /// Creates an empty plan.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds tags for a repository.
    ///
    /// Adding nothing is a no-op; adding to a repository already in the plan
    /// appends to its entry.
    pub fn extend(&mut self, repository: &str, tags: impl IntoIterator<Item = String>) {
        let mut tags = tags.into_iter().peekable();
        if tags.peek().is_none() {
            return;
        }

        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.repository == repository)
        {
            entry.tags.extend(tags);
        } else {
            self.entries.push(PlanEntry {
                repository: repository.to_string(),
                tags: tags.collect(),
            });
        }
    }

    /// Returns true if no tag is planned for deletion.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tags planned for deletion.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().map(|entry| entry.tags.len()).sum()
    }

    /// Returns the per-repository entries in plan order.
    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Iterates over `(repository, tag)` pairs in plan order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|entry| {
            entry
                .tags
                .iter()
                .map(move |tag| (entry.repository.as_str(), tag.as_str()))
        })
    }

    /// Returns true if the pair is part of the plan.
    #[must_use]
    pub fn contains(&self, repository: &str, tag: &str) -> bool {
        self.iter().any(|(r, t)| r == repository && t == tag)
    }
}

impl fmt::Display for DeletePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (repository, tag) in self.iter() {
            writeln!(f, "{repository}:{tag}")?;
        }
        Ok(())
    }
}
