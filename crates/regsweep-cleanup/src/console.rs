//! Console rendering and confirmation.
//!
//! The orchestrator talks to the terminal through two seams: [`Reporter`]
//! renders progress and results, [`Confirm`] asks the single yes/no question
//! before anything is deleted.

use std::io::{self, BufRead, Write};

use regsweep_core::{DeletePlan, Retention, RetentionDecision};
use regsweep_registry::{ManifestDigest, RegistryError};

use crate::report::{CleanupReport, CleanupState, DeletionFailure};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Renders cleanup progress.
pub trait Reporter {
    /// Announces that a repository is being processed.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn repository(&mut self, repository: &str) -> io::Result<()>;

    /// Reports the keep/delete classification of one tag.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn decision(&mut self, decision: &RetentionDecision) -> io::Result<()>;

    /// Reports that a repository's tags could not be listed.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn listing_failed(&mut self, repository: &str, error: &RegistryError) -> io::Result<()>;

    /// Shows the consolidated delete plan.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn plan(&mut self, plan: &DeletePlan) -> io::Result<()>;

    /// Reports a successful deletion.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn deleted(&mut self, repository: &str, tag: &str, digest: &ManifestDigest) -> io::Result<()>;

    /// Reports a failed deletion.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn deletion_failed(&mut self, failure: &DeletionFailure) -> io::Result<()>;

    /// Reports the outcome of the run.
    ///
    /// # Errors
    ///
    /// Returns an IO error if writing to output fails.
    fn summary(&mut self, report: &CleanupReport) -> io::Result<()>;
}

/// Asks for confirmation of a delete plan.
pub trait Confirm {
    /// Returns true if the plan may be executed.
    fn confirm(&mut self, plan: &DeletePlan) -> bool;
}

/// Line-oriented reporter for terminals.
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
    use_colors: bool,
}

impl ConsoleReporter<io::Stdout> {
    /// Creates a reporter writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Creates a reporter writing to `out`.
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out,
            use_colors: true,
        }
    }

    /// Sets whether to use colors.
    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.use_colors = colors;
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Formats the line shown for a classified tag.
    fn format_decision(&self, decision: &RetentionDecision) -> String {
        let marker = match decision.retention {
            Retention::Keep => self.paint(GREEN, "(keep)"),
            Retention::Delete => self.paint(RED, "(delete)"),
        };
        format!("  {}:{} {marker}", decision.repository, decision.tag)
    }

    /// Formats the summary line.
    fn format_summary(&self, report: &CleanupReport) -> String {
        let status = match report.state {
            CleanupState::Cancelled => self.paint(YELLOW, "CANCELLED"),
            _ if report.dry_run => self.paint(YELLOW, "DRY RUN"),
            _ if report.failures.is_empty() => self.paint(GREEN, "DONE"),
            _ => self.paint(RED, "DONE WITH ERRORS"),
        };

        format!(
            "{status}: {} repositories, {} kept, {} planned, {} deleted, {} failed",
            report.repositories,
            report.kept,
            report.planned(),
            report.deleted.len(),
            report.failures.len()
        )
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn repository(&mut self, repository: &str) -> io::Result<()> {
        let header = self.paint(BOLD, &format!("{repository}:"));
        writeln!(self.out, "{header}")
    }

    fn decision(&mut self, decision: &RetentionDecision) -> io::Result<()> {
        let line = self.format_decision(decision);
        writeln!(self.out, "{line}")
    }

    fn listing_failed(&mut self, repository: &str, error: &RegistryError) -> io::Result<()> {
        let warning = self.paint(YELLOW, "warning");
        writeln!(
            self.out,
            "  {warning}: could not list tags of {repository}, skipping: {error}"
        )
    }

    fn plan(&mut self, plan: &DeletePlan) -> io::Result<()> {
        writeln!(self.out)?;
        if plan.is_empty() {
            return writeln!(self.out, "Nothing to delete.");
        }

        writeln!(self.out, "The following {} tag(s) will be deleted:", plan.len())?;
        for (repository, tag) in plan.iter() {
            writeln!(self.out, "  - {repository}:{tag}")?;
        }
        writeln!(self.out)
    }

    fn deleted(&mut self, repository: &str, tag: &str, digest: &ManifestDigest) -> io::Result<()> {
        let marker = self.paint(GREEN, "✓");
        writeln!(self.out, "{marker} {repository}:{tag} ({digest}) deleted")
    }

    fn deletion_failed(&mut self, failure: &DeletionFailure) -> io::Result<()> {
        let marker = self.paint(RED, "✗");
        writeln!(
            self.out,
            "{marker} {}:{} not deleted: {}",
            failure.repository, failure.tag, failure.error
        )
    }

    fn summary(&mut self, report: &CleanupReport) -> io::Result<()> {
        let line = self.format_summary(report);
        writeln!(self.out)?;
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }
}

/// Interactive `[y/N]` prompt.
///
/// Only `y` or `yes` (any case) confirm. End of input or a read error
/// declines.
#[derive(Debug)]
pub struct PromptConfirm<R: BufRead, W: Write> {
    input: R,
    out: W,
}

impl PromptConfirm<io::StdinLock<'static>, io::Stdout> {
    /// Creates a prompt reading stdin and writing stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    /// Creates a prompt over arbitrary streams.
    #[must_use]
    pub const fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    fn ask(&mut self, plan: &DeletePlan) -> io::Result<bool> {
        write!(self.out, "Delete these {} tag(s)? [y/N] ", plan.len())?;
        self.out.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.out)?;
            return Ok(false);
        }

        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, plan: &DeletePlan) -> bool {
        match self.ask(plan) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation, treating as no");
                false
            }
        }
    }
}
