//! End-of-run audit: one outcome per module card.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::matcher::{ModuleCard, SkipReason};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Certain match, applied without asking.
    AutoApplied,
    /// Uncertain match the user accepted.
    Confirmed,
    /// Uncertain match the user refused. The module image is untouched.
    Declined,
    Skipped {
        #[serde(flatten)]
        reason: SkipReason,
    },
    /// Card back or crippled side; never matched.
    Excluded,
    /// Match accepted but the image could not be copied.
    Failed { error: String },
}

impl OutcomeStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, OutcomeStatus::AutoApplied | OutcomeStatus::Confirmed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardOutcome {
    pub card: ModuleCard,
    /// `faction/ship/name` or `category/name`.
    pub card_label: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
    pub score: Option<f64>,
    /// Catalog image locator of the match, when there was one.
    pub matched: Option<String>,
}

impl CardOutcome {
    pub fn new(card: &ModuleCard, status: OutcomeStatus) -> Self {
        Self {
            card_label: card.to_string(),
            card: card.clone(),
            status,
            score: None,
            matched: None,
        }
    }

    pub fn with_match(mut self, score: f64, matched: Option<&str>) -> Self {
        self.score = Some(score);
        self.matched = matched.map(str::to_string);
        self
    }
}

/// Per-status tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub auto_applied: usize,
    pub confirmed: usize,
    pub declined: usize,
    pub skipped: usize,
    pub excluded: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub module: PathBuf,
    /// Where the repaired module was written, if it was.
    pub output: Option<PathBuf>,
    pub summary: Summary,
    pub outcomes: Vec<CardOutcome>,
}

impl RunReport {
    pub fn new(module: &Path, outcomes: Vec<CardOutcome>) -> Self {
        Self {
            generated_at: Utc::now(),
            module: module.to_path_buf(),
            output: None,
            summary: summarize(&outcomes),
            outcomes,
        }
    }

    pub fn applied_count(&self) -> usize {
        self.summary.auto_applied + self.summary.confirmed
    }

    pub fn print_summary(&self) {
        println!("{}", self.render_summary());
    }

    pub fn render_summary(&self) -> String {
        let s = &self.summary;
        let mut lines = vec![format!(
            "{} cards: {} auto-applied, {} confirmed, {} declined, {} skipped, {} excluded, {} failed",
            s.total, s.auto_applied, s.confirmed, s.declined, s.skipped, s.excluded, s.failed
        )];
        for outcome in &self.outcomes {
            match &outcome.status {
                OutcomeStatus::Skipped { reason } => {
                    lines.push(format!("  skipped  {}: {reason}", outcome.card_label))
                }
                OutcomeStatus::Declined => lines.push(format!(
                    "  declined {} -> {}",
                    outcome.card_label,
                    outcome.matched.as_deref().unwrap_or("?")
                )),
                OutcomeStatus::Failed { error } => {
                    lines.push(format!("  failed   {}: {error}", outcome.card_label))
                }
                _ => {}
            }
        }
        if let Some(output) = &self.output {
            lines.push(format!("Output: {}", output.display()));
        }
        lines.join("\n")
    }

    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Report written to {}", path.display());
        Ok(())
    }
}

pub fn summarize(outcomes: &[CardOutcome]) -> Summary {
    let mut summary = Summary {
        total: outcomes.len(),
        ..Summary::default()
    };
    for outcome in outcomes {
        match outcome.status {
            OutcomeStatus::AutoApplied => summary.auto_applied += 1,
            OutcomeStatus::Confirmed => summary.confirmed += 1,
            OutcomeStatus::Declined => summary.declined += 1,
            OutcomeStatus::Skipped { .. } => summary.skipped += 1,
            OutcomeStatus::Excluded => summary.excluded += 1,
            OutcomeStatus::Failed { .. } => summary.failed += 1,
        }
    }
    summary
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
