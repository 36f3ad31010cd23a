//! Score report types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::AttemptScore;

/// One scored attempt plus the context needed to read it later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Id of the calibration form the attempt was scored against.
    pub form_id: String,
    /// Human-readable form name.
    pub form_name: String,
    /// Calibration version of the form.
    pub form_version: String,
    /// The scored attempt.
    pub attempt: AttemptScore,
}

impl ScoreReport {
    pub fn new(
        form_id: impl Into<String>,
        form_name: impl Into<String>,
        form_version: impl Into<String>,
        attempt: AttemptScore,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            form_id: form_id.into(),
            form_name: form_name.into(),
            form_version: form_version.into(),
            attempt,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ScoreReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("# Score Report — {}\n\n", self.form_name));
        md.push_str(&format!(
            "Form `{}` (version {}), scored {}\n\n",
            self.form_id,
            self.form_version,
            self.created_at.format("%Y-%m-%d %H:%M UTC")
        ));

        md.push_str("| Section | Raw | Scaled |\n");
        md.push_str("|---------|----:|-------:|\n");
        for section in &self.attempt.sections {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                section.section, section.raw, section.scaled
            ));
        }
        md.push('\n');

        let composite = &self.attempt.composite;
        md.push_str(&format!(
            "**Total: {} / {}** — {} of {} attempted correct ({}%)\n\n",
            composite.total,
            self.attempt.max_composite,
            composite.total_correct,
            composite.attempted,
            composite.percent
        ));
        md.push_str(&format!(
            "Band: **{}** — {}\n",
            self.attempt.band.label, self.attempt.band.narrative
        ));

        if !self.attempt.diagnostics.is_empty() {
            md.push_str("\n### Diagnostics\n\n");
            for diagnostic in &self.attempt.diagnostics {
                md.push_str(&format!("- {diagnostic}\n"));
            }
        }

        md
    }
}
