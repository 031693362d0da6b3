//! Audit report types with JSON persistence and regression detection.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metrics::SectionMetrics;
use crate::model::{AuditHeader, ScoreSummary};
use crate::statistics::ReportTotals;

/// A scored audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the audit that was scored.
    pub audit: AuditSummary,
    /// Per-section metrics, in audit order.
    pub sections: Vec<SectionResult>,
    /// Weighted, markdown-corrected compliance percentage.
    pub overall_score: f64,
    /// Report-wide answer totals.
    pub totals: ReportTotals,
    #[serde(default)]
    pub score_summary: Option<ScoreSummary>,
    /// Scoring wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Audit metadata carried into the report (without the item list).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub hotel_name: String,
    #[serde(default)]
    pub inspector: String,
    #[serde(default)]
    pub date_of_audit: Option<NaiveDate>,
    pub section_count: usize,
    pub item_count: usize,
    #[serde(default)]
    pub average_floor_audit: Option<f64>,
    #[serde(default)]
    pub total_mark_floor_audit: Option<f64>,
    #[serde(default)]
    pub total_mark_for_sampling: Option<f64>,
    #[serde(default)]
    pub overall_quality: Option<f64>,
}

impl AuditSummary {
    pub fn from_header(header: &AuditHeader, section_count: usize, item_count: usize) -> Self {
        Self {
            id: header.id.clone(),
            name: header.name.clone(),
            client_name: header.client_name.clone(),
            hotel_name: header.hotel_name.clone(),
            inspector: header.inspector.clone(),
            date_of_audit: header.date_of_audit,
            section_count,
            item_count,
            average_floor_audit: header.average_floor_audit,
            total_mark_floor_audit: header.total_mark_floor_audit,
            total_mark_for_sampling: header.total_mark_for_sampling,
            overall_quality: header.overall_quality,
        }
    }
}

/// Metrics for one section of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResult {
    pub section_id: String,
    pub name: String,
    pub weightage: f64,
    pub metrics: SectionMetrics,
}

impl AuditReport {
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
        let report: AuditReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    pub fn section(&self, section_id: &str) -> Option<&SectionResult> {
        self.sections.iter().find(|s| s.section_id == section_id)
    }

    /// Compare this report against a baseline audit.
    ///
    /// Sections are matched by id and compared on corrected score. When an id
    /// repeats, the n-th occurrence in one report is matched with the n-th in
    /// the other; an occurrence with no partner counts as new or removed.
    /// `threshold` is in percentage points.
    pub fn compare(&self, baseline: &AuditReport, threshold: f64) -> RegressionReport {
        let baseline_scores: HashMap<SectionKey<'_>, f64> = keyed_sections(baseline)
            .map(|(key, s)| (key, s.metrics.corrected_score))
            .collect();
        let current_keys: Vec<(SectionKey<'_>, &SectionResult)> =
            keyed_sections(self).collect();

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;
        let mut new_sections = 0usize;

        for (key, section) in &current_keys {
            let Some(baseline_val) = baseline_scores.get(key) else {
                new_sections += 1;
                continue;
            };
            let current = section.metrics.corrected_score;
            let change = SectionChange {
                section_id: section.section_id.clone(),
                name: section.name.clone(),
                baseline_score: *baseline_val,
                current_score: current,
                delta: current - baseline_val,
            };
            if change.delta < -threshold {
                regressions.push(change);
            } else if change.delta > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        regressions.sort_by(|a, b| a.delta.total_cmp(&b.delta));
        improvements.sort_by(|a, b| b.delta.total_cmp(&a.delta));

        let removed_sections = baseline_scores
            .keys()
            .filter(|k| !current_keys.iter().any(|(ck, _)| ck == *k))
            .count();

        let overall_delta = self.overall_score - baseline.overall_score;

        RegressionReport {
            baseline_overall: baseline.overall_score,
            current_overall: self.overall_score,
            overall_delta,
            overall_regressed: overall_delta < -threshold,
            regressions,
            improvements,
            unchanged,
            new_sections,
            removed_sections,
        }
    }
}

/// A section id with its occurrence index within one report.
type SectionKey<'a> = (&'a str, usize);

fn keyed_sections(
    report: &AuditReport,
) -> impl Iterator<Item = (SectionKey<'_>, &SectionResult)> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    report.sections.iter().map(move |s| {
        let n = seen.entry(s.section_id.as_str()).or_insert(0);
        let key = (s.section_id.as_str(), *n);
        *n += 1;
        if key.1 == 1 {
            tracing::warn!(
                audit = %report.audit.id,
                section = %s.section_id,
                "duplicate section ID in report, matching by position"
            );
        }
        (key, s)
    })
}

/// Result of comparing two audit reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionReport {
    pub baseline_overall: f64,
    pub current_overall: f64,
    pub overall_delta: f64,
    /// Overall score dropped by more than the threshold.
    pub overall_regressed: bool,
    /// Sections whose corrected score went down, worst first.
    pub regressions: Vec<SectionChange>,
    /// Sections whose corrected score went up, best first.
    pub improvements: Vec<SectionChange>,
    /// Sections with no significant change.
    pub unchanged: usize,
    /// Sections in current but not baseline.
    pub new_sections: usize,
    /// Sections in baseline but not current.
    pub removed_sections: usize,
}

/// A section whose corrected score moved past the threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionChange {
    pub section_id: String,
    pub name: String,
    pub baseline_score: f64,
    pub current_score: f64,
    pub delta: f64,
}

impl RegressionReport {
    /// Format the regression report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Overall:** {:.1}% -> {:.1}% ({:+.1})\n\n",
            self.baseline_overall, self.current_overall, self.overall_delta
        ));
        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Section | Baseline | Current | Delta |\n");
            md.push_str("|---------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% | {:+.1} |\n",
                    c.name, c.baseline_score, c.current_score, c.delta
                ));
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if any section or the overall score regressed.
    pub fn has_regressions(&self) -> bool {
        self.overall_regressed || !self.regressions.is_empty()
    }
}
