//! Audit scoring orchestrator.
//!
//! Resolves each section of an audit, scores it, and assembles the report.
//! Sections are scored independently; no section reads another's state.

use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::answer::points_for_answer;
use crate::metrics::{compute_section_metrics, overall_score_from_metrics, SectionMetrics};
use crate::model::{Audit, SectionWithAnswers};
use crate::report::{AuditReport, AuditSummary, SectionResult};
use crate::statistics::compute_totals;

/// Options applied before scoring.
#[derive(Debug, Clone, Default)]
pub struct ScoreOptions {
    /// Award `points_for_answer` to answered items that carry no points.
    pub derive_missing_points: bool,
}

/// Progress reporting trait.
pub trait ProgressReporter {
    fn on_section_scored(&self, result: &SectionResult);
    fn on_audit_complete(&self, audit_id: &str, overall_score: f64, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_section_scored(&self, _: &SectionResult) {}
    fn on_audit_complete(&self, _: &str, _: f64, _: Duration) {}
}

/// Score an audit with default options.
pub fn score_audit(audit: &Audit, progress: &dyn ProgressReporter) -> AuditReport {
    score_audit_with(audit, &ScoreOptions::default(), progress)
}

/// Score an audit.
pub fn score_audit_with(
    audit: &Audit,
    options: &ScoreOptions,
    progress: &dyn ProgressReporter,
) -> AuditReport {
    let start = Instant::now();

    let mut sections = audit.resolved_sections();
    if options.derive_missing_points {
        sections.iter_mut().for_each(derive_missing_points);
    }

    let results: Vec<SectionResult> = sections
        .iter()
        .map(|section| {
            let metrics = compute_section_metrics(section);
            tracing::debug!(
                section = %section.section.id,
                weightage = section.section.weightage,
                corrected_score = metrics.corrected_score,
                "scored section"
            );
            let result = SectionResult {
                section_id: section.section.id.clone(),
                name: section.section.name.clone(),
                weightage: section.section.weightage,
                metrics,
            };
            progress.on_section_scored(&result);
            result
        })
        .collect();

    let metrics: Vec<SectionMetrics> = results.iter().map(|r| r.metrics).collect();
    let overall_score = overall_score_from_metrics(&metrics);
    let totals = compute_totals(&results);

    let elapsed = start.elapsed();
    tracing::info!(
        audit = %audit.header.id,
        sections = results.len(),
        overall_score,
        "audit scored"
    );
    progress.on_audit_complete(&audit.header.id, overall_score, elapsed);

    AuditReport {
        id: Uuid::new_v4(),
        created_at: chrono::Utc::now(),
        audit: AuditSummary::from_header(&audit.header, audit.sections.len(), audit.item_count()),
        sections: results,
        overall_score,
        totals,
        score_summary: audit.score_summary.clone(),
        duration_ms: elapsed.as_millis() as u64,
    }
}

fn derive_missing_points(section: &mut SectionWithAnswers) {
    for entry in &mut section.items {
        if entry.item.points.is_none() && entry.item.answer_id.is_some() {
            entry.item.points = Some(points_for_answer(entry.answer, entry.item.tpp));
        }
    }
}
