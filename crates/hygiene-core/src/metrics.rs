//! Section metrics and the overall weighted, markdown-corrected score.
//!
//! Both functions are total: zero denominators yield 0, never NaN.

use serde::{Deserialize, Serialize};

use crate::answer::Answer;
use crate::model::SectionWithAnswers;

/// Aggregate figures for one section, recomputed on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMetrics {
    /// Sum of TPP over non-NA items.
    #[serde(rename = "tpp")]
    pub total_tpp: f64,
    /// Sum of awarded points over non-NA items.
    #[serde(rename = "points")]
    pub total_points: f64,
    pub weighted_tpp: f64,
    pub weighted_points: f64,
    /// `weighted_points / weighted_tpp` as a percentage.
    pub score_per_item: f64,
    pub complying_count: usize,
    pub need_improvement_count: usize,
    pub nc_count: usize,
    pub na_count: usize,
    pub count_ex_na: usize,
    pub need_improvement_plus_nc: usize,
    pub need_improvement_weighted: f64,
    pub nc_weighted: f64,
    /// Proportion of full-credit equivalent items. Not clamped.
    pub markdown_correction: f64,
    pub corrected_score: f64,
    pub weighted_points_markdown: f64,
}

/// Compute the metrics for one section.
pub fn compute_section_metrics(section: &SectionWithAnswers) -> SectionMetrics {
    let weightage = section.section.weightage / 100.0;
    let items = &section.items;

    let count = |answer: Answer| items.iter().filter(|i| i.answer == answer).count();
    let complying_count = count(Answer::Complying);
    let need_improvement_count = count(Answer::NeedImprovement);
    let nc_count = count(Answer::Nc);
    let na_count = count(Answer::Na);
    let count_ex_na = items.len() - na_count;

    let scored = || items.iter().filter(|i| !i.answer.is_na());
    let total_points = scored().fold(0.0, |sum, i| sum + i.points());
    let total_tpp = scored().fold(0.0, |sum, i| sum + i.item.tpp);

    let weighted_tpp = total_tpp * weightage;
    let weighted_points = total_points * weightage;
    let score_per_item = if weighted_tpp > 0.0 {
        (weighted_points / weighted_tpp) * 100.0
    } else {
        0.0
    };

    let need_improvement_weighted =
        need_improvement_count as f64 * Answer::NeedImprovement.deduction_units();
    let nc_weighted = nc_count as f64 * Answer::Nc.deduction_units();
    let need_improvement_plus_nc = need_improvement_count + nc_count;

    let markdown_correction = if count_ex_na > 0 {
        let n = count_ex_na as f64;
        (n - need_improvement_weighted - nc_weighted) / n
    } else {
        0.0
    };

    let corrected_score = if score_per_item > 0.0 {
        score_per_item * markdown_correction
    } else {
        0.0
    };
    let weighted_points_markdown = weighted_points * markdown_correction;

    SectionMetrics {
        total_tpp,
        total_points,
        weighted_tpp,
        weighted_points,
        score_per_item,
        complying_count,
        need_improvement_count,
        nc_count,
        na_count,
        count_ex_na,
        need_improvement_plus_nc,
        need_improvement_weighted,
        nc_weighted,
        markdown_correction,
        corrected_score,
        weighted_points_markdown,
    }
}

/// Overall compliance percentage across every section of a report.
pub fn compute_overall_score(sections: &[SectionWithAnswers]) -> f64 {
    let metrics: Vec<SectionMetrics> = sections.iter().map(compute_section_metrics).collect();
    overall_score_from_metrics(&metrics)
}

/// Reduce already-computed section metrics into the overall percentage.
pub fn overall_score_from_metrics(metrics: &[SectionMetrics]) -> f64 {
    let total_weighted_points_markdown = metrics
        .iter()
        .fold(0.0, |sum, m| sum + m.weighted_points_markdown);
    let total_weighted_tpp = metrics.iter().fold(0.0, |sum, m| sum + m.weighted_tpp);

    if total_weighted_tpp > 0.0 {
        (total_weighted_points_markdown / total_weighted_tpp) * 100.0
    } else {
        0.0
    }
}
