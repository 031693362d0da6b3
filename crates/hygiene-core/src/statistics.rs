//! Report-wide totals across all scored sections.

use serde::{Deserialize, Serialize};

use crate::report::SectionResult;

/// Answer counts and weightage summed over every section of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub item_count: usize,
    pub complying_count: usize,
    pub need_improvement_count: usize,
    pub nc_count: usize,
    pub na_count: usize,
    pub count_ex_na: usize,
    /// Sum of section weightages; 100 for a well-formed report.
    pub total_weightage: f64,
    /// Share of non-NA items answered Complying, in [0, 1].
    pub compliance_rate: f64,
}

/// Compute report totals from scored sections.
pub fn compute_totals(sections: &[SectionResult]) -> ReportTotals {
    let mut totals = sections
        .iter()
        .fold(ReportTotals::default(), |mut acc, s| {
            let m = &s.metrics;
            acc.item_count += m.count_ex_na + m.na_count;
            acc.complying_count += m.complying_count;
            acc.need_improvement_count += m.need_improvement_count;
            acc.nc_count += m.nc_count;
            acc.na_count += m.na_count;
            acc.count_ex_na += m.count_ex_na;
            acc.total_weightage += s.weightage;
            acc
        });

    totals.compliance_rate = if totals.count_ex_na == 0 {
        0.0
    } else {
        totals.complying_count as f64 / totals.count_ex_na as f64
    };
    totals
}
