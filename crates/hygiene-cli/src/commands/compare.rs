//! The `hygiene compare` command.

use std::path::PathBuf;

use anyhow::Result;

use hygiene_core::config::load_config_from;
use hygiene_core::report::AuditReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    threshold: Option<f64>,
    fail_on_regression: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let threshold = match threshold {
        Some(t) => t,
        None => load_config_from(config_path.as_deref())?.regression_threshold,
    };
    anyhow::ensure!(threshold >= 0.0, "threshold must not be negative");

    let baseline = AuditReport::load_json(&baseline_path)?;
    let current = AuditReport::load_json(&current_path)?;

    let report = current.compare(&baseline, threshold);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Overall: {:.1}% -> {:.1}% ({:+.1})",
                report.baseline_overall, report.current_overall, report.overall_delta
            );
            println!(
                "Comparison: {} regressions, {} improvements, {} unchanged",
                report.regressions.len(),
                report.improvements.len(),
                report.unchanged
            );

            if !report.regressions.is_empty() {
                println!("\nRegressions:");
                for r in &report.regressions {
                    println!(
                        "  {} ({}) {:.1}% -> {:.1}% ({:+.1})",
                        r.name, r.section_id, r.baseline_score, r.current_score, r.delta
                    );
                }
            }

            if !report.improvements.is_empty() {
                println!("\nImprovements:");
                for i in &report.improvements {
                    println!(
                        "  {} ({}) {:.1}% -> {:.1}% ({:+.1})",
                        i.name, i.section_id, i.baseline_score, i.current_score, i.delta
                    );
                }
            }

            if report.new_sections > 0 {
                println!("\n{} new section(s)", report.new_sections);
            }
            if report.removed_sections > 0 {
                println!("{} removed section(s)", report.removed_sections);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
