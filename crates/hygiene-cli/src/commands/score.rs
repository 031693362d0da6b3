//! The `hygiene score` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use hygiene_core::config::load_config_from;
use hygiene_core::engine::{score_audit_with, ProgressReporter, ScoreOptions};
use hygiene_core::parser::{load_audits, validate_audit};
use hygiene_core::report::{AuditReport, SectionResult};
use hygiene_report::write_html_report;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_section_scored(&self, result: &SectionResult) {
        eprintln!(
            "  Scored: {} ({}%) corrected {:.1}%",
            result.name, result.weightage, result.metrics.corrected_score
        );
    }

    fn on_audit_complete(&self, audit_id: &str, overall_score: f64, elapsed: Duration) {
        eprintln!(
            "\nComplete: {audit_id} overall {overall_score:.1}% ({}us)",
            elapsed.as_micros()
        );
    }
}

pub fn execute(
    audit_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    derive_points: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let format = format.unwrap_or_else(|| config.default_format.clone());
    let options = ScoreOptions {
        derive_missing_points: derive_points || config.derive_missing_points,
    };

    let audits = load_audits(&audit_path)?;
    anyhow::ensure!(
        !audits.is_empty(),
        "no audits found at {}",
        audit_path.display()
    );

    let formats: Vec<&str> = match format.as_str() {
        "all" => vec!["json", "html"],
        "none" => vec![],
        other => other.split(',').map(str::trim).collect(),
    };

    let reporter = ConsoleReporter;

    for audit in &audits {
        eprintln!(
            "hygiene v{}: scoring {} ({} sections, {} items)",
            env!("CARGO_PKG_VERSION"),
            audit.header.id,
            audit.sections.len(),
            audit.item_count()
        );

        for w in validate_audit(audit, config.weightage_tolerance) {
            let location = match (&w.section_id, &w.item_id) {
                (Some(s), Some(i)) => format!(" [{s}/{i}]"),
                (Some(s), None) => format!(" [{s}]"),
                _ => String::new(),
            };
            eprintln!("  WARNING{location}: {}", w.message);
        }

        let report = score_audit_with(audit, &options, &reporter);

        print_summary(&report);

        if formats.is_empty() {
            continue;
        }

        tracing::debug!(output = %output.display(), ?formats, "writing reports");
        std::fs::create_dir_all(&output)?;
        let stem = report_stem(&report);

        for fmt in &formats {
            match *fmt {
                "json" => {
                    let path = output.join(format!("{stem}.json"));
                    report.save_json(&path)?;
                    eprintln!("Report saved to: {}", path.display());
                }
                "html" => {
                    let path = output.join(format!("{stem}.html"));
                    write_html_report(&report, &path)?;
                    eprintln!("HTML report: {}", path.display());
                }
                _ => {
                    eprintln!("Unknown format: {fmt}");
                }
            }
        }
    }

    Ok(())
}

/// File name stem for a report: audit id, timestamp, and the start of the report id.
fn report_stem(report: &AuditReport) -> String {
    let report_id = report.id.simple().to_string();
    format!(
        "{}-{}-{}",
        sanitize(&report.audit.id),
        report.created_at.format("%Y-%m-%dT%H%M%S"),
        &report_id[..8]
    )
}

/// Make an audit id safe to use as a file name.
fn sanitize(id: &str) -> String {
    let cleaned: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "audit".to_string()
    } else {
        cleaned
    }
}

fn print_summary(report: &AuditReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "Section",
        "Weightage",
        "C / NI / NC / NA",
        "Score/Item",
        "Markdown",
        "Corrected",
        "Wgt Pts (md)",
    ]);

    for s in &report.sections {
        let m = &s.metrics;
        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(format!("{:.1}%", s.weightage)),
            Cell::new(format!(
                "{} / {} / {} / {}",
                m.complying_count, m.need_improvement_count, m.nc_count, m.na_count
            )),
            Cell::new(format!("{:.1}%", m.score_per_item)),
            Cell::new(format!("{:.3}", m.markdown_correction)),
            Cell::new(format!("{:.1}%", m.corrected_score)),
            Cell::new(format!("{:.2}", m.weighted_points_markdown)),
        ]);
    }

    println!("{table}");
    println!(
        "Audit: {} | Overall score: {:.1}%",
        report.audit.id, report.overall_score
    );
}
