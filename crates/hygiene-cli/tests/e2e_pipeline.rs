//! End-to-end pipeline tests: parse, validate, score, persist, render.

use std::path::{Path, PathBuf};

use hygiene_core::engine::{score_audit, score_audit_with, NoopReporter, ScoreOptions};
use hygiene_core::parser::{parse_audit, parse_audit_str, validate_audit};
use hygiene_core::report::AuditReport;
use hygiene_report::{generate_html, write_html_report};

fn sample(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../audits")
        .join(name)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn sample_audit_scores_as_expected() {
    let audit = parse_audit(&sample("kitchen-hygiene.toml")).unwrap();
    assert!(validate_audit(&audit, 0.01).is_empty());

    let report = score_audit(&audit, &NoopReporter);

    assert_eq!(report.sections.len(), 3);
    assert_eq!(report.audit.item_count, 10);

    let hygiene = report.section("personal-hygiene").unwrap();
    assert!(approx(hygiene.metrics.score_per_item, 80.0));
    assert!(approx(hygiene.metrics.markdown_correction, 2.5 / 3.0));
    assert!(approx(hygiene.metrics.weighted_points_markdown, 5.0));

    let storage = report.section("storage").unwrap();
    assert_eq!(storage.metrics.na_count, 1);
    assert_eq!(storage.metrics.count_ex_na, 3);
    assert!(approx(storage.metrics.total_tpp, 25.0));
    assert!(approx(storage.metrics.markdown_correction, 0.5));
    assert!(approx(storage.metrics.corrected_score, 24.0));

    assert!(approx(report.overall_score, 13.65 / 26.5 * 100.0));
    assert_eq!(report.totals.nc_count, 1);
    assert_eq!(report.totals.na_count, 1);
    assert_eq!(report.score_summary.as_ref().unwrap().major_nc, 1);
}

#[test]
fn report_survives_save_and_load() {
    let audit = parse_audit(&sample("kitchen-hygiene-followup.toml")).unwrap();
    let report = score_audit(&audit, &NoopReporter);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/report.json");
    report.save_json(&path).unwrap();

    let loaded = AuditReport::load_json(&path).unwrap();
    assert_eq!(loaded.id, report.id);
    assert_eq!(loaded.audit.id, "grand-hotel-2026-q2");
    assert_eq!(loaded.sections.len(), report.sections.len());
    assert!(approx(loaded.overall_score, report.overall_score));
    assert_eq!(
        loaded.section("cleaning").unwrap().metrics,
        report.section("cleaning").unwrap().metrics
    );
}

#[test]
fn html_report_from_sample() {
    let audit = parse_audit(&sample("kitchen-hygiene.toml")).unwrap();
    let report = score_audit(&audit, &NoopReporter);

    let html = generate_html(&report);
    assert!(html.contains("Grand Hotel main kitchen, Q1"));
    assert!(html.contains("Food Storage"));
    assert!(html.contains("51.5%"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.html");
    write_html_report(&report, &path).unwrap();
    assert!(path.exists());
}

#[test]
fn missing_points_derived_only_when_asked() {
    let toml = r#"
[audit]
id = "handwritten"

[[sections]]
id = "s1"
name = "Receiving"
weightage = 100

[[sections.items]]
id = "i1"
tpp = 10
answer = "Complying"

[[sections.items]]
id = "i2"
tpp = 10
answer = "Need Improvement"
"#;
    let audit = parse_audit_str(toml, Path::new("handwritten.toml")).unwrap();
    assert_eq!(validate_audit(&audit, 0.01).len(), 2);

    let plain = score_audit(&audit, &NoopReporter);
    assert!(approx(plain.overall_score, 0.0));

    let options = ScoreOptions {
        derive_missing_points: true,
    };
    let derived = score_audit_with(&audit, &options, &NoopReporter);
    // (10 + 5) / 20 = 75%, corrected by (2 - 0.5) / 2
    assert!(approx(derived.overall_score, 75.0 * 0.75));
}

#[test]
fn unanswered_items_score_as_na() {
    let toml = r#"
[audit]
id = "partial"

[[sections]]
id = "s1"
name = "Service"
weightage = 100

[[sections.items]]
id = "i1"
tpp = 10
answer = "Complying"
points = 10

[[sections.items]]
id = "i2"
tpp = 10
"#;
    let audit = parse_audit_str(toml, Path::new("partial.toml")).unwrap();
    let report = score_audit(&audit, &NoopReporter);

    let section = report.section("s1").unwrap();
    assert_eq!(section.metrics.na_count, 1);
    assert!(approx(section.metrics.corrected_score, 100.0));
    assert!(approx(report.overall_score, 100.0));
}

#[test]
fn audit_directory_scores_every_file() {
    let audits = hygiene_core::parser::load_audits(&sample("")).unwrap();
    assert_eq!(audits.len(), 2);

    let scores: Vec<f64> = audits
        .iter()
        .map(|a| score_audit(a, &NoopReporter).overall_score)
        .collect();
    assert!(scores.iter().all(|s| (0.0..=100.0).contains(s)));
}
