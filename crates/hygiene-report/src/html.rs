//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use hygiene_core::report::{AuditReport, SectionResult};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn score_class(score: f64) -> &'static str {
    if score >= 80.0 {
        "pass"
    } else if score >= 50.0 {
        "warn"
    } else {
        "fail"
    }
}

/// Generate an HTML report from a scored audit.
pub fn generate_html(report: &AuditReport) -> String {
    let mut html = String::new();
    let title = if report.audit.name.is_empty() {
        &report.audit.id
    } else {
        &report.audit.name
    };

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Food hygiene audit: {}</title>\n",
        html_escape(title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    let audit_date = report
        .audit
        .date_of_audit
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    html.push_str(&format!(
        "<p class=\"meta\">Client: <strong>{}</strong> | Site: {} | Inspector: {} | Audit date: {}</p>\n",
        html_escape(&report.audit.client_name),
        html_escape(&report.audit.hotel_name),
        html_escape(&report.audit.inspector),
        audit_date,
    ));
    html.push_str(&format!(
        "<p class=\"meta\">{} sections | {} items | generated {}</p>\n",
        report.audit.section_count,
        report.audit.item_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    let recorded: Vec<String> = [
        ("Floor audit average", report.audit.average_floor_audit),
        ("Floor audit total", report.audit.total_mark_floor_audit),
        ("Sampling total", report.audit.total_mark_for_sampling),
        ("Overall quality", report.audit.overall_quality),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| format!("{label}: {v}")))
    .collect();
    if !recorded.is_empty() {
        html.push_str(&format!(
            "<p class=\"meta\">Recorded: {}</p>\n",
            recorded.join(" | ")
        ));
    }
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str(&format!(
        "<p class=\"overall {}\">Overall compliance: <strong>{:.1}%</strong></p>\n",
        score_class(report.overall_score),
        report.overall_score
    ));

    let totals = &report.totals;
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Complying</th><th>Need Improvement</th><th>NC</th><th>NA</th><th>Compliance rate</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td></tr></tbody></table>\n",
        totals.complying_count,
        totals.need_improvement_count,
        totals.nc_count,
        totals.na_count,
        totals.compliance_rate * 100.0,
    ));

    if !report.sections.is_empty() {
        html.push_str(&generate_bar_chart(&report.sections));
    }

    html.push_str("</section>\n");

    // Per-section metrics
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Sections</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr>");
    for (col, heading) in [
        "Section",
        "Weightage",
        "Complying",
        "Need Impr.",
        "NC",
        "NA",
        "Score/Item",
        "Markdown",
        "Corrected",
        "Wgt Pts (md)",
    ]
    .iter()
    .enumerate()
    {
        html.push_str(&format!("<th onclick=\"sortTable({col})\">{heading}</th>"));
    }
    html.push_str("</tr></thead>\n");
    html.push_str("<tbody>\n");

    for s in &report.sections {
        let m = &s.metrics;
        let class = score_class(m.corrected_score);
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.1}%</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td><td>{:.3}</td><td class=\"{}\">{:.1}%</td><td>{:.2}</td></tr>\n",
            html_escape(&s.name),
            s.weightage,
            m.complying_count,
            m.need_improvement_count,
            m.nc_count,
            m.na_count,
            m.score_per_item,
            m.markdown_correction,
            class,
            m.corrected_score,
            m.weighted_points_markdown,
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &AuditReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(sections: &[SectionResult]) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 200;

    let total_height = sections.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, section) in sections.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let score = section.metrics.corrected_score;
        let width = (score.clamp(0.0, 100.0) / 100.0 * max_width as f64) as usize;

        let color = match score_class(score) {
            "pass" => "#22c55e",
            "warn" => "#eab308",
            _ => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&section.name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --warn: #fef9c3; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --warn: #713f12; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.overall { font-size: 1.5rem; padding: 0.5rem 1rem; border-radius: 8px; display: inline-block; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.warn { background: var(--warn); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    const cmp = isNaN(na) || isNaN(nb) ? va.localeCompare(vb) : na - nb;
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
