//! The `hygiene validate` command.

use std::path::PathBuf;

use anyhow::Result;

use hygiene_core::config::load_config_from;
use hygiene_core::parser::{load_audits, validate_audit};

pub fn execute(audit_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let audits = load_audits(&audit_path)?;

    let mut total_warnings = 0;

    for audit in &audits {
        println!(
            "Audit: {} ({} sections, {} items)",
            audit.header.id,
            audit.sections.len(),
            audit.item_count()
        );

        let warnings = validate_audit(audit, config.weightage_tolerance);
        for w in &warnings {
            let prefix = match (&w.section_id, &w.item_id) {
                (Some(s), Some(i)) => format!("  [{s}/{i}]"),
                (Some(s), None) => format!("  [{s}]"),
                _ => "  ".to_string(),
            };
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All audits valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
