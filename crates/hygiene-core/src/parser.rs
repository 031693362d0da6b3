//! TOML audit file parser.
//!
//! Loads audits from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::answer::{answer_from_id, answer_to_id, points_for_answer, Answer, ANSWERS};
use crate::error::AuditError;
use crate::model::{Audit, AuditHeader, Item, ScoreSummary, Section, SectionWithItems};

/// Intermediate TOML structure for parsing audit files.
#[derive(Debug, Deserialize)]
struct TomlAuditFile {
    audit: TomlAuditHeader,
    #[serde(default)]
    score_summary: Option<TomlScoreSummary>,
    #[serde(default)]
    sections: Vec<TomlSection>,
}

#[derive(Debug, Deserialize)]
struct TomlAuditHeader {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    client_name: String,
    #[serde(default)]
    hotel_name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    inspector: String,
    #[serde(default)]
    inspection_body: String,
    #[serde(default)]
    reviewed_by: String,
    #[serde(default)]
    date_of_audit: Option<String>,
    #[serde(default)]
    issue_date: Option<String>,
    #[serde(default)]
    average_floor_audit: Option<f64>,
    #[serde(default)]
    total_mark_floor_audit: Option<f64>,
    #[serde(default)]
    total_mark_for_sampling: Option<f64>,
    #[serde(default)]
    overall_quality: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TomlScoreSummary {
    id: String,
    #[serde(default)]
    company_id: String,
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    item: String,
    #[serde(default)]
    percentage_per_section: f64,
    #[serde(default)]
    minor_nc: u32,
    #[serde(default)]
    major_nc: u32,
}

#[derive(Debug, Deserialize)]
struct TomlSection {
    id: String,
    name: String,
    weightage: f64,
    #[serde(default)]
    items: Vec<TomlItem>,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: String,
    #[serde(default)]
    question: String,
    #[serde(default)]
    comment: Option<String>,
    tpp: f64,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    answer_id: Option<u32>,
    #[serde(default)]
    points: Option<f64>,
}

/// Parse a single TOML file into an `Audit`.
pub fn parse_audit(path: &Path) -> Result<Audit> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read audit file: {}", path.display()))?;

    parse_audit_str(&content, path)
}

/// Parse a TOML string into an `Audit` (useful for testing).
pub fn parse_audit_str(content: &str, source_path: &Path) -> Result<Audit> {
    let parsed: TomlAuditFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let header = AuditHeader {
        date_of_audit: parse_date("audit", parsed.audit.date_of_audit.as_deref())?,
        issue_date: parse_date("issue", parsed.audit.issue_date.as_deref())?,
        id: parsed.audit.id,
        name: parsed.audit.name,
        client_name: parsed.audit.client_name,
        hotel_name: parsed.audit.hotel_name,
        address: parsed.audit.address,
        inspector: parsed.audit.inspector,
        inspection_body: parsed.audit.inspection_body,
        reviewed_by: parsed.audit.reviewed_by,
        average_floor_audit: parsed.audit.average_floor_audit,
        total_mark_floor_audit: parsed.audit.total_mark_floor_audit,
        total_mark_for_sampling: parsed.audit.total_mark_for_sampling,
        overall_quality: parsed.audit.overall_quality,
    };

    let score_summary = parsed.score_summary.map(|s| ScoreSummary {
        id: s.id,
        company_id: s.company_id,
        user_id: s.user_id,
        item: s.item,
        percentage_per_section: s.percentage_per_section,
        minor_nc: s.minor_nc,
        major_nc: s.major_nc,
    });

    let sections = parsed
        .sections
        .into_iter()
        .map(|s| {
            let items = s
                .items
                .into_iter()
                .map(|i| {
                    let answer_id = resolve_answer_id(&i.id, i.answer.as_deref(), i.answer_id)?;
                    Ok(Item {
                        id: i.id,
                        section_id: s.id.clone(),
                        question: i.question,
                        comment: i.comment,
                        tpp: i.tpp,
                        answer_id,
                        points: i.points,
                    })
                })
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("in section '{}'", s.id))?;

            Ok(SectionWithItems {
                section: Section::new(s.id, s.name, s.weightage),
                items,
            })
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid audit: {}", source_path.display()))?;

    Ok(Audit {
        header,
        score_summary,
        sections,
    })
}

/// Combine the `answer` label and `answer_id` fields of an item.
///
/// An out-of-range `answer_id` is kept as-is; it resolves to NA at scoring
/// time and `validate_audit` reports it.
fn resolve_answer_id(
    item_id: &str,
    label: Option<&str>,
    answer_id: Option<u32>,
) -> Result<Option<u32>, AuditError> {
    let from_label = label.map(str::parse::<Answer>).transpose()?;
    match (from_label, answer_id) {
        (Some(answer), Some(id)) if answer_from_id(id) != answer => {
            Err(AuditError::ConflictingAnswer {
                item_id: item_id.to_string(),
                label: answer.to_string(),
                answer_id: id,
            })
        }
        (_, Some(id)) => Ok(Some(id)),
        (Some(answer), None) => Ok(Some(answer_to_id(answer))),
        (None, None) => Ok(None),
    }
}

fn parse_date(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, AuditError> {
    value
        .map(|v| {
            NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").map_err(|_| {
                AuditError::InvalidDate {
                    field,
                    value: v.to_string(),
                }
            })
        })
        .transpose()
}

/// Recursively load all `.toml` audit files from a directory.
pub fn load_audit_directory(dir: &Path) -> Result<Vec<Audit>> {
    let mut audits = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            audits.extend(load_audit_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_audit(&path) {
                Ok(audit) => audits.push(audit),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(audits)
}

/// Load a single audit file, or every audit under a directory.
pub fn load_audits(path: &Path) -> Result<Vec<Audit>> {
    if path.is_dir() {
        load_audit_directory(path)
    } else {
        Ok(vec![parse_audit(path)?])
    }
}

/// A warning from audit validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The section ID (if applicable).
    pub section_id: Option<String>,
    /// The item ID (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn audit(message: impl Into<String>) -> Self {
        Self {
            section_id: None,
            item_id: None,
            message: message.into(),
        }
    }

    fn section(section_id: &str, message: impl Into<String>) -> Self {
        Self {
            section_id: Some(section_id.to_string()),
            item_id: None,
            message: message.into(),
        }
    }

    fn item(section_id: &str, item_id: &str, message: impl Into<String>) -> Self {
        Self {
            section_id: Some(section_id.to_string()),
            item_id: Some(item_id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate an audit for data-entry issues.
///
/// Scoring does not depend on these checks; they only surface input that
/// the engine will handle by its default rules.
pub fn validate_audit(audit: &Audit, weightage_tolerance: f64) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let total = audit.total_weightage();
    if !audit.sections.is_empty() && (total - 100.0).abs() > weightage_tolerance {
        warnings.push(ValidationWarning::audit(format!(
            "section weightages sum to {total}, expected 100"
        )));
    }

    let mut seen_sections = HashSet::new();
    let mut seen_items = HashSet::new();

    for s in &audit.sections {
        let sid = s.section.id.as_str();

        if !seen_sections.insert(sid) {
            warnings.push(ValidationWarning::section(
                sid,
                format!("duplicate section ID: {sid}"),
            ));
        }
        if !(0.0..=100.0).contains(&s.section.weightage) {
            warnings.push(ValidationWarning::section(
                sid,
                format!("weightage {} is outside 0-100", s.section.weightage),
            ));
        }
        if s.items.is_empty() {
            warnings.push(ValidationWarning::section(sid, "section has no items"));
        }

        for item in &s.items {
            warnings.extend(validate_item(sid, item));
            if !seen_items.insert(item.id.as_str()) {
                warnings.push(ValidationWarning::item(
                    sid,
                    &item.id,
                    format!("duplicate item ID: {}", item.id),
                ));
            }
        }
    }

    warnings
}

fn validate_item(section_id: &str, item: &Item) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |message: String| {
        warnings.push(ValidationWarning::item(section_id, &item.id, message));
    };

    if item.tpp < 0.0 {
        warn(format!("tpp {} is negative", item.tpp));
    }

    let Some(answer_id) = item.answer_id else {
        warn("item is unanswered and will be scored as NA".into());
        return warnings;
    };
    if !ANSWERS.iter().any(|(id, _)| *id == answer_id) {
        warn(format!("unknown answer_id {answer_id}, treated as NA"));
        return warnings;
    }

    let answer = item.answer();
    if answer.is_na() {
        return warnings;
    }
    match item.points {
        None => warn(format!("{answer} item has no points, scored as 0")),
        Some(points) => {
            if points < 0.0 {
                warn(format!("points {points} is negative"));
            }
            if points > item.tpp {
                warn(format!("points {points} exceed tpp {}", item.tpp));
            }
            let expected = points_for_answer(answer, item.tpp);
            if points != expected {
                warn(format!(
                    "points {points} differ from {expected} expected for {answer}"
                ));
            }
        }
    }

    warnings
}
